//! This is the parent module over small utilities used by the commands, such as *Notice*.

pub mod misc;
pub mod notice;
pub mod text;
