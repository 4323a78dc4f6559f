// This is the root of FomodCore, a document model, parser and installer engine for FOMOD packages.
// A package is read into a *Root*, which can be edited, linted, written back, or walked with an *Installer*.

#[macro_use]
extern crate log;

pub mod conditions;
pub mod enums;
pub mod error;
pub mod installer;
pub mod io;
pub mod parser;
pub mod render;
pub mod tree;
pub mod validation;
pub mod version;
pub mod warnings;

mod schema;

pub use conditions::{evaluate, Predicates, StaticPredicates};
pub use enums::{order_list, ConditionType, FileType, FomodEnum, GroupType, OptionType, Order};
pub use error::{FailedCondition, InstallerError, MutationError, ParseError};
pub use installer::{Installer, InstallerConfig, InstallerState, ResolvedFile, Selection, Step};
pub use parser::{parse, parse_text, write, Destination, ParseOptions, Parsed, Source};
pub use render::Render;
pub use tree::*;
pub use validation::{validate, validate_with, Visitor};
pub use warnings::ValidationWarning;

#[cfg(test)]
mod tests;
