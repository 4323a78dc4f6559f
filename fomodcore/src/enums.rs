// Enumerations :: The fixed vocabularies used by FOMOD attributes, and traversal ordering.

use std::{fmt::Display, str::FromStr};

use crate::error::UnknownVariant;

/// Behaviour shared by every enumeration found in a FOMOD document.
/// Each variant has exactly one on-disk spelling, and the first declared variant is the fallback.
pub trait FomodEnum: Copy + Sized + 'static {
	/// A human-readable name for this enumeration, used when building warnings.
	const NAME: &'static str;

	/// Every variant, in declaration order.
	const VARIANTS: &'static [Self];

	/// Returns the exact spelling this variant has inside a document.
	fn as_str(&self) -> &'static str;

	/// Returns the first declared variant.
	/// Parsing falls back to this when a document contains an unrecognized value.
	fn first() -> Self {
		Self::VARIANTS[0]
	}

	/// Looks up a variant by its on-disk spelling.
	fn from_attr(value: &str) -> Option<Self> {
		Self::VARIANTS.iter()
			.copied()
			.find(|v| v.as_str() == value)
	}
}

macro_rules! fomod_enum {
	(
		$(#[$meta:meta])*
		$name:ident, $label:literal {
			$($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
		}
	) => {
		$(#[$meta])*
		#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
		pub enum $name {
			$($(#[$vmeta])* $variant),+
		}

		impl FomodEnum for $name {
			const NAME: &'static str = $label;
			const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

			fn as_str(&self) -> &'static str {
				match self {
					$(Self::$variant => $text),+
				}
			}
		}

		impl Default for $name {
			fn default() -> Self {
				Self::first()
			}
		}

		impl Display for $name {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				write!(f, "{}", self.as_str())
			}
		}

		impl FromStr for $name {
			type Err = UnknownVariant;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::from_attr(s).ok_or_else(|| UnknownVariant {
					enumeration: $label,
					value: s.to_owned(),
				})
			}
		}
	};
}

fomod_enum! {
	/// How the entries of a *Conditions* node are combined.
	ConditionType, "Condition Type" {
		And => "And",
		Or => "Or",
	}
}

fomod_enum! {
	/// The state a file must be in for a file dependency to pass.
	FileType, "File Type" {
		Active => "Active",
		Inactive => "Inactive",
		Missing => "Missing",
	}
}

fomod_enum! {
	/// The order pages, groups or options are presented in.
	/// This is only applied while traversing, stored order never changes.
	Order, "Order" {
		Ascending => "Ascending",
		Descending => "Descending",
		Explicit => "Explicit",
	}
}

fomod_enum! {
	/// The selection rule a group enforces over its options.
	GroupType, "Group Type" {
		Any => "SelectAny",
		All => "SelectAll",
		AtLeastOne => "SelectAtLeastOne",
		AtMostOne => "SelectAtMostOne",
		ExactlyOne => "SelectExactlyOne",
	}
}

fomod_enum! {
	/// How an option may be interacted with by the user.
	OptionType, "Option Type" {
		Optional => "Optional",
		Required => "Required",
		Recommended => "Recommended",
		NotUsable => "NotUsable",
		CouldBeUsable => "CouldBeUsable",
	}
}

/// Sorts a list of named items according to an *Order*.
///
/// *Ascending* sorts by name, *Descending* sorts by name in reverse and *Explicit* keeps the input order.
/// Both sorts are stable, so items sharing a name keep their relative order.
pub fn order_list<T, F>(items: impl IntoIterator<Item = T>, key: F, order: Order) -> Vec<T>
where
	F: Fn(&T) -> &str,
{
	let mut items: Vec<T> = items.into_iter().collect();

	match order {
		Order::Ascending => items.sort_by(|a, b| key(a).cmp(key(b))),
		Order::Descending => items.sort_by(|a, b| key(b).cmp(key(a))),
		Order::Explicit => {},
	}

	items
}
