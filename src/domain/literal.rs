/// A closed set of string literals as they appear in the source JSON.
pub trait Literal: Sized + Copy + 'static {
    /// Every member, in declaration order.
    const ALL: &'static [Self];

    fn as_literal(&self) -> &'static str;

    fn from_literal(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_literal() == value)
    }

    fn literals() -> Vec<&'static str> {
        Self::ALL.iter().map(|v| v.as_literal()).collect()
    }
}

/// Declares a fieldless enum whose members map one-to-one onto JSON string
/// literals. Serialization renames each variant to its literal.
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $lit:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $lit)] $variant),+
        }

        impl $crate::domain::literal::Literal for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_literal(&self) -> &'static str {
                match self {
                    $($name::$variant => $lit),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::domain::literal::Literal::as_literal(self))
            }
        }
    };
}

pub(crate) use closed_enum;
