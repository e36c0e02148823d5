//! Macro for implementing wire conversions for platform enums
//!
//! The platform encodes enum-like codes as upper-case strings
//! (`"OK"`, `"API_KEY_TYPE__SERVING"`, ...). This macro generates a single
//! lookup table per enum and derives `as_str`, `Display`, `FromStr`,
//! `Serialize` and `Deserialize` from it, so the string-to-enum coercion
//! happens exactly once at the decode boundary.
//!
//! # Example
//!
//! ```rust
//! use vectara_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Semantics {
//!     Default,
//!     Query,
//! }
//!
//! impl_wire_enum_conversions!(Semantics {
//!     Default => "DEFAULT",
//!     Query => "QUERY",
//! });
//!
//! assert_eq!(Semantics::Query.to_string(), "QUERY");
//! assert_eq!("DEFAULT".parse::<Semantics>().unwrap(), Semantics::Default);
//! ```
//!
//! Enums that must survive codes this SDK does not know about declare a
//! `fallback` variant holding the raw string, which keeps round-trips
//! lossless:
//!
//! ```rust
//! use vectara_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, PartialEq, Eq)]
//! pub enum Code {
//!     Ok,
//!     Other(String),
//! }
//!
//! impl_wire_enum_conversions!(Code { Ok => "OK" } fallback Other);
//!
//! assert_eq!("NEW_CODE".parse::<Code>().unwrap(), Code::Other("NEW_CODE".into()));
//! assert_eq!(Code::Other("NEW_CODE".into()).to_string(), "NEW_CODE");
//! ```

/// Implements wire string conversions for platform enums
///
/// This macro generates:
/// - `as_str`: the exact wire representation
/// - Display trait: writes the wire representation
/// - FromStr trait: exact, case-sensitive lookup
/// - Serialize / Deserialize: string encoding through the same table
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their wire strings
/// * `fallback $other` - Optional tuple variant receiving unknown codes
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl $enum_name {
            /// Wire representation of this value
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                match s {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }

        $crate::impl_wire_enum_conversions!(@common $enum_name);

        impl<'de> ::serde::Deserialize<'de> for $enum_name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                raw.parse().map_err(::serde::de::Error::custom)
            }
        }
    };

    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? } fallback $other:ident) => {
        impl $enum_name {
            /// Wire representation of this value
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $str,)+
                    Self::$other(raw) => raw.as_str(),
                }
            }

            /// Whether this code is one the SDK has a name for
            pub fn is_known(&self) -> bool {
                !matches!(self, Self::$other(_))
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Ok(match s {
                    $($str => Self::$variant,)+
                    other => Self::$other(other.to_string()),
                })
            }
        }

        $crate::impl_wire_enum_conversions!(@common $enum_name);

        impl<'de> ::serde::Deserialize<'de> for $enum_name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                Ok(match raw.parse() {
                    Ok(value) => value,
                    Err(never) => match never {},
                })
            }
        }
    };

    (@common $enum_name:ident) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::serde::Serialize for $enum_name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}
