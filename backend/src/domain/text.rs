//! Helper macro for trimmed, non-empty string newtypes.

/// Declare a newtype over `String` whose constructor trims the input and
/// rejects blank values with the given error variant.
macro_rules! non_empty_text {
    ($(#[$meta:meta])* $name:ident, $err:ident :: $variant:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Trim and validate the input.
            pub fn new(value: impl AsRef<str>) -> Result<Self, $err> {
                let trimmed = value.as_ref().trim();
                if trimmed.is_empty() {
                    return Err($err::$variant);
                }
                Ok(Self(trimmed.to_owned()))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

pub(crate) use non_empty_text;
