//! Macros for reducing boilerplate code

/// Declares an open string enumeration
///
/// The services document a fixed set of values for many string fields but
/// add new ones over time. The generated enum has one variant per documented
/// value plus `Other(String)`, which carries anything else verbatim, so
/// values round-trip through serde unchanged. Matching is case-sensitive.
///
/// This macro generates:
/// - `as_str`, `is_documented` and a `DOCUMENTED` list
/// - `Display`, `FromStr` (infallible), `From<&str>` and `From<String>`
/// - `Serialize` / `Deserialize` as a plain JSON string
///
/// # Example
///
/// ```rust
/// use ibmcloud_common::string_enum;
///
/// string_enum! {
///     /// Policy state
///     pub enum State {
///         /// Active
///         Active => "active",
///         /// Deleted
///         Deleted => "deleted",
///     }
/// }
///
/// assert_eq!(State::from("active"), State::Active);
/// assert_eq!(State::from("archived"), State::Other("archived".to_string()));
/// assert_eq!(State::Deleted.to_string(), "deleted");
/// ```
#[macro_export]
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A value outside the documented set, kept verbatim
            Other(::std::string::String),
        }

        impl $name {
            /// Every documented wire value
            pub const DOCUMENTED: &'static [&'static str] = &[$($value),+];

            /// Wire representation
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $value,)+
                    Self::Other(value) => value.as_str(),
                }
            }

            /// False for values carried in `Other`
            pub fn is_documented(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::convert::From<&str> for $name {
            fn from(value: &str) -> Self {
                match value {
                    $($value => Self::$variant,)+
                    other => Self::Other(other.to_string()),
                }
            }
        }

        impl ::std::convert::From<::std::string::String> for $name {
            fn from(value: ::std::string::String) -> Self {
                Self::from(value.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::std::convert::Infallible;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                Ok(Self::from(s))
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let value = <::std::string::String as ::serde::Deserialize>::deserialize(deserializer)?;
                Ok(Self::from(value))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    string_enum! {
        enum TestRole {
            Admin => "bluadmin",
            User => "bluuser",
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(TestRole::Admin.to_string(), "bluadmin");
        assert_eq!(TestRole::User.to_string(), "bluuser");
    }

    #[test]
    fn test_from_str_is_case_sensitive() {
        assert_eq!(TestRole::from_str("bluadmin"), Ok(TestRole::Admin));
        assert_eq!(TestRole::from("BLUADMIN"), TestRole::Other("BLUADMIN".to_string()));
    }

    #[test]
    fn test_unknown_values_pass_through_serde() {
        let parsed: TestRole = serde_json::from_str("\"operator\"").unwrap();
        assert_eq!(parsed, TestRole::Other("operator".to_string()));
        assert!(!parsed.is_documented());
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"operator\"");

        let known: TestRole = serde_json::from_str("\"bluuser\"").unwrap();
        assert!(known.is_documented());
        assert_eq!(TestRole::DOCUMENTED, &["bluadmin", "bluuser"]);
    }
}
