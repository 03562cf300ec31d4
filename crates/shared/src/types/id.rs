//! Typed IDs for type-safe entity references.
//!
//! Identifiers are owned by the backend and treated as opaque strings.
//! Using typed IDs prevents accidentally passing a `UserId` where a `RequestId` is expected.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

typed_id!(UserId, "Unique identifier for an operator or requester.");
typed_id!(RequestId, "Unique identifier for an ICT, store, or vehicle request.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_raw_value() {
        let id = RequestId::from("65a0c1d2e3f4a5b6c7d8e9f0");
        assert_eq!(id.to_string(), "65a0c1d2e3f4a5b6c7d8e9f0");
        assert_eq!(id.as_str(), "65a0c1d2e3f4a5b6c7d8e9f0");
    }

    #[test]
    fn test_serde_transparent() {
        let id: UserId = serde_json::from_str("\"u-1\"").unwrap();
        assert_eq!(id, UserId::from("u-1"));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"u-1\"");
    }
}
