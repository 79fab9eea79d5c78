//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing a catalog ProductId where a cart-local LineItemId is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a new unique ID.
            pub fn generate() -> Self {
                Self(generate_id($prefix))
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Catalog identifiers are assigned by the backend; the prefix only
// applies to locally generated ones.
define_id!(ProductId, "prod");
define_id!(LineItemId, "li");
define_id!(OrderId, "ord");

/// Generate a random, URL-safe identifier such as `li_3q2-7wEVr3ZzK0Qd`.
fn generate_id(prefix: &str) -> String {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use rand::Rng;

    let bytes: [u8; 12] = rand::thread_rng().gen();
    format!("{}_{}", prefix, URL_SAFE_NO_PAD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("salmon-fillet");
        assert_eq!(id.as_str(), "salmon-fillet");
    }

    #[test]
    fn test_id_generation() {
        let id1 = LineItemId::generate();
        let id2 = LineItemId::generate();
        assert_ne!(id1, id2);
        assert!(id1.as_str().starts_with("li_"));
        assert!(OrderId::generate().as_str().starts_with("ord_"));
    }

    #[test]
    fn test_id_from_string() {
        let id: ProductId = "cod-loin".into();
        assert_eq!(id.as_str(), "cod-loin");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = LineItemId::new("li_abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"li_abc\"");
    }

    #[test]
    fn test_id_display() {
        let id = ProductId::new("halibut");
        assert_eq!(format!("{}", id), "halibut");
    }
}
