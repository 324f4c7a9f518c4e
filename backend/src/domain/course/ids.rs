//! Typed identifiers for the course aggregate and its nested entities.
//!
//! Each identifier wraps a UUID so a question id can never be passed where a
//! content id is expected. Parsing failures surface as
//! [`IdParseError`], which adapters map to `invalid_reference`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raised when an identifier string is not a valid UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} must be a valid UUID (got `{value}`)")]
pub struct IdParseError {
    kind: &'static str,
    value: String,
}

impl IdParseError {
    /// Human-readable label of the identifier that failed to parse.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// The rejected input.
    pub fn value(&self) -> &str {
        self.value.as_str()
    }
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident => $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse a textual identifier, trimming nothing.
            pub fn parse(raw: &str) -> Result<Self, IdParseError> {
                Uuid::parse_str(raw).map(Self).map_err(|_| IdParseError {
                    kind: $kind,
                    value: raw.to_owned(),
                })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id! {
    /// Identifier of a course aggregate.
    CourseId => "course id"
}
define_id! {
    /// Identifier of a content item inside a course.
    ContentId => "content id"
}
define_id! {
    /// Identifier of a question inside a content item.
    QuestionId => "question id"
}
define_id! {
    /// Identifier of a review inside a course.
    ReviewId => "review id"
}
