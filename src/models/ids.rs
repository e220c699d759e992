//! Strongly-typed record identifiers
//!
//! Every collection gets its own UUID newtype so a `ClientId` can never be
//! passed where an `InvoiceId` is expected. Identifiers display in a short,
//! prefixed form (`inv-1a2b3c4d`) and can be matched back from that form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Number of UUID hex characters shown in the short form
const SHORT_LEN: usize = 8;

macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub const PREFIX: &'static str = $display_prefix;

            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// The short display form without the prefix
            pub fn short(&self) -> String {
                self.0.simple().to_string()[..SHORT_LEN].to_string()
            }

            /// Check whether user input refers to this ID
            ///
            /// Accepts the full UUID, the prefixed short form, or a bare
            /// prefix of the UUID at least four characters long.
            pub fn matches(&self, input: &str) -> bool {
                let input = input.trim().to_ascii_lowercase();
                let input = input.strip_prefix($display_prefix).unwrap_or(&input);
                if input.len() < 4 {
                    return false;
                }
                let full = self.0.to_string();
                full == input || self.0.simple().to_string().starts_with(input)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.short())
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            /// Parse a full UUID, with or without the display prefix
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(ClientId, "cli-");
define_id!(ProjectId, "prj-");
define_id!(InvoiceId, "inv-");
define_id!(TimeLogId, "log-");
