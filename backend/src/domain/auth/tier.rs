//! User tier definitions.
//!
//! The tier is the access class of a user and, together with the quota,
//! decides whether premium templates may be used.

use serde::{Deserialize, Serialize};

/// Access tier of a user.
///
/// Integer values are part of the token wire format and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Unrecognized value read from a token or record.
    Unknown,

    /// Default tier for new users.
    Free,

    /// Paid tier, granted once a payment is resolved as done.
    Premium,

    /// A payment was submitted and awaits resolution.
    Pending,
}

impl Tier {
    /// Returns the integer wire value.
    pub fn value(&self) -> i32 {
        match self {
            Tier::Unknown => 0,
            Tier::Free => 1,
            Tier::Premium => 2,
            Tier::Pending => 3,
        }
    }

    /// Maps an integer wire value back to a tier.
    pub fn from_value(value: i32) -> Self {
        match value {
            1 => Tier::Free,
            2 => Tier::Premium,
            3 => Tier::Pending,
            _ => Tier::Unknown,
        }
    }

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            Tier::Unknown => "unknown",
            Tier::Free => "free",
            Tier::Premium => "premium",
            Tier::Pending => "pending",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_round_trip() {
        for tier in [Tier::Unknown, Tier::Free, Tier::Premium, Tier::Pending] {
            assert_eq!(Tier::from_value(tier.value()), tier);
        }
    }

    #[test]
    fn unrecognized_wire_value_is_unknown() {
        assert_eq!(Tier::from_value(42), Tier::Unknown);
        assert_eq!(Tier::from_value(-1), Tier::Unknown);
    }

    #[test]
    fn tier_serializes_lowercase() {
        let json = serde_json::to_string(&Tier::Premium).unwrap();
        assert_eq!(json, "\"premium\"");
    }

    #[test]
    fn tier_deserializes_from_lowercase() {
        let tier: Tier = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(tier, Tier::Pending);
    }
}
