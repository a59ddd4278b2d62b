use std::fmt;

use serde::{Deserialize, Serialize};

/// The side a team plays during a round.
#[allow(clippy::upper_case_acronyms)]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::FromStr,
    derive_more::IsVariant,
)]
pub enum Side {
    /// Attacking side
    T,
    /// Defending side
    CT,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl Side {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Side::T => "T",
            Side::CT => "CT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        assert_eq!("T".parse::<Side>().unwrap(), Side::T);
        assert_eq!("CT".parse::<Side>().unwrap(), Side::CT);
        assert_eq!(Side::CT.to_string(), "CT");
        assert!("Spectator".parse::<Side>().is_err());
    }

    #[test]
    fn test_serde_uses_short_names() {
        let sides: Vec<Side> = serde_json::from_str(r#"["T", "CT"]"#).unwrap();
        assert_eq!(sides, vec![Side::T, Side::CT]);
    }
}
