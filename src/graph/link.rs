//! Directed, weighted links between entity identities

use super::space::GraphError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of a linked entity (a bundle or a phase block)
///
/// Serializes as a plain string. The space does not check that an id
/// belongs to a known entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Link strength, guaranteed to lie in `[0.0, 1.0]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Strength(f64);

/// Strength of bundle → block links unless configured otherwise
pub const DEFAULT_LINK_STRENGTH: Strength = Strength(0.9);

impl Strength {
    /// Validate a raw strength. Out-of-range and NaN values are rejected, never clamped.
    pub fn new(value: f64) -> Result<Self, GraphError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(GraphError::InvalidStrength(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Strength {
    type Error = GraphError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Strength> for f64 {
    fn from(s: Strength) -> Self {
        s.0
    }
}

/// A directed weighted edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub source: EntityId,
    pub target: EntityId,
    pub strength: Strength,
    pub created_at: DateTime<Utc>,
}

impl Link {
    pub fn new(source: EntityId, target: EntityId, strength: Strength) -> Self {
        Self {
            source,
            target,
            strength,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strength_accepts_closed_unit_interval() {
        assert_eq!(Strength::new(0.0).unwrap().value(), 0.0);
        assert_eq!(Strength::new(1.0).unwrap().value(), 1.0);
        assert_eq!(Strength::new(0.9).unwrap().value(), 0.9);
    }

    #[test]
    fn strength_rejects_out_of_range_and_nan() {
        assert!(matches!(Strength::new(1.5), Err(GraphError::InvalidStrength(v)) if v == 1.5));
        assert!(Strength::new(-0.01).is_err());
        assert!(Strength::new(f64::NAN).is_err());
        assert!(Strength::new(f64::INFINITY).is_err());
    }
}
