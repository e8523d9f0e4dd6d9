//! Canonical enumerations and their localized display labels
//!
//! The front-end shows localized strings; the core only ever stores the
//! canonical variants. Each enumeration has a static table mapping variants
//! to display labels per locale, used in both directions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Display language for user-facing labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl std::str::FromStr for Locale {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "ru" => Ok(Self::Ru),
            _ => Err(format!("unknown locale: {}", s)),
        }
    }
}

/// A label that matched no entry in a mapping table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {what} label: {label:?}")]
pub struct UnknownLabel {
    pub what: &'static str,
    pub label: String,
}

/// Kind of a bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BundleKind {
    Analytical,
    Streaming,
    Structural,
}

/// Phase mode a classification outcome is recorded under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseMode {
    Initialization,
    Activation,
    Observation,
}

const BUNDLE_KIND_LABELS: &[(BundleKind, Locale, &str)] = &[
    (BundleKind::Analytical, Locale::En, "Analytical"),
    (BundleKind::Streaming, Locale::En, "Streaming"),
    (BundleKind::Structural, Locale::En, "Structural"),
    (BundleKind::Analytical, Locale::Ru, "Аналитическая"),
    (BundleKind::Streaming, Locale::Ru, "Потоковая"),
    (BundleKind::Structural, Locale::Ru, "Структурная"),
];

const PHASE_MODE_LABELS: &[(PhaseMode, Locale, &str)] = &[
    (PhaseMode::Initialization, Locale::En, "Initialization"),
    (PhaseMode::Activation, Locale::En, "Activation"),
    (PhaseMode::Observation, Locale::En, "Observation"),
    (PhaseMode::Initialization, Locale::Ru, "Инициализация"),
    (PhaseMode::Activation, Locale::Ru, "Активация"),
    (PhaseMode::Observation, Locale::Ru, "Наблюдение"),
];

/// Case-insensitive lookup across every locale.
///
/// Uses Unicode lowercasing so Cyrillic labels match regardless of case.
fn lookup<T: Copy>(table: &[(T, Locale, &str)], label: &str) -> Option<T> {
    let wanted = label.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    table
        .iter()
        .find(|(_, _, display)| display.to_lowercase() == wanted)
        .map(|(value, _, _)| *value)
}

fn display<T: Copy + PartialEq>(table: &[(T, Locale, &'static str)], value: T, locale: Locale) -> &'static str {
    table
        .iter()
        .find(|(v, l, _)| *v == value && *l == locale)
        .or_else(|| table.iter().find(|(v, _, _)| *v == value))
        .map(|(_, _, label)| *label)
        .unwrap_or("")
}

impl BundleKind {
    pub const ALL: [BundleKind; 3] = [Self::Analytical, Self::Streaming, Self::Structural];

    /// Canonical name, stable across locales
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Analytical => "Analytical",
            Self::Streaming => "Streaming",
            Self::Structural => "Structural",
        }
    }

    pub fn display(self, locale: Locale) -> &'static str {
        display(BUNDLE_KIND_LABELS, self, locale)
    }

    /// Resolve any localized label, ignoring case
    pub fn from_label(label: &str) -> Option<Self> {
        lookup(BUNDLE_KIND_LABELS, label)
    }
}

impl PhaseMode {
    pub const ALL: [PhaseMode; 3] = [Self::Initialization, Self::Activation, Self::Observation];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initialization => "Initialization",
            Self::Activation => "Activation",
            Self::Observation => "Observation",
        }
    }

    pub fn display(self, locale: Locale) -> &'static str {
        display(PHASE_MODE_LABELS, self, locale)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        lookup(PHASE_MODE_LABELS, label)
    }
}

impl std::fmt::Display for BundleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for PhaseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BundleKind {
    type Err = UnknownLabel;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| UnknownLabel {
            what: "bundle kind",
            label: s.to_string(),
        })
    }
}

impl std::str::FromStr for PhaseMode {
    type Err = UnknownLabel;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| UnknownLabel {
            what: "phase mode",
            label: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_kind_matches_any_case_and_locale() {
        assert_eq!(BundleKind::from_label("Analytical"), Some(BundleKind::Analytical));
        assert_eq!(BundleKind::from_label("analytical"), Some(BundleKind::Analytical));
        assert_eq!(BundleKind::from_label("АНАЛИТИЧЕСКАЯ"), Some(BundleKind::Analytical));
        assert_eq!(BundleKind::from_label(" потоковая "), Some(BundleKind::Streaming));
        assert_eq!(BundleKind::from_label("bogus"), None);
        assert_eq!(BundleKind::from_label(""), None);
    }

    #[test]
    fn phase_mode_matches_any_case_and_locale() {
        assert_eq!("активация".parse::<PhaseMode>(), Ok(PhaseMode::Activation));
        assert_eq!("OBSERVATION".parse::<PhaseMode>(), Ok(PhaseMode::Observation));
        let err = "later".parse::<PhaseMode>().unwrap_err();
        assert_eq!(err.what, "phase mode");
    }

    #[test]
    fn display_roundtrips_through_lookup() {
        for locale in [Locale::En, Locale::Ru] {
            for kind in BundleKind::ALL {
                assert_eq!(BundleKind::from_label(kind.display(locale)), Some(kind));
            }
            for phase in PhaseMode::ALL {
                assert_eq!(PhaseMode::from_label(phase.display(locale)), Some(phase));
            }
        }
    }

    #[test]
    fn canonical_name_is_not_localized() {
        assert_eq!(BundleKind::Structural.display(Locale::Ru), "Структурная");
        assert_eq!(BundleKind::Structural.as_str(), "Structural");
        assert_eq!(
            serde_json::to_string(&BundleKind::Structural).unwrap(),
            "\"Structural\""
        );
    }
}
