pub mod hooks;
pub mod summary;

use serde::{Deserialize, Serialize};

/// Alert severity as reported by the scan engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Risk {
    High,
    Medium,
    Low,
    Informational,
}

impl Risk {
    /// Resolves an engine-reported risk label. The match is exact and
    /// case-sensitive; any other label resolves to `None` and is excluded
    /// from every summary bucket.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "High" => Some(Risk::High),
            "Medium" => Some(Risk::Medium),
            "Low" => Some(Risk::Low),
            "Informational" => Some(Risk::Informational),
            _ => None,
        }
    }
}

impl std::fmt::Display for Risk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Risk::High => write!(f, "High"),
            Risk::Medium => write!(f, "Medium"),
            Risk::Low => write!(f, "Low"),
            Risk::Informational => write!(f, "Informational"),
        }
    }
}

/// A single finding reported by the scan engine. Produced and owned by the
/// engine; the hooks only read and aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub name: String,
    pub url: String,
    pub risk: String,
}

impl Alert {
    pub fn risk_level(&self) -> Option<Risk> {
        Risk::from_label(&self.risk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_label_match_is_case_sensitive() {
        assert_eq!(Risk::from_label("High"), Some(Risk::High));
        assert_eq!(Risk::from_label("high"), None);
        assert_eq!(Risk::from_label("HIGH"), None);
        assert_eq!(Risk::from_label("Informational"), Some(Risk::Informational));
        assert_eq!(Risk::from_label("Info"), None);
        assert_eq!(Risk::from_label(""), None);
    }

    #[test]
    fn test_alert_deserializes_from_engine_json() {
        let alert: Alert =
            serde_json::from_str(r#"{"name":"SQLi","url":"/a","risk":"High"}"#).unwrap();
        assert_eq!(alert.name, "SQLi");
        assert_eq!(alert.risk_level(), Some(Risk::High));
    }
}
