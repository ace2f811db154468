//! Urgency classification for alerts
//!
//! The urgency level decides how an alert card is rendered:
//! - HIGH: red header, 🚨, action buttons
//! - MEDIUM: orange header, ⚠️
//! - LOW: blue header, ℹ️

use std::str::FromStr;

/// Urgency level for alerts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::High => "HIGH",
            Urgency::Medium => "MEDIUM",
            Urgency::Low => "LOW",
        }
    }

    /// Card header template color
    pub fn color(&self) -> &'static str {
        match self {
            Urgency::High => "red",
            Urgency::Medium => "orange",
            Urgency::Low => "blue",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Urgency::High => "🚨",
            Urgency::Medium => "⚠️",
            Urgency::Low => "ℹ️",
        }
    }

    /// Only high urgency cards carry action buttons
    pub fn has_actions(&self) -> bool {
        matches!(self, Urgency::High)
    }
}

impl FromStr for Urgency {
    type Err = String;

    /// Case-insensitive, accepts `high`, `medium`, `low`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Urgency::High),
            "medium" => Ok(Urgency::Medium),
            "low" => Ok(Urgency::Low),
            other => Err(format!("unknown urgency '{}' (expected high, medium or low)", other)),
        }
    }
}
