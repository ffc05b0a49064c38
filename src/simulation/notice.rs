//! Player-facing outcome of a kingdom operation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::simulation::SaveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Success => "SUCCESS",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

/// The single terminal message produced by a successful operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Upgrades a success to a warning when a clamp happened along the way.
    pub fn clamped(self, clamped: bool) -> Self {
        if clamped && self.severity == Severity::Success {
            Self {
                severity: Severity::Warning,
                ..self
            }
        } else {
            self
        }
    }
}

/// Rejections. Every variant leaves kingdom state untouched.
#[derive(Debug, Error)]
pub enum KingdomError {
    #[error("cannot {action} by a negative amount ({amount})")]
    NegativeAmount { action: &'static str, amount: f64 },
    #[error("{what} must be positive")]
    NonPositiveAmount { what: &'static str },
    #[error("{what} must be a finite number")]
    NonFiniteAmount { what: &'static str },
    #[error("training cycles must be between 1 and 5 (got {0})")]
    TrainingCycles(i32),
    #[error("equipment quality must be between 1 and 10 (got {0})")]
    EquipmentQuality(i32),
    #[error("tax rate must be between 0 and 1 (got {0})")]
    TaxRate(f64),
    #[error("invalid resource type: {0}")]
    UnknownResource(String),
    #[error("insufficient funds: need {needed:.2} gold, have {available:.2}")]
    InsufficientGold { needed: f64, available: f64 },
    #[error("not enough {resource}: need {needed}, have {available}")]
    InsufficientStock {
        resource: &'static str,
        needed: i32,
        available: i32,
    },
    #[error("trade caravan was attacked on the road, the goods are lost")]
    CaravanAttacked,
    #[error("cannot hold election yet, wait {remaining} more turns")]
    ElectionCooldown { remaining: u32 },
    #[error("treaty text cannot be empty")]
    EmptyTreaty,
    #[error("no active treaty to break")]
    NoActiveTreaty,
    #[error("message too long ({length} characters, maximum {max})")]
    MessageTooLong { length: usize, max: usize },
    #[error("message limit reached ({0} messages)")]
    MessageLimit(usize),
    #[error("the kingdom has fallen")]
    KingdomFallen,
    #[error(transparent)]
    Save(#[from] SaveError),
}

impl KingdomError {
    pub fn notice(&self) -> Notice {
        Notice::error(self.to_string())
    }
}

pub type Outcome = Result<Notice, KingdomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_only_downgrades_success() {
        assert_eq!(
            Notice::success("ok").clamped(true).severity,
            Severity::Warning
        );
        assert_eq!(Notice::success("ok").clamped(false).severity, Severity::Success);
        assert_eq!(Notice::info("fyi").clamped(true).severity, Severity::Info);
    }

    #[test]
    fn errors_render_as_error_notices() {
        let notice = KingdomError::MessageLimit(5).notice();
        assert_eq!(notice.severity, Severity::Error);
        assert!(notice.message.contains('5'));
    }
}
