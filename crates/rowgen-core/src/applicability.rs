//! Whole-data-set "not applicable" marker.

use serde::{Deserialize, Serialize};

/// Tells the runner whether the owning test may use a data set at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Applicability {
    #[default]
    Applicable,
    NotApplicable {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
}

impl Applicability {
    pub fn not_applicable(reason: Option<String>) -> Self {
        Applicability::NotApplicable { reason }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, Applicability::Applicable)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Applicability::Applicable => None,
            Applicability::NotApplicable { reason } => reason.as_deref(),
        }
    }

    /// Status of a set composed from two operands: not applicable if either
    /// operand is, with the left operand's reason taking precedence.
    pub fn combine(&self, right: &Applicability) -> Applicability {
        match (self, right) {
            (Applicability::NotApplicable { .. }, _) => self.clone(),
            (Applicability::Applicable, other) => other.clone(),
        }
    }
}
