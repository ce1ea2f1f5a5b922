use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// How much attention a diagnostic deserves
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    /// Informational, nothing was dropped
    Info,
    /// A message was skipped
    Warning,
}

/// A finding raised while extracting routes. Extraction never aborts on these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity
    pub severity: Severity,
    /// Transaction the finding relates to
    pub tx_id: String,
    /// Human readable description
    pub message: String,
}

impl Diagnostic {
    /// An informational finding
    pub fn info(tx_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            tx_id: tx_id.into(),
            message: message.into(),
        }
    }

    /// A finding about a skipped message
    pub fn warning(tx_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            tx_id: tx_id.into(),
            message: message.into(),
        }
    }

    /// Whether this finding is a warning
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "tx {}: {}", self.tx_id, self.message)
    }
}
