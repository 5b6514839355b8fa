// crates/verdict-relay-core/src/core/outcome.rs
// ============================================================================
// Module: Verification Outcome
// Description: Pass/fail result of a contract-verification run.
// Purpose: Provide a stable outcome value for broker publication.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`VerificationOutcome`] is produced by an external verification engine
//! and consumed once by the publisher. It is immutable and carries a stable
//! wire label for broker payloads and notices.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Verification Outcome
// ============================================================================

/// Outcome of replaying a contract against a live provider.
///
/// # Invariants
/// - Labels are stable for broker payloads and notice emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// All interactions verified successfully.
    Passed,
    /// One or more interactions failed verification.
    Failed {
        /// Human-readable failure description.
        description: String,
    },
}

impl VerificationOutcome {
    /// Returns true when the outcome is a success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed {
                ..
            } => "failed",
        }
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => f.write_str("passed"),
            Self::Failed {
                description,
            } => write!(f, "failed: {description}"),
        }
    }
}
