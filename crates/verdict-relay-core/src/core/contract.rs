// crates/verdict-relay-core/src/core/contract.rs
// ============================================================================
// Module: Contract Model
// Description: Contract documents, participants, and provenance sources.
// Purpose: Carry the metadata the publication policy dispatches on.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`Contract`] records the expected interactions between a consumer and a
//! provider together with its provenance. Provenance is a tagged union:
//! only [`ContractSource::Broker`] carries a publish target; every other
//! variant is skipped by the publisher.
//! Invariants:
//! - Broker sources always carry a base URL and a request option set.
//! - Attribute maps are opaque broker metadata; the model never interprets
//!   them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Participants
// ============================================================================

/// Named participant on either side of a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Participant name as registered with the broker.
    pub name: String,
}

impl Participant {
    /// Creates a participant with the provided name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ============================================================================
// SECTION: Interactions
// ============================================================================

/// Recorded interaction within a contract.
///
/// # Invariants
/// - The publisher carries interactions opaquely; it never inspects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    /// Human-readable description of the interaction.
    pub description: String,
    /// Optional provider state required before replay.
    pub provider_state: Option<String>,
}

// ============================================================================
// SECTION: Broker Provenance
// ============================================================================

/// Authentication carried from contract fetch time to publish time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum BrokerAuth {
    /// HTTP basic authentication.
    Basic {
        /// Basic auth username.
        username: String,
        /// Basic auth password.
        password: String,
    },
    /// Bearer token authentication.
    Bearer {
        /// Bearer token value.
        token: String,
    },
}

/// Request options applied to every broker call.
///
/// # Invariants
/// - Options are snapshots taken when the contract was fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerOptions {
    /// Optional authentication applied to broker requests.
    pub auth: Option<BrokerAuth>,
}

/// Publish-capable provenance for broker-originated contracts.
///
/// # Invariants
/// - `url` is the broker base URL the contract was fetched from.
/// - `attributes` holds the document metadata (HAL links included) returned
///   by the broker alongside the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerSource {
    /// Broker base URL.
    pub url: String,
    /// Request options captured at fetch time.
    pub options: BrokerOptions,
    /// Opaque document attributes returned by the broker.
    pub attributes: BTreeMap<String, Value>,
}

// ============================================================================
// SECTION: Contract Source
// ============================================================================

/// Provenance of a contract document.
///
/// # Invariants
/// - Only the `Broker` variant carries a publish target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContractSource {
    /// Contract fetched from a broker.
    Broker(BrokerSource),
    /// Contract loaded from a local file.
    File {
        /// Path of the contract file.
        path: PathBuf,
    },
    /// Contract fetched from a plain URL without broker metadata.
    Url {
        /// Origin URL of the contract.
        url: String,
    },
}

impl fmt::Display for ContractSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Broker(source) => write!(f, "broker at {}", source.url),
            Self::File {
                path,
            } => write!(f, "file {}", path.display()),
            Self::Url {
                url,
            } => write!(f, "url {url}"),
        }
    }
}

// ============================================================================
// SECTION: Contract
// ============================================================================

/// Contract between a consumer and a provider.
///
/// # Invariants
/// - Read-only from the publisher's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Consuming participant.
    pub consumer: Participant,
    /// Providing participant.
    pub provider: Participant,
    /// Recorded interactions.
    pub interactions: Vec<Interaction>,
    /// Provenance of the document.
    pub source: ContractSource,
}
