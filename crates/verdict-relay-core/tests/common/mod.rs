// crates/verdict-relay-core/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: Shared helpers for verdict-relay-core tests.
// Purpose: Provide recording collaborators and sample contracts.
// Dependencies: verdict-relay-core, serde_json
// ============================================================================

//! ## Overview
//! Provides recording broker clients, factories, and notice sinks plus
//! sample contract builders for publisher tests.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use serde_json::json;
use verdict_relay_core::BrokerAttributes;
use verdict_relay_core::BrokerClient;
use verdict_relay_core::BrokerClientFactory;
use verdict_relay_core::BrokerOptions;
use verdict_relay_core::BrokerSource;
use verdict_relay_core::ClientBuildError;
use verdict_relay_core::Contract;
use verdict_relay_core::ContractSource;
use verdict_relay_core::Interaction;
use verdict_relay_core::Participant;
use verdict_relay_core::PublishError;
use verdict_relay_core::PublishEvent;
use verdict_relay_core::PublishLog;
use verdict_relay_core::VerificationOutcome;

// ============================================================================
// SECTION: Recording Client
// ============================================================================

/// One recorded broker call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCall {
    /// Recorded tag publication.
    Tag {
        /// Attributes passed through.
        attributes: BrokerAttributes,
        /// Provider name.
        provider: String,
        /// Tag value.
        tag: String,
        /// Participant version.
        version: String,
    },
    /// Recorded result publication.
    Results {
        /// Attributes passed through.
        attributes: BrokerAttributes,
        /// Stable outcome label.
        outcome: String,
        /// Participant version.
        version: String,
    },
}

/// Broker client that records calls and fails on demand.
#[derive(Default)]
pub struct RecordingClient {
    /// Recorded calls in invocation order.
    pub calls: Mutex<Vec<ClientCall>>,
    /// When true, tag publication returns a rejected failure.
    pub fail_tag: bool,
    /// When true, result publication returns a rejected failure.
    pub fail_results: bool,
}

impl RecordingClient {
    /// Returns a snapshot of the recorded calls.
    pub fn recorded(&self) -> Vec<ClientCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl BrokerClient for RecordingClient {
    fn publish_provider_tag(
        &self,
        attributes: &BrokerAttributes,
        provider: &str,
        tag: &str,
        version: &str,
    ) -> Result<(), PublishError> {
        self.calls.lock().unwrap().push(ClientCall::Tag {
            attributes: attributes.clone(),
            provider: provider.to_string(),
            tag: tag.to_string(),
            version: version.to_string(),
        });
        if self.fail_tag {
            return Err(PublishError::Rejected {
                status: 500,
                detail: "tag rejected".to_string(),
            });
        }
        Ok(())
    }

    fn publish_verification_results(
        &self,
        attributes: &BrokerAttributes,
        outcome: &VerificationOutcome,
        version: &str,
    ) -> Result<(), PublishError> {
        self.calls.lock().unwrap().push(ClientCall::Results {
            attributes: attributes.clone(),
            outcome: outcome.label().to_string(),
            version: version.to_string(),
        });
        if self.fail_results {
            return Err(PublishError::Rejected {
                status: 500,
                detail: "results rejected".to_string(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Recording Factory
// ============================================================================

/// Factory that hands out a shared recording client.
pub struct RecordingFactory {
    /// Shared client returned on every build.
    pub client: Arc<RecordingClient>,
    /// Broker URLs the factory was asked to build for.
    pub built_for: Arc<Mutex<Vec<String>>>,
}

impl RecordingFactory {
    /// Creates a factory around the provided client.
    pub fn new(client: Arc<RecordingClient>) -> Self {
        Self {
            client,
            built_for: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns a shared handle to the recorded build URLs.
    pub fn built_for_handle(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.built_for)
    }
}

impl BrokerClientFactory for RecordingFactory {
    fn build(&self, source: &BrokerSource) -> Result<Arc<dyn BrokerClient>, ClientBuildError> {
        self.built_for.lock().unwrap().push(source.url.clone());
        Ok(Arc::clone(&self.client) as Arc<dyn BrokerClient>)
    }
}

/// Factory that always fails construction.
pub struct FailingFactory;

impl BrokerClientFactory for FailingFactory {
    fn build(&self, source: &BrokerSource) -> Result<Arc<dyn BrokerClient>, ClientBuildError> {
        Err(ClientBuildError::InvalidUrl(source.url.clone()))
    }
}

// ============================================================================
// SECTION: Recording Log
// ============================================================================

/// Notice sink that records events behind a shared handle.
#[derive(Clone, Default)]
pub struct RecordingLog {
    /// Recorded events in emission order.
    pub events: Arc<Mutex<Vec<PublishEvent>>>,
}

impl RecordingLog {
    /// Returns a snapshot of the recorded events.
    pub fn recorded(&self) -> Vec<PublishEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl PublishLog for RecordingLog {
    fn record(&self, event: PublishEvent) {
        self.events.lock().unwrap().push(event);
    }
}

// ============================================================================
// SECTION: Contract Builders
// ============================================================================

/// Sample attributes carrying a publication link.
pub fn sample_attributes() -> BrokerAttributes {
    let mut attributes = BTreeMap::new();
    attributes.insert(
        "pb:publish-verification-results".to_string(),
        json!({ "href": "https://broker.example/publish" }),
    );
    attributes
}

/// Contract originating from a broker.
pub fn broker_contract() -> Contract {
    Contract {
        consumer: Participant::new("order-consumer"),
        provider: Participant::new("order-provider"),
        interactions: vec![Interaction {
            description: "a request for an order".to_string(),
            provider_state: Some("an order exists".to_string()),
        }],
        source: ContractSource::Broker(BrokerSource {
            url: "https://broker.example".to_string(),
            options: BrokerOptions::default(),
            attributes: sample_attributes(),
        }),
    }
}

/// Contract loaded from a local file.
pub fn file_contract() -> Contract {
    Contract {
        consumer: Participant::new("order-consumer"),
        provider: Participant::new("order-provider"),
        interactions: Vec::new(),
        source: ContractSource::File {
            path: PathBuf::from("/tmp/a.json"),
        },
    }
}
