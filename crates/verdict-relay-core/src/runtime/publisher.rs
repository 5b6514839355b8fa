// crates/verdict-relay-core/src/runtime/publisher.rs
// ============================================================================
// Module: Result Publisher
// Description: Publication policy for contract-verification outcomes.
// Purpose: Decide whether and how outcomes and tags reach the broker.
// Dependencies: crate::core, crate::interfaces, thiserror
// ============================================================================

//! ## Overview
//! [`ResultPublisher`] implements the [`VerificationReporter`] policy: it
//! dispatches on contract provenance, applies an optional provider tag
//! before the result, and treats publication as best-effort telemetry.
//! Invariants:
//! - Non-broker sources are skipped with an informational notice.
//! - A non-blank tag is published before the result; its failure never
//!   blocks the result publication.
//! - Publication failures are logged and swallowed; only client
//!   construction failures propagate to the caller.
//! - The opt-in gate re-reads configuration on every call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use thiserror::Error;

use crate::core::contract::BrokerSource;
use crate::core::contract::Contract;
use crate::core::contract::ContractSource;
use crate::core::outcome::VerificationOutcome;
use crate::interfaces::BrokerClient;
use crate::interfaces::BrokerClientFactory;
use crate::interfaces::ClientBuildError;
use crate::interfaces::EnvSettings;
use crate::interfaces::LayeredSettings;
use crate::interfaces::NoopPublishLog;
use crate::interfaces::PublishEvent;
use crate::interfaces::PublishLog;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Setting name gating result publication.
///
/// Resolved through the layered sources in order; publication is enabled
/// only when the value case-insensitively equals `"true"`.
pub const PUBLISH_RESULTS_SETTING: &str = "verdict.publish_results";

// ============================================================================
// SECTION: Reporter Errors
// ============================================================================

/// Errors returned by the result publisher.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Publication failures never surface here; they are logged and swallowed.
#[derive(Debug, Error)]
pub enum ReporterError {
    /// Publisher has no client factory configured.
    #[error("broker client factory is not configured")]
    MissingFactory,
    /// Fallback client construction failed.
    #[error("broker client construction failed: {0}")]
    ClientBuild(#[from] ClientBuildError),
}

// ============================================================================
// SECTION: Reporter Trait
// ============================================================================

/// Reports verification outcomes to a broker.
pub trait VerificationReporter: Send + Sync {
    /// Publishes the outcome (and optional provider tag) for a contract.
    ///
    /// Non-broker sources are skipped without error. When `client` is
    /// absent, a client is constructed from the source's URL and options.
    ///
    /// # Errors
    ///
    /// Returns [`ReporterError`] only when fallback client construction
    /// fails; publication failures are logged and swallowed.
    fn report_results(
        &self,
        contract: &Contract,
        outcome: &VerificationOutcome,
        version: &str,
        client: Option<&dyn BrokerClient>,
        tag: Option<&str>,
    ) -> Result<(), ReporterError>;

    /// Returns true unless the publish setting resolves to `"true"`.
    fn publishing_results_disabled(&self) -> bool;
}

// ============================================================================
// SECTION: Result Publisher
// ============================================================================

/// Builder for a result publisher.
///
/// # Invariants
/// - `build` succeeds only when a client factory is configured.
pub struct ResultPublisherBuilder {
    /// Factory used for fallback client construction.
    factory: Option<Arc<dyn BrokerClientFactory>>,
    /// Ordered setting sources for the publish gate.
    settings: Option<LayeredSettings>,
    /// Notice sink for publish events.
    log: Arc<dyn PublishLog>,
}

impl Default for ResultPublisherBuilder {
    fn default() -> Self {
        Self {
            factory: None,
            settings: None,
            log: Arc::new(NoopPublishLog),
        }
    }
}

impl ResultPublisherBuilder {
    /// Registers the client factory used for fallback construction.
    #[must_use]
    pub fn factory(mut self, factory: impl BrokerClientFactory + 'static) -> Self {
        self.factory = Some(Arc::new(factory));
        self
    }

    /// Replaces the setting sources used by the publish gate.
    #[must_use]
    pub fn settings(mut self, settings: LayeredSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Registers the notice sink for publish events.
    #[must_use]
    pub fn log(mut self, log: impl PublishLog + 'static) -> Self {
        self.log = Arc::new(log);
        self
    }

    /// Builds the result publisher.
    ///
    /// When no setting sources are registered, the gate reads the process
    /// environment only.
    ///
    /// # Errors
    ///
    /// Returns [`ReporterError::MissingFactory`] when no factory is
    /// configured.
    pub fn build(self) -> Result<ResultPublisher, ReporterError> {
        Ok(ResultPublisher {
            factory: self.factory.ok_or(ReporterError::MissingFactory)?,
            settings: self
                .settings
                .unwrap_or_else(|| LayeredSettings::new().source(EnvSettings)),
            log: self.log,
        })
    }
}

/// Default verification reporter.
///
/// # Invariants
/// - Stateless per call; safe for concurrent use.
/// - Holds no broker connection; clients are supplied or built per call.
pub struct ResultPublisher {
    /// Factory used for fallback client construction.
    factory: Arc<dyn BrokerClientFactory>,
    /// Ordered setting sources for the publish gate.
    settings: LayeredSettings,
    /// Notice sink for publish events.
    log: Arc<dyn PublishLog>,
}

impl ResultPublisher {
    /// Returns a builder for the result publisher.
    #[must_use]
    pub fn builder() -> ResultPublisherBuilder {
        ResultPublisherBuilder::default()
    }

    /// Publishes the tag (when non-blank) and then the result.
    fn publish(
        &self,
        client: &dyn BrokerClient,
        source: &BrokerSource,
        contract: &Contract,
        outcome: &VerificationOutcome,
        version: &str,
        tag: Option<&str>,
    ) {
        if let Some(tag) = tag.map(str::trim).filter(|tag| !tag.is_empty())
            && let Err(err) =
                client.publish_provider_tag(&source.attributes, &contract.provider.name, tag, version)
        {
            self.log.record(PublishEvent::TagPublishFailed {
                provider: contract.provider.name.clone(),
                tag: tag.to_string(),
                detail: err.to_string(),
            });
        }
        match client.publish_verification_results(&source.attributes, outcome, version) {
            Ok(()) => self.log.record(PublishEvent::ResultPublished {
                outcome: outcome.label().to_string(),
                consumer: contract.consumer.name.clone(),
            }),
            Err(err) => self.log.record(PublishEvent::ResultPublishFailed {
                detail: err.to_string(),
            }),
        }
    }
}

impl VerificationReporter for ResultPublisher {
    fn report_results(
        &self,
        contract: &Contract,
        outcome: &VerificationOutcome,
        version: &str,
        client: Option<&dyn BrokerClient>,
        tag: Option<&str>,
    ) -> Result<(), ReporterError> {
        match &contract.source {
            ContractSource::Broker(source) => {
                let built;
                let client = match client {
                    Some(client) => client,
                    None => {
                        built = self.factory.build(source)?;
                        built.as_ref()
                    }
                };
                self.publish(client, source, contract, outcome, version, tag);
                Ok(())
            }
            other => {
                self.log.record(PublishEvent::SourceSkipped {
                    source: other.to_string(),
                });
                Ok(())
            }
        }
    }

    fn publishing_results_disabled(&self) -> bool {
        !self
            .settings
            .resolve(PUBLISH_RESULTS_SETTING)
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }
}
