// crates/verdict-relay-core/src/interfaces/mod.rs
// ============================================================================
// Module: Verdict Relay Interfaces
// Description: Collaborator seams for broker publication, notices, and settings.
// Purpose: Define the contract surfaces the publication policy depends on.
// Dependencies: crate::core, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how the publication policy reaches a broker, emits
//! notices, and reads configuration without embedding backend-specific
//! details. Broker calls return typed failure values; the policy logs and
//! swallows them rather than propagating.
//! Invariants:
//! - Implementations must be safe for concurrent use (`Send + Sync`).
//! - Setting reads are uncached; every call observes the current value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;

use serde_json::Value;
use thiserror::Error;

use crate::core::contract::BrokerSource;
use crate::core::outcome::VerificationOutcome;

// ============================================================================
// SECTION: Broker Client
// ============================================================================

/// Opaque document attributes passed through to broker calls.
pub type BrokerAttributes = BTreeMap<String, Value>;

/// Failure value returned by broker publication calls.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Broker was reachable but rejected the call.
    #[error("broker rejected the call with status {status}: {detail}")]
    Rejected {
        /// HTTP status code returned by the broker.
        status: u16,
        /// Response detail returned by the broker.
        detail: String,
    },
    /// Transport-level failure before a broker response was received.
    #[error("broker transport failure: {0}")]
    Transport(String),
    /// Document attributes are missing a required publication link.
    #[error("missing publication link: {0}")]
    MissingLink(String),
}

/// Client construction errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// Broker URL failed to parse.
    #[error("invalid broker url: {0}")]
    InvalidUrl(String),
    /// Underlying HTTP client could not be constructed.
    #[error("http client build failure: {0}")]
    Http(String),
}

/// Publishes tags and verification results to a broker.
pub trait BrokerClient: Send + Sync {
    /// Applies a tag to the provider version in the broker.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] when the broker rejects or cannot be reached.
    fn publish_provider_tag(
        &self,
        attributes: &BrokerAttributes,
        provider: &str,
        tag: &str,
        version: &str,
    ) -> Result<(), PublishError>;

    /// Publishes a verification outcome for the provider version.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] when the broker rejects or cannot be reached.
    fn publish_verification_results(
        &self,
        attributes: &BrokerAttributes,
        outcome: &VerificationOutcome,
        version: &str,
    ) -> Result<(), PublishError>;
}

/// Builds broker clients from a contract's broker provenance.
pub trait BrokerClientFactory: Send + Sync {
    /// Builds a client scoped to the source's URL and option set.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError`] when the URL is malformed or the client
    /// cannot be constructed.
    fn build(&self, source: &BrokerSource) -> Result<Arc<dyn BrokerClient>, ClientBuildError>;
}

// ============================================================================
// SECTION: Publish Notices
// ============================================================================

/// Severity of a publish notice.
///
/// # Invariants
/// - Variants are stable for notice labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational notice.
    Info,
    /// Error notice.
    Error,
}

impl Severity {
    /// Returns a stable label for the severity.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

/// Notice emitted during a publication attempt.
///
/// # Invariants
/// - Variants carry every field needed to render the notice; no ambient
///   state is consulted at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishEvent {
    /// Source is not publish-capable; publication was skipped.
    SourceSkipped {
        /// Rendered source description.
        source: String,
    },
    /// Tag publication failed; result publication still proceeds.
    TagPublishFailed {
        /// Provider name the tag targeted.
        provider: String,
        /// Tag that failed to apply.
        tag: String,
        /// Failure detail from the broker client.
        detail: String,
    },
    /// Verification result was published.
    ResultPublished {
        /// Stable outcome label.
        outcome: String,
        /// Consumer the contract belongs to.
        consumer: String,
    },
    /// Verification result publication failed.
    ResultPublishFailed {
        /// Failure detail from the broker client.
        detail: String,
    },
}

impl PublishEvent {
    /// Returns the severity of the notice.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::SourceSkipped {
                ..
            }
            | Self::ResultPublished {
                ..
            } => Severity::Info,
            Self::TagPublishFailed {
                ..
            }
            | Self::ResultPublishFailed {
                ..
            } => Severity::Error,
        }
    }
}

impl fmt::Display for PublishEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceSkipped {
                source,
            } => {
                write!(f, "skipping publishing verification results for source {source}")
            }
            Self::TagPublishFailed {
                provider,
                tag,
                detail,
            } => {
                write!(f, "failed to tag provider '{provider}' with '{tag}': {detail}")
            }
            Self::ResultPublished {
                outcome,
                consumer,
            } => {
                write!(f, "published verification result of '{outcome}' for consumer '{consumer}'")
            }
            Self::ResultPublishFailed {
                detail,
            } => {
                write!(f, "failed to publish verification results: {detail}")
            }
        }
    }
}

/// Receives publish notices.
pub trait PublishLog: Send + Sync {
    /// Records a single notice.
    fn record(&self, event: PublishEvent);
}

/// Notice sink that discards everything.
///
/// # Invariants
/// - Notices are intentionally discarded.
pub struct NoopPublishLog;

impl PublishLog for NoopPublishLog {
    fn record(&self, _event: PublishEvent) {}
}

/// Notice sink that writes severity-prefixed lines to a writer.
pub struct LinePublishLog {
    /// Writer guarded for concurrent notice emission.
    writer: Mutex<Box<dyn Write + Send>>,
}

impl LinePublishLog {
    /// Creates a line log over the provided writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl PublishLog for LinePublishLog {
    fn record(&self, event: PublishEvent) {
        if let Ok(mut writer) = self.writer.lock() {
            // Notice emission is best effort; a failed write is dropped.
            let _ = writeln!(writer, "{} {event}", event.severity().as_str());
        }
    }
}

// ============================================================================
// SECTION: Setting Sources
// ============================================================================

/// Ordered lookup source for boolean-style settings.
pub trait SettingSource: Send + Sync {
    /// Reads the raw value for a setting key, if present.
    fn read(&self, key: &str) -> Option<String>;
}

/// In-process runtime property map, checked before the environment.
///
/// # Invariants
/// - Lookups are exact-key; no normalization is applied.
#[derive(Debug, Clone, Default)]
pub struct RuntimeProperties {
    /// Property values keyed by setting name.
    values: BTreeMap<String, String>,
}

impl RuntimeProperties {
    /// Creates an empty property map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Sets a property value, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl SettingSource for RuntimeProperties {
    fn read(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Process environment lookup source.
pub struct EnvSettings;

impl SettingSource for EnvSettings {
    fn read(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Ordered chain of setting sources.
///
/// # Invariants
/// - Sources are consulted in registration order.
/// - Absent and empty values fall through to the next source.
#[derive(Clone, Default)]
pub struct LayeredSettings {
    /// Lookup sources in precedence order.
    sources: Vec<Arc<dyn SettingSource>>,
}

impl LayeredSettings {
    /// Creates an empty settings chain.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Appends a source at the end of the chain.
    #[must_use]
    pub fn source(mut self, source: impl SettingSource + 'static) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    /// Resolves the first non-empty value for a key, re-reading every call.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<String> {
        self.sources
            .iter()
            .filter_map(|source| source.read(key))
            .find(|value| !value.is_empty())
    }
}
