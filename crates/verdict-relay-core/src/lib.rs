// crates/verdict-relay-core/src/lib.rs
// ============================================================================
// Module: Verdict Relay Core Library
// Description: Contract model, collaborator interfaces, and publication policy.
// Purpose: Decide whether and how verification outcomes reach a broker.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Verdict Relay Core defines the contract data model, the collaborator
//! seams used to reach a broker, and the [`ResultPublisher`] policy that
//! reports verification outcomes.
//! Invariants:
//! - Only broker-originated contract sources are publish-capable.
//! - Tag publication precedes result publication when a tag is supplied.
//! - Publication failures are logged and swallowed; they never fail the
//!   caller.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::contract::BrokerAuth;
pub use crate::core::contract::BrokerOptions;
pub use crate::core::contract::BrokerSource;
pub use crate::core::contract::Contract;
pub use crate::core::contract::ContractSource;
pub use crate::core::contract::Interaction;
pub use crate::core::contract::Participant;
pub use crate::core::outcome::VerificationOutcome;
pub use interfaces::BrokerAttributes;
pub use interfaces::BrokerClient;
pub use interfaces::BrokerClientFactory;
pub use interfaces::ClientBuildError;
pub use interfaces::EnvSettings;
pub use interfaces::LayeredSettings;
pub use interfaces::LinePublishLog;
pub use interfaces::NoopPublishLog;
pub use interfaces::PublishError;
pub use interfaces::PublishEvent;
pub use interfaces::PublishLog;
pub use interfaces::RuntimeProperties;
pub use interfaces::SettingSource;
pub use interfaces::Severity;
pub use runtime::publisher::PUBLISH_RESULTS_SETTING;
pub use runtime::publisher::ReporterError;
pub use runtime::publisher::ResultPublisher;
pub use runtime::publisher::ResultPublisherBuilder;
pub use runtime::publisher::VerificationReporter;
