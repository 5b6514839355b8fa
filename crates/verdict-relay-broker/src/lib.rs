// crates/verdict-relay-broker/src/lib.rs
// ============================================================================
// Module: Verdict Relay Broker Library
// Description: Reference HTTP broker client for result publication.
// Purpose: Implement the core broker-client interface over HTTP.
// Dependencies: verdict-relay-core, reqwest, url
// ============================================================================

//! ## Overview
//! Verdict Relay Broker provides the reference
//! [`verdict_relay_core::BrokerClient`] implementation used for fallback
//! construction: a blocking HTTP client that applies provider tags and
//! publishes verification results.
//! Invariants:
//! - Redirects are rejected.
//! - Broker URLs are validated at construction; malformed input fails fast.
//! - Non-success statuses map to typed rejection failures.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::HttpBrokerClient;
pub use client::HttpBrokerClientFactory;
