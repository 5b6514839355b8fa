// crates/verdict-relay-core/src/core/mod.rs
// ============================================================================
// Module: Verdict Relay Core Model
// Description: Contract documents and verification outcomes.
// Purpose: Group the data model consumed by the publication policy.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The core model covers the contract document (participants, interactions,
//! provenance) and the verification outcome produced by an external
//! verification engine. All types here are read-only inputs to the
//! publication policy.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod contract;
pub mod outcome;
