// crates/verdict-relay-core/src/runtime/mod.rs
// ============================================================================
// Module: Verdict Relay Runtime
// Description: Publication policy over the core model and interfaces.
// Purpose: Group the runtime policy components.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The runtime module hosts the publication policy that decides whether and
//! how verification outcomes reach a broker.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod publisher;
