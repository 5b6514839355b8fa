// crates/verdict-relay-broker/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: Shared helpers for verdict-relay-broker tests.
// Purpose: Provide a recording loopback broker server.
// Dependencies: tiny_http
// ============================================================================

//! ## Overview
//! Provides a single-request loopback HTTP server that records the request
//! it receives and responds with a configured status.

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

use std::sync::mpsc;
use std::thread;

// ============================================================================
// SECTION: Recorded Request
// ============================================================================

/// One request observed by the loopback broker.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request method.
    pub method: String,
    /// Request path and query.
    pub url: String,
    /// Request body.
    pub body: String,
    /// Authorization header value, when present.
    pub authorization: Option<String>,
}

// ============================================================================
// SECTION: Loopback Server
// ============================================================================

/// Serves exactly one request, recording it and answering with `status`.
///
/// Returns the server base URL and the channel carrying the recorded
/// request.
pub fn serve_once(status: u16) -> (String, mpsc::Receiver<RecordedRequest>) {
    let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let base = format!("http://{addr}");
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        if let Ok(mut request) = server.recv() {
            let mut body = String::new();
            let _ = request.as_reader().read_to_string(&mut body);
            let authorization = request
                .headers()
                .iter()
                .find(|header| header.field.equiv("Authorization"))
                .map(|header| header.value.as_str().to_string());
            let recorded = RecordedRequest {
                method: request.method().to_string(),
                url: request.url().to_string(),
                body,
                authorization,
            };
            let _ = request.respond(tiny_http::Response::empty(status));
            let _ = sender.send(recorded);
        }
    });
    (base, receiver)
}
