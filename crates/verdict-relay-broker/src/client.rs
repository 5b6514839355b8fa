// crates/verdict-relay-broker/src/client.rs
// ============================================================================
// Module: HTTP Broker Client
// Description: Blocking HTTP implementation of the broker-client interface.
// Purpose: Publish provider tags and verification results to a broker.
// Dependencies: verdict-relay-core, reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! [`HttpBrokerClient`] talks to a contract broker over HTTP. Tags are
//! applied with a `PUT` against the pacticipant version; results are posted
//! to the publication link carried in the document attributes.
//! Invariants:
//! - The base URL is validated at construction time.
//! - Redirects are rejected and requests time out after 30 seconds.
//! - Authentication from the contract's option set is applied to every
//!   request.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::blocking::RequestBuilder;
use reqwest::blocking::Response;
use reqwest::redirect::Policy;
use serde_json::Value;
use serde_json::json;
use url::Url;
use verdict_relay_core::BrokerAttributes;
use verdict_relay_core::BrokerAuth;
use verdict_relay_core::BrokerClient;
use verdict_relay_core::BrokerClientFactory;
use verdict_relay_core::BrokerOptions;
use verdict_relay_core::BrokerSource;
use verdict_relay_core::ClientBuildError;
use verdict_relay_core::PublishError;
use verdict_relay_core::VerificationOutcome;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Attribute key of the verification-results publication link.
const PUBLISH_RESULTS_LINK: &str = "pb:publish-verification-results";

/// Request timeout applied to every broker call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// SECTION: HTTP Client
// ============================================================================

/// Blocking HTTP broker client.
///
/// # Invariants
/// - `base` is a valid base URL (validated at construction).
/// - One client instance is safe for concurrent use.
pub struct HttpBrokerClient {
    /// Broker base URL.
    base: Url,
    /// Underlying HTTP client.
    client: Client,
    /// Request options captured from the contract source.
    options: BrokerOptions,
}

impl HttpBrokerClient {
    /// Builds a client scoped to the broker URL and option set.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError::InvalidUrl`] for malformed or non-base
    /// URLs and [`ClientBuildError::Http`] when the HTTP client cannot be
    /// constructed.
    pub fn new(url: &str, options: BrokerOptions) -> Result<Self, ClientBuildError> {
        let base = Url::parse(url).map_err(|err| ClientBuildError::InvalidUrl(err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ClientBuildError::InvalidUrl(format!("not a base url: {url}")));
        }
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| ClientBuildError::Http(err.to_string()))?;
        Ok(Self {
            base,
            client,
            options,
        })
    }

    /// Applies the captured authentication to a request.
    fn authenticated(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.options.auth {
            Some(BrokerAuth::Basic {
                username,
                password,
            }) => request.basic_auth(username, Some(password)),
            Some(BrokerAuth::Bearer {
                token,
            }) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Builds the tag endpoint for a provider version.
    fn tag_url(&self, provider: &str, version: &str, tag: &str) -> Result<Url, PublishError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| PublishError::Transport("broker url cannot be a base".to_string()))?;
            segments.pop_if_empty();
            segments.extend(["pacticipants", provider, "versions", version, "tags", tag]);
        }
        Ok(url)
    }

    /// Resolves the publication link from the document attributes.
    fn results_url(&self, attributes: &BrokerAttributes) -> Result<Url, PublishError> {
        let href = attributes
            .get(PUBLISH_RESULTS_LINK)
            .or_else(|| attributes.get("_links").and_then(|links| links.get(PUBLISH_RESULTS_LINK)))
            .and_then(|link| link.get("href"))
            .and_then(Value::as_str)
            .ok_or_else(|| PublishError::MissingLink(PUBLISH_RESULTS_LINK.to_string()))?;
        self.base
            .join(href)
            .map_err(|err| PublishError::Transport(format!("invalid publication link: {err}")))
    }
}

impl BrokerClient for HttpBrokerClient {
    fn publish_provider_tag(
        &self,
        _attributes: &BrokerAttributes,
        provider: &str,
        tag: &str,
        version: &str,
    ) -> Result<(), PublishError> {
        let url = self.tag_url(provider, version, tag)?;
        let response = self
            .authenticated(self.client.put(url).json(&json!({})))
            .send()
            .map_err(|err| PublishError::Transport(err.to_string()))?;
        check_status(response)
    }

    fn publish_verification_results(
        &self,
        attributes: &BrokerAttributes,
        outcome: &VerificationOutcome,
        version: &str,
    ) -> Result<(), PublishError> {
        let url = self.results_url(attributes)?;
        let mut body = json!({
            "success": outcome.is_success(),
            "providerApplicationVersion": version,
        });
        if let VerificationOutcome::Failed {
            description,
        } = outcome
            && let Value::Object(map) = &mut body
        {
            map.insert("description".to_string(), Value::String(description.clone()));
        }
        let response = self
            .authenticated(self.client.post(url).json(&body))
            .send()
            .map_err(|err| PublishError::Transport(err.to_string()))?;
        check_status(response)
    }
}

// ============================================================================
// SECTION: Factory
// ============================================================================

/// Factory building HTTP broker clients from contract provenance.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpBrokerClientFactory;

impl HttpBrokerClientFactory {
    /// Creates the factory.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BrokerClientFactory for HttpBrokerClientFactory {
    fn build(&self, source: &BrokerSource) -> Result<Arc<dyn BrokerClient>, ClientBuildError> {
        Ok(Arc::new(HttpBrokerClient::new(&source.url, source.options.clone())?))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Maps a broker response status to a publish result.
fn check_status(response: Response) -> Result<(), PublishError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let detail = response.text().unwrap_or_else(|err| err.to_string());
    Err(PublishError::Rejected {
        status: status.as_u16(),
        detail,
    })
}
