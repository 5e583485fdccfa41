//! REST implementation of the handle registry port
//!
//! This module implements the `HandleRegistry` trait against the resolver
//! service's administrative REST API. It handles request delivery and
//! converts transport errors to domain errors; response-code policy stays in
//! the reconciler.

use std::future::Future;

use hdlmint_domain::{
    ports::{HandleRegistry, RegistryResponse},
    reconcile::{error::ReconcileError, ids::Pid},
    HANDLE_RESOLVER_BASE,
};
use tracing::{debug, error, info, instrument};

/// REST-based implementation of the HandleRegistry port
///
/// The adapter drives the administrative surface of a Handle.net-compatible
/// resolver: `HEAD`/`POST`/`DELETE` against
/// `{endpoint}/handle/{prefix}/{pid}`. The native binary handle protocol is
/// out of scope; resolvers expose this REST surface for exactly this kind of
/// integration.
///
/// ## Configuration
///
/// The adapter requires:
/// - The administrative endpoint base URL
/// - The naming authority prefix handles are minted under
/// - A `reqwest::Client` (configured with timeout, TLS, proxies by the caller)
///
/// ## Error Handling
///
/// Transport failures are converted to `ReconcileError::Registry` with
/// descriptive messages. Out-of-protocol response codes are NOT errors here;
/// they travel back raw inside `RegistryResponse` for the reconciler to
/// judge.
#[derive(Clone)]
pub struct RestHandleRegistry {
    client: reqwest::Client,
    endpoint: String,
    prefix: String,
}

impl RestHandleRegistry {
    /// Create a new REST handle registry adapter
    ///
    /// # Arguments
    ///
    /// * `client` - Configured HTTP client
    /// * `endpoint` - Base URL of the resolver's administrative API
    /// * `prefix` - Naming authority prefix, e.g. `"1234.5678"`
    ///
    /// # Example
    ///
    /// ```rust
    /// use hdlmint_resolver::infrastructure::RestHandleRegistry;
    ///
    /// let registry = RestHandleRegistry::new(
    ///     reqwest::Client::new(),
    ///     "http://localhost:8000/handle-admin".to_string(),
    ///     "1234.5678".to_string(),
    /// );
    /// ```
    pub fn new(client: reqwest::Client, endpoint: String, prefix: String) -> Self {
        info!(endpoint = %endpoint, prefix = %prefix, "Initializing RestHandleRegistry");
        Self {
            client,
            endpoint,
            prefix,
        }
    }

    /// The naming authority prefix handles are minted under
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// URL of the pid's handle resource on the administrative endpoint
    fn resource_url(&self, pid: &Pid) -> String {
        format!(
            "{}/handle/{}/{}",
            self.endpoint.trim_end_matches('/'),
            self.prefix,
            pid
        )
    }
}

/// Extract error detail from a rejection body
///
/// Resolvers report detail either as a JSON `{"error": ...}` object or as
/// plain text; an empty body yields nothing.
fn error_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => value
            .get("error")
            .and_then(|detail| detail.as_str())
            .map(|detail| detail.to_string())
            .or_else(|| Some(trimmed.to_string())),
        Err(_) => Some(trimmed.to_string()),
    }
}

/// Map a resolver response into the domain's raw registry response
fn to_registry_response(code: u16, success: bool, body: &str) -> RegistryResponse {
    if success {
        return RegistryResponse::ok(code);
    }
    match error_detail(body) {
        Some(detail) => RegistryResponse::with_error(code, detail),
        None => RegistryResponse::ok(code),
    }
}

impl HandleRegistry for RestHandleRegistry {
    #[instrument(skip(self, pid), fields(pid = %pid))]
    fn exists(&self, pid: &Pid) -> impl Future<Output = Result<bool, ReconcileError>> + Send {
        let client = self.client.clone();
        let url = self.resource_url(pid);

        async move {
            debug!(url = %url, "Checking handle existence");

            match client.head(&url).send().await {
                Ok(response) => Ok(response.status().is_success()),
                Err(err) => {
                    error!(url = %url, error = ?err, "Failed to query handle existence");
                    Err(ReconcileError::registry(format!(
                        "existence query for '{}' failed: {}",
                        url, err
                    )))
                }
            }
        }
    }

    #[instrument(skip(self, pid), fields(pid = %pid))]
    fn create(
        &self,
        pid: &Pid,
    ) -> impl Future<Output = Result<RegistryResponse, ReconcileError>> + Send {
        let client = self.client.clone();
        let url = self.resource_url(pid);

        async move {
            debug!(url = %url, "Requesting handle creation");

            let response = client.post(&url).send().await.map_err(|err| {
                error!(url = %url, error = ?err, "Failed to deliver handle creation request");
                ReconcileError::registry(format!("create request for '{}' failed: {}", url, err))
            })?;

            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            debug!(code = status.as_u16(), "Handle creation response received");
            Ok(to_registry_response(
                status.as_u16(),
                status.is_success(),
                &body,
            ))
        }
    }

    #[instrument(skip(self, pid), fields(pid = %pid))]
    fn delete(
        &self,
        pid: &Pid,
    ) -> impl Future<Output = Result<RegistryResponse, ReconcileError>> + Send {
        let client = self.client.clone();
        let url = self.resource_url(pid);

        async move {
            debug!(url = %url, "Requesting handle deletion");

            let response = client.delete(&url).send().await.map_err(|err| {
                error!(url = %url, error = ?err, "Failed to deliver handle deletion request");
                ReconcileError::registry(format!("delete request for '{}' failed: {}", url, err))
            })?;

            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            debug!(code = status.as_u16(), "Handle deletion response received");
            Ok(to_registry_response(
                status.as_u16(),
                status.is_success(),
                &body,
            ))
        }
    }

    fn canonical_url(&self, pid: &Pid) -> String {
        format!("{}/{}/{}", HANDLE_RESOLVER_BASE, self.prefix, pid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(endpoint: &str) -> RestHandleRegistry {
        RestHandleRegistry::new(
            reqwest::Client::new(),
            endpoint.to_string(),
            "1234.5678".to_string(),
        )
    }

    #[test]
    fn test_canonical_url_has_fixed_form() {
        let registry = registry("http://localhost:8000/handle-admin");
        assert_eq!(
            registry.canonical_url(&Pid::new("obj:1")),
            "http://hdl.handle.net/1234.5678/obj:1"
        );
    }

    #[test]
    fn test_resource_url_tolerates_trailing_slash() {
        let registry = registry("http://localhost:8000/handle-admin/");
        assert_eq!(
            registry.resource_url(&Pid::new("obj:1")),
            "http://localhost:8000/handle-admin/handle/1234.5678/obj:1"
        );
    }

    #[test]
    fn test_error_detail_prefers_json_error_field() {
        assert_eq!(
            error_detail(r#"{"error": "prefix not registered"}"#),
            Some("prefix not registered".to_string())
        );
    }

    #[test]
    fn test_error_detail_falls_back_to_raw_body() {
        assert_eq!(
            error_detail("prefix not registered"),
            Some("prefix not registered".to_string())
        );
        // JSON without an error field is still worth reporting whole.
        assert_eq!(
            error_detail(r#"{"status": "rejected"}"#),
            Some(r#"{"status": "rejected"}"#.to_string())
        );
        assert_eq!(error_detail("   "), None);
    }

    #[test]
    fn test_success_response_carries_no_error() {
        let response = to_registry_response(201, true, "ignored");
        assert_eq!(response, RegistryResponse::ok(201));
    }

    #[test]
    fn test_rejection_response_carries_detail() {
        let response = to_registry_response(500, false, r#"{"error": "broken pipe"}"#);
        assert_eq!(response.code, 500);
        assert_eq!(response.error.as_deref(), Some("broken pipe"));
    }

    #[test]
    fn test_bodiless_rejection_falls_back_to_code() {
        let response = to_registry_response(503, false, "");
        assert_eq!(response.error, None);
        assert_eq!(response.error_detail(), "unexpected response code 503");
    }
}
