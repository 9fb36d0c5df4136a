//! HTTP gateway to the remote template service.
//!
//! One operation per catalog action; each returns either normalized canonical
//! data or a classified failure. The gateway never touches the catalog store.

use anyhow::{Context, Result};

mod types;
pub use self::types::SearchPage;
use self::types::{Envelope, RejectionBody};

mod normalize;
pub use self::normalize::{RawCategory, RawDashboard, RawTemplate};

mod operations;

/// Failure taxonomy for every gateway operation. Read-path callers map all
/// three variants to the fallback dataset; write-path callers surface them.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Service unreachable, timed out, or the response body never arrived.
    #[error("network failure: {0}")]
    Network(String),

    /// The service responded but declared failure, optionally saying why.
    #[error("server rejected the request: {}", .message.as_deref().unwrap_or("no details"))]
    ServerRejected { message: Option<String> },

    /// The response arrived but is missing the expected envelope or fields.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl GatewayError {
    pub fn message(&self) -> Option<&str> {
        match self {
            GatewayError::ServerRejected { message } => message.as_deref(),
            _ => None,
        }
    }
}

pub struct RemoteGateway {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteGateway {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("promptdeck")
            .build()
            .context("build reqwest client")?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Read the `{success, data, ...}` envelope out of a response, applying
    /// the failure taxonomy: transport errors are `network`, a non-2xx status
    /// or `success: false` is `server-rejected`, and anything that parses but
    /// lacks the expected shape is `malformed-response`.
    async fn read_envelope<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
        label: &str,
    ) -> Result<Envelope<T>, GatewayError> {
        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|err| GatewayError::Network(format!("{label}: {err}")))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<RejectionBody>(&bytes)
                .ok()
                .and_then(|body| body.into_message());
            return Err(GatewayError::ServerRejected { message });
        }

        let env: Envelope<T> = serde_json::from_slice(&bytes)
            .map_err(|err| GatewayError::MalformedResponse(format!("{label}: {err}")))?;

        if !env.success {
            return Err(GatewayError::ServerRejected {
                message: env.message,
            });
        }
        Ok(env)
    }

    fn network(label: &str, err: reqwest::Error) -> GatewayError {
        GatewayError::Network(format!("{label}: {err}"))
    }
}
