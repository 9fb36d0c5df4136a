//! Wire types for the template service's response envelope.

use serde::Deserialize;

use crate::model::Template;

/// The `{success, data, message?, total?}` envelope every endpoint wraps its
/// payload in. `data` stays optional so its absence can be classified as
/// malformed rather than failing deserialization outright.
#[derive(Debug, Deserialize)]
pub(super) struct Envelope<T> {
    #[serde(default)]
    pub(super) success: bool,

    pub(super) data: Option<T>,

    #[serde(default)]
    pub(super) message: Option<String>,

    #[serde(default)]
    pub(super) total: Option<u64>,
}

impl<T> Envelope<T> {
    pub(super) fn require_data(self, label: &str) -> Result<T, super::GatewayError> {
        self.data.ok_or_else(|| {
            super::GatewayError::MalformedResponse(format!("{label}: envelope has no data"))
        })
    }
}

/// Error body shapes a rejecting server may use: our own envelope carries
/// `message`, the upstream framework reports `detail`.
#[derive(Debug, Deserialize)]
pub(super) struct RejectionBody {
    #[serde(default)]
    message: Option<String>,

    #[serde(default)]
    detail: Option<String>,
}

impl RejectionBody {
    pub(super) fn into_message(self) -> Option<String> {
        self.message.or(self.detail)
    }
}

/// One page of full-search results plus the server-reported total used for
/// pagination display.
#[derive(Debug)]
pub struct SearchPage {
    pub templates: Vec<Template>,
    pub total: Option<u64>,
}
