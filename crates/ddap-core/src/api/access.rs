use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Interface id a DAM uses for HTTP object storage access. Grants carrying
/// it expose a URL that accepts the bearer token as a query parameter.
pub const HTTP_GCS_INTERFACE: &str = "http:gcp:gs";

/// Result of a completed authorization: credential material keyed by
/// resource-interface id. An empty map means the authorization is still
/// pending on the backend side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessGrant {
    #[serde(default)]
    pub interfaces: BTreeMap<String, InterfaceAccess>,
}

impl AccessGrant {
    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    pub fn primary_token(&self) -> Option<&str> {
        self.interfaces
            .values()
            .next()
            .map(|access| access.access_token.as_str())
    }

    pub fn http_object_url(&self) -> Option<&str> {
        self.interfaces
            .get(HTTP_GCS_INTERFACE)
            .and_then(|access| access.uri.first())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceAccess {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(default)]
    pub uri: Vec<String>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}
