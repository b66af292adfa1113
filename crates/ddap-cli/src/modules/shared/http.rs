use ddap_core::ErrorResponse;

use crate::error::DdapError;

/// Backend errors carry a structured `{"message": …}` body; anything that
/// does not parse is reported verbatim.
pub(crate) fn decode_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(decoded) => decoded.message.unwrap_or_else(|| body.to_string()),
        Err(_) => body.to_string(),
    }
}

pub(crate) async fn expect_success(
    context: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, DdapError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(DdapError::Backend {
        context: context.to_string(),
        status: status.as_u16(),
        message: decode_error_message(&body),
    })
}
