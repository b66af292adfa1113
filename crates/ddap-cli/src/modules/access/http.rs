use ddap_core::AccessGrant;
use tracing::debug;

use crate::error::DdapError;
use crate::modules::auth::http::auth_headers;
use crate::modules::session::Credentials;
use crate::modules::shared::http::expect_success;

/// Discards any grant a previous aborted attempt may have left cached under
/// this correlation id.
pub(crate) async fn clear_pending_grant(
    client: &reqwest::Client,
    api_base: &str,
    realm: &str,
    correlation_id: &str,
    credentials: &Credentials,
) -> Result<(), DdapError> {
    let url = format!("{api_base}/realm/{realm}/cli/{correlation_id}/authorize/clear");
    debug!(url = %url, "clearing cached authorization");
    let response = client
        .post(&url)
        .headers(auth_headers(credentials)?)
        .send()
        .await
        .map_err(|source| DdapError::transport(&url, source))?;
    expect_success("could not clear a previously cached authorization", response).await?;
    Ok(())
}

/// One authorize-status poll. A grant with no interfaces means the user has
/// not finished the browser consent yet.
pub(crate) async fn poll_authorize_status(
    client: &reqwest::Client,
    status_url: &str,
    credentials: &Credentials,
) -> Result<Option<AccessGrant>, DdapError> {
    let response = client
        .get(status_url)
        .headers(auth_headers(credentials)?)
        .send()
        .await
        .map_err(|source| DdapError::transport(status_url, source))?;
    let response = expect_success("could not poll authorization status", response).await?;
    let body = response
        .text()
        .await
        .map_err(|source| DdapError::transport(status_url, source))?;
    if body.trim().is_empty() || body.trim() == "null" {
        return Ok(None);
    }
    let grant: AccessGrant = serde_json::from_str(&body).map_err(|err| {
        DdapError::Protocol(format!("could not decode the authorization status: {err}"))
    })?;
    Ok(if grant.is_empty() { None } else { Some(grant) })
}
