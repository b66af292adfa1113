use ddap_core::ResourceResponse;
use tracing::debug;

use crate::error::DdapError;
use crate::modules::auth::http::auth_headers;
use crate::modules::session::Credentials;
use crate::modules::shared::http::expect_success;

/// Fetches one DAM instance's resource catalog for the realm.
pub(crate) async fn list_resources(
    client: &reqwest::Client,
    dam_url: &str,
    realm: &str,
    credentials: &Credentials,
) -> Result<ResourceResponse, DdapError> {
    let url = format!("{}/{}/resources", dam_url.trim_end_matches('/'), realm);
    debug!(url = %url, "listing resources");
    let response = client
        .get(&url)
        .headers(auth_headers(credentials)?)
        .send()
        .await
        .map_err(|source| DdapError::transport(&url, source))?;
    let response = expect_success("could not list resources", response).await?;
    response.json().await.map_err(|err| {
        DdapError::Protocol(format!("could not decode the resource catalog: {err}"))
    })
}
