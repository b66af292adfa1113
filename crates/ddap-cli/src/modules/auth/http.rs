use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ddap_core::{DamInfo, LoginStatus, StartLoginResponse};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, COOKIE, LOCATION, SET_COOKIE};
use reqwest::StatusCode;
use tracing::debug;

use crate::error::DdapError;
use crate::modules::session::Credentials;
use crate::modules::shared::http::expect_success;

pub(crate) const SESSION_COOKIE: &str = "SESSION";
pub(crate) const DECRYPTION_KEY_COOKIE: &str = "SESSION_DECRYPTION_KEY";

/// Headers that authorize a backend call for the given credentials: the
/// session cookie pair, a Basic header, or nothing when anonymous.
pub(crate) fn auth_headers(credentials: &Credentials) -> Result<HeaderMap, DdapError> {
    let mut headers = HeaderMap::new();
    match credentials {
        Credentials::SessionPair {
            session_id,
            decryption_key,
        } => {
            let value = format!(
                "{SESSION_COOKIE}={session_id}; {DECRYPTION_KEY_COOKIE}={decryption_key}"
            );
            headers.insert(COOKIE, header_value(&value)?);
        }
        Credentials::Basic { username, password } => {
            let encoded = STANDARD.encode(format!("{username}:{password}"));
            headers.insert(AUTHORIZATION, header_value(&format!("Basic {encoded}"))?);
        }
        Credentials::Anonymous => {}
    }
    Ok(headers)
}

fn header_value(value: &str) -> Result<HeaderValue, DdapError> {
    HeaderValue::from_str(value).map_err(|_| {
        DdapError::InvalidCredentials(
            "stored credentials contain characters not valid in an HTTP header".to_string(),
        )
    })
}

/// Starts a command-line login for the realm. The response must carry the
/// status-polling location and the correlation token that authorizes the
/// polls; either missing is a protocol violation.
pub(crate) async fn start_login(
    client: &reqwest::Client,
    base: &str,
    realm: &str,
    credentials: &Credentials,
) -> Result<(String, String), DdapError> {
    let url = format!("{base}/api/v1alpha/realm/{realm}/cli/login");
    debug!(url = %url, "starting command-line login");
    let response = client
        .post(&url)
        .headers(auth_headers(credentials)?)
        .send()
        .await
        .map_err(|source| DdapError::transport(&url, source))?;
    let response = expect_success("could not initiate login", response).await?;

    let status_location = response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| {
            DdapError::Protocol(
                "start-login response is missing the status Location header".to_string(),
            )
        })?;
    let start: StartLoginResponse = response.json().await.map_err(|err| {
        DdapError::Protocol(format!("could not decode the start-login response: {err}"))
    })?;
    if start.token.is_empty() {
        return Err(DdapError::Protocol(
            "start-login response is missing the poll authorization token".to_string(),
        ));
    }
    Ok((status_location, start.token))
}

pub(crate) async fn fetch_login_status(
    client: &reqwest::Client,
    status_url: &str,
    correlation_token: &str,
) -> Result<LoginStatus, DdapError> {
    let response = client
        .get(status_url)
        .bearer_auth(correlation_token)
        .send()
        .await
        .map_err(|source| DdapError::transport(status_url, source))?;
    let response = expect_success("could not poll login status", response).await?;
    response.json().await.map_err(|err| {
        DdapError::Protocol(format!("could not decode the login status response: {err}"))
    })
}

/// The directory of DAM instances lives under the master realm regardless
/// of the realm being logged into.
pub(crate) async fn fetch_dam_directory(
    client: &reqwest::Client,
    base: &str,
    credentials: &Credentials,
) -> Result<BTreeMap<String, DamInfo>, DdapError> {
    let url = format!("{base}/api/v1alpha/realm/master/dam");
    let response = client
        .get(&url)
        .headers(auth_headers(credentials)?)
        .send()
        .await
        .map_err(|source| DdapError::transport(&url, source))?;
    let response = expect_success("could not fetch the DAM directory", response).await?;
    response.json().await.map_err(|err| {
        DdapError::Protocol(format!("could not decode the DAM directory: {err}"))
    })
}

/// Lightweight authenticated probe of the frontend root. Returns false when
/// the backend no longer accepts the stored cookie pair, signalled by a 401
/// or a redirect to its login page. Redirects are never followed, so the
/// target is observable.
pub(crate) async fn probe_session(
    client: &reqwest::Client,
    base: &str,
    credentials: &Credentials,
) -> Result<bool, DdapError> {
    let response = client
        .get(base)
        .headers(auth_headers(credentials)?)
        .send()
        .await
        .map_err(|source| DdapError::transport(base, source))?;
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Ok(false);
    }
    if status.is_redirection() {
        let to_login = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(|location| location.trim_end_matches('/').ends_with("/login"))
            .unwrap_or(false);
        if to_login {
            debug!(status = %status, "probe redirected to the login page");
            return Ok(false);
        }
    }
    Ok(true)
}

/// Interactive form login against the frontend. A success hands back the
/// server-issued session cookie pair as the new authoritative credentials.
pub(crate) async fn form_login(
    client: &reqwest::Client,
    base: &str,
    username: &str,
    password: &str,
) -> Result<Credentials, DdapError> {
    let url = format!("{base}/login");
    let response = client
        .post(&url)
        .form(&[("username", username), ("password", password)])
        .send()
        .await
        .map_err(|source| DdapError::transport(&url, source))?;
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(DdapError::InvalidCredentials(format!(
            "the backend at [{base}] rejected the supplied username and password"
        )));
    }
    let response = expect_success("could not login", response).await?;

    let mut session_id = None;
    let mut decryption_key = None;
    for value in response.headers().get_all(SET_COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        let Some((name, rest)) = raw.split_once('=') else {
            continue;
        };
        let value = rest.split(';').next().unwrap_or(rest).trim().to_string();
        match name.trim() {
            SESSION_COOKIE => session_id = Some(value),
            DECRYPTION_KEY_COOKIE => decryption_key = Some(value),
            _ => {}
        }
    }
    match (session_id, decryption_key) {
        (Some(session_id), Some(decryption_key)) => Ok(Credentials::SessionPair {
            session_id,
            decryption_key,
        }),
        _ => Err(DdapError::Protocol(
            "login response did not set the session cookie pair".to_string(),
        )),
    }
}
