use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartLoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginStatus {
    #[serde(default)]
    pub tokens: Option<IdentityTokens>,
    #[serde(default)]
    pub web_login_url: Option<String>,
}

/// Opaque identity material issued by a completed web login. The client
/// never decodes or validates these strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityTokens {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_status_tolerates_pending_payloads() {
        let status: LoginStatus =
            serde_json::from_str(r#"{"webLoginUrl":"https://ddap.example.com/login/abc"}"#)
                .expect("pending status");
        assert!(status.tokens.is_none());
        assert_eq!(
            status.web_login_url.as_deref(),
            Some("https://ddap.example.com/login/abc")
        );

        let status: LoginStatus = serde_json::from_str(
            r#"{"tokens":{"accessToken":"a1","idToken":"i1"},"webLoginUrl":null}"#,
        )
        .expect("resolved status");
        let tokens = status.tokens.expect("tokens");
        assert_eq!(tokens.access_token, "a1");
        assert_eq!(tokens.id_token.as_deref(), Some("i1"));
    }
}
