use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use ddap_core::{DamInfo, IdentityTokens};
use serde::{Deserialize, Serialize};

use crate::modules::shared::PollPolicy;

/// The saved login context: one file per user, owned by a single process
/// for the duration of one invocation. Mutations flip the dirty flag so the
/// store only rewrites the file when something actually changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub url: String,
    pub realm: String,
    #[serde(default)]
    pub dams: BTreeMap<String, DamInfo>,
    #[serde(default)]
    pub credentials: Credentials,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<IdentityTokens>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_in_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    dirty: bool,
}

impl Session {
    pub fn new(url: impl Into<String>, realm: impl Into<String>) -> Self {
        Session {
            url: url.into().trim_end_matches('/').to_string(),
            realm: realm.into(),
            dams: BTreeMap::new(),
            credentials: Credentials::Anonymous,
            tokens: None,
            logged_in_at: None,
            dirty: true,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_credentials(&mut self, credentials: Credentials) {
        if self.credentials != credentials {
            self.credentials = credentials;
            self.dirty = true;
        }
    }

    pub fn set_dams(&mut self, dams: BTreeMap<String, DamInfo>) {
        if self.dams != dams {
            self.dams = dams;
            self.dirty = true;
        }
    }

    pub fn set_tokens(&mut self, tokens: IdentityTokens) {
        self.tokens = Some(tokens);
        self.logged_in_at = Some(Utc::now());
        self.dirty = true;
    }

    /// Root of the versioned API on the frontend this session points at.
    pub fn api_base(&self) -> String {
        format!("{}/api/v1alpha", self.url)
    }
}

/// How the client authenticates to the frontend. Exactly one variant is
/// authoritative at a time; a successful form login always yields a
/// `SessionPair`, which supersedes `Basic` for the rest of the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Credentials {
    Basic {
        username: String,
        password: String,
    },
    SessionPair {
        session_id: String,
        decryption_key: String,
    },
    #[default]
    Anonymous,
}

/// Everything a command handler needs for one invocation. Assembled once in
/// `main` and passed explicitly; there is no process-wide state.
pub struct CommandContext<'a> {
    pub client: &'a reqwest::Client,
    pub session: &'a mut Session,
    pub poll: PollPolicy,
}
