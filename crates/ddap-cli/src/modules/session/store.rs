use std::fs;
use std::path::{Path, PathBuf};

use super::types::Session;
use crate::error::DdapError;

const SESSION_DIR: &str = ".ddap";
const SESSION_FILE: &str = "session.json";

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SessionStore { path: path.into() }
    }

    pub fn from_home() -> Result<Self, DdapError> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| DdapError::io(SESSION_DIR, std::io::Error::other("HOME is not set")))?;
        Ok(Self::new(
            Path::new(&home).join(SESSION_DIR).join(SESSION_FILE),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// An absent file means "not logged in"; a present but unparseable file
    /// is a distinct hard error.
    pub fn load(&self) -> Result<Session, DdapError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(DdapError::SessionNotFound)
            }
            Err(err) => return Err(DdapError::io(&self.path, err)),
        };
        serde_json::from_str(&contents).map_err(|source| DdapError::SessionCorrupt {
            path: self.path.clone(),
            source,
        })
    }

    pub fn persist(&self, session: &Session) -> Result<(), DdapError> {
        // Serialize completely before touching the file so a failure here
        // never truncates the previous session.
        let contents = serde_json::to_string_pretty(session)
            .map_err(|err| DdapError::io(&self.path, std::io::Error::other(err)))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| DdapError::io(parent, err))?;
        }
        fs::write(&self.path, contents).map_err(|err| DdapError::io(&self.path, err))
    }

    /// Persists only when the session was mutated. Returns whether a write
    /// happened.
    pub fn persist_if_dirty(&self, session: &Session) -> Result<bool, DdapError> {
        if !session.is_dirty() {
            return Ok(false);
        }
        self.persist(session)?;
        Ok(true)
    }
}
