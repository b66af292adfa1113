mod store;
pub(crate) mod types;

pub(crate) use store::SessionStore;
pub(crate) use types::{CommandContext, Credentials, Session};
