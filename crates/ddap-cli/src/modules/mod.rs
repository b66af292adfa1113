pub(crate) mod access;
pub(crate) mod auth;
pub(crate) mod resources;
pub(crate) mod session;
pub(crate) mod shared;
