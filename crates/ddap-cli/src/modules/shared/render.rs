use serde::Serialize;

use crate::error::DdapError;

/// Human-facing output is rendered as YAML, the historical format of this
/// tool's catalog and grant listings.
pub(crate) fn print_yaml<T: Serialize>(value: &T) -> Result<(), DdapError> {
    let rendered = serde_yaml::to_string(value)
        .map_err(|err| DdapError::io("stdout", std::io::Error::other(err)))?;
    print!("{rendered}");
    Ok(())
}
