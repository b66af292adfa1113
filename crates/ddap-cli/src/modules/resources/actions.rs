use std::collections::BTreeMap;

use ddap_core::ResourceResponse;

use crate::error::DdapError;
use crate::modules::auth::resolve_credentials;
use crate::modules::resources::http::list_resources;
use crate::modules::session::CommandContext;
use crate::modules::shared::print_yaml;

pub(crate) async fn handle_list(ctx: &mut CommandContext<'_>) -> Result<(), DdapError> {
    resolve_credentials(ctx).await?;
    let catalog = aggregate_resources(ctx).await?;
    print_yaml(&catalog)
}

/// Fans the listing out across every DAM instance in the session and merges
/// the results keyed by instance id. All-or-nothing: the first failing
/// instance aborts the whole aggregation with its decoded error.
pub(crate) async fn aggregate_resources(
    ctx: &mut CommandContext<'_>,
) -> Result<BTreeMap<String, ResourceResponse>, DdapError> {
    let realm = ctx.session.realm.clone();
    let credentials = ctx.session.credentials.clone();
    let mut catalog = BTreeMap::new();
    for (id, dam) in &ctx.session.dams {
        let resources = list_resources(ctx.client, &dam.url, &realm, &credentials)
            .await
            .map_err(|err| instance_error(id, err))?;
        catalog.insert(id.clone(), resources);
    }
    Ok(catalog)
}

pub(crate) fn instance_error(id: &str, err: DdapError) -> DdapError {
    match err {
        DdapError::Backend {
            status, message, ..
        } => DdapError::Backend {
            context: format!("could not list resources from instance [{id}]"),
            status,
            message,
        },
        other => other,
    }
}
