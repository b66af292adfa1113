use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use ddap_core::{AccessGrant, DamInfo};
use tracing::warn;
use uuid::Uuid;

use crate::cli_args::GetAccessArgs;
use crate::error::DdapError;
use crate::modules::access::http::{clear_pending_grant, poll_authorize_status};
use crate::modules::access::types::AccessTarget;
use crate::modules::auth::resolve_credentials;
use crate::modules::resources::actions::instance_error;
use crate::modules::resources::http::list_resources;
use crate::modules::session::CommandContext;
use crate::modules::shared::{poll_until, print_yaml};

pub(crate) async fn handle_get_access(
    args: GetAccessArgs,
    ctx: &mut CommandContext<'_>,
) -> Result<(), DdapError> {
    // Instance resolution is purely local; an unknown id must fail before
    // any network traffic.
    let dam = pick_dam(&ctx.session.dams, args.dam.as_deref())?.clone();
    resolve_credentials(ctx).await?;
    let target = resolve_target(ctx, &dam, &args).await?;
    let grant = run_authorize_flow(ctx, &dam, &target).await?;
    println!("Access token acquired");

    // --print and --env-file are mutually exclusive; stdout is the default
    if args.print || args.env_file.is_none() {
        print_yaml(&grant)?;
    }
    if let Some(path) = &args.env_file {
        write_env_file(path, &grant)?;
    }
    Ok(())
}

pub(crate) fn pick_dam<'a>(
    dams: &'a BTreeMap<String, DamInfo>,
    requested: Option<&str>,
) -> Result<&'a DamInfo, DdapError> {
    match requested {
        Some(id) => dams.get(id).ok_or_else(|| {
            DdapError::AmbiguousInput(format!(
                "unknown DAM instance [{id}]; known instances: {}",
                known_ids(dams)
            ))
        }),
        None => {
            let mut values = dams.values();
            match (values.next(), values.next()) {
                (Some(dam), None) => Ok(dam),
                (Some(_), Some(_)) => Err(DdapError::AmbiguousInput(format!(
                    "several DAM instances are configured; pass --dam with one of: {}",
                    known_ids(dams)
                ))),
                (None, _) => Err(DdapError::AmbiguousInput(
                    "the saved session knows no DAM instances; run `ddap login` again".to_string(),
                )),
            }
        }
    }
}

fn known_ids(dams: &BTreeMap<String, DamInfo>) -> String {
    dams.keys().cloned().collect::<Vec<_>>().join(", ")
}

async fn resolve_target(
    ctx: &mut CommandContext<'_>,
    dam: &DamInfo,
    args: &GetAccessArgs,
) -> Result<AccessTarget, DdapError> {
    if let Some(interface_id) = &args.interface_id {
        return Ok(AccessTarget::Interface {
            interface_id: interface_id.clone(),
        });
    }
    let (Some(resource), Some(view)) = (args.resource.clone(), args.view.clone()) else {
        return Err(DdapError::AmbiguousInput(
            "pass either --resource/--view or --interface-id".to_string(),
        ));
    };
    let role = match &args.role {
        Some(role) => role.clone(),
        None => default_role(ctx, dam, &resource, &view).await?,
    };
    Ok(AccessTarget::ResourceView {
        resource,
        view,
        role,
    })
}

/// Looks the view up in the instance's catalog and picks its first role.
/// The backend does not guarantee role ordering, so the pick is made
/// deterministic locally and flagged to the user.
pub(crate) async fn default_role(
    ctx: &mut CommandContext<'_>,
    dam: &DamInfo,
    resource: &str,
    view: &str,
) -> Result<String, DdapError> {
    let catalog = list_resources(
        ctx.client,
        &dam.url,
        &ctx.session.realm,
        &ctx.session.credentials,
    )
    .await
    .map_err(|err| instance_error(&dam.id, err))?;

    let view_model = catalog
        .resources
        .get(resource)
        .and_then(|entry| entry.views.get(view))
        .ok_or_else(|| {
            DdapError::AmbiguousInput(format!(
                "unknown resource view [{resource}/{view}] on instance [{}]",
                dam.id
            ))
        })?;
    let role = view_model.roles.keys().next().cloned().ok_or_else(|| {
        DdapError::AmbiguousInput(format!("view [{resource}/{view}] exposes no roles"))
    })?;
    warn!(
        resource = %resource,
        view = %view,
        role = %role,
        "no --role given; picked the first role of the view (not a backend guarantee)"
    );
    Ok(role)
}

/// Authorization flow: clear any stale cached grant for a fresh correlation
/// id, hand the consent URL to the human, then poll the status endpoint
/// until a non-empty grant arrives or the ceiling passes.
pub(crate) async fn run_authorize_flow(
    ctx: &mut CommandContext<'_>,
    dam: &DamInfo,
    target: &AccessTarget,
) -> Result<AccessGrant, DdapError> {
    let api_base = ctx.session.api_base();
    let realm = ctx.session.realm.clone();
    let credentials = ctx.session.credentials.clone();
    let correlation_id = Uuid::new_v4().to_string();
    let resource_path = target.resource_path(&dam.id);
    let encoded_path = urlencoding::encode(&resource_path).into_owned();

    clear_pending_grant(ctx.client, &api_base, &realm, &correlation_id, &credentials).await?;

    let callback_url = format!(
        "{api_base}/realm/{realm}/cli/{correlation_id}/authorize/callback?resource={encoded_path}"
    );
    let authorize_url = format!(
        "{api_base}/realm/{realm}/resources/authorize?resource={encoded_path}&redirectUri={}",
        urlencoding::encode(&callback_url)
    );
    let status_url = format!(
        "{api_base}/realm/{realm}/cli/{correlation_id}/authorize/status?resource={encoded_path}"
    );

    println!(
        "Visit this link in a web browser to authorize [{}]: {authorize_url}",
        target.description()
    );
    println!(
        "Waiting up to {}s for the web authorization to complete...",
        ctx.poll.ceiling.as_secs()
    );

    let client = ctx.client;
    let status_url = status_url.as_str();
    let credentials = &credentials;
    let grant = poll_until(
        ctx.poll,
        "the web authorization to complete",
        move || async move { poll_authorize_status(client, status_url, credentials).await },
    )
    .await
    .map_err(|err| grant_error(target, err))?;

    println!("Authorization successful");
    Ok(grant)
}

fn grant_error(target: &AccessTarget, err: DdapError) -> DdapError {
    match err {
        DdapError::Backend {
            status, message, ..
        } => DdapError::Backend {
            context: format!("could not get access to [{}]", target.description()),
            status,
            message,
        },
        other => other,
    }
}

/// Writes the grant as shell export statements so the caller can `source`
/// the file.
pub(crate) fn write_env_file(path: &Path, grant: &AccessGrant) -> Result<(), DdapError> {
    let token = grant.primary_token().ok_or_else(|| {
        DdapError::Protocol("the access grant carries no token".to_string())
    })?;
    let mut exports = format!("TOKEN={token}\n");
    let bucket_url = grant.http_object_url();
    if let Some(url) = bucket_url {
        exports.push_str(&format!("HTTP_BUCKET_URL={url}\n"));
    }
    fs::write(path, exports).map_err(|source| DdapError::io(path, source))?;

    println!("Output written to {}", path.display());
    println!("Use `source` to load it into the environment:");
    println!();
    println!("source {}", path.display());
    if bucket_url.is_some() {
        println!("curl ${{HTTP_BUCKET_URL}}/o?access_token=${{TOKEN}}");
    }
    Ok(())
}
