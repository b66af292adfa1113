use tracing::debug;

use crate::cli_args::LoginArgs;
use crate::error::DdapError;
use crate::modules::auth::http::{
    fetch_dam_directory, fetch_login_status, form_login, probe_session, start_login,
};
use crate::modules::session::{CommandContext, Credentials, Session, SessionStore};
use crate::modules::shared::{poll_until, PollPolicy};

/// Credential resolver: turns the session's stored credentials into ones
/// the backend currently accepts, detecting server-side invalidation of a
/// stored cookie pair. Rotated credentials mark the session dirty.
pub(crate) async fn resolve_credentials(ctx: &mut CommandContext<'_>) -> Result<(), DdapError> {
    let base = ctx.session.url.clone();
    match ctx.session.credentials.clone() {
        Credentials::SessionPair { .. } => {
            if probe_session(ctx.client, &base, &ctx.session.credentials).await? {
                return Ok(());
            }
            debug!("stored session pair was invalidated server-side");
            ctx.session.set_credentials(Credentials::Anonymous);
            Err(DdapError::InvalidCredentials(
                "the stored session has expired; run `ddap login` again".to_string(),
            ))
        }
        Credentials::Basic { username, password } => {
            let resolved = form_login(ctx.client, &base, &username, &password).await?;
            ctx.session.set_credentials(resolved);
            Ok(())
        }
        Credentials::Anonymous => Ok(()),
    }
}

pub(crate) async fn handle_login(
    args: LoginArgs,
    client: &reqwest::Client,
    poll: PollPolicy,
    store: &SessionStore,
) -> Result<(), DdapError> {
    let mut session = Session::new(args.location, args.realm);
    if let Some(user) = &args.user {
        if let [username, password] = &user[..] {
            session.set_credentials(Credentials::Basic {
                username: username.clone(),
                password: password.clone(),
            });
        }
    }

    let mut ctx = CommandContext {
        client,
        session: &mut session,
        poll,
    };
    resolve_credentials(&mut ctx).await?;
    run_login_flow(&mut ctx).await?;

    store.persist(&session)?;
    println!("Login context saved to [{}]", store.path().display());
    Ok(())
}

/// Login flow: start the command-line login, show the browser URL once,
/// then poll the status location until the backend hands back identity
/// tokens. On success the DAM directory is merged into the session.
pub(crate) async fn run_login_flow(ctx: &mut CommandContext<'_>) -> Result<(), DdapError> {
    let base = ctx.session.url.clone();
    let realm = ctx.session.realm.clone();
    let credentials = ctx.session.credentials.clone();

    let (status_url, correlation_token) =
        start_login(ctx.client, &base, &realm, &credentials).await?;

    let first = fetch_login_status(ctx.client, &status_url, &correlation_token).await?;
    if let Some(web_login_url) = first.web_login_url.as_deref() {
        println!("Visit this link in a web browser to login: {web_login_url}");
    }

    let tokens = match first.tokens {
        Some(tokens) => tokens,
        None => {
            println!(
                "Waiting up to {}s for the web login to complete...",
                ctx.poll.ceiling.as_secs()
            );
            let client = ctx.client;
            let status_url = status_url.as_str();
            let correlation_token = correlation_token.as_str();
            poll_until(ctx.poll, "the web login to complete", move || async move {
                Ok(fetch_login_status(client, status_url, correlation_token)
                    .await?
                    .tokens)
            })
            .await?
        }
    };
    println!("Login successful");

    let dams = fetch_dam_directory(ctx.client, &base, &ctx.session.credentials).await?;
    ctx.session.set_tokens(tokens);
    ctx.session.set_dams(dams);
    Ok(())
}
