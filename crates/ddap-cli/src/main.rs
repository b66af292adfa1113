use std::error::Error as _;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli_args;
mod cli_command;
mod error;
mod modules;

use crate::cli_args::{Cli, Command};
use crate::cli_command::handle_command;
use crate::error::DdapError;
use crate::modules::auth::handle_login;
use crate::modules::session::{CommandContext, SessionStore};
use crate::modules::shared::PollPolicy;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version requests are not failures; everything else
            // is malformed input.
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };
    init_logging(cli.verbose);
    let debug = cli.debug;

    if let Err(err) = run(cli).await {
        eprintln!("{err}");
        if debug {
            let mut cause = err.source();
            while let Some(source) = cause {
                eprintln!("caused by: {source}");
                cause = source.source();
            }
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), DdapError> {
    // Redirects stay unfollowed so the credential resolver can observe a
    // redirect to the login page.
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(DdapError::Client)?;
    let store = SessionStore::from_home()?;
    let poll = PollPolicy::default();

    match cli.command {
        Command::Login(args) => handle_login(args, &client, poll, &store).await,
        command => {
            let mut session = store.load()?;
            let mut ctx = CommandContext {
                client: &client,
                session: &mut session,
                poll,
            };
            let outcome = handle_command(command, &mut ctx).await;
            // Credential rotations are worth keeping even when the command
            // itself failed afterwards.
            let persisted = store.persist_if_dirty(&session);
            outcome?;
            persisted?;
            Ok(())
        }
    }
}

fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}
