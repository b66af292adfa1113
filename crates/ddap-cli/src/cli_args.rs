use clap::{ArgAction, Parser, Subcommand};

pub use crate::modules::access::args::*;
pub use crate::modules::auth::args::*;
pub use crate::modules::resources::args::*;

#[derive(Parser)]
#[command(name = "ddap")]
#[command(about = "Log in to a DDAP deployment and obtain access tokens for protected resources")]
pub struct Cli {
    /// Print the underlying error causes on failure
    #[arg(short, long, global = true)]
    pub debug: bool,
    #[arg(long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Log in through an out-of-band browser flow and save the session
    Login(LoginArgs),
    /// List the resources of every DAM instance in the saved session
    List(ListArgs),
    /// Obtain a short-lived access token for a resource view
    GetAccess(GetAccessArgs),
}
