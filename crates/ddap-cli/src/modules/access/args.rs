use std::path::PathBuf;

use clap::{ArgGroup, Args};

#[derive(Args)]
#[command(group(ArgGroup::new("target").required(true).args(["resource", "interface_id"])))]
pub struct GetAccessArgs {
    /// DAM instance id from the saved session; may be omitted when exactly
    /// one instance is configured
    #[arg(long)]
    pub dam: Option<String>,
    /// Resource to request access to
    #[arg(short, long, requires = "view", conflicts_with = "interface_id")]
    pub resource: Option<String>,
    /// View of the resource
    #[arg(short, long, requires = "resource", conflicts_with = "interface_id")]
    pub view: Option<String>,
    /// Role on the view; defaults to the view's first role
    #[arg(long, requires = "view", conflicts_with = "interface_id")]
    pub role: Option<String>,
    /// Request access for a single interface id instead of a resource view
    #[arg(short, long)]
    pub interface_id: Option<String>,
    /// Write the grant to the given path as shell export statements
    #[arg(short = 'f', long, conflicts_with = "print")]
    pub env_file: Option<PathBuf>,
    /// Print the grant to stdout (the default)
    #[arg(short, long)]
    pub print: bool,
}
