use clap::Args;

#[derive(Args)]
pub struct LoginArgs {
    /// Root URL of the DDAP deployment
    #[arg(short, long, env = "DDAP_URL")]
    pub location: String,
    /// Username and password for the frontend form login
    #[arg(short, long, num_args = 2, value_names = ["USERNAME", "PASSWORD"])]
    pub user: Option<Vec<String>>,
    /// Realm to log into
    #[arg(short, long, env = "DDAP_REALM", default_value = "master")]
    pub realm: String,
}
