use crate::cli_args::Command;
use crate::error::DdapError;
use crate::modules::access::handle_get_access;
use crate::modules::resources::handle_list;
use crate::modules::session::CommandContext;

pub(crate) async fn handle_command(
    command: Command,
    ctx: &mut CommandContext<'_>,
) -> Result<(), DdapError> {
    match command {
        Command::List(_args) => handle_list(ctx).await,
        Command::GetAccess(args) => handle_get_access(args, ctx).await,
        Command::Login(_) => unreachable!(),
    }
}
