//! Command handlers, one module per screen-equivalent.

pub mod account;
pub mod auth;
pub mod config_cmd;
pub mod dashboard;
pub mod movements;
pub mod stocks;
pub mod util;

use stockdeck_core::Inventory;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler.
///
/// Data and account commands are gated on an authenticated session --
/// the restore already ran, so an anonymous session here means there is
/// no usable credential.
pub async fn dispatch(
    cmd: Command,
    inventory: &Inventory,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => auth::login(inventory, args, global).await,
        Command::Register(args) => auth::register(inventory, args, global).await,
        Command::Logout => auth::logout(inventory, global).await,
        Command::Whoami => auth::whoami(inventory, global),

        Command::Stocks(args) => {
            require_session(inventory)?;
            stocks::handle(inventory, args, global).await
        }
        Command::Movements(args) => {
            require_session(inventory)?;
            movements::handle(inventory, args, global).await
        }
        Command::Dashboard => {
            require_session(inventory)?;
            dashboard::handle(inventory, global).await
        }
        Command::Account(args) => {
            require_session(inventory)?;
            account::handle(inventory, args, global).await
        }

        // Handled before a connection is built.
        Command::Config(_) | Command::Completions(_) => unreachable!("handled in run()"),
    }
}

fn require_session(inventory: &Inventory) -> Result<(), CliError> {
    if inventory.session().is_authenticated() {
        Ok(())
    } else {
        Err(CliError::NotSignedIn)
    }
}
