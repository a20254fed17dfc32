//! Account command handlers: profile, password, role, delete.

use secrecy::SecretString;

use stockdeck_core::{Inventory, ProfileUpdate};

use crate::cli::{AccountArgs, AccountCommand, GlobalOpts};
use crate::error::CliError;

use super::util;

pub async fn handle(
    inventory: &Inventory,
    args: AccountArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AccountCommand::Profile { name, email } => {
            if name.is_none() && email.is_none() {
                return Err(CliError::Validation {
                    field: "profile".into(),
                    reason: "pass --name and/or --email".into(),
                });
            }
            let identity = inventory.update_profile(ProfileUpdate { name, email }).await?;
            if !global.quiet {
                eprintln!("Profile updated: {} <{}>", identity.name, identity.email);
            }
            Ok(())
        }

        AccountCommand::Password => {
            let old_password = SecretString::from(rpassword::prompt_password("Old password: ")?);
            let new_password = SecretString::from(rpassword::prompt_password("New password: ")?);

            // Same client-side floor the service enforces.
            if secrecy::ExposeSecret::expose_secret(&new_password).len() < 6 {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "must be at least 6 characters".into(),
                });
            }

            inventory.change_password(&old_password, &new_password).await?;
            if !global.quiet {
                eprintln!("Password changed");
            }
            Ok(())
        }

        AccountCommand::Role { role } => {
            let identity = inventory.change_role(&role).await?;
            if !global.quiet {
                eprintln!(
                    "Role set to '{}'",
                    identity.role.as_deref().unwrap_or_default()
                );
            }
            Ok(())
        }

        AccountCommand::Delete => {
            if !util::confirm(
                "Permanently delete your account? This cannot be undone.",
                global.yes,
            )? {
                return Ok(());
            }
            inventory.delete_account().await?;
            if !global.quiet {
                eprintln!("Account deleted; signed out");
            }
            Ok(())
        }
    }
}
