//! Session command handlers: login, register, logout, whoami.

use secrecy::SecretString;
use stockdeck_core::Inventory;

use crate::cli::{GlobalOpts, LoginArgs, RegisterArgs};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn login(
    inventory: &Inventory,
    args: LoginArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let email = util::prompt_or(args.email, "Email")?;
    let password = SecretString::from(rpassword::prompt_password("Password: ")?);

    let identity = inventory.session().login(&email, &password).await?;

    if !global.quiet {
        eprintln!("Signed in as {} <{}>", identity.name, identity.email);
    }
    Ok(())
}

pub async fn register(
    inventory: &Inventory,
    args: RegisterArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let name = util::prompt_or(args.name, "Name")?;
    let email = util::prompt_or(args.email, "Email")?;
    let password = SecretString::from(rpassword::prompt_password("Password: ")?);

    let identity = inventory.session().register(&name, &email, &password).await?;

    if !global.quiet {
        eprintln!("Account created; signed in as {}", identity.email);
    }
    Ok(())
}

pub async fn logout(inventory: &Inventory, global: &GlobalOpts) -> Result<(), CliError> {
    inventory.session().logout().await;
    if !global.quiet {
        eprintln!("Signed out");
    }
    Ok(())
}

pub fn whoami(inventory: &Inventory, global: &GlobalOpts) -> Result<(), CliError> {
    let Some(identity) = inventory.session().identity() else {
        return Err(CliError::NotSignedIn);
    };

    let out = output::render_single(
        &global.output,
        &*identity,
        |i| {
            let role = i.role.as_deref().unwrap_or("-");
            format!(
                "id:    {}\nname:  {}\nemail: {}\nrole:  {}",
                i.id, i.name, i.email, role
            )
        },
        |i| i.id.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
