//! Movement command handlers.

use std::sync::Arc;

use tabled::Tabled;

use stockdeck_core::{EntityId, Inventory, Movement, MovementAmounts, MovementDraft};

use crate::cli::{GlobalOpts, MovementsArgs, MovementsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct MovementRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "In")]
    inbound: String,
    #[tabled(rename = "Out")]
    outbound: String,
    #[tabled(rename = "Recorded")]
    recorded: String,
}

fn row(inventory: &Inventory, m: &Arc<Movement>) -> MovementRow {
    MovementRow {
        id: m.id.to_string(),
        product: inventory.product_name(&m.product_id),
        inbound: format!("+{}", m.inbound),
        outbound: format!("-{}", m.outbound),
        recorded: m
            .created_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default(),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    inventory: &Inventory,
    args: MovementsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        MovementsCommand::List => {
            // Products are only needed to resolve names; if the fetch
            // fails, rows fall back to raw product ids.
            let _ = inventory.products().await;
            let movements = inventory.movements().await?;

            let out = output::render_list(
                &global.output,
                &movements,
                |m| row(inventory, m),
                |m| m.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MovementsCommand::Add {
            product,
            inbound,
            outbound,
        } => {
            let created = inventory
                .create_movement(MovementDraft {
                    product_id: EntityId::from(product),
                    inbound,
                    outbound,
                })
                .await?;
            if !global.quiet {
                eprintln!(
                    "Movement recorded ({}): +{} / -{}",
                    created.id, created.inbound, created.outbound
                );
            }
            Ok(())
        }

        MovementsCommand::Edit {
            id,
            inbound,
            outbound,
        } => {
            let id = EntityId::from(id);
            // Fill omitted amounts from the current record.
            let movements = inventory.movements().await?;
            let current = movements
                .iter()
                .find(|m| m.id == id)
                .ok_or_else(|| CliError::NotFound {
                    message: format!("movement {id}"),
                })?;

            let amounts = MovementAmounts {
                inbound: inbound.unwrap_or(current.inbound),
                outbound: outbound.unwrap_or(current.outbound),
            };
            let updated = inventory.update_movement(&id, amounts).await?;
            if !global.quiet {
                eprintln!(
                    "Movement updated: +{} / -{}",
                    updated.inbound, updated.outbound
                );
            }
            Ok(())
        }

        MovementsCommand::Rm { id } => {
            if !util::confirm(&format!("Delete movement '{id}'?"), global.yes)? {
                return Ok(());
            }
            inventory.delete_movement(&EntityId::from(id)).await?;
            if !global.quiet {
                eprintln!("Movement deleted");
            }
            Ok(())
        }
    }
}
