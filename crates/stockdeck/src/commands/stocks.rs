//! Stock command handlers.

use std::sync::Arc;

use tabled::Tabled;

use stockdeck_core::{EntityId, Inventory, Product, ProductDraft, format_currency};

use crate::cli::{GlobalOpts, StocksArgs, StocksCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct StockRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Quantity")]
    quantity: u64,
    #[tabled(rename = "Unit price")]
    price: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl From<&Arc<Product>> for StockRow {
    fn from(p: &Arc<Product>) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
            quantity: p.quantity,
            price: format_currency(p.price),
            value: format_currency(p.value()),
        }
    }
}

fn detail(p: &Product) -> String {
    format!(
        "id:       {}\nname:     {}\nquantity: {}\nprice:    {}\nvalue:    {}",
        p.id,
        p.name,
        p.quantity,
        format_currency(p.price),
        format_currency(p.value()),
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    inventory: &Inventory,
    args: StocksArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        StocksCommand::List => {
            let products = inventory.products().await?;
            let out = output::render_list(
                &global.output,
                &products,
                |p| StockRow::from(p),
                |p| p.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        StocksCommand::Get { id } => {
            let product = inventory.product(&EntityId::from(id)).await?;
            let out =
                output::render_single(&global.output, &product, detail, |p| p.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        StocksCommand::Add {
            name,
            quantity,
            price,
        } => {
            let created = inventory
                .create_product(ProductDraft {
                    name,
                    quantity,
                    price,
                })
                .await?;
            if !global.quiet {
                eprintln!("Product '{}' created ({})", created.name, created.id);
            }
            Ok(())
        }

        StocksCommand::Edit {
            id,
            name,
            quantity,
            price,
        } => {
            let id = EntityId::from(id);
            // The service expects the full record; fill omitted fields
            // from the current state.
            let current = inventory.product(&id).await?;
            let draft = ProductDraft {
                name: name.unwrap_or(current.name),
                quantity: quantity.unwrap_or(current.quantity),
                price: price.unwrap_or(current.price),
            };
            let updated = inventory.update_product(&id, draft).await?;
            if !global.quiet {
                eprintln!("Product '{}' updated", updated.name);
            }
            Ok(())
        }

        StocksCommand::Rm { id } => {
            if !util::confirm(&format!("Delete product '{id}'?"), global.yes)? {
                return Ok(());
            }
            inventory.delete_product(&EntityId::from(id)).await?;
            if !global.quiet {
                eprintln!("Product deleted");
            }
            Ok(())
        }
    }
}
