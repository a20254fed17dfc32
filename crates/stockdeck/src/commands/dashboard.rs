//! Dashboard: summary figures over both collections.

use owo_colors::OwoColorize;

use stockdeck_core::{Inventory, InventorySummary, format_currency};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(inventory: &Inventory, global: &GlobalOpts) -> Result<(), CliError> {
    // Both collections feed the summary; fetch them fresh together.
    let (products, movements) = tokio::join!(inventory.products(), inventory.movements());
    products?;
    movements?;

    let summary = inventory.summary();
    let color = output::should_color(&global.color);

    let out = output::render_single(
        &global.output,
        &summary,
        |s| detail(s, color),
        |s| s.product_count.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

fn detail(s: &InventorySummary, color: bool) -> String {
    let inbound = format!("+{}", s.inbound_units);
    let outbound = format!("-{}", s.outbound_units);
    let (inbound, outbound) = if color {
        (inbound.green().to_string(), outbound.red().to_string())
    } else {
        (inbound, outbound)
    };

    format!(
        "products:        {}\ntotal units:     {}\ninventory value: {}\nmovements:       {inbound} / {outbound}",
        s.product_count,
        s.total_units,
        format_currency(s.total_value),
    )
}
