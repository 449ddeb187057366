use super::ui;
use crate::App;
use crate::core::holding::{Holding, normalize_symbol};
use anyhow::Result;
use comfy_table::Cell;
use serde_json::json;

fn holdings_table(holdings: &[Holding]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Symbol"), ui::header_cell("Quantity")]);
    for holding in holdings {
        table.add_row(vec![
            Cell::new(&holding.symbol),
            ui::number_cell(holding.quantity.to_string()),
        ]);
    }
    table.to_string()
}

fn render_holding(holding: &Holding, json: bool) -> Result<String> {
    if json {
        return ui::to_json(holding);
    }
    Ok(holdings_table(std::slice::from_ref(holding)))
}

pub async fn list(app: &App, json: bool) -> Result<String> {
    let holdings = app.holdings.list_all().await?;
    if json {
        return ui::to_json(&holdings);
    }
    if holdings.is_empty() {
        return Ok(ui::style_text("No holdings", ui::StyleType::Subtle));
    }
    Ok(holdings_table(&holdings))
}

pub async fn show(app: &App, symbol: &str, json: bool) -> Result<String> {
    let holding = app.holdings.get_by_symbol(symbol).await?;
    render_holding(&holding, json)
}

pub async fn create(app: &App, symbol: &str, quantity: u32, json: bool) -> Result<String> {
    let holding = app.holdings.create(symbol, quantity).await?;
    render_holding(&holding, json)
}

pub async fn update(app: &App, symbol: &str, quantity: u32, json: bool) -> Result<String> {
    let holding = app.holdings.update(symbol, quantity).await?;
    render_holding(&holding, json)
}

pub async fn delete(app: &App, symbol: &str, json: bool) -> Result<String> {
    app.holdings.delete(symbol).await?;
    let symbol = normalize_symbol(symbol);
    if json {
        return ui::to_json(&json!({ "symbol": symbol, "deleted": true }));
    }
    Ok(format!("Deleted {symbol}"))
}

pub async fn buy(app: &App, symbol: &str, quantity: u32, json: bool) -> Result<String> {
    let holding = app.holdings.buy(symbol, quantity).await?;
    render_holding(&holding, json)
}

pub async fn sell(app: &App, symbol: &str, quantity: u32, json: bool) -> Result<String> {
    match app.holdings.sell(symbol, quantity).await? {
        Some(holding) => render_holding(&holding, json),
        None if json => ui::to_json(&serde_json::Value::Null),
        None => Ok(format!(
            "Sold all shares of {}, holding removed",
            ui::style_text(&normalize_symbol(symbol), ui::StyleType::TotalLabel)
        )),
    }
}

pub async fn investment(app: &App, symbol: &str, json: bool) -> Result<String> {
    let value = app.holdings.calculate_investment(symbol).await?;
    let symbol = normalize_symbol(symbol);
    if json {
        return ui::to_json(&json!({ "symbol": symbol, "investment": value }));
    }
    Ok(ui::total_line(
        &format!("Investment in {symbol}"),
        &ui::format_amount(value),
    ))
}
