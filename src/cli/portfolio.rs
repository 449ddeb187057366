use super::ui;
use crate::App;
use crate::core::holding::normalize_symbol;
use crate::core::{PortfolioSummary, StockValue};
use anyhow::Result;
use comfy_table::Cell;
use serde_json::json;

fn values_table(values: &[StockValue]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Symbol"),
        ui::header_cell("Quantity"),
        ui::header_cell("Price"),
        ui::header_cell("Value"),
    ]);
    for value in values {
        table.add_row(vec![
            Cell::new(&value.symbol),
            ui::number_cell(value.quantity.to_string()),
            ui::number_cell(ui::format_amount(value.current_price)),
            ui::number_cell(ui::format_amount(value.total_value)),
        ]);
    }
    table.to_string()
}

impl PortfolioSummary {
    pub fn display_as_table(&self) -> String {
        let mut output = format!(
            "{}\n\n",
            ui::style_text("Portfolio Summary", ui::StyleType::Title)
        );
        output.push_str(&values_table(&self.stock_details));
        output.push_str("\n\n");
        output.push_str(&ui::total_line("Holdings", &self.total_stocks.to_string()));
        output.push('\n');
        output.push_str(&ui::total_line(
            "Total Quantity",
            &self.total_quantity.to_string(),
        ));
        output.push('\n');
        output.push_str(&ui::total_line(
            "Average Price Per Share",
            &ui::format_amount(self.average_price_per_share),
        ));
        output.push('\n');
        output.push_str(&ui::total_line(
            "Total Value",
            &ui::format_amount(self.total_value),
        ));
        output
    }
}

pub async fn summary(app: &App, json: bool) -> Result<String> {
    let pb = ui::new_progress_bar(0);
    pb.set_message("Fetching prices...");
    let summary = app.portfolio.summary(&pb).await;
    pb.finish_and_clear();

    let summary = summary?;
    if json {
        return ui::to_json(&summary);
    }
    if summary.stock_details.is_empty() {
        return Ok(ui::style_text("No holdings", ui::StyleType::Subtle));
    }
    Ok(summary.display_as_table())
}

pub async fn ranked(app: &App, json: bool) -> Result<String> {
    let values = app.holdings.list_by_value_descending().await?;
    if json {
        return ui::to_json(&values);
    }
    if values.is_empty() {
        return Ok(ui::style_text("No holdings", ui::StyleType::Subtle));
    }
    Ok(values_table(&values))
}

pub async fn highest(app: &App, json: bool) -> Result<String> {
    let highest = app.portfolio.highest_value().await?;
    match highest {
        Some(value) if json => ui::to_json(&value),
        Some(value) => Ok(values_table(std::slice::from_ref(&value))),
        None if json => ui::to_json(&serde_json::Value::Null),
        None => Ok(ui::style_text(
            "No holdings, nothing to rank",
            ui::StyleType::Error,
        )),
    }
}

pub async fn total_value(app: &App, json: bool) -> Result<String> {
    let value = app.portfolio.total_value().await?;
    if json {
        return ui::to_json(&json!({ "totalValue": value }));
    }
    Ok(ui::total_line("Total Value", &ui::format_amount(value)))
}

pub async fn average_price(app: &App, json: bool) -> Result<String> {
    let value = app.portfolio.average_price_per_share().await?;
    if json {
        return ui::to_json(&json!({ "averagePricePerShare": value }));
    }
    Ok(ui::total_line(
        "Average Price Per Share",
        &ui::format_amount(value),
    ))
}

pub async fn price(app: &App, symbol: &str, json: bool) -> Result<String> {
    let symbol = normalize_symbol(symbol);
    let price = app.prices.fetch_price(&symbol).await;
    if json {
        return ui::to_json(&json!({ "symbol": symbol, "price": price }));
    }
    Ok(ui::total_line(&symbol, &ui::format_amount(price)))
}
