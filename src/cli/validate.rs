//! Argument validation applied before anything reaches the core.

const MAX_SYMBOL_LEN: usize = 10;

/// Accepts 1 to 10 ASCII letters or digits, in any case.
pub fn parse_symbol(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Err("Symbol cannot be blank".to_string());
    }
    if s.len() > MAX_SYMBOL_LEN {
        return Err(format!(
            "Symbol must be between 1 and {MAX_SYMBOL_LEN} characters"
        ));
    }
    if !s.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("Symbol must contain only letters and numbers".to_string());
    }
    Ok(s.to_string())
}

/// Parses a `SYMBOL=PRICE` override.
pub fn parse_price_override(s: &str) -> Result<(String, f64), String> {
    let (symbol, price) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected SYMBOL=PRICE, got '{s}'"))?;
    let symbol = parse_symbol(symbol.trim())?;
    let price = price
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("Invalid price '{price}': {e}"))?;
    Ok((symbol, price))
}
