use regex_lite::Regex;
use serde_json::Value;
use std::sync::OnceLock;

const CURRENCY_SYMBOLS: &[&str] = &["€", "$", "£", "¥", "₹", "₽", "₩", "₺"];

const CURRENCY_CODES: &[&str] = &[
    "EUR", "USD", "GBP", "JPY", "CHF", "SEK", "NOK", "DKK", "PLN", "CZK", "HUF", "CAD", "AUD",
    "NZD", "CNY", "INR", "IDR", "SGD", "HKD", "BRL", "MXN", "TRY", "ZAR",
];

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"-?\d+(?:[.,]\d+)*").unwrap_or_else(|_| Regex::new(".^").unwrap())
    })
}

fn code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\b[A-Za-z]{3}\b").unwrap_or_else(|_| Regex::new(".^").unwrap())
    })
}

/// Coerces a reply's `price` value. Numbers pass through, strings are
/// parsed, and anything negative, non-finite or non-numeric becomes `None`.
pub fn coerce_price(value: &Value) -> Option<f64> {
    let price = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_price(s),
        _ => None,
    }?;
    (price.is_finite() && price >= 0.0).then_some(price)
}

/// Parses the first number in a free-form price string such as `"€9,99"`
/// or `"1.299,00 EUR"`.
pub fn parse_price(raw: &str) -> Option<f64> {
    let token = number_pattern().find(raw)?.as_str();
    if token.starts_with('-') {
        return None;
    }

    let price: f64 = normalize_separators(token).parse().ok()?;
    (price.is_finite() && price >= 0.0).then_some(price)
}

/// Rewrites a digit run with `.`/`,` separators into dot-decimal form.
///
/// When both separators occur, the last one is the decimal mark. A single
/// separator of either kind is the decimal mark; repeated separators of one
/// kind are thousands grouping.
fn normalize_separators(token: &str) -> String {
    let last_dot = token.rfind('.');
    let last_comma = token.rfind(',');

    match (last_dot, last_comma) {
        (Some(dot), Some(comma)) => {
            let (decimal, grouping) = if comma > dot { (',', '.') } else { ('.', ',') };
            token
                .chars()
                .filter(|c| *c != grouping)
                .map(|c| if c == decimal { '.' } else { c })
                .collect()
        }
        (None, Some(_)) if token.matches(',').count() > 1 => token.replace(',', ""),
        (None, Some(_)) => token.replace(',', "."),
        (Some(_), None) if token.matches('.').count() > 1 => token.replace('.', ""),
        _ => token.to_string(),
    }
}

/// A currency symbol or ISO code mentioned in `raw`, symbols first.
pub fn detect_currency(raw: &str) -> Option<String> {
    if let Some(symbol) = CURRENCY_SYMBOLS.iter().find(|s| raw.contains(*s)) {
        return Some(symbol.to_string());
    }

    code_pattern()
        .find_iter(raw)
        .map(|m| m.as_str().to_uppercase())
        .find(|code| CURRENCY_CODES.contains(&code.as_str()))
}
