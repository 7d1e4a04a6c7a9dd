/// Characters of page body shown to the block classifier.
pub const BLOCK_CHECK_EXCERPT_CHARS: usize = 1000;

/// Characters of reduced HTML shown to the product extractor.
pub const EXTRACTION_CONTEXT_CHARS: usize = 4000;

pub const BLOCK_CHECK_INSTRUCTION: &str = r#"Analyze this HTML response and determine if it shows signs of blocking or anti-bot measures.
Consider things like:
- Presence of CAPTCHAs
- Access denied messages
- Robot detection messages
- Unusual redirects

Response format: JSON with keys 'is_blocked' (boolean) and 'reason' (string)"#;

pub const EXTRACTION_INSTRUCTION: &str = r#"Extract product information from this HTML.
Find the following information:
- Product name
- Current price (as a decimal number, e.g., 9.99)
- Currency symbol or code (e.g., €, EUR)
- Any promotional text or deals

Important:
- Look for price elements with classes containing 'price', 'prijs', 'amount'
- Price might be formatted as "9.99", "€9.99", "9,99 EUR", or similar
- Convert comma-separated prices to decimal (e.g., "9,99" → 9.99)

Format the response as JSON with keys: 'name', 'price' (number), 'currency', 'promotion' (null if none)"#;

pub fn build_block_check_context(body: &str) -> String {
    format!(
        "First {} chars of HTML: {}",
        BLOCK_CHECK_EXCERPT_CHARS,
        excerpt(body, BLOCK_CHECK_EXCERPT_CHARS)
    )
}

pub fn build_extraction_context(reduced_html: &str) -> String {
    format!(
        "HTML content: {}",
        excerpt(reduced_html, EXTRACTION_CONTEXT_CHARS)
    )
}

/// First `max_chars` characters, never splitting a code point.
pub fn excerpt(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}
