use super::price::{coerce_price, detect_currency};
use crate::domain::ExtractedRecord;
use crate::infrastructure::azure_openai::prompt::{
    build_extraction_context, EXTRACTION_INSTRUCTION,
};
use crate::infrastructure::completion::{parse_json_object, CompletionService};
use chrono::Utc;
use pricesnap_errors::AppError;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Shape of the extraction reply. Every field is optional here, and the
/// typed record is built by explicit coercion.
#[derive(Debug, Default, Deserialize)]
struct ProductReply {
    #[serde(default)]
    name: Value,
    #[serde(default)]
    price: Value,
    #[serde(default)]
    currency: Value,
    #[serde(default)]
    promotion: Value,
}

pub struct ProductExtractor {
    completion: Arc<dyn CompletionService>,
}

impl ProductExtractor {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }

    /// Soft-failing extraction: errors are logged and become `None`.
    pub async fn extract(&self, reduced_html: &str, url: &str) -> Option<ExtractedRecord> {
        match self.try_extract(reduced_html, url).await {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::error!(url, "LLM extraction error: {}", e);
                None
            }
        }
    }

    pub async fn try_extract(
        &self,
        reduced_html: &str,
        url: &str,
    ) -> Result<ExtractedRecord, AppError> {
        let reply = self
            .completion
            .complete_json(EXTRACTION_INSTRUCTION, &build_extraction_context(reduced_html))
            .await?;

        let record = parse_product_reply(&reply, url)?;
        Ok(record.with_timestamp(Utc::now()))
    }
}

/// Turns raw reply content into a record. Only a missing name rejects the
/// reply; any other bad field is dropped on its own.
pub fn parse_product_reply(reply: &str, url: &str) -> Result<ExtractedRecord, AppError> {
    let parsed: ProductReply = parse_json_object(reply, "extraction")?;

    let name = non_empty_string(&parsed.name).ok_or_else(|| {
        AppError::MalformedReply("extraction: reply has no product name".to_string())
    })?;

    let price = coerce_price(&parsed.price);
    if price.is_none() && !parsed.price.is_null() {
        let err = AppError::MalformedField(format!("price {}", parsed.price));
        tracing::warn!(url, "Dropping field: {}", err);
    }

    let currency = non_empty_string(&parsed.currency).or_else(|| match &parsed.price {
        Value::String(raw) => detect_currency(raw),
        _ => None,
    });

    let promotion = non_empty_string(&parsed.promotion);

    Ok(ExtractedRecord::new(name, url.to_string())
        .with_price(price)
        .with_currency(currency)
        .with_promotion(promotion))
}

fn non_empty_string(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubCompletion;

    const URL: &str = "https://shop.example/p/110902232";

    #[test]
    fn test_full_reply() {
        let record = parse_product_reply(
            r#"{"name": "Therme Hammam Showergel", "price": 4.99, "currency": "EUR", "promotion": "2 + 1 gratis"}"#,
            URL,
        )
        .unwrap();

        assert_eq!(record.name, "Therme Hammam Showergel");
        assert_eq!(record.price, Some(4.99));
        assert_eq!(record.currency.as_deref(), Some("EUR"));
        assert_eq!(record.promotion.as_deref(), Some("2 + 1 gratis"));
        assert_eq!(record.source_url, URL);
    }

    #[test]
    fn test_comma_price_string() {
        let reply = r#"{"name": "Gel", "price": "9,99", "currency": "€"}"#;
        let record = parse_product_reply(reply, URL).unwrap();
        assert_eq!(record.price, Some(9.99));
    }

    #[test]
    fn test_currency_inferred_from_price_string() {
        let record = parse_product_reply(r#"{"name": "Gel", "price": "€9.99"}"#, URL).unwrap();

        assert_eq!(record.price, Some(9.99));
        assert_eq!(record.currency.as_deref(), Some("€"));
    }

    #[test]
    fn test_non_numeric_price_is_dropped() {
        let record = parse_product_reply(
            r#"{"name": "Sample", "price": "free", "currency": "EUR", "promotion": null}"#,
            URL,
        )
        .unwrap();

        assert_eq!(record.price, None);
        assert_eq!(record.currency.as_deref(), Some("EUR"));
        assert_eq!(record.promotion, None);
    }

    #[test]
    fn test_mistyped_fields_become_absent() {
        let record = parse_product_reply(
            r#"{"name": "Gel", "price": {"amount": 3}, "currency": 978, "promotion": ["a"]}"#,
            URL,
        )
        .unwrap();

        assert_eq!(record.price, None);
        assert_eq!(record.currency, None);
        assert_eq!(record.promotion, None);
    }

    #[test]
    fn test_empty_promotion_is_absent() {
        let record =
            parse_product_reply(r#"{"name": "Gel", "price": 1, "promotion": "  "}"#, URL).unwrap();
        assert_eq!(record.promotion, None);
    }

    #[test]
    fn test_missing_name_rejects_reply() {
        let err = parse_product_reply(r#"{"price": 4.99}"#, URL).unwrap_err();
        assert!(matches!(err, AppError::MalformedReply(_)));

        let err = parse_product_reply(r#"{"name": "", "price": 4.99}"#, URL).unwrap_err();
        assert!(matches!(err, AppError::MalformedReply(_)));
    }

    #[test]
    fn test_invalid_json_rejects_reply() {
        let err = parse_product_reply("Sure! Here is the product:", URL).unwrap_err();
        assert!(matches!(err, AppError::MalformedReply(_)));
    }

    #[test]
    fn test_array_reply_rejected() {
        let err = parse_product_reply(r#"["Gel", 4.99, "EUR", null]"#, URL).unwrap_err();
        assert!(matches!(err, AppError::MalformedReply(_)));
    }

    #[tokio::test]
    async fn test_extract_array_reply_is_none() {
        let stub = Arc::new(StubCompletion::replying(r#"["Gel", 4.99, "EUR", null]"#));
        let extractor = ProductExtractor::new(stub.clone());

        assert!(extractor.extract("<div></div>", URL).await.is_none());
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_extract_stamps_url_and_time() {
        let stub = Arc::new(StubCompletion::replying(r#"{"name": "Gel", "price": 2.5}"#));
        let extractor = ProductExtractor::new(stub.clone());

        let before = Utc::now();
        let record = extractor.extract("<span class=\"price\">2,50</span>", URL).await.unwrap();

        assert_eq!(record.source_url, URL);
        assert!(record.timestamp >= before);
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_extract_truncates_context() {
        let stub = Arc::new(StubCompletion::replying(r#"{"name": "Gel"}"#));
        let extractor = ProductExtractor::new(stub.clone());

        let html = format!("{}{}", "p".repeat(4000), "OVERFLOW");
        extractor.extract(&html, URL).await.unwrap();

        let contexts = stub.contexts();
        assert!(!contexts[0].contains("OVERFLOW"));
    }

    #[tokio::test]
    async fn test_service_error_is_soft() {
        let stub = Arc::new(StubCompletion::failing(AppError::CompletionFailed(
            "API error: 503 Service Unavailable".to_string(),
        )));
        let extractor = ProductExtractor::new(stub);

        assert!(extractor.extract("<div></div>", URL).await.is_none());
    }
}
