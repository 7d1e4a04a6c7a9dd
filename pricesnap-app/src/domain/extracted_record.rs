use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product data pulled from one page, stamped with when and where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    pub name: String,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub promotion: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "url")]
    pub source_url: String,
}

impl ExtractedRecord {
    pub fn new(name: String, source_url: String) -> Self {
        Self {
            name,
            price: None,
            currency: None,
            promotion: None,
            timestamp: Utc::now(),
            source_url,
        }
    }

    pub fn with_price(mut self, price: Option<f64>) -> Self {
        self.price = price;
        self
    }

    pub fn with_currency(mut self, currency: Option<String>) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_promotion(mut self, promotion: Option<String>) -> Self {
        self.promotion = promotion;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Field/value pairs in display order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        fn or_none<T: ToString>(value: &Option<T>) -> String {
            value
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "None".to_string())
        }

        vec![
            ("name", self.name.clone()),
            ("price", or_none(&self.price)),
            ("currency", or_none(&self.currency)),
            ("promotion", or_none(&self.promotion)),
            ("timestamp", self.timestamp.to_rfc3339()),
            ("url", self.source_url.clone()),
        ]
    }
}
