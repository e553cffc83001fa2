use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::timestamp;

/// Sales breakdown for one product within an hourly bucket.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CategorySales {
    pub coffee_name: String,
    pub qtd_vendas: u64,
    pub valor_total_tipo: Decimal
}

/// One aggregated output row per observed hourly bucket.
///
/// `vendas_por_tipo` is structured in memory; on disk it collapses into a
/// single JSON-encoded CSV column so the consuming side reparses a defined
/// schema instead of re-evaluating embedded text.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HourlySummary {
    /// Start of the hour-long window the row describes.
    #[serde(with = "timestamp::required")]
    pub event_timestamp: NaiveDateTime,
    /// Count of transactions in the bucket.
    pub total_vendas: u64,
    /// Sum of `money` in the bucket.
    pub valor_total: Decimal,
    /// Mean of `money` across the whole bucket, not split by category.
    pub valor_medio: Decimal,
    /// Per-category breakdown in first-appearance order.
    #[serde(with = "json_column")]
    pub vendas_por_tipo: Vec<CategorySales>
}

mod json_column {
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        let encoded = serde_json::to_string(value).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&encoded)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: serde::de::DeserializeOwned,
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        serde_json::from_str(&encoded).map_err(de::Error::custom)
    }
}
