use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::timestamp;

/// Represents a single row from the raw sales CSV.
///
/// Value-level fields stay loosely typed on purpose: a malformed or missing
/// cell must survive extraction so the validation stage can report it, instead
/// of aborting the read mid-file. `event_timestamp` is absent in the raw file
/// and filled in by the extractor.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SaleRecord {
    /// Calendar date of the sale (`YYYY-MM-DD`).
    #[serde(rename = "Date")]
    pub date: String,
    /// Time of day of the sale (`HH:MM:SS`).
    #[serde(rename = "Time")]
    pub time: String,
    /// Payment method; the validator restricts this to `cash` or `card`.
    pub cash_type: String,
    /// Sale amount. `None` when the cell is empty.
    pub money: Option<Decimal>,
    /// Product label, the secondary grouping key within an hourly bucket.
    pub coffee_name: String,
    /// Hour component as provided by the source, expected in [0, 23].
    pub hour_of_day: Option<i64>,
    /// Combined `Date` + `Time`, derived at extraction. `None` when the pair
    /// does not parse.
    #[serde(default, with = "timestamp::optional")]
    pub event_timestamp: Option<NaiveDateTime>
}

impl SaleRecord {
    /// Combines `Date` and `Time` into a single timestamp. Unparsable pairs
    /// yield `None` rather than an error.
    pub fn derive_timestamp(&self) -> Option<NaiveDateTime> {
        timestamp::parse(&format!("{} {}", self.date, self.time))
    }
}
