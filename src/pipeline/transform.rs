use std::collections::BTreeMap;

use chrono::{NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use tracing::info;

use crate::models::{CategorySales, HourlySummary, SaleRecord};

const MEAN_SCALE: u32 = 4;

/// Buckets valid rows into hour-long windows and computes per-window metrics.
///
/// Rows whose timestamp cannot be derived are excluded entirely: they form no
/// bucket of their own and are not counted anywhere. Output rows are ordered
/// by ascending bucket start, and a bucket exists only when at least one row
/// landed in it. An empty input yields an empty output, not an error.
pub fn aggregate(records: &[SaleRecord]) -> Vec<HourlySummary> {
    let mut buckets: BTreeMap<NaiveDateTime, Bucket> = BTreeMap::new();

    for record in records {
        let Some(timestamp) = record.event_timestamp.or_else(|| record.derive_timestamp()) else {
            continue;
        };

        buckets.entry(truncate_to_hour(timestamp)).or_default().add(record);
    }

    let summaries: Vec<HourlySummary> = buckets.into_iter()
        .map(|(start, bucket)| bucket.into_summary(start))
        .collect();

    info!("{} hourly buckets aggregated from {} records", summaries.len(), records.len());

    summaries
}

/// Zeroes minutes and seconds, keeping the date and hour.
fn truncate_to_hour(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp.date()
        .and_hms_opt(timestamp.hour(), 0, 0)
        .unwrap_or(timestamp)
}

/// Running totals for a single hourly window.
#[derive(Debug, Default)]
struct Bucket {
    total_vendas: u64,
    valor_total: Decimal,
    categories: Vec<CategorySales>
}

impl Bucket {
    fn add(&mut self, record: &SaleRecord) {
        let amount = record.money.unwrap_or_default();

        self.total_vendas += 1;
        self.valor_total += amount;

        // Categories keep first-appearance order so reruns over identical
        // input stay stable. Buckets hold a handful of products at most, so a
        // linear scan beats a map here.
        match self.categories.iter_mut().find(|category| category.coffee_name == record.coffee_name) {
            Some(category) => {
                category.qtd_vendas += 1;
                category.valor_total_tipo += amount;
            }
            None => self.categories.push(CategorySales {
                coffee_name: record.coffee_name.clone(),
                qtd_vendas: 1,
                valor_total_tipo: amount
            })
        }
    }

    fn into_summary(self, start: NaiveDateTime) -> HourlySummary {
        let count = Decimal::from(self.total_vendas);

        // The mean is taken over the whole bucket, never split by category,
        // and rounded to a fixed scale so output stays byte-identical across
        // reruns.
        let valor_medio = if count.is_zero() {
            Decimal::ZERO
        } else {
            (self.valor_total / count).round_dp(MEAN_SCALE)
        };

        HourlySummary {
            event_timestamp: start,
            total_vendas: self.total_vendas,
            valor_total: self.valor_total,
            valor_medio,
            vendas_por_tipo: self.categories
        }
    }
}
