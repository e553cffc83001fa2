use chrono::NaiveDate;

use crate::models::SaleRecord;
use crate::pipeline::errors::{ValidationError, Violation};

const CASH_TYPES: [&str; 2] = ["cash", "card"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A named column-level predicate evaluated against the whole table.
pub struct Expectation {
    pub name: &'static str,
    check: fn(&[SaleRecord]) -> Result<(), String>
}

/// The fixed, ordered expectation suite for the sales dataset.
pub fn expectations() -> [Expectation; 5] {
    [
        Expectation { name: "coffee_name_exists", check: coffee_name_exists },
        Expectation { name: "hour_of_day_between_0_and_23", check: hour_of_day_between_0_and_23 },
        Expectation { name: "cash_type_in_set", check: cash_type_in_set },
        Expectation { name: "money_not_null_and_non_negative", check: money_not_null_and_non_negative },
        Expectation { name: "date_matches_format", check: date_matches_format }
    ]
}

/// Gates the pipeline on data quality.
///
/// Every expectation runs even after one fails so the error names the full
/// set of violated rules. On success the table passes through untouched.
pub fn validate(records: &[SaleRecord]) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    for expectation in expectations() {
        if let Err(detail) = (expectation.check)(records) {
            violations.push(Violation { expectation: expectation.name, detail });
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}

fn coffee_name_exists(records: &[SaleRecord]) -> Result<(), String> {
    let missing = records.iter()
        .filter(|record| record.coffee_name.is_empty())
        .count();

    if missing == 0 {
        Ok(())
    } else {
        Err(format!("{missing} row(s) are missing a coffee_name value"))
    }
}

fn hour_of_day_between_0_and_23(records: &[SaleRecord]) -> Result<(), String> {
    let out_of_range = records.iter()
        .filter(|record| !record.hour_of_day.is_some_and(|hour| (0..=23).contains(&hour)))
        .count();

    if out_of_range == 0 {
        Ok(())
    } else {
        Err(format!("{out_of_range} row(s) have hour_of_day outside [0, 23]"))
    }
}

fn cash_type_in_set(records: &[SaleRecord]) -> Result<(), String> {
    let unknown = records.iter()
        .filter(|record| !CASH_TYPES.contains(&record.cash_type.as_str()))
        .count();

    if unknown == 0 {
        Ok(())
    } else {
        Err(format!("{unknown} row(s) have cash_type outside {CASH_TYPES:?}"))
    }
}

fn money_not_null_and_non_negative(records: &[SaleRecord]) -> Result<(), String> {
    let mut null = 0;
    let mut negative = 0;

    for record in records {
        match record.money {
            None => null += 1,
            Some(amount) if amount.is_sign_negative() && !amount.is_zero() => negative += 1,
            Some(_) => {}
        }
    }

    if null == 0 && negative == 0 {
        Ok(())
    } else {
        Err(format!("{null} null and {negative} negative money value(s)"))
    }
}

fn date_matches_format(records: &[SaleRecord]) -> Result<(), String> {
    let malformed = records.iter()
        .filter(|record| NaiveDate::parse_from_str(&record.date, DATE_FORMAT).is_err())
        .count();

    if malformed == 0 {
        Ok(())
    } else {
        Err(format!("{malformed} row(s) have a Date not matching {DATE_FORMAT}"))
    }
}
