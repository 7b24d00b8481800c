use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use ratatui::{
    style::{Color, Style},
    widgets::{Cell, Row},
};
use serde::{Deserialize, Deserializer};

use super::category::CategoryRef;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    pub id: u64,
    pub description: String,
    pub amount: Decimal,
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub date: NaiveDate,
    pub category: CategoryRef,
}

impl Transaction {
    /// One table row: description, amount, date, category.
    pub fn to_row(&self) -> Row<'_> {
        let amount_style = if self.amount < Decimal::ZERO {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };

        Row::new(vec![
            Cell::from(self.description.as_str()),
            Cell::from(format_amount(self.amount)).style(amount_style),
            Cell::from(format_date(self.date)),
            Cell::from(self.category.name.as_str()),
        ])
    }
}

pub fn format_amount(amount: Decimal) -> String {
    format!("R$ {}", amount)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Accepts `YYYY-MM-DD` as well as full timestamps such as
/// `2024-01-10T00:00:00.000Z`, keeping only the calendar date.
pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.date_naive());
    }
    NaiveDate::parse_from_str(raw.get(..10).unwrap_or(raw), "%Y-%m-%d")
}

fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw)
        .map_err(|e| serde::de::Error::custom(format!("invalid date '{raw}': {e}")))
}
