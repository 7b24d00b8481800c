use chrono::NaiveDate;
use serde::Serialize;

use crate::error::FormError;

/// Body of `POST /api/transactions`.
///
/// `amount` is whatever [`parse_leading_float`] made of the typed text. A NaN
/// serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
    pub description: String,
    pub amount: f64,
    pub category_id: u64,
    pub date: NaiveDate,
}

/// Field state of the transaction form.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionForm {
    pub description: String,
    pub amount: String,
    /// Category id as text; empty until one is picked.
    pub category: String,
    pub date: NaiveDate,
}

impl TransactionForm {
    pub fn new(today: NaiveDate) -> Self {
        TransactionForm {
            description: String::new(),
            amount: String::new(),
            category: String::new(),
            date: today,
        }
    }

    pub fn reset(&mut self, today: NaiveDate) {
        *self = TransactionForm::new(today);
    }

    /// Checks that every field is filled in and builds the request body.
    pub fn to_new_transaction(&self) -> Result<NewTransaction, FormError> {
        if self.description.is_empty() {
            return Err(FormError::MissingDescription);
        }
        if self.amount.is_empty() {
            return Err(FormError::MissingAmount);
        }
        if self.category.is_empty() {
            return Err(FormError::MissingCategory);
        }

        let category_id = self
            .category
            .trim()
            .parse::<u64>()
            .map_err(|_| FormError::InvalidCategory(self.category.clone()))?;

        Ok(NewTransaction {
            description: self.description.clone(),
            amount: parse_leading_float(&self.amount),
            category_id,
            date: self.date,
        })
    }
}

/// Parses the longest decimal prefix of `text`, ignoring leading whitespace
/// and whatever follows the number. `NaN` when no number starts the text.
pub fn parse_leading_float(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return s[..end + "Infinity".len()].parse().unwrap_or(f64::NAN);
    }

    let int_end = digits_from(end);
    let mut mantissa_end = int_end;
    if bytes.get(int_end) == Some(&b'.') {
        let frac_end = digits_from(int_end + 1);
        if frac_end > int_end + 1 || int_end > end {
            mantissa_end = frac_end;
        }
    }
    if mantissa_end == end {
        return f64::NAN;
    }
    end = mantissa_end;

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut i = end + 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_end = digits_from(i);
        if exp_end > i {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}
