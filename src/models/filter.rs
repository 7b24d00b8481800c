use chrono::NaiveDate;

use super::transaction::Transaction;

/// Constraints narrowing the displayed transaction list.
///
/// The date bounds only take effect when both are set. A range whose start
/// lies after its end matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub category: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl FilterCriteria {
    /// What the clear action leaves behind: no category, both bounds on
    /// `today`. The bounds are not unset.
    pub fn cleared(today: NaiveDate) -> Self {
        FilterCriteria {
            category: None,
            start: Some(today),
            end: Some(today),
        }
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(category) = &self.category {
            if transaction.category.name != *category {
                return false;
            }
        }

        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= transaction.date && transaction.date <= end,
            _ => true,
        }
    }

    /// Indices into `transactions` of every matching entry, in order.
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<usize> {
        transactions
            .iter()
            .enumerate()
            .filter(|(_, t)| self.matches(t))
            .map(|(i, _)| i)
            .collect()
    }
}
