use chrono::{Days, NaiveDate};
use ratatui::widgets::TableState;
use tracing::{error, info};

use crate::error::ApiError;
use crate::models::{category::Category, filter::FilterCriteria, transaction::Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Category,
    Start,
    End,
}

/// Draft criteria edited inside the filter popup.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDialog {
    pub draft: FilterCriteria,
    pub focus: FilterField,
    pub dates_enabled: bool,
}

impl FilterDialog {
    fn fields(&self) -> &'static [FilterField] {
        if self.dates_enabled {
            &[FilterField::Category, FilterField::Start, FilterField::End]
        } else {
            &[FilterField::Category]
        }
    }

    pub fn next_field(&mut self) {
        let fields = self.fields();
        let i = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(i + 1) % fields.len()];
    }

    pub fn previous_field(&mut self) {
        let fields = self.fields();
        let i = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(i + fields.len() - 1) % fields.len()];
    }

    /// Left/right on the focused field: cycles categories (with "all" as the
    /// slot before the first) or steps a date by one day.
    pub fn step(&mut self, forward: bool, categories: &[Category], today: NaiveDate) {
        match self.focus {
            FilterField::Category => {
                let slots = categories.len() + 1;
                let current = self
                    .draft
                    .category
                    .as_deref()
                    .and_then(|name| Category::position_by_name(categories, name))
                    .map(|i| i + 1)
                    .unwrap_or(0);
                let next = if forward {
                    (current + 1) % slots
                } else {
                    (current + slots - 1) % slots
                };
                self.draft.category = match next {
                    0 => None,
                    i => Some(categories[i - 1].name.clone()),
                };
            }
            FilterField::Start => self.draft.start = Some(step_date(self.draft.start, forward, today)),
            FilterField::End => self.draft.end = Some(step_date(self.draft.end, forward, today)),
        }
    }

    /// Unsets the focused criterion.
    pub fn unset(&mut self) {
        match self.focus {
            FilterField::Category => self.draft.category = None,
            FilterField::Start => self.draft.start = None,
            FilterField::End => self.draft.end = None,
        }
    }
}

/// An unset date starts at `today`; a set one moves a day.
pub fn step_date(date: Option<NaiveDate>, forward: bool, today: NaiveDate) -> NaiveDate {
    match date {
        None => today,
        Some(d) if forward => d.checked_add_days(Days::new(1)).unwrap_or(d),
        Some(d) => d.checked_sub_days(Days::new(1)).unwrap_or(d),
    }
}

/// State of the transaction list screen.
#[derive(Debug, Default)]
pub struct ListScreen {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub criteria: FilterCriteria,
    /// `None` until a filter is applied and again after each successful
    /// fetch; the full list is shown meanwhile.
    pub filtered: Option<Vec<usize>>,
    pub dialog: Option<FilterDialog>,
    pub table_state: TableState,
}

impl ListScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transactions currently designated for display.
    pub fn visible(&self) -> Vec<&Transaction> {
        match &self.filtered {
            Some(indices) => indices
                .iter()
                .filter_map(|&i| self.transactions.get(i))
                .collect(),
            None => self.transactions.iter().collect(),
        }
    }

    pub fn visible_len(&self) -> usize {
        self.filtered
            .as_ref()
            .map(|indices| indices.len())
            .unwrap_or(self.transactions.len())
    }

    pub fn on_transactions(&mut self, result: Result<Vec<Transaction>, ApiError>) {
        match result {
            Ok(transactions) => {
                info!(count = transactions.len(), "transactions loaded");
                self.transactions = transactions;
                self.filtered = None;
                self.reset_selection();
            }
            Err(e) => error!(error = %e, "failed to fetch transactions"),
        }
    }

    pub fn on_categories(&mut self, result: Result<Vec<Category>, ApiError>) {
        match result {
            Ok(categories) => {
                info!(count = categories.len(), "categories loaded");
                self.categories = categories;
            }
            Err(e) => error!(error = %e, "failed to fetch categories"),
        }
    }

    fn reset_selection(&mut self) {
        let selected = if self.visible_len() == 0 { None } else { Some(0) };
        self.table_state.select(selected);
    }

    /// Without the date fields only the category can constrain the list, so
    /// the draft starts with both bounds unset.
    pub fn open_filter(&mut self, dates_enabled: bool) {
        let mut draft = self.criteria.clone();
        if !dates_enabled {
            draft.start = None;
            draft.end = None;
        }
        self.dialog = Some(FilterDialog {
            draft,
            focus: FilterField::Category,
            dates_enabled,
        });
    }

    pub fn cancel_filter(&mut self) {
        self.dialog = None;
    }

    pub fn apply_filter(&mut self) {
        if let Some(dialog) = self.dialog.take() {
            self.criteria = dialog.draft;
            self.filtered = Some(self.criteria.apply(&self.transactions));
            info!(criteria = ?self.criteria, shown = self.visible_len(), "filter applied");
            self.reset_selection();
        }
    }

    /// Drops the category and pins both dates to `today`; the unfiltered
    /// list is shown again until the next filter is applied.
    pub fn clear_filter(&mut self, today: NaiveDate) {
        self.criteria = FilterCriteria::cleared(today);
        self.filtered = None;
        self.dialog = None;
        self.reset_selection();
    }

    pub fn next(&mut self) {
        let len = self.visible_len();
        let i = match self.table_state.selected() {
            Some(i) => {
                if i >= len.saturating_sub(1) {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table_state.select(if len == 0 { None } else { Some(i) });
    }

    pub fn previous(&mut self) {
        let len = self.visible_len();
        let i = match self.table_state.selected() {
            Some(i) => {
                if i == 0 {
                    len.saturating_sub(1)
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table_state.select(if len == 0 { None } else { Some(i) });
    }
}
