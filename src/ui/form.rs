use chrono::{Months, NaiveDate};
use tracing::{error, info};

use crate::error::{ApiError, FormError};
use crate::models::{
    category::Category,
    form::{NewTransaction, TransactionForm},
};
use crate::ui::list::step_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Description,
    Amount,
    Date,
    Category,
}

/// State of the new-transaction screen.
#[derive(Debug)]
pub struct FormScreen {
    pub form: TransactionForm,
    pub categories: Vec<Category>,
    pub focus: FormField,
    pub date_picker: bool,
    /// Set between mount and the arrival of the category list.
    pub loading: bool,
    mounted: bool,
}

impl FormScreen {
    pub fn new(today: NaiveDate, date_picker: bool) -> Self {
        FormScreen {
            form: TransactionForm::new(today),
            categories: Vec::new(),
            focus: FormField::Description,
            date_picker,
            loading: false,
            mounted: false,
        }
    }

    /// Returns `true` the first time only; the caller fetches categories then.
    pub fn mount(&mut self) -> bool {
        if self.mounted {
            return false;
        }
        self.mounted = true;
        self.loading = true;
        true
    }

    /// Stores the category list. An error is handed back so the caller can
    /// tell the user.
    pub fn on_categories(&mut self, result: Result<Vec<Category>, ApiError>) -> Result<(), ApiError> {
        self.loading = false;
        match result {
            Ok(categories) => {
                info!(count = categories.len(), "form categories loaded");
                self.categories = categories;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "failed to load categories for the form");
                Err(e)
            }
        }
    }

    fn fields(&self) -> &'static [FormField] {
        if self.date_picker {
            &[FormField::Description, FormField::Amount, FormField::Date, FormField::Category]
        } else {
            &[FormField::Description, FormField::Amount, FormField::Category]
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

    pub fn input(&mut self, c: char) {
        match self.focus {
            FormField::Description => self.form.description.push(c),
            FormField::Amount => self.form.amount.push(c),
            FormField::Date | FormField::Category => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            FormField::Description => {
                self.form.description.pop();
            }
            FormField::Amount => {
                self.form.amount.pop();
            }
            FormField::Category => self.form.category.clear(),
            FormField::Date => {}
        }
    }

    /// Left/right: a day on the date field, the neighbouring category on the
    /// category field.
    pub fn step(&mut self, forward: bool, today: NaiveDate) {
        match self.focus {
            FormField::Date if self.date_picker => {
                self.form.date = step_date(Some(self.form.date), forward, today);
            }
            FormField::Category if !self.categories.is_empty() => {
                let len = self.categories.len();
                let next = match Category::position_of(&self.categories, &self.form.category) {
                    Some(i) if forward => (i + 1) % len,
                    Some(i) => (i + len - 1) % len,
                    None if forward => 0,
                    None => len - 1,
                };
                self.form.category = self.categories[next].id.to_string();
            }
            _ => {}
        }
    }

    /// Page up/down on the date field.
    pub fn step_month(&mut self, forward: bool) {
        if self.focus != FormField::Date || !self.date_picker {
            return;
        }
        let date = self.form.date;
        let moved = if forward {
            date.checked_add_months(Months::new(1))
        } else {
            date.checked_sub_months(Months::new(1))
        };
        self.form.date = moved.unwrap_or(date);
    }

    pub fn selected_category(&self) -> Option<&Category> {
        Category::position_of(&self.categories, &self.form.category).map(|i| &self.categories[i])
    }

    pub fn prepare_submission(&self) -> Result<NewTransaction, FormError> {
        self.form.to_new_transaction()
    }

    pub fn on_created(&mut self, result: &Result<(), ApiError>, today: NaiveDate) {
        match result {
            Ok(()) => {
                info!("transaction created");
                self.form.reset(today);
                self.focus = FormField::Description;
            }
            Err(e) => error!(error = %e, "failed to create transaction"),
        }
    }
}
