pub mod api;
pub mod cli;
pub mod clock;
pub mod error;
pub mod models;
pub mod tui;
pub mod ui;

// Re-export commonly used items
pub use api::{ApiConfig, HttpApi, TransactionApi};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ApiError, FormError};
pub use models::{
    category::{Category, CategoryRef},
    filter::FilterCriteria,
    form::{NewTransaction, TransactionForm},
    transaction::Transaction,
};
pub use ui::app::{App, AppEvent, ScreenOptions, Tab};
