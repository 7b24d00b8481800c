use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::api::TransactionApi;
use crate::clock::Clock;
use crate::error::{ApiError, FormError};
use crate::models::{category::Category, transaction::Transaction};
use crate::ui::{form::FormScreen, list::ListScreen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Transactions,
    NewTransaction,
}

/// Switches for the optional parts of the screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenOptions {
    pub filtering: bool,
    pub date_picker: bool,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        ScreenOptions {
            filtering: true,
            date_picker: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A popup that swallows the next key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(message: &str) -> Self {
        Notification {
            kind: NotificationKind::Success,
            title: "Success".to_string(),
            message: message.to_string(),
        }
    }

    pub fn error(message: &str) -> Self {
        Notification {
            kind: NotificationKind::Error,
            title: "Error".to_string(),
            message: message.to_string(),
        }
    }
}

/// Completed network calls, delivered back to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    TransactionsLoaded(Result<Vec<Transaction>, ApiError>),
    CategoriesLoaded(Tab, Result<Vec<Category>, ApiError>),
    TransactionCreated(Result<(), ApiError>),
}

pub struct App {
    api: Arc<dyn TransactionApi>,
    clock: Arc<dyn Clock>,
    pub options: ScreenOptions,
    pub tab: Tab,
    pub list: ListScreen,
    pub form: FormScreen,
    pub notification: Option<Notification>,
    pub should_quit: bool,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
}

impl App {
    pub fn new(api: Arc<dyn TransactionApi>, clock: Arc<dyn Clock>, options: ScreenOptions) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let today = clock.today();
        App {
            api,
            clock,
            options,
            tab: Tab::Transactions,
            list: ListScreen::new(),
            form: FormScreen::new(today, options.date_picker),
            notification: None,
            should_quit: false,
            events_tx,
            events_rx,
        }
    }

    /// Focus lifecycle hook of the list screen. Both fetches are spawned
    /// independently and land in whatever order they finish.
    pub fn activate_list(&mut self) {
        debug!("list screen activated");
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.list_transactions().await;
            let _ = tx.send(AppEvent::TransactionsLoaded(result));
        });
        self.spawn_category_fetch(Tab::Transactions);
    }

    /// Mount hook of the form screen; only the first call fetches.
    pub fn mount_form(&mut self) {
        if self.form.mount() {
            debug!("form screen mounted");
            self.spawn_category_fetch(Tab::NewTransaction);
        }
    }

    fn spawn_category_fetch(&self, target: Tab) {
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.list_categories().await;
            let _ = tx.send(AppEvent::CategoriesLoaded(target, result));
        });
    }

    pub fn activate(&mut self, tab: Tab) {
        self.tab = tab;
        match tab {
            Tab::Transactions => self.activate_list(),
            Tab::NewTransaction => self.mount_form(),
        }
    }

    pub fn switch_tab(&mut self) {
        let next = match self.tab {
            Tab::Transactions => Tab::NewTransaction,
            Tab::NewTransaction => Tab::Transactions,
        };
        self.activate(next);
    }

    /// Validates locally and, only if that passes, sends the create request.
    pub fn submit(&mut self) {
        let payload = match self.form.prepare_submission() {
            Ok(payload) => payload,
            Err(e) => {
                warn!(reason = %e, "submission rejected");
                let message = match e {
                    FormError::InvalidCategory(_) => "Pick a category from the list!",
                    _ => "Fill in every field!",
                };
                self.notification = Some(Notification::error(message));
                return;
            }
        };

        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.create_transaction(&payload).await;
            let _ = tx.send(AppEvent::TransactionCreated(result));
        });
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::TransactionsLoaded(result) => self.list.on_transactions(result),
            AppEvent::CategoriesLoaded(Tab::Transactions, result) => self.list.on_categories(result),
            AppEvent::CategoriesLoaded(Tab::NewTransaction, result) => {
                if self.form.on_categories(result).is_err() {
                    self.notification = Some(Notification::error("Could not load the categories"));
                }
            }
            AppEvent::TransactionCreated(result) => {
                self.form.on_created(&result, self.clock.today());
                self.notification = Some(match result {
                    Ok(()) => Notification::success("Transaction saved!"),
                    Err(_) => Notification::error("Could not save the transaction"),
                });
            }
        }
    }

    /// Waits for the next completed call and applies it.
    pub async fn process_next_event(&mut self) {
        if let Some(event) = self.events_rx.recv().await {
            self.handle_event(event);
        }
    }

    /// Applies every call that has already completed, without waiting.
    pub fn process_pending_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if self.notification.take().is_some() {
            return;
        }

        match self.tab {
            Tab::Transactions => self.handle_list_key(key.code),
            Tab::NewTransaction => self.handle_form_key(key.code),
        }
    }

    fn handle_list_key(&mut self, code: KeyCode) {
        let today = self.clock.today();

        if let Some(dialog) = self.list.dialog.as_mut() {
            match code {
                KeyCode::Enter => self.list.apply_filter(),
                KeyCode::Esc => self.list.cancel_filter(),
                KeyCode::Up | KeyCode::BackTab => dialog.previous_field(),
                KeyCode::Down | KeyCode::Tab => dialog.next_field(),
                KeyCode::Left => dialog.step(false, &self.list.categories, today),
                KeyCode::Right => dialog.step(true, &self.list.categories, today),
                KeyCode::Backspace | KeyCode::Delete => dialog.unset(),
                _ => {}
            }
            return;
        }

        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.switch_tab(),
            KeyCode::Up => self.list.previous(),
            KeyCode::Down => self.list.next(),
            KeyCode::Char('r') => self.activate_list(),
            KeyCode::Char('f') if self.options.filtering => {
                self.list.open_filter(self.options.date_picker)
            }
            KeyCode::Char('x') if self.options.filtering => {
                info!("filter cleared");
                self.list.clear_filter(today)
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, code: KeyCode) {
        let today = self.clock.today();
        match code {
            KeyCode::Tab | KeyCode::Esc => self.switch_tab(),
            KeyCode::Enter => self.submit(),
            KeyCode::Up | KeyCode::BackTab => self.form.previous_field(),
            KeyCode::Down => self.form.next_field(),
            KeyCode::Left => self.form.step(false, today),
            KeyCode::Right => self.form.step(true, today),
            KeyCode::PageUp => self.form.step_month(true),
            KeyCode::PageDown => self.form.step_month(false),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(c) => self.form.input(c),
            _ => {}
        }
    }
}
