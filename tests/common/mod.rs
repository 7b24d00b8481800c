#![allow(dead_code)]

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use rust_decimal::Decimal;
use tokio::net::TcpListener;

use finance_tracker::{
    ApiError, Category, CategoryRef, NewTransaction, Transaction, TransactionApi,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn transaction(id: u64, description: &str, amount: &str, day: NaiveDate, category: (u64, &str)) -> Transaction {
    Transaction {
        id,
        description: description.to_string(),
        amount: Decimal::from_str(amount).unwrap(),
        date: day,
        category: CategoryRef {
            id: category.0,
            name: category.1.to_string(),
        },
    }
}

/// Coffee/Food on 2024-01-10 and Bus/Transport on 2024-02-01.
pub fn sample_transactions() -> Vec<Transaction> {
    vec![
        transaction(1, "Coffee", "5.00", date(2024, 1, 10), (1, "Food")),
        transaction(2, "Bus", "3.00", date(2024, 2, 1), (2, "Transport")),
    ]
}

pub fn sample_categories() -> Vec<Category> {
    vec![Category::new(1, "Food"), Category::new(2, "Transport")]
}

// ---------------------------------------------------------------------------
// In-memory API double
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListTransactions,
    ListCategories,
    Create(NewTransaction),
}

/// Serves canned data and records every call it receives.
#[derive(Default)]
pub struct FakeApi {
    pub transactions: Mutex<Vec<Transaction>>,
    pub categories: Mutex<Vec<Category>>,
    pub fail_reads: AtomicBool,
    pub fail_create: AtomicBool,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn with_samples() -> Arc<Self> {
        let api = FakeApi::default();
        *api.transactions.lock().unwrap() = sample_transactions();
        *api.categories.lock().unwrap() = sample_categories();
        Arc::new(api)
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<NewTransaction> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Create(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    fn failure(path: &str) -> ApiError {
        ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            url: format!("http://fake{path}"),
        }
    }
}

#[async_trait]
impl TransactionApi for FakeApi {
    async fn list_transactions(&self) -> finance_tracker::error::Result<Vec<Transaction>> {
        self.calls.lock().unwrap().push(Call::ListTransactions);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::failure("/api/transactions"));
        }
        Ok(self.transactions.lock().unwrap().clone())
    }

    async fn list_categories(&self) -> finance_tracker::error::Result<Vec<Category>> {
        self.calls.lock().unwrap().push(Call::ListCategories);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::failure("/api/categories"));
        }
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn create_transaction(&self, transaction: &NewTransaction) -> finance_tracker::error::Result<()> {
        self.calls.lock().unwrap().push(Call::Create(transaction.clone()));
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(Self::failure("/api/transactions"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Stub HTTP server
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Header names are lowercased.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct StubRoute {
    pub method: &'static str,
    pub path: &'static str,
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl StubRoute {
    pub fn new(method: &'static str, path: &'static str, status: u16, body: &str) -> Self {
        StubRoute {
            method,
            path,
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Clone)]
struct StubState {
    routes: Arc<Vec<StubRoute>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Canned-response server on a random loopback port. Every request is
/// recorded before the matching route answers; unknown routes get a 404.
pub struct StubServer {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    pub async fn start(routes: Vec<StubRoute>) -> StubServer {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            routes: Arc::new(routes),
            requests: Arc::clone(&requests),
        };
        let app = Router::new().fallback(respond).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        StubServer {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn respond(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = RecordedRequest {
        method: method.as_str().to_string(),
        path: uri.path().to_string(),
        headers: headers
            .iter()
            .map(|(name, value)| {
                (name.as_str().to_string(), value.to_str().unwrap_or_default().to_string())
            })
            .collect(),
        body: String::from_utf8_lossy(&body).to_string(),
    };

    let route = state
        .routes
        .iter()
        .find(|r| r.method == request.method && r.path == request.path)
        .cloned();
    state.requests.lock().unwrap().push(request);

    let Some(route) = route else {
        return (StatusCode::NOT_FOUND, [(header::CONTENT_TYPE, "application/json")], "{}").into_response();
    };

    if !route.delay.is_zero() {
        tokio::time::sleep(route.delay).await;
    }

    let status = StatusCode::from_u16(route.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], route.body).into_response()
}
