//! Scripted listing service for driving the engine in tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use starport_commerce::catalog::{ListingPage, Price, Product};
use starport_commerce::Cursor;
use starport_data::{FetchError, ListingService};
use tokio::sync::oneshot;

/// A request the fake received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    ListFrom(String),
    Search(String),
}

struct Scripted {
    gate: Option<oneshot::Receiver<()>>,
    result: Result<ListingPage, FetchError>,
}

/// Answers requests from a queue, in call order.
///
/// A gated response is held until its sender fires, which lets tests
/// complete requests in any order.
#[derive(Default)]
pub struct ScriptedListing {
    calls: Mutex<Vec<Call>>,
    responses: Mutex<VecDeque<Scripted>>,
}

impl ScriptedListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, page: ListingPage) {
        self.push(None, Ok(page));
    }

    pub fn push_err(&self, error: FetchError) {
        self.push(None, Err(error));
    }

    /// Queue a response released by the returned sender.
    pub fn push_gated(&self, result: Result<ListingPage, FetchError>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(Some(rx), result);
        tx
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Yield until at least `n` requests have arrived.
    pub async fn wait_for_calls(&self, n: usize) {
        for _ in 0..1_000 {
            if self.calls.lock().unwrap().len() >= n {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("expected {n} calls, got {:?}", self.calls());
    }

    fn push(&self, gate: Option<oneshot::Receiver<()>>, result: Result<ListingPage, FetchError>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Scripted { gate, result });
    }

    async fn answer(&self, call: Call) -> Result<ListingPage, FetchError> {
        self.calls.lock().unwrap().push(call);
        let next = self.responses.lock().unwrap().pop_front();
        let Some(Scripted { gate, result }) = next else {
            return Err(FetchError::Connection("no scripted response".into()));
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        result
    }
}

#[async_trait]
impl ListingService for ScriptedListing {
    async fn list(&self) -> Result<ListingPage, FetchError> {
        self.answer(Call::List).await
    }

    async fn list_from(&self, cursor: &Cursor) -> Result<ListingPage, FetchError> {
        self.answer(Call::ListFrom(cursor.as_str().to_string())).await
    }

    async fn search(&self, query: &str) -> Result<ListingPage, FetchError> {
        self.answer(Call::Search(query.to_string())).await
    }
}

/// A page of products priced 1000 credits apart.
pub fn page(names: &[&str], next: Option<&str>, total: u64) -> ListingPage {
    let items = names
        .iter()
        .enumerate()
        .map(|(i, name)| Product::new(*name, Price::Credits(1_000.0 * (i as f64 + 1.0))))
        .collect();
    ListingPage::new(items, next.map(Cursor::new), total)
}

pub fn names(page: &ListingPage) -> Vec<&str> {
    page.items.iter().map(|p| p.id.as_str()).collect()
}
