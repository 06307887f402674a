//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::source::{FetchError, Page, PageSource};

/// A source that only has a label. Every fetch returns an empty terminal page.
pub struct StaticSource {
    label: String,
}

impl StaticSource {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
        }
    }
}

#[async_trait]
impl<T: Send + 'static> PageSource<T> for StaticSource {
    fn label(&self) -> &str {
        &self.label
    }

    async fn fetch(
        &self,
        _start_index: usize,
        _cancel: &CancellationToken,
    ) -> Result<Page<T>, FetchError> {
        Ok(Page::empty())
    }
}

/// One scripted response.
pub enum Step<T> {
    Page(Page<T>),
    Fail(String),
    /// Waits until the test sends the outcome. Ignores cancellation.
    Gated(oneshot::Receiver<Result<Page<T>, String>>),
}

/// A source that replays scripted steps in order and records each start index.
pub struct ScriptedSource<T> {
    label: String,
    steps: Mutex<VecDeque<Step<T>>>,
    calls: Mutex<Vec<usize>>,
}

impl<T> ScriptedSource<T> {
    pub fn new(label: &str, steps: Vec<Step<T>>) -> Self {
        Self {
            label: label.to_string(),
            steps: Mutex::new(steps.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Start indices of every fetch so far.
    pub fn calls(&self) -> Vec<usize> {
        self.calls.lock().unwrap().clone()
    }
}

/// A gated step and the sender that releases it.
pub fn gate<T>() -> (Step<T>, oneshot::Sender<Result<Page<T>, String>>) {
    let (tx, rx) = oneshot::channel();
    (Step::Gated(rx), tx)
}

#[async_trait]
impl<T: Send + 'static> PageSource<T> for ScriptedSource<T> {
    fn label(&self) -> &str {
        &self.label
    }

    async fn fetch(
        &self,
        start_index: usize,
        _cancel: &CancellationToken,
    ) -> Result<Page<T>, FetchError> {
        self.calls.lock().unwrap().push(start_index);
        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(Step::Page(page)) => Ok(page),
            Some(Step::Fail(msg)) => Err(FetchError::Network(msg)),
            Some(Step::Gated(rx)) => match rx.await {
                Ok(Ok(page)) => Ok(page),
                Ok(Err(msg)) => Err(FetchError::Network(msg)),
                Err(_) => Err(FetchError::Cancelled),
            },
            None => Ok(Page::empty()),
        }
    }
}
