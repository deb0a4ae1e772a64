// SPDX-License-Identifier: AGPL-3.0
// Voyara App - Screen state and task ownership

use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// What a screen is currently showing
#[derive(Debug, Clone, PartialEq)]
pub enum UiState<T> {
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> Default for UiState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> UiState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Observable state cell shared between a view-model and its tasks
#[derive(Debug)]
pub struct StateHolder<T> {
    tx: Arc<watch::Sender<UiState<T>>>,
}

impl<T> Clone for StateHolder<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: Clone> Default for StateHolder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> StateHolder<T> {
    pub fn new() -> Self {
        Self {
            tx: Arc::new(watch::Sender::new(UiState::Idle)),
        }
    }

    /// Snapshot of the current state
    pub fn get(&self) -> UiState<T> {
        self.tx.borrow().clone()
    }

    /// Publish a new state; succeeds even with no subscribers
    pub fn set(&self, state: UiState<T>) {
        self.tx.send_replace(state);
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState<T>> {
        self.tx.subscribe()
    }

    /// Wait until the state is anything but `Loading`
    pub async fn settled(&self) -> UiState<T> {
        let mut rx = self.tx.subscribe();
        let settled = match rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => Some(state.clone()),
            Err(_) => None,
        };
        settled.unwrap_or_else(|| self.get())
    }
}

/// Owns the tasks a view-model has started and aborts them when dropped
///
/// Tasks run on the runtime behind `handle`, so actions can be triggered
/// from threads that are not inside that runtime.
#[derive(Debug)]
pub struct TaskScope {
    handle: Handle,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl TaskScope {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            handles: Mutex::new(Vec::new()),
        }
    }

    /// Spawn `future` on the scope's runtime, bound to this scope
    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let task = self.handle.spawn(future);
        let mut handles = self.handles.lock().unwrap_or_else(|e| e.into_inner());
        handles.retain(|h| !h.is_finished());
        handles.push(task);
    }

    /// Number of tasks still running
    pub fn active(&self) -> usize {
        let handles = self.handles.lock().unwrap_or_else(|e| e.into_inner());
        handles.iter().filter(|h| !h.is_finished()).count()
    }

    pub fn cancel_all(&self) {
        let mut handles = self.handles.lock().unwrap_or_else(|e| e.into_inner());
        for handle in handles.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        let handles = self.handles.get_mut().unwrap_or_else(|e| e.into_inner());
        if !handles.is_empty() {
            tracing::debug!("Cancelling {} view-model task(s)", handles.len());
        }
        for handle in handles.drain(..) {
            handle.abort();
        }
    }
}
