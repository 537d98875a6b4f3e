//! Page View State
//!
//! Every page is in exactly one of three states: still loading, failed with a
//! message, or ready with data. A [`PageActivation`] drives one page mount:
//! it spawns a single fetch task and publishes the resulting state over a
//! `tokio::sync::watch` channel. Dropping the activation aborts the fetch, so
//! a response arriving after the page is gone is never applied.

use std::fmt::Display;
use std::future::Future;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::ApiResult;

/// Shown when the fetch task died without producing a result
pub const UNEXPECTED_ERROR_MESSAGE: &str = "予期しないエラーが発生しました";

/// Render state of a page
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Error(String),
    Ready(T),
}

impl<T> ViewState<T> {
    pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => ViewState::Ready(data),
            Err(e) => ViewState::Error(e.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> ViewState<Vec<T>> {
    /// Ready, but with nothing to show
    pub fn is_empty(&self) -> bool {
        matches!(self, ViewState::Ready(items) if items.is_empty())
    }
}

/// Aborts the wrapped task when dropped
struct AbortOnDrop<R>(JoinHandle<R>);

impl<R> Drop for AbortOnDrop<R> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// One mount of a page: a single in-flight fetch and the state it settles to
pub struct PageActivation<T> {
    state: watch::Receiver<ViewState<T>>,
    task: JoinHandle<()>,
}

impl<T> PageActivation<T>
where
    T: Send + Sync + 'static,
{
    /// Start in `Loading` and spawn `fetch`; its outcome becomes the next state
    pub fn spawn<F>(fetch: F) -> Self
    where
        F: Future<Output = ApiResult<T>> + Send + 'static,
    {
        let (tx, rx) = watch::channel(ViewState::Loading);

        let task = tokio::spawn(async move {
            // The inner task isolates panics in the fetch; the guard makes
            // aborting this task abort the request as well.
            let mut inner = AbortOnDrop(tokio::spawn(fetch));
            let next = match (&mut inner.0).await {
                Ok(result) => ViewState::from_result(result),
                Err(e) if e.is_cancelled() => return,
                Err(e) => {
                    tracing::error!(error = %e, "Page fetch task failed");
                    ViewState::Error(UNEXPECTED_ERROR_MESSAGE.to_string())
                }
            };

            if let ViewState::Error(message) = &next {
                tracing::debug!(message = %message, "Page settled with error");
            }

            // Nobody listening means the page was deactivated; nothing to do
            let _ = tx.send(next);
        });

        Self { state: rx, task }
    }

    /// Discard the current fetch and start a fresh one from `Loading`.
    ///
    /// Receivers obtained from [`subscribe`](Self::subscribe) before the
    /// refetch observe a closed channel and must subscribe again.
    pub fn refetch<F>(&mut self, fetch: F)
    where
        F: Future<Output = ApiResult<T>> + Send + 'static,
    {
        self.task.abort();
        let fresh = Self::spawn(fetch);
        // Dropping the previous activation closes its channel
        drop(std::mem::replace(self, fresh));
    }

    /// Borrow the current state
    pub fn current(&self) -> watch::Ref<'_, ViewState<T>> {
        self.state.borrow()
    }

    /// Receiver for observing state changes of this activation
    pub fn subscribe(&self) -> watch::Receiver<ViewState<T>> {
        self.state.clone()
    }

    /// Whether the fetch task has finished (settled or aborted)
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl<T> PageActivation<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Clone of the current state
    pub fn snapshot(&self) -> ViewState<T> {
        self.state.borrow().clone()
    }

    /// Wait until the page leaves `Loading` and return the settled state
    pub async fn settled(&mut self) -> ViewState<T> {
        match self.state.wait_for(|s| !s.is_loading()).await {
            Ok(state) => state.clone(),
            // Sender gone while still loading: the task was aborted
            Err(_) => ViewState::Error(UNEXPECTED_ERROR_MESSAGE.to_string()),
        }
    }
}

impl<T> Drop for PageActivation<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
