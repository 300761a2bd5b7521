// src/workflow/mod.rs
//! Request lifecycles for the dashboard panels.
//!
//! Every panel follows the same cycle: its trigger is disabled synchronously,
//! one request runs on the tokio runtime, and the single result comes back
//! through a oneshot channel that the owning controller polls once per frame.
//! Results are only ever applied on the UI thread.

use std::future::Future;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::api::{AnalyticsApi, ApiError, ApiResult};

pub mod advanced;
pub mod chat;
pub mod growth;
pub mod report;
pub mod upload;

pub use advanced::AdvancedAnalyticsController;
pub use chat::ChatController;
pub use growth::GrowthInsightsController;
pub use report::ReportController;
pub use upload::UploadController;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    Loading,
    Ready,
    Error,
}

/// One in-flight request and its eventual result.
pub struct Task<T> {
    rx: oneshot::Receiver<ApiResult<T>>,
}

impl<T: Send + 'static> Task<T> {
    pub fn spawn<F>(runtime: &Handle, request: F) -> Self
    where
        F: Future<Output = ApiResult<T>> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        runtime.spawn(async move {
            // The receiver is gone only if the controller was dropped
            let _ = tx.send(request.await);
        });
        Self { rx }
    }

    /// `None` while the request is still running.
    pub fn poll(&mut self) -> Option<ApiResult<T>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(ApiError::Transport(
                "request ended without a response".to_string(),
            ))),
        }
    }
}

/// The service plus the runtime requests are spawned on.
#[derive(Clone)]
pub struct Backend {
    api: Arc<dyn AnalyticsApi>,
    runtime: Handle,
}

impl Backend {
    pub fn new(api: Arc<dyn AnalyticsApi>, runtime: Handle) -> Self {
        Self { api, runtime }
    }

    pub fn request<T, F, Fut>(&self, call: F) -> Task<T>
    where
        T: Send + 'static,
        F: FnOnce(Arc<dyn AnalyticsApi>) -> Fut,
        Fut: Future<Output = ApiResult<T>> + Send + 'static,
    {
        Task::spawn(&self.runtime, call(self.api.clone()))
    }

    /// Runs a request nobody waits for.
    pub fn detach<F, Fut>(&self, call: F)
    where
        F: FnOnce(Arc<dyn AnalyticsApi>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.runtime.spawn(call(self.api.clone()));
    }
}

/// State and pending request behind one trigger.
///
/// `Loading` and the disabled trigger are the same fact here: the trigger is
/// enabled exactly when no task is pending, and taking the result out of the
/// task is what leaves `Loading`.
pub struct Workflow<T> {
    state: WorkflowState,
    pending: Option<Task<T>>,
}

impl<T> Default for Workflow<T> {
    fn default() -> Self {
        Self {
            state: WorkflowState::Idle,
            pending: None,
        }
    }
}

impl<T: Send + 'static> Workflow<T> {
    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn trigger_enabled(&self) -> bool {
        !self.is_busy()
    }

    /// Enters `Loading` and only then issues the request. Refused while a
    /// previous request is in flight.
    pub fn start(&mut self, issue: impl FnOnce() -> Task<T>) -> bool {
        if self.is_busy() {
            return false;
        }
        self.state = WorkflowState::Loading;
        self.pending = Some(issue());
        true
    }

    /// Hands out the result once it arrives. The trigger is re-enabled and the
    /// state settled before the caller sees the result.
    pub fn poll(&mut self) -> Option<ApiResult<T>> {
        let result = self.pending.as_mut()?.poll()?;
        let _restore = Settle {
            workflow_state: &mut self.state,
            outcome: if result.is_ok() {
                WorkflowState::Ready
            } else {
                WorkflowState::Error
            },
        };
        self.pending = None;
        Some(result)
    }

    /// Used when a failure is absorbed and something still got rendered.
    pub fn recover(&mut self) {
        if !self.is_busy() {
            self.state = WorkflowState::Ready;
        }
    }
}

struct Settle<'a> {
    workflow_state: &'a mut WorkflowState,
    outcome: WorkflowState,
}

impl Drop for Settle<'_> {
    fn drop(&mut self) {
        *self.workflow_state = self.outcome;
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use tokio::runtime::Handle;

    use super::Backend;
    use crate::api::mock::MockApi;

    pub fn backend(api: MockApi) -> (Backend, Arc<MockApi>) {
        let api = Arc::new(api);
        (Backend::new(api.clone(), Handle::current()), api)
    }

    /// Yields to the runtime until `done` reports true.
    pub async fn settle(mut done: impl FnMut() -> bool) {
        for _ in 0..200 {
            if done() {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("workflow did not settle");
    }

    /// Lets spawned tasks run for a while without expecting completion.
    pub async fn spin() {
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
    }
}
