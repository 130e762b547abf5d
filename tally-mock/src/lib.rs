//! Scriptable mock loaders for exercising the tally aggregator in tests.
#![warn(missing_docs)]

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use tally_core::{PointData, Sample, TallyError, UsageLoader};

pub mod fixtures;

/// Instruction for how a `load_series` call should behave.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided points immediately.
    Return(Vec<Sample<T>>),
    /// Fail immediately with the provided error.
    Fail(TallyError),
    /// Hang indefinitely (simulate a stalled upstream).
    Hang,
    /// Return the provided points after sleeping `.0` milliseconds.
    Delayed(u64, Vec<Sample<T>>),
}

/// Which kind of request a behavior applies to.
///
/// The aggregator always passes an explicit `end` for historical fetches and
/// an open `end` for the live minute-level fetch, which is what the mock
/// keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestClass {
    /// Bounded historical fetch (`end` present).
    Historical,
    /// Open-ended live fetch (`end` absent).
    Live,
}

/// One recorded `load_series` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadCall {
    /// Requested bucket width in seconds.
    pub bucket_seconds: i64,
    /// Requested range start.
    pub start: i64,
    /// Requested range end, if bounded.
    pub end: Option<i64>,
}

impl LoadCall {
    /// Classify the recorded call.
    #[must_use]
    pub const fn class(&self) -> RequestClass {
        if self.end.is_some() {
            RequestClass::Historical
        } else {
            RequestClass::Live
        }
    }
}

struct InternalState<T> {
    historical_script: VecDeque<MockBehavior<T>>,
    historical_default: MockBehavior<T>,
    live_script: VecDeque<MockBehavior<T>>,
    live_default: MockBehavior<T>,
    calls: Vec<LoadCall>,
}

impl<T> Default for InternalState<T> {
    fn default() -> Self {
        Self {
            historical_script: VecDeque::new(),
            historical_default: MockBehavior::Return(Vec::new()),
            live_script: VecDeque::new(),
            live_default: MockBehavior::Return(Vec::new()),
            calls: Vec::new(),
        }
    }
}

/// Controller handle used by tests to drive the mock from the outside.
pub struct MockController<T> {
    state: Arc<Mutex<InternalState<T>>>,
}

impl<T: Clone> MockController<T> {
    /// Queue a one-shot behavior for the next request of `class`.
    pub async fn push(&self, class: RequestClass, behavior: MockBehavior<T>) {
        let mut guard = self.state.lock().await;
        match class {
            RequestClass::Historical => guard.historical_script.push_back(behavior),
            RequestClass::Live => guard.live_script.push_back(behavior),
        }
    }

    /// Replace the fallback behavior used when the script queue is empty.
    pub async fn set_default(&self, class: RequestClass, behavior: MockBehavior<T>) {
        let mut guard = self.state.lock().await;
        match class {
            RequestClass::Historical => guard.historical_default = behavior,
            RequestClass::Live => guard.live_default = behavior,
        }
    }

    /// Snapshot of all recorded calls, in arrival order.
    pub async fn calls(&self) -> Vec<LoadCall> {
        self.state.lock().await.calls.clone()
    }

    /// Number of recorded calls.
    pub async fn call_count(&self) -> usize {
        self.state.lock().await.calls.len()
    }
}

/// Mock loader for tests: behaviors are scripted per request class and every
/// call is recorded for later assertions.
pub struct MockLoader<T> {
    state: Arc<Mutex<InternalState<T>>>,
}

impl<T: Clone> MockLoader<T> {
    /// Build a loader plus its controller handle.
    #[must_use]
    pub fn scripted() -> (Arc<Self>, MockController<T>) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        (
            Arc::new(Self {
                state: Arc::clone(&state),
            }),
            MockController { state },
        )
    }

    /// Build a loader that always answers historical requests with `points`
    /// and live requests with nothing.
    #[must_use]
    pub fn returning(points: Vec<Sample<T>>) -> Arc<Self> {
        let (loader, _controller) = Self::scripted();
        {
            let mut guard = loader
                .state
                .try_lock()
                .expect("state is unshared during construction");
            guard.historical_default = MockBehavior::Return(points);
        }
        loader
    }
}

#[async_trait]
impl<T: PointData> UsageLoader<T> for MockLoader<T> {
    fn name(&self) -> &'static str {
        "tally-mock"
    }

    async fn load_series(
        &self,
        bucket_seconds: i64,
        start: i64,
        end: Option<i64>,
    ) -> Result<Vec<Sample<T>>, TallyError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            let call = LoadCall {
                bucket_seconds,
                start,
                end,
            };
            let class = call.class();
            guard.calls.push(call);
            match class {
                RequestClass::Historical => guard
                    .historical_script
                    .pop_front()
                    .unwrap_or_else(|| guard.historical_default.clone()),
                RequestClass::Live => guard
                    .live_script
                    .pop_front()
                    .unwrap_or_else(|| guard.live_default.clone()),
            }
        };

        match behavior {
            MockBehavior::Return(points) => Ok(points),
            MockBehavior::Fail(err) => Err(err),
            MockBehavior::Hang => {
                std::future::pending::<()>().await;
                unreachable!("pending future never resolves")
            }
            MockBehavior::Delayed(ms, points) => {
                tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
                Ok(points)
            }
        }
    }
}
