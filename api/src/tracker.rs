use std::fmt;
use std::future::Future;
use std::sync::{Mutex, PoisonError};

pub const UNKNOWN_ERROR: &str = "Error desconocido";

/// The last known outcome of one remote operation.
///
/// While `loading` is true, `data` and `error` still describe the previous
/// settled call. After a settle, `error` is `None` on success; on failure it
/// holds the message and `data` keeps whatever the last success produced.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for EndpointState<T> {
    fn default() -> Self {
        Self { data: None, loading: false, error: None }
    }
}

impl<T> EndpointState<T> {
    /// Never run, or cleared.
    pub fn is_idle(&self) -> bool {
        self.data.is_none() && !self.loading && self.error.is_none()
    }
}

/// Tracks loading/data/error for one operation.
///
/// Calls are not fenced: if `run` is invoked again before an earlier call
/// settles, whichever call settles last writes the final state, even when it
/// was the one issued first.
#[derive(Debug)]
pub struct OperationTracker<T> {
    state: Mutex<EndpointState<T>>,
}

impl<T> Default for OperationTracker<T> {
    fn default() -> Self {
        Self { state: Mutex::new(EndpointState::default()) }
    }
}

impl<T: Clone> OperationTracker<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drive `operation` to completion, mirroring its progress into the state
    /// slot. The outcome is also handed back so callers can react locally.
    pub async fn run<F, E>(&self, operation: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        self.update(|state| {
            state.loading = true;
            state.error = None;
        });

        match operation.await {
            Ok(data) => {
                let stored = data.clone();
                self.update(move |state| {
                    *state = EndpointState { data: Some(stored), loading: false, error: None };
                });
                Ok(data)
            }
            Err(err) => {
                let message = error_message(&err);
                self.update(move |state| {
                    state.loading = false;
                    state.error = Some(message);
                });
                Err(err)
            }
        }
    }

    pub fn snapshot(&self) -> EndpointState<T> {
        self.lock().clone()
    }

    pub fn data(&self) -> Option<T> {
        self.lock().data.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    /// Reset to `{data: None, loading: false, error: None}`.
    pub fn clear(&self) {
        self.update(|state| *state = EndpointState::default());
    }

    fn update(&self, f: impl FnOnce(&mut EndpointState<T>)) {
        f(&mut self.lock());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, EndpointState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn error_message(err: &impl fmt::Display) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        UNKNOWN_ERROR.to_owned()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::poll;
    use std::pin::pin;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn success_stores_data_and_clears_error() {
        let tracker = OperationTracker::<u32>::new();
        let result = tracker.run(async { Ok::<_, String>(7) }).await;
        assert_eq!(result, Ok(7));
        assert_eq!(
            tracker.snapshot(),
            EndpointState { data: Some(7), loading: false, error: None }
        );
    }

    #[tokio::test]
    async fn failure_keeps_previous_data_and_returns_error() {
        let tracker = OperationTracker::<u32>::new();
        tracker.run(async { Ok::<_, String>(1) }).await.unwrap();

        let result = tracker.run(async { Err::<u32, _>("HTTP error! status: 500".to_string()) }).await;
        assert_eq!(result, Err("HTTP error! status: 500".to_string()));

        let state = tracker.snapshot();
        assert_eq!(state.data, Some(1));
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("HTTP error! status: 500"));
    }

    #[tokio::test]
    async fn empty_error_message_is_normalized() {
        let tracker = OperationTracker::<u32>::new();
        let _ = tracker.run(async { Err::<u32, _>(String::new()) }).await;
        assert_eq!(tracker.error().as_deref(), Some(UNKNOWN_ERROR));
    }

    #[tokio::test]
    async fn loading_keeps_stale_data_until_settled() {
        let tracker = OperationTracker::<&'static str>::new();
        tracker.run(async { Ok::<_, String>("old") }).await.unwrap();
        tracker.run(async { Err::<&str, _>("boom".to_string()) }).await.unwrap_err();

        let (tx, rx) = oneshot::channel::<&'static str>();
        let mut call = pin!(tracker.run(async move { rx.await.map_err(|e| e.to_string()) }));
        assert!(poll!(call.as_mut()).is_pending());

        let mid_flight = tracker.snapshot();
        assert!(mid_flight.loading);
        assert_eq!(mid_flight.data, Some("old"));
        assert_eq!(mid_flight.error, None);

        tx.send("new").unwrap();
        assert_eq!(call.await, Ok("new"));
        assert_eq!(
            tracker.snapshot(),
            EndpointState { data: Some("new"), loading: false, error: None }
        );
    }

    #[tokio::test]
    async fn late_response_from_earlier_call_wins() {
        let tracker = OperationTracker::<String>::new();
        let (tx_first, rx_first) = oneshot::channel::<String>();
        let (tx_second, rx_second) = oneshot::channel::<String>();

        let mut first = pin!(tracker.run(async move { rx_first.await.map_err(|e| e.to_string()) }));
        let mut second =
            pin!(tracker.run(async move { rx_second.await.map_err(|e| e.to_string()) }));
        assert!(poll!(first.as_mut()).is_pending());
        assert!(poll!(second.as_mut()).is_pending());
        assert!(tracker.is_loading());

        tx_second.send("Lionel Messi".into()).unwrap();
        assert_eq!(second.await, Ok("Lionel Messi".to_string()));
        assert_eq!(tracker.data().as_deref(), Some("Lionel Messi"));

        // The first request settles after the second; its data overwrites.
        tx_first.send("Carlos Vela".into()).unwrap();
        assert_eq!(first.await, Ok("Carlos Vela".to_string()));
        let state = tracker.snapshot();
        assert_eq!(state.data.as_deref(), Some("Carlos Vela"));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn clear_resets_to_idle() {
        let tracker = OperationTracker::<u32>::new();
        tracker.run(async { Ok::<_, String>(3) }).await.unwrap();
        assert!(!tracker.snapshot().is_idle());
        tracker.clear();
        assert!(tracker.snapshot().is_idle());
    }
}
