//! Request state shared by the search and detail views.
//!
//! A view is always in exactly one [`FetchState`]. [`LatestRequest`] pairs
//! that state with a generation counter so that only the most recent request
//! may complete it; answers to superseded requests are dropped.

use parking_lot::Mutex;
use serde::Serialize;

/// Lifecycle of a single fetch as seen by a view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum FetchState<T> {
    /// Nothing requested yet
    Idle,
    /// A request is in flight
    Loading,
    /// The last request completed with a value
    Success(T),
    /// The last request failed; holds the user-facing message
    Error(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> From<Result<T, String>> for FetchState<T> {
    fn from(outcome: Result<T, String>) -> Self {
        match outcome {
            Ok(value) => Self::Success(value),
            Err(message) => Self::Error(message),
        }
    }
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// True for `Success` and `Error`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Error(_))
    }

    pub fn value(&self) -> Option<&T> {
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

    /// Enters `Loading` from any state.
    pub fn begin(&mut self) {
        *self = Self::Loading;
    }

    /// Leaves `Loading` with the request outcome.
    ///
    /// Returns false and leaves the state untouched when no request is in
    /// flight.
    pub fn complete(&mut self, outcome: Result<T, String>) -> bool {
        if !self.is_loading() {
            return false;
        }
        *self = Self::from(outcome);
        true
    }
}

/// Handle identifying one request issued through [`LatestRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u64,
    state: FetchState<T>,
}

/// A [`FetchState`] that only the newest request can complete.
#[derive(Debug)]
pub struct LatestRequest<T> {
    slot: Mutex<Slot<T>>,
}

impl<T> Default for LatestRequest<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LatestRequest<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                generation: 0,
                state: FetchState::Idle,
            }),
        }
    }

    /// Starts a new request, superseding any request still in flight.
    pub fn begin(&self) -> RequestToken {
        let mut slot = self.slot.lock();
        slot.generation += 1;
        slot.state.begin();
        RequestToken(slot.generation)
    }

    /// Returns true if `token` belongs to the newest request.
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.slot.lock().generation == token.0
    }

    /// Completes the request identified by `token`.
    ///
    /// Returns false when a newer request has started since; the outcome is
    /// discarded in that case.
    pub fn complete(&self, token: RequestToken, outcome: Result<T, String>) -> bool {
        let mut slot = self.slot.lock();
        if slot.generation != token.0 {
            tracing::debug!(
                stale = token.0,
                current = slot.generation,
                "Discarding superseded response"
            );
            return false;
        }
        slot.state.complete(outcome)
    }

    /// Applies `f` to the current state without cloning it.
    pub fn with_state<R>(&self, f: impl FnOnce(&FetchState<T>) -> R) -> R {
        f(&self.slot.lock().state)
    }
}

impl<T: Clone> LatestRequest<T> {
    /// Clone of the current state.
    pub fn snapshot(&self) -> FetchState<T> {
        self.slot.lock().state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_state_transitions() {
        let mut state: FetchState<Vec<u32>> = FetchState::default();
        assert_eq!(state, FetchState::Idle);

        // Completing without a request in flight is ignored
        assert!(!state.complete(Ok(vec![1])));
        assert_eq!(state, FetchState::Idle);

        state.begin();
        assert!(state.is_loading());
        assert!(state.complete(Ok(vec![1, 2])));
        assert_eq!(state.value(), Some(&vec![1, 2]));

        state.begin();
        assert!(state.complete(Err("boom".to_string())));
        assert_eq!(state.error(), Some("boom"));
        assert!(state.value().is_none());
        assert!(state.is_terminal());

        // Terminal states do not accept a second completion
        assert!(!state.complete(Ok(vec![3])));
        assert_eq!(state.error(), Some("boom"));
    }

    #[test]
    fn test_latest_request_discards_stale_completion() {
        let request = LatestRequest::new();

        let first = request.begin();
        let second = request.begin();
        assert!(first < second);
        assert!(!request.is_current(first));

        // Second answers first, then the slow first request arrives
        assert!(request.complete(second, Ok("newer")));
        assert!(!request.complete(first, Ok("older")));

        assert_eq!(request.snapshot(), FetchState::Success("newer"));
    }

    #[test]
    fn test_latest_request_stale_error_does_not_clobber_loading() {
        let request: LatestRequest<u8> = LatestRequest::new();

        let first = request.begin();
        let _second = request.begin();
        assert!(!request.complete(first, Err("timeout".to_string())));

        assert!(request.with_state(FetchState::is_loading));
    }

    #[test]
    fn test_fetch_state_serializes_tagged() {
        let state = FetchState::Success(vec!["a"]);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"][0], "a");

        let json = serde_json::to_value(FetchState::<()>::Loading).unwrap();
        assert_eq!(json["status"], "loading");
    }
}
