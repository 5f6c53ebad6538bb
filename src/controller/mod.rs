use crate::client::{LookupError, ProfileSource};
use crate::models::profile::UserProfile;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

/// Everything the renderer needs to draw one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupState {
    pub query: String,
    pub result: Option<UserProfile>,
    pub error_message: Option<String>,
    pub in_flight: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupPhase {
    Idle,
    Pending,
    Resolved(Outcome),
}

impl LookupState {
    pub fn phase(&self) -> LookupPhase {
        if self.in_flight {
            return LookupPhase::Pending;
        }
        match (&self.result, &self.error_message) {
            (Some(_), _) => LookupPhase::Resolved(Outcome::Success),
            (None, Some(_)) => LookupPhase::Resolved(Outcome::Failure),
            (None, None) => LookupPhase::Idle,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.in_flight && !self.query.is_empty()
    }
}

/// Clears `in_flight` if a lookup is abandoned before it settles, whether the
/// future was dropped or the source panicked.
struct InFlightGuard {
    state: Arc<watch::Sender<LookupState>>,
    armed: bool,
}

impl InFlightGuard {
    fn arm(state: Arc<watch::Sender<LookupState>>) -> Self {
        state.send_modify(|s| s.in_flight = true);
        Self { state, armed: true }
    }

    fn settle(mut self, outcome: Result<UserProfile, LookupError>) {
        self.armed = false;
        self.state.send_modify(|s| {
            match outcome {
                Ok(profile) => {
                    s.result = Some(profile);
                    s.error_message = None;
                }
                Err(e) => {
                    s.result = None;
                    s.error_message = Some(e.user_message().to_string());
                }
            }
            s.in_flight = false;
        });
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!("lookup abandoned before it resolved");
            self.state.send_modify(|s| s.in_flight = false);
        }
    }
}

/// Owns the lookup state and publishes every change to subscribers.
pub struct ProfileLookupController<S> {
    source: Arc<S>,
    state: Arc<watch::Sender<LookupState>>,
}

impl<S: ProfileSource + 'static> ProfileLookupController<S> {
    pub fn new(source: S) -> Self {
        let (state, _) = watch::channel(LookupState::default());
        Self {
            source: Arc::new(source),
            state: Arc::new(state),
        }
    }

    pub fn state(&self) -> LookupState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LookupState> {
        self.state.subscribe()
    }

    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.state.send_modify(|s| s.query = query);
    }

    pub fn edit_query(&self, edit: impl FnOnce(&mut String)) {
        self.state.send_modify(|s| edit(&mut s.query));
    }

    #[cfg(test)]
    pub fn state_for_test(&self, modify: impl FnOnce(&mut LookupState)) {
        self.state.send_modify(modify);
    }

    /// Looks up `query` and stores either the profile or the error message.
    ///
    /// `in_flight` is published before this returns, so the lookup counts as
    /// pending even before the returned future is first polled. Overlapping
    /// calls are not serialized: each one writes its outcome when it resolves,
    /// so the last to finish wins.
    pub fn submit_lookup(&self, query: &str) -> impl Future<Output = ()> + Send + 'static {
        let pending = if query.is_empty() {
            None
        } else {
            tracing::info!(handle = query, "lookup started");
            Some((
                InFlightGuard::arm(self.state.clone()),
                self.source.clone(),
                query.to_string(),
            ))
        };

        async move {
            let Some((guard, source, handle)) = pending else {
                return;
            };

            let outcome = source.fetch_user(&handle).await;
            if let Err(e) = &outcome {
                tracing::warn!(handle, error = %e, "lookup failed");
            }
            guard.settle(outcome);
        }
    }
}
