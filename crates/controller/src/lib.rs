//! # Form Controller
//!
//! This crate coordinates one search session end to end:
//! 1. Validate the submitted username (empty input never leaves the form)
//! 2. Tag the submission with the next request id
//! 3. Call the recommendation service
//! 4. Settle the outcome back into the session state
//!
//! The controller never touches the state cells directly; every step is a
//! `SessionEvent` applied through the pure transition function, which is
//! what guarantees `loading` settles on every exit path and that a
//! completion from a superseded submission cannot overwrite newer state.
//!
//! `submit` is the one-shot form of the loop. The `begin_submit` /
//! `complete` halves are public so a driver that interleaves submissions
//! (or a test) can exercise settle ordering without real concurrency.

use rec_client::{RecClientError, RecommendClient};
use session::{Recommendation, RequestId, SessionEvent, SessionState};
use tracing::{info, warn};

/// Mediates user input, the recommendation service, and the session state.
pub struct FormController {
    client: RecommendClient,
    state: SessionState,
    limit: Option<u32>,
    next_request: RequestId,
}

impl FormController {
    /// Create a controller over a connected client.
    ///
    /// # Arguments
    /// * `client` - Client for the recommendation service
    /// * `limit` - Optional bound forwarded to the service as `top_k`
    pub fn new(client: RecommendClient, limit: Option<u32>) -> Self {
        Self {
            client,
            state: SessionState::new(),
            limit,
            next_request: 1,
        }
    }

    /// The current session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Submit a username and wait for the request to settle.
    pub async fn submit(&mut self, username: &str) {
        let Some(request) = self.begin_submit(username) else {
            return;
        };
        let outcome = self.client.recommend(username, self.limit).await;
        self.complete(request, outcome);
    }

    /// Validate the username and, if non-empty, start a tagged request.
    ///
    /// # Returns
    /// The id of the started request, or `None` when validation failed and
    /// no request was issued.
    pub fn begin_submit(&mut self, username: &str) -> Option<RequestId> {
        if username.is_empty() {
            self.dispatch(SessionEvent::ValidationFailed);
            return None;
        }

        let request = self.next_request;
        self.next_request += 1;
        info!("Submitting request {} for '{}'", request, username);
        self.dispatch(SessionEvent::RequestStarted {
            request,
            username: username.to_string(),
        });
        Some(request)
    }

    /// Settle the outcome of a previously started request.
    ///
    /// If `request` has been superseded by a newer submission the transition
    /// function drops the completion.
    pub fn complete(
        &mut self,
        request: RequestId,
        outcome: Result<Vec<Recommendation>, RecClientError>,
    ) {
        match outcome {
            Ok(recommendations) => {
                info!(
                    "Request {} settled with {} recommendations",
                    request,
                    recommendations.len()
                );
                self.dispatch(SessionEvent::RequestSucceeded {
                    request,
                    recommendations,
                });
            }
            Err(err) => {
                warn!("Request {} failed: {}", request, err);
                self.dispatch(SessionEvent::RequestFailed {
                    request,
                    message: err.to_string(),
                });
            }
        }
    }

    fn dispatch(&mut self, event: SessionEvent) {
        self.state = std::mem::take(&mut self.state).apply(event);
    }
}
