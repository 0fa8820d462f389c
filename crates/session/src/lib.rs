//! # Session Crate
//!
//! This crate models the state of one GitGraph search session: the form a
//! user types a GitHub username into, the request that goes out to the
//! recommendation service, and the result or error that comes back.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Recommendation, RequestId)
//! - **state**: The session state and the event transition function
//! - **view**: Pure projection of the state into renderable form
//!
//! ## Architecture
//!
//! The state is an immutable value; every observable outcome of a submission
//! is a `SessionEvent`, and `SessionState::apply` is a pure transition
//! function from (state, event) to the next state. Requests are tagged with a
//! `RequestId` so that a completion arriving for a superseded request is
//! dropped instead of overwriting newer state.
//!
//! ## Example Usage
//! ```
//! use session::{Recommendation, SessionEvent, SessionState};
//!
//! let state = SessionState::new();
//! let state = state.apply(SessionEvent::RequestStarted {
//!     request: 1,
//!     username: "octocat".to_string(),
//! });
//! assert!(state.loading);
//!
//! let state = state.apply(SessionEvent::RequestSucceeded {
//!     request: 1,
//!     recommendations: vec![Recommendation::new("octocat/Hello-World")],
//! });
//! assert!(!state.loading);
//! ```

pub mod state;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use state::{SessionEvent, SessionState};
pub use types::{Recommendation, RequestId};
pub use view::{
    Projection, ResultLine, project, EMPTY_USERNAME_MESSAGE, SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE,
};
