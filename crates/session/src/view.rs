//! Pure projection of the session state into renderable form.
//!
//! The projection renders at most one result block: the error when one is
//! set, otherwise the recommendation list when one is present. Keeping this
//! as a pure function lets the CLI stay a dumb printer and the tests assert
//! on exactly what the user would see.

use crate::state::SessionState;

/// Shown when the user submits an empty username.
pub const EMPTY_USERNAME_MESSAGE: &str = "Username must not be empty";

/// Submit label while idle.
pub const SUBMIT_LABEL_IDLE: &str = "Get recommendations";

/// Submit label while a request is in flight.
pub const SUBMIT_LABEL_BUSY: &str = "Searching...";

/// One rendered recommendation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultLine {
    pub repo: String,
    pub url: String,
    pub score: Option<f32>,
}

/// What the view renders for a given state.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// Error message to show, if any. Mutually exclusive with `heading`.
    pub error: Option<String>,

    /// Results heading naming the searched username, when there are results.
    pub heading: Option<String>,

    /// Rendered recommendation list; empty unless `heading` is set.
    pub results: Vec<ResultLine>,

    /// The submit control is disabled while a request is in flight.
    pub submit_disabled: bool,

    /// Label for the submit control (idle vs. in-progress).
    pub submit_label: &'static str,
}

/// Project the state into its renderable form.
pub fn project(state: &SessionState) -> Projection {
    let submit_label = if state.loading {
        SUBMIT_LABEL_BUSY
    } else {
        SUBMIT_LABEL_IDLE
    };

    if !state.error.is_empty() {
        return Projection {
            error: Some(state.error.clone()),
            heading: None,
            results: Vec::new(),
            submit_disabled: state.loading,
            submit_label,
        };
    }

    let (heading, results) = match &state.recommendations {
        Some(recommendations) => {
            let heading = format!("Recommendations for \"{}\"", state.username);
            let results = recommendations
                .iter()
                .map(|rec| ResultLine {
                    repo: rec.repo.clone(),
                    url: rec.url(),
                    score: rec.score,
                })
                .collect();
            (Some(heading), results)
        }
        None => (None, Vec::new()),
    };

    Projection {
        error: None,
        heading,
        results,
        submit_disabled: state.loading,
        submit_label,
    }
}
