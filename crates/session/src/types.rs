//! Core domain types for a search session.

// =============================================================================
// Type Aliases
// =============================================================================

/// Monotonically increasing tag for one submission.
///
/// Every request started by the controller carries the next id; a completion
/// whose id no longer matches the active request is stale and gets dropped.
pub type RequestId = u64;

// =============================================================================
// Recommendation
// =============================================================================

/// One recommended repository, as reported by the recommendation service.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    /// Repository identifier in `owner/repo` form.
    pub repo: String,

    /// Cosine similarity reported by the service alongside the repository,
    /// when the response included scores.
    pub score: Option<f32>,
}

impl Recommendation {
    pub fn new(repo: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            score: None,
        }
    }

    /// Attach a similarity score (builder style).
    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }

    /// The GitHub page this recommendation links to.
    pub fn url(&self) -> String {
        format!("https://github.com/{}", self.repo)
    }
}
