//! Logging capability passed into the synchronizer.
//!
//! The synchronizer never logs user-facing messages through a global; the
//! caller hands it a [`Reporter`]. The CLI renders these on the terminal.

/// Sink for progress and outcome messages.
pub trait Reporter {
    /// Detail useful when diagnosing (discovered paths, individual changes).
    fn debug(&self, msg: &str);
    /// Neutral progress or outcome.
    fn info(&self, msg: &str);
    /// Something the user should look at; the operation still succeeded.
    fn warning(&self, msg: &str);
    /// The navigation document was updated.
    fn success(&self, msg: &str);
}
