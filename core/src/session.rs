//! Two-phase interactive scoring session.
//!
//! Single-metric edits recompute a live preview without touching any
//! collaborator; only an explicit `commit` packages the `(vector, score,
//! severity)` triple and notifies the sink. The phase transition is explicit
//! state, not a timer.

use crate::error::VectorError;
use crate::metrics::{Metric, MetricSelection};
use crate::score::{self, Evaluation, ScoreResult};
use crate::vector;
use crate::SinkRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No edits since the session opened.
    Idle,
    /// At least one edit; the preview may differ from any persisted state.
    Previewing,
    /// Current state has been committed and handed to the sink.
    Committed,
}

/// One open editing context over a `MetricSelection`.
///
/// Sessions are single-owner: all mutation goes through `&mut self`, so a
/// multi-threaded host must serialize access itself.
pub struct ScoringSession {
    selection: MetricSelection,
    phase: SessionPhase,
    committed: Option<Evaluation>,
    sink: Option<SinkRef>,
}

impl ScoringSession {
    /// Opens a session on the documented baseline (all-None impact).
    pub fn new() -> Self {
        Self::with_selection(MetricSelection::default())
    }

    pub fn with_selection(selection: MetricSelection) -> Self {
        Self {
            selection,
            phase: SessionPhase::Idle,
            committed: None,
            sink: None,
        }
    }

    /// Opens a session on an existing vector string (strict decode).
    pub fn from_vector(vector: &str) -> Result<Self, VectorError> {
        Ok(Self::with_selection(vector::decode(vector)?))
    }

    /// Attaches the collaborator notified on preview and commit.
    pub fn attach_sink(mut self, sink: SinkRef) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn selection(&self) -> &MetricSelection {
        &self.selection
    }

    /// Updates one metric and returns the recomputed live preview.
    /// Notifies `on_preview` only; committed state is untouched until
    /// `commit` is called again.
    pub fn set(&mut self, metric: Metric, code: &str) -> Result<ScoreResult, VectorError> {
        self.selection.set(metric, code)?;
        self.phase = SessionPhase::Previewing;
        self.committed = None;
        let result = self.preview();
        if let Some(ref sink) = self.sink {
            sink.on_preview(&result);
        }
        Ok(result)
    }

    /// Current score/severity for the selection. No side effects.
    pub fn preview(&self) -> ScoreResult {
        score::score_result(&self.selection)
    }

    /// Finalizes the current selection. The sink's `on_commit` fires exactly
    /// once per committed state: repeating `commit` with no intervening edit
    /// returns the cached `Evaluation` without re-notifying.
    pub fn commit(&mut self) -> Evaluation {
        if let Some(ref evaluation) = self.committed {
            return evaluation.clone();
        }
        let evaluation = score::evaluate(&self.selection);
        if let Some(ref sink) = self.sink {
            sink.on_commit(&evaluation);
        }
        self.phase = SessionPhase::Committed;
        self.committed = Some(evaluation.clone());
        evaluation
    }
}

impl Default for ScoringSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::Severity;
    use crate::ScoreEventSink;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct CountingSink {
        previews: AtomicUsize,
        commits: AtomicUsize,
    }

    impl ScoreEventSink for CountingSink {
        fn on_preview(&self, _result: &ScoreResult) {
            self.previews.fetch_add(1, Ordering::Relaxed);
        }

        fn on_commit(&self, _evaluation: &Evaluation) {
            self.commits.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_phase_transitions() {
        let mut session = ScoringSession::new();
        assert_eq!(session.phase(), SessionPhase::Idle);

        session.set(Metric::Confidentiality, "H").unwrap();
        assert_eq!(session.phase(), SessionPhase::Previewing);

        session.commit();
        assert_eq!(session.phase(), SessionPhase::Committed);

        // Editing a committed session re-opens it.
        session.set(Metric::Integrity, "L").unwrap();
        assert_eq!(session.phase(), SessionPhase::Previewing);
    }

    #[test]
    fn test_preview_does_not_notify_commit() {
        let sink = Arc::new(CountingSink::default());
        let mut session = ScoringSession::new().attach_sink(sink.clone());

        session.set(Metric::Confidentiality, "H").unwrap();
        session.set(Metric::Integrity, "H").unwrap();
        session.preview();

        assert_eq!(sink.previews.load(Ordering::Relaxed), 2);
        assert_eq!(sink.commits.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_commit_notifies_exactly_once() {
        let sink = Arc::new(CountingSink::default());
        let mut session =
            ScoringSession::from_vector("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H")
                .unwrap()
                .attach_sink(sink.clone());

        let first = session.commit();
        let second = session.commit();
        assert_eq!(first, second);
        assert_eq!(sink.commits.load(Ordering::Relaxed), 1);

        // A new edit makes the next commit fire again.
        session.set(Metric::Availability, "N").unwrap();
        session.commit();
        assert_eq!(sink.commits.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_commit_packages_triple() {
        let mut session =
            ScoringSession::from_vector("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H").unwrap();
        let evaluation = session.commit();
        assert_eq!(
            evaluation.vector,
            "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H"
        );
        assert_eq!(evaluation.score, 9.8);
        assert_eq!(evaluation.severity, Severity::Critical);
    }

    #[test]
    fn test_set_preview_matches_score() {
        let mut session = ScoringSession::new();
        let preview = session.set(Metric::Confidentiality, "H").unwrap();
        // AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:N/A:N
        assert_eq!(preview.score, 7.5);
        assert_eq!(preview.severity, Severity::High);
    }

    #[test]
    fn test_from_vector_rejects_invalid() {
        assert!(ScoringSession::from_vector("garbage").is_err());
    }
}
