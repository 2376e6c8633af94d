pub mod error;
pub mod metrics;
pub mod score;
pub mod session;
pub mod severity;
pub mod vector;

use std::sync::Arc;

pub use crate::error::VectorError;
pub use crate::metrics::{
    AttackComplexity, AttackVector, ImpactLevel, Metric, MetricOption, MetricSelection,
    PrivilegesRequired, Scope, UserInteraction,
};
pub use crate::score::{base_score, evaluate, score_result, Evaluation, ScoreResult};
pub use crate::session::{ScoringSession, SessionPhase};
pub use crate::severity::Severity;
pub use crate::vector::{decode, decode_with, encode, ParseMode, VECTOR_PREFIX};

/// Output abstraction for scoring events.
/// CLI implements this with colored terminal output; a host application
/// implements it over its finding store.
pub trait ScoreEventSink: Send + Sync {
    fn on_preview(&self, result: &ScoreResult);
    fn on_commit(&self, evaluation: &Evaluation);
}

pub type SinkRef = Arc<dyn ScoreEventSink>;

/// Severity label tinted for terminal output.
pub fn severity_label(severity: Severity) -> colored::ColoredString {
    use colored::*;
    match severity {
        Severity::Critical => severity.as_str().bright_red().bold(),
        Severity::High => severity.as_str().red(),
        Severity::Medium => severity.as_str().yellow(),
        Severity::Low => severity.as_str().green(),
        Severity::Informational => severity.as_str().blue(),
    }
}

/// Terminal output sink for CLI usage.
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new_ref() -> SinkRef {
        Arc::new(Self)
    }
}

impl ScoreEventSink for ConsoleSink {
    fn on_preview(&self, result: &ScoreResult) {
        use colored::*;
        use std::io::Write;
        print!(
            "{} {:.1} {}\r\n",
            "[~]".cyan(),
            result.score,
            severity_label(result.severity)
        );
        std::io::stdout().flush().ok();
    }

    fn on_commit(&self, evaluation: &Evaluation) {
        use colored::*;
        use std::io::Write;
        let out = |text: &str| {
            print!("{}\r\n", text);
            std::io::stdout().flush().ok();
        };
        out(&format!(
            "\n{} {:.1} {}",
            "[+]".green().bold(),
            evaluation.score,
            severity_label(evaluation.severity)
        ));
        out(&format!("    Vector:  {}", evaluation.vector.white()));
        out(&"──────────────────────────────────────────".dimmed().to_string());
    }
}
