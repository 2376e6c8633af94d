//! CVSS 3.1 base score formula.

use serde::Serialize;

use crate::metrics::MetricSelection;
use crate::severity::Severity;
use crate::vector;

/// Live score/severity pair for a selection under edit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreResult {
    pub score: f64,
    pub severity: Severity,
}

/// Finalized scoring outcome handed to the owning record:
/// the canonical vector string plus the derived score and severity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub vector: String,
    pub score: f64,
    pub severity: Severity,
}

/// Official CVSS 3.1 base score. Total over any `MetricSelection`;
/// the result is in [0.0, 10.0], quantized to one decimal.
pub fn base_score(selection: &MetricSelection) -> f64 {
    let av = selection.attack_vector.weight();
    let ac = selection.attack_complexity.weight();
    let pr = selection.privileges_required.weight(selection.scope);
    let ui = selection.user_interaction.weight();
    let c = selection.confidentiality.weight();
    let i = selection.integrity.weight();
    let a = selection.availability.weight();

    let iss = 1.0 - (1.0 - c) * (1.0 - i) * (1.0 - a);

    // powi keeps the sign when iss dips below 0.02 and the base goes
    // slightly negative (all-None impact).
    let impact = if selection.scope.is_changed() {
        7.52 * (iss - 0.029) - 3.25 * (iss - 0.02).powi(15)
    } else {
        6.42 * iss
    };

    if impact <= 0.0 {
        return 0.0;
    }

    let exploitability = 8.22 * av * ac * pr * ui;

    let raw = if selection.scope.is_changed() {
        (1.08 * (impact + exploitability)).min(10.0)
    } else {
        (impact + exploitability).min(10.0)
    };

    round_up(raw)
}

/// Score plus severity band for `selection`.
pub fn score_result(selection: &MetricSelection) -> ScoreResult {
    let score = base_score(selection);
    ScoreResult {
        score,
        severity: Severity::from_score(score),
    }
}

/// Packages the canonical vector, score, and severity for `selection`.
pub fn evaluate(selection: &MetricSelection) -> Evaluation {
    let score = base_score(selection);
    Evaluation {
        vector: vector::encode(selection),
        score,
        severity: Severity::from_score(score),
    }
}

/// CVSS "Roundup": smallest tenth >= value. Works on an integer scaling of
/// the input so float artifacts a hair above an exact tenth (e.g. a computed
/// 8.6000000000000001) do not get bumped to the next tenth.
pub(crate) fn round_up(value: f64) -> f64 {
    let scaled = (value * 100_000.0).round() as i64;
    if scaled % 10_000 == 0 {
        scaled as f64 / 100_000.0
    } else {
        ((scaled / 10_000) + 1) as f64 / 10.0
    }
}
