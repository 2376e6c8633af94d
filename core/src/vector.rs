//! Vector string codec.
//!
//! `decode` is strict: every metric must be present and every code valid.
//! `decode_with(.., ParseMode::Lenient, base)` accepts partial vectors and
//! keeps the base's values for missing metrics (logged at warn), for callers
//! merging an edit over an existing selection. Unknown metric or option codes
//! are rejected in both modes, never defaulted.

use log::warn;

use crate::error::VectorError;
use crate::metrics::{Metric, MetricSelection};

pub const VECTOR_PREFIX: &str = "CVSS:3.1/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// All 8 metrics required; anything missing is `IncompleteVector`.
    Strict,
    /// Missing metrics keep the supplied base's values.
    Lenient,
}

/// Serializes a selection in canonical order, prefixed `CVSS:3.1/`.
/// Total: never fails for any `MetricSelection`.
pub fn encode(selection: &MetricSelection) -> String {
    let mut out = String::with_capacity(VECTOR_PREFIX.len() + 35);
    out.push_str(VECTOR_PREFIX);
    for (i, metric) in Metric::ALL.into_iter().enumerate() {
        if i > 0 {
            out.push('/');
        }
        out.push_str(metric.code());
        out.push(':');
        out.push_str(selection.get(metric));
    }
    out
}

/// Strict decode of a full vector string.
pub fn decode(vector: &str) -> Result<MetricSelection, VectorError> {
    decode_with(vector, ParseMode::Strict, MetricSelection::default())
}

/// Decodes `vector` on top of `base`. A duplicated metric is tolerated and
/// the last occurrence wins.
pub fn decode_with(
    vector: &str,
    mode: ParseMode,
    base: MetricSelection,
) -> Result<MetricSelection, VectorError> {
    let rest = vector
        .strip_prefix(VECTOR_PREFIX)
        .ok_or(VectorError::MalformedVector)?;

    let mut selection = base;
    let mut seen = [false; Metric::ALL.len()];

    for segment in rest.split('/') {
        let (code, value) = segment
            .split_once(':')
            .ok_or(VectorError::MalformedVector)?;
        let metric =
            Metric::from_code(code).ok_or_else(|| VectorError::UnknownMetric(code.to_string()))?;
        selection.set(metric, value)?;
        seen[metric as usize] = true;
    }

    for metric in Metric::ALL {
        if !seen[metric as usize] {
            match mode {
                ParseMode::Strict => return Err(VectorError::IncompleteVector(metric.code())),
                ParseMode::Lenient => warn!(
                    "vector omits metric {}, keeping {}:{}",
                    metric.code(),
                    metric.code(),
                    selection.get(metric)
                ),
            }
        }
    }

    Ok(selection)
}
