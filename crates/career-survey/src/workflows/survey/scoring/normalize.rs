use indexmap::IndexMap;

use super::aggregate::RawScoreMap;

/// Target id -> score rescaled against the submission's own maximum.
pub type NormalizedScoreMap = IndexMap<String, f64>;

/// Rescale raw scores so the submission's best target lands on 100.
///
/// Scores are relative to this submission only and are not comparable
/// across users. A zero maximum is replaced by 1 so untouched targets stay 0.
pub fn normalize(raw: &RawScoreMap) -> NormalizedScoreMap {
    if raw.is_empty() {
        return NormalizedScoreMap::new();
    }

    let max_score = raw.values().copied().fold(f64::NEG_INFINITY, f64::max);
    let max_score = if max_score == 0.0 { 1.0 } else { max_score };

    raw.iter()
        .map(|(target_id, score)| (target_id.clone(), round2(score / max_score * 100.0)))
        .collect()
}

/// Round to two decimals, exact halves going to the even neighbour.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
