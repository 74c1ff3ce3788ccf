//! Single-pass argmax used by the catalog aggregate queries.

use crate::config::TieBreak;

/// Returns the candidate with the highest score.
///
/// Candidates are visited in iteration order; `tie_break` decides which of
/// several equal maxima is kept. Returns `None` for an empty input.
pub fn select_best<T, I>(candidates: I, tie_break: TieBreak) -> Option<T>
where
    I: IntoIterator<Item = (T, f64)>,
{
    let mut best: Option<(T, f64)> = None;
    for (candidate, score) in candidates {
        let replace = match &best {
            None => true,
            Some((_, best_score)) => match tie_break {
                TieBreak::FirstSeen => score > *best_score,
                TieBreak::LastSeen => score >= *best_score,
            },
        };
        if replace {
            best = Some((candidate, score));
        }
    }
    best.map(|(candidate, _)| candidate)
}
