//! Metric calculators: MRR, P@k, P@R, nDCG@k and MAP over a ranked list.
//!
//! All calculators consume `(score, label)` pairs already ordered by
//! descending score (see [`crate::measure::ranker`]) and return one value
//! per list; batch averaging happens in the evaluator.

use crate::error::{ListEvalError, Result};

/// Rank discount used by DCG sums: 1 at rank 1, log2(rank) from rank 2 on.
///
/// Deliberately not the conventional `log2(rank + 1)`; ranks 1 and 2 are
/// both undiscounted.
pub fn rank_discount(rank: usize) -> f32 {
    if rank == 1 {
        1.0
    } else {
        (rank as f32).log2()
    }
}

/// Best achievable DCG for this list: gains sorted by label descending,
/// accumulated over the top `min(k, len)` positions.
///
/// Computed on the extracted list before tie-breaking reorders it.
pub fn ideal_dcg(items: &[(f32, f32)], k: usize) -> f32 {
    let mut labels: Vec<f32> = items.iter().map(|&(_, label)| label).collect();
    labels.sort_unstable_by(|a, b| b.total_cmp(a));
    labels
        .iter()
        .take(k)
        .enumerate()
        .map(|(i, &label)| label / rank_discount(i + 1))
        .sum()
}

/// Map a graded label onto {0, 1}: positive labels become 1, the rest keep
/// their value.
fn binarize(label: f32) -> f32 {
    if label > 0.0 {
        1.0
    } else {
        label
    }
}

/// Binarize and reject anything that did not land on 0 or 1.
fn binarize_checked(label: f32, method: &str) -> Result<f32> {
    let b = binarize(label);
    if b == 0.0 || b == 1.0 {
        Ok(b)
    } else {
        Err(ListEvalError::Label(format!(
            "Not a valid list for {}, only 0 and 1 (got label {})",
            method, label
        )))
    }
}

/// Reciprocal rank of the first relevant item, or 0 when the list holds no
/// relevant item.
///
/// Labels are binarized; a visited label outside {0, 1} aborts with a
/// label error. Items after the first relevant one are not inspected.
pub fn mean_reciprocal_rank(ranked: &[(f32, f32)]) -> Result<f32> {
    for (i, &(_, label)) in ranked.iter().enumerate() {
        if binarize_checked(label, "MRR")? == 1.0 {
            return Ok(1.0 / (i + 1) as f32);
        }
    }
    Ok(0.0)
}

/// Precision at k: relevant count in the top `min(k, len)` positions,
/// divided by the configured `k` (a short list is still normalized by the
/// full k). If k is 0, returns 0.0.
pub fn precision_at_k(ranked: &[(f32, f32)], k: usize) -> Result<f32> {
    if k == 0 {
        return Ok(0.0);
    }
    let mut hits = 0usize;
    for &(_, label) in ranked.iter().take(k) {
        if binarize_checked(label, "P@k")? == 1.0 {
            hits += 1;
        }
    }
    Ok(hits as f32 / k as f32)
}

/// Precision at R, where R is the number of relevant items in the full
/// list: relevant count in the top `min(R, len)` positions divided by R.
/// A list with no relevant item scores exactly 0.
pub fn precision_at_r(ranked: &[(f32, f32)]) -> Result<f32> {
    let labels: Vec<f32> = ranked.iter().map(|&(_, label)| binarize(label)).collect();
    let r = labels.iter().filter(|&&label| label == 1.0).count();
    let hits = labels.iter().take(r).filter(|&&label| label == 1.0).count();
    if r == 0 {
        if hits != 0 {
            return Err(ListEvalError::Invariant(
                "P@R accumulated hits with no relevant items".to_string(),
            ));
        }
        return Ok(0.0);
    }
    Ok(hits as f32 / r as f32)
}

/// Discounted cumulative gain over the top `min(k, len)` positions with the
/// original graded labels, normalized by `idcg` from [`ideal_dcg`].
///
/// A zero ideal gain forces the raw sum to be zero as well; the score is
/// then 0.
pub fn ndcg_at_k(ranked: &[(f32, f32)], k: usize, idcg: f32) -> Result<f32> {
    let dcg: f32 = ranked
        .iter()
        .take(k)
        .enumerate()
        .map(|(i, &(_, label))| label / rank_discount(i + 1))
        .sum();
    if idcg == 0.0 {
        if dcg != 0.0 {
            return Err(ListEvalError::Invariant(format!(
                "nDCG numerator {} with zero ideal gain",
                dcg
            )));
        }
        return Ok(0.0);
    }
    Ok(dcg / idcg)
}

/// Mean average precision over the ranked list.
///
/// Each item is stamped with its score-rank position, the list is re-ranked
/// by label descending, and the scan accumulates the rank-ratio
/// `(position by label) / (position by score)` for every item until the
/// first zero label, then divides by the number of items scanned. Positions
/// are 1-based so every term is finite; a list with no relevant item before
/// the first zero label scores 0.
pub fn mean_average_precision(ranked: &[(f32, f32)]) -> f32 {
    let mut by_label: Vec<(usize, f32)> = ranked
        .iter()
        .enumerate()
        .map(|(i, &(_, label))| (i, label))
        .collect();
    by_label.sort_unstable_by(|a, b| b.1.total_cmp(&a.1));

    let mut sum = 0.0f32;
    let mut p_count = 0usize;
    for (i, &(score_rank, label)) in by_label.iter().enumerate() {
        if label == 0.0 {
            break;
        }
        p_count += 1;
        sum += (i + 1) as f32 / (score_rank + 1) as f32;
    }
    if p_count == 0 {
        return 0.0;
    }
    sum / p_count as f32
}
