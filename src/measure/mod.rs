//! Listwise measurement: tie-breaking ranker, metric calculators, and the
//! batch evaluator.

pub mod evaluator;
pub mod metrics;
pub mod ranker;

pub use evaluator::ListwiseEvaluator;
pub use metrics::{
    ideal_dcg, mean_average_precision, mean_reciprocal_rank, ndcg_at_k, precision_at_k,
    precision_at_r, rank_discount,
};
pub use ranker::{clock_rng, rank_by_score, seeded_rng};
