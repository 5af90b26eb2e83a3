//! Batch evaluator: extract each list, rank it, score it, average the batch.

use log::debug;
use rand::Rng;

use crate::batch::Batch;
use crate::config::{EvalConfig, Method};
use crate::error::{ListEvalError, Result};
use crate::measure::metrics;
use crate::measure::ranker;

/// Listwise ranking-metric evaluator.
///
/// Holds the immutable [`EvalConfig`] and nothing else; every call owns its
/// working copies of list data, so one evaluator can be shared across
/// threads. The metric is non-differentiable and produces no gradient.
#[derive(Debug, Clone)]
pub struct ListwiseEvaluator {
    config: EvalConfig,
}

impl ListwiseEvaluator {
    /// Create an evaluator, validating the configuration.
    pub fn new(config: EvalConfig) -> Result<Self> {
        config.validate()?;
        Ok(ListwiseEvaluator { config })
    }

    /// The configuration this evaluator was built with.
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Evaluate a batch with the default wall-clock-seeded tie-breaking.
    ///
    /// Non-deterministic across runs whenever score ties exist; use
    /// [`ListwiseEvaluator::evaluate_with_rng`] with a seeded generator to
    /// pin behavior.
    pub fn evaluate(&self, batch: &Batch) -> Result<f32> {
        self.evaluate_with_rng(batch, &mut ranker::clock_rng())
    }

    /// Evaluate a batch, breaking score ties with the supplied generator.
    ///
    /// Checks shapes on every call (batches may change size between calls),
    /// then processes lists sequentially in slot order, so the summation
    /// order is fixed. Any error aborts the whole call; no per-list partial
    /// results are returned.
    pub fn evaluate_with_rng<R: Rng + ?Sized>(&self, batch: &Batch, rng: &mut R) -> Result<f32> {
        batch.validate()?;

        let nbatch = batch.len();
        if nbatch % self.config.batch_size != 0 {
            return Err(ListEvalError::Shape(format!(
                "nbatch {} is not divisible by batch_size {}",
                nbatch, self.config.batch_size
            )));
        }
        let list_size = nbatch / self.config.batch_size;

        let mut total = 0.0f32;
        for s in 0..self.config.batch_size {
            let mut list = batch.extract_list(s, list_size, self.config.col)?;

            // The ideal gain comes from the extracted order, before
            // tie-breaking reorders the list.
            let idcg = match self.config.method {
                Method::NdcgAtK => metrics::ideal_dcg(&list, self.config.k),
                _ => 0.0,
            };

            ranker::rank_by_score(&mut list, rng);

            let score = match self.config.method {
                Method::Mrr => metrics::mean_reciprocal_rank(&list)?,
                Method::PrecisionAtK => metrics::precision_at_k(&list, self.config.k)?,
                Method::NdcgAtK => metrics::ndcg_at_k(&list, self.config.k, idcg)?,
                Method::Map => metrics::mean_average_precision(&list),
                Method::PrecisionAtR => metrics::precision_at_r(&list)?,
            };
            debug!(
                "list {}: {} items, {} = {:.4}",
                s,
                list.len(),
                self.config.method,
                score
            );
            total += score;
        }

        // Empty lists contributed 0 above; the denominator is always the
        // configured batch_size.
        Ok(total / self.config.batch_size as f32)
    }
}
