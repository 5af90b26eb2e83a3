//! Flat evaluation batch: a score matrix plus a label vector, packing
//! several independent ranked lists into fixed-size slots.

use serde::Deserialize;

use crate::error::{ListEvalError, Result};

/// Reserved label marking the end of a shorter-than-maximum list within a
/// fixed-size batch slot. Must not be used as a real relevance value.
pub const SENTINEL_LABEL: f32 = -1.0;

/// One evaluation batch.
///
/// `scores` has shape `[nbatch x ncols]` and `labels` has length `nbatch`,
/// where `nbatch` counts scored items across all lists in the batch. Lists
/// occupy contiguous slots of `nbatch / batch_size` items each; shorter
/// lists are padded with [`SENTINEL_LABEL`].
#[derive(Debug, Clone, Deserialize)]
pub struct Batch {
    scores: Vec<Vec<f32>>,
    labels: Vec<f32>,
}

impl Batch {
    /// Create a batch, rejecting a score/label count mismatch.
    pub fn new(scores: Vec<Vec<f32>>, labels: Vec<f32>) -> Result<Self> {
        let batch = Batch { scores, labels };
        batch.validate()?;
        Ok(batch)
    }

    /// Parse a batch from JSON of the form
    /// `{"scores": [[...], ...], "labels": [...]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let batch: Batch = serde_json::from_str(json)
            .map_err(|e| ListEvalError::Parse(format!("Invalid batch JSON: {}", e)))?;
        Batch::new(batch.scores, batch.labels)
    }

    /// Re-check the row/label pairing. The evaluator runs this at the start
    /// of every call, since serde can build a batch without going through
    /// [`Batch::new`].
    pub fn validate(&self) -> Result<()> {
        if self.scores.len() != self.labels.len() {
            return Err(ListEvalError::Shape(format!(
                "score rows ({}) and labels ({}) differ",
                self.scores.len(),
                self.labels.len()
            )));
        }
        Ok(())
    }

    /// Total number of scored items across all lists.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True when the batch holds no items at all.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Extract list `s` as `(score, label)` pairs, reading scores from
    /// column `col`.
    ///
    /// Walks the slot `[s*list_size, (s+1)*list_size)` and stops, exclusive,
    /// at the first sentinel label; the sentinel is a padding marker, not a
    /// relevance value.
    pub fn extract_list(&self, s: usize, list_size: usize, col: usize) -> Result<Vec<(f32, f32)>> {
        let end = (s + 1) * list_size;
        if end > self.labels.len() {
            return Err(ListEvalError::Shape(format!(
                "list {} spans items up to {} but the batch has {}",
                s,
                end,
                self.labels.len()
            )));
        }

        let mut items = Vec::with_capacity(list_size);
        for i in 0..list_size {
            let idx = s * list_size + i;
            let label = self.labels[idx];
            if label == SENTINEL_LABEL {
                break;
            }
            let row = &self.scores[idx];
            let score = *row.get(col).ok_or_else(|| {
                ListEvalError::Shape(format!(
                    "score row {} has {} columns, col {} is out of bounds",
                    idx,
                    row.len(),
                    col
                ))
            })?;
            items.push((score, label));
        }
        Ok(items)
    }
}
