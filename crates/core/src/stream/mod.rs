use serde::Serialize;

use crate::{CombinedPoint, FinalSequence, Result, StreamConfig};

/// One slice of a sequence and the time it should be sent, relative to the
/// first batch.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduledBatch<'a> {
    pub offset_ms: u64,
    pub points: &'a [CombinedPoint],
}

/// Batches a device client would send for a [`FinalSequence`].
///
/// Points are never split: truncation and batching both work on whole
/// combined points.
#[derive(Debug, Clone, Serialize)]
pub struct StreamPlan<'a> {
    batches: Vec<ScheduledBatch<'a>>,
    dropped_points: usize,
}

impl<'a> StreamPlan<'a> {
    pub fn new(sequence: &'a FinalSequence, config: &StreamConfig) -> Result<Self> {
        config.validate()?;

        let kept = sequence.truncated(config.max_points);
        let dropped_points = sequence.len() - kept.len();
        if dropped_points > 0 {
            tracing::debug!(
                dropped_points,
                max_points = config.max_points,
                "truncating sequence before streaming"
            );
        }

        let batches = kept
            .chunks(config.batch_size)
            .zip((0u64..).map(|index| index * config.batch_interval_ms))
            .map(|(points, offset_ms)| ScheduledBatch { offset_ms, points })
            .collect();

        Ok(Self {
            batches,
            dropped_points,
        })
    }

    pub fn batches(&self) -> &[ScheduledBatch<'a>] {
        &self.batches
    }

    /// Points that will actually be sent.
    pub fn total_points(&self) -> usize {
        self.batches.iter().map(|batch| batch.points.len()).sum()
    }

    /// Points cut off by the `max_points` limit.
    pub fn dropped_points(&self) -> usize {
        self.dropped_points
    }

    /// Offset of the last batch, i.e. how long sending takes to start them all.
    pub fn last_offset_ms(&self) -> u64 {
        self.batches.last().map(|batch| batch.offset_ms).unwrap_or(0)
    }
}
