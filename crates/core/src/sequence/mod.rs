use serde::{Deserialize, Serialize};

/// Number of silent points appended after the last section.
pub const REST_POINTS: usize = 2;

/// Frequency and intensity subpoints emitted for one tick transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedPoint {
    pub frequency: Vec<u32>,
    pub intensity: Vec<u32>,
}

impl CombinedPoint {
    pub fn new(frequency: Vec<u32>, intensity: Vec<u32>) -> Self {
        Self {
            frequency,
            intensity,
        }
    }

    /// All-zero point used to pad the end of a sequence.
    pub fn rest(range_steps: usize) -> Self {
        Self::new(vec![0; range_steps], vec![0; range_steps])
    }

    pub fn is_rest(&self) -> bool {
        self.frequency.iter().chain(&self.intensity).all(|value| *value == 0)
    }
}

/// Every section's points in order, followed by the rest pad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalSequence {
    range_steps: usize,
    points: Vec<CombinedPoint>,
}

impl FinalSequence {
    /// Concatenates `section_points` and appends [`REST_POINTS`] rest points.
    pub fn assemble<I>(section_points: I, range_steps: usize) -> Self
    where
        I: IntoIterator<Item = CombinedPoint>,
    {
        let mut points: Vec<CombinedPoint> = section_points.into_iter().collect();
        points.extend((0..REST_POINTS).map(|_| CombinedPoint::rest(range_steps)));
        Self {
            range_steps,
            points,
        }
    }

    pub fn range_steps(&self) -> usize {
        self.range_steps
    }

    pub fn points(&self) -> &[CombinedPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points contributed by the sections, without the rest pad.
    pub fn section_points(&self) -> &[CombinedPoint] {
        &self.points[..self.points.len().saturating_sub(REST_POINTS)]
    }

    pub fn rest_pad(&self) -> &[CombinedPoint] {
        &self.points[self.points.len().saturating_sub(REST_POINTS)..]
    }

    /// At most `max_points` leading points.
    pub fn truncated(&self, max_points: usize) -> &[CombinedPoint] {
        &self.points[..self.points.len().min(max_points)]
    }

    pub fn into_points(self) -> Vec<CombinedPoint> {
        self.points
    }
}
