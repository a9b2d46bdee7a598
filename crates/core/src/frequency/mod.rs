//! Per-tick frequency generation for a decoded section.
//!
//! Historical pattern players route every change type through the flat
//! branch. [`FrequencyDispatch`] chooses between reproducing that output and
//! honouring the ramp codes.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{ChangeType, FrequencyGroup, PulsePatternError};

/// Selects how a section's change type is mapped to a frequency profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrequencyDispatch {
    /// Every section is flat regardless of its change type.
    #[default]
    ReferenceFlat,
    /// Flat, intra-section ramp and intra-repeat ramp are all honoured.
    ThreeWay,
}

impl FrequencyDispatch {
    /// Profile actually used for `group` under this policy.
    pub fn resolve(self, group: &FrequencyGroup) -> ChangeType {
        match (self, group.kind()) {
            (Self::ReferenceFlat, _) => ChangeType::Flat,
            (Self::ThreeWay, ChangeType::Unknown(code)) => {
                tracing::warn!(code, "unknown frequency change type, using flat profile");
                ChangeType::Flat
            }
            (Self::ThreeWay, kind) => kind,
        }
    }
}

impl fmt::Display for FrequencyDispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReferenceFlat => f.write_str("reference-flat"),
            Self::ThreeWay => f.write_str("three-way"),
        }
    }
}

impl FromStr for FrequencyDispatch {
    type Err = PulsePatternError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "reference-flat" => Ok(Self::ReferenceFlat),
            "three-way" => Ok(Self::ThreeWay),
            other => Err(PulsePatternError::msg(format!(
                "unknown frequency dispatch `{other}`, expected `reference-flat` or `three-way`"
            ))),
        }
    }
}

/// Generates one raw frequency per tick: `sample_count * loop_count` values.
pub fn frequency_ticks(
    group: &FrequencyGroup,
    sample_count: usize,
    loop_count: usize,
    dispatch: FrequencyDispatch,
) -> Vec<u32> {
    let total = sample_count * loop_count;
    let start = group.start_frequency();
    let end = group.end_frequency();

    match dispatch.resolve(group) {
        ChangeType::IntraSectionRamp => {
            let pass = ramp(start, end, sample_count);
            let mut ticks = Vec::with_capacity(total);
            for _ in 0..loop_count {
                ticks.extend_from_slice(&pass);
            }
            ticks
        }
        ChangeType::IntraRepeatRamp => ramp(start, end, total),
        ChangeType::Flat | ChangeType::Unknown(_) => vec![start; total],
    }
}

/// Linear ramp of `points` values from `start` to `end`, both inclusive.
/// A single point sits at `start`.
pub fn ramp(start: u32, end: u32, points: usize) -> Vec<u32> {
    let span = f64::from(end) - f64::from(start);
    (0..points)
        .map(|index| {
            let progress = if points > 1 {
                index as f64 / (points - 1) as f64
            } else {
                0.0
            };
            (f64::from(start) + span * progress).round_ties_even() as u32
        })
        .collect()
}
