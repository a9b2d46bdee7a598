use crate::sequence::CombinedPoint;

/// `steps` evenly spaced values from `start` to `end`, both inclusive.
/// With a single step only `start` is produced.
pub fn value_range(start: u32, end: u32, steps: usize) -> Vec<u32> {
    if steps <= 1 {
        return vec![start];
    }

    let step_size = (f64::from(end) - f64::from(start)) / (steps - 1) as f64;
    (0..steps)
        .map(|k| (f64::from(start) + k as f64 * step_size).round_ties_even() as u32)
        .collect()
}

/// Expands every tick into the subpoints leading to the next tick. The last
/// tick leads back to the first.
pub fn interpolate_ticks(ticks: &[u32], steps: usize) -> Vec<Vec<u32>> {
    ticks
        .iter()
        .zip(ticks.iter().cycle().skip(1))
        .map(|(&current, &next)| value_range(current, next, steps))
        .collect()
}

/// Pairs frequency and intensity subpoints tick by tick.
///
/// The intensity list is repeated until it covers every frequency tick, so
/// `frequency_ticks.len()` should be a multiple of `intensity_samples.len()`.
pub fn combine(
    frequency_ticks: &[u32],
    intensity_samples: &[u32],
    steps: usize,
) -> Vec<CombinedPoint> {
    let intensity_ticks: Vec<u32> = intensity_samples
        .iter()
        .copied()
        .cycle()
        .take(frequency_ticks.len())
        .collect();

    interpolate_ticks(frequency_ticks, steps)
        .into_iter()
        .zip(interpolate_ticks(&intensity_ticks, steps))
        .map(|(frequency, intensity)| CombinedPoint::new(frequency, intensity))
        .collect()
}
