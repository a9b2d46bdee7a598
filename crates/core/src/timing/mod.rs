/// Length of one tick, the slot each intensity sample occupies.
pub const TICK_SECONDS: f64 = 0.1;

/// Absorbs floating point error when the section duration is an exact
/// multiple of the intensity list duration.
const BOUNDARY_EPSILON: f64 = 1e-4;

/// Nominal section duration encoded by `duration_raw`.
pub fn expected_seconds(duration_raw: u32) -> f64 {
    (f64::from(duration_raw) + 1.0) / 10.0
}

/// Number of passes over an intensity list of `sample_count` ticks needed to
/// fill a section of `duration_raw`.
///
/// Returns `None` for an empty list. The result is at least 1 otherwise.
pub fn loop_count(duration_raw: u32, sample_count: usize) -> Option<usize> {
    if sample_count == 0 {
        return None;
    }

    let expected = expected_seconds(duration_raw);
    let group_duration = sample_count as f64 * TICK_SECONDS;
    let loops = ((expected + group_duration - BOUNDARY_EPSILON) / group_duration).floor();

    Some((loops as usize).max(1))
}
