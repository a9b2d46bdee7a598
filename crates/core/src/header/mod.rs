use serde::{Deserialize, Serialize};

use crate::scan::leading_fields;

/// Literal that introduces the pulse parameter tuple.
pub const PULSE_MARKER: &str = "+pulse:";

/// Rest-time parameters read from the `+pulse:` marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveformHeader {
    /// The raw three-field tuple. Only the first field carries meaning.
    pub pulse_params: [u32; 3],
    /// Rest time in units of 10 ms.
    pub rest_time_raw: u32,
    /// Rest time in seconds, rounded to one decimal place.
    pub rest_time_seconds: f64,
}

impl WaveformHeader {
    pub fn from_params(pulse_params: [u32; 3]) -> Self {
        let rest_time_raw = pulse_params[0];
        Self {
            pulse_params,
            rest_time_raw,
            rest_time_seconds: rest_seconds(rest_time_raw),
        }
    }
}

/// Locates the first `+pulse:` marker followed by a valid integer triple.
///
/// A missing marker is not an error: the header is simply absent and section
/// decoding carries on without it.
pub fn extract_header(pattern: &str) -> Option<WaveformHeader> {
    pattern
        .match_indices(PULSE_MARKER)
        .find_map(|(index, marker)| leading_fields::<3>(&pattern[index + marker.len()..]))
        .map(WaveformHeader::from_params)
}

// raw / 100 rounded to tenths on the float's exact binary value, ties to
// even, so 0.15 (stored as 0.1499...) gives 0.1.
fn rest_seconds(raw: u32) -> f64 {
    let seconds = f64::from(raw) / 100.0;
    format!("{seconds:.1}").parse().unwrap_or(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_rest_time_from_marker() {
        let header = extract_header("Dungeonlab+pulse:18,1,8=0,11,16,1,1/70.00-1").unwrap();

        assert_eq!(header.pulse_params, [18, 1, 8]);
        assert_eq!(header.rest_time_raw, 18);
        assert!((header.rest_time_seconds - 0.2).abs() < 1e-9);
    }

    #[test]
    fn missing_marker_yields_no_header() {
        assert!(extract_header("0,0,9,1,1/50.00-1").is_none());
        assert!(extract_header("A+pulse=10,0,0=0,0,9,1,1/50.00-1").is_none());
    }

    #[test]
    fn skips_marker_without_tuple() {
        let header = extract_header("A+pulse:x+pulse:40,2,3=").unwrap();
        assert_eq!(header.rest_time_raw, 40);
    }

    #[test]
    fn header_seconds_follow_float_rounding() {
        let seconds: Vec<f64> = [5, 15, 35]
            .iter()
            .map(|raw| {
                extract_header(&format!("A+pulse:{raw},0,0="))
                    .unwrap()
                    .rest_time_seconds
            })
            .collect();
        assert_eq!(seconds, [0.1, 0.1, 0.3]);
    }

    #[test]
    fn rounds_rest_seconds_to_tenths() {
        assert_eq!(rest_seconds(0), 0.0);
        assert_eq!(rest_seconds(5), 0.1);
        assert_eq!(rest_seconds(10), 0.1);
        assert_eq!(rest_seconds(14), 0.1);
        assert_eq!(rest_seconds(15), 0.1);
        assert_eq!(rest_seconds(16), 0.2);
        assert_eq!(rest_seconds(25), 0.2);
        assert_eq!(rest_seconds(35), 0.3);
        assert_eq!(rest_seconds(75), 0.8);
        assert_eq!(rest_seconds(150), 1.5);
    }
}
