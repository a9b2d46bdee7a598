use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scan::{trailing_fields, truncated_decimal};

/// Literal that separates repeat units in an encoded pattern.
pub const SECTION_DELIMITER: &str = "+section+";

/// Offset added to the raw frequency fields of a [`FrequencyGroup`].
pub const FREQUENCY_BASE: u32 = 10;

/// Upper bound of an intensity sample.
pub const MAX_INTENSITY: u32 = 100;

/// How frequency evolves across the ticks of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeType {
    /// Every tick uses the start frequency.
    Flat,
    /// Ramp from start to end over each pass through the intensity list.
    IntraSectionRamp,
    /// Ramp from start to end once over the whole section.
    IntraRepeatRamp,
    /// A code outside the known set.
    Unknown(u32),
}

impl ChangeType {
    pub fn from_code(code: u32) -> Self {
        match code {
            1 | 4 => Self::Flat,
            2 => Self::IntraSectionRamp,
            3 => Self::IntraRepeatRamp,
            other => Self::Unknown(other),
        }
    }
}

/// The five-field tuple that precedes the intensity list of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyGroup {
    pub offset_start: u32,
    pub offset_end: u32,
    /// Nominal section duration in tenths of a second, minus one.
    pub duration_raw: u32,
    /// Raw protocol code, see [`ChangeType::from_code`].
    pub change_type: u32,
    pub reserved: u32,
}

impl FrequencyGroup {
    pub fn from_fields(fields: [u32; 5]) -> Self {
        let [offset_start, offset_end, duration_raw, change_type, reserved] = fields;
        Self {
            offset_start,
            offset_end,
            duration_raw,
            change_type,
            reserved,
        }
    }

    pub fn kind(&self) -> ChangeType {
        ChangeType::from_code(self.change_type)
    }

    pub fn start_frequency(&self) -> u32 {
        self.offset_start.saturating_add(FREQUENCY_BASE)
    }

    pub fn end_frequency(&self) -> u32 {
        self.offset_end.saturating_add(FREQUENCY_BASE)
    }
}

/// A frequency group together with its intensity samples, one per tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub group: FrequencyGroup,
    pub intensity_samples: Vec<u32>,
}

/// Splits a pattern into its raw section substrings, in order.
pub fn split_sections(pattern: &str) -> impl Iterator<Item = &str> {
    pattern.split(SECTION_DELIMITER)
}

/// Why a raw section produced no [`Section`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// No `/` separating a frequency group from intensity samples.
    MissingSlash,
    /// Slashes exist but none is preceded by five integer fields.
    MissingFrequencyGroup,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSlash => f.write_str("no `/` after a frequency group"),
            Self::MissingFrequencyGroup => f.write_str("no five-field frequency group"),
        }
    }
}

/// Decodes one raw section.
///
/// Fails when no `int,int,int,int,int/` tuple can be found. The intensity
/// list may come back empty; that is for the caller to reject.
pub fn decode_section(raw: &str) -> Result<Section, SkipReason> {
    if !raw.contains('/') {
        return Err(SkipReason::MissingSlash);
    }

    let (group, samples) = raw
        .match_indices('/')
        .find_map(|(index, _)| {
            trailing_fields::<5>(&raw[..index]).map(|fields| (fields, &raw[index + 1..]))
        })
        .ok_or(SkipReason::MissingFrequencyGroup)?;

    Ok(Section {
        group: FrequencyGroup::from_fields(group),
        intensity_samples: parse_intensities(samples),
    })
}

/// Reads `<decimal>-<flag>` tokens, keeping the integer part of each decimal.
/// Tokens that do not fit the shape are ignored.
pub fn parse_intensities(text: &str) -> Vec<u32> {
    text.split(',')
        .filter_map(|token| {
            let (value, _flag) = token.trim().split_once('-')?;
            truncated_decimal(value)
        })
        .map(|value| {
            if value > MAX_INTENSITY {
                tracing::warn!(value, "intensity sample above {MAX_INTENSITY}, clamping");
            }
            value.min(MAX_INTENSITY)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_section_delimiter() {
        let parts: Vec<_> = split_sections("a+section+b+section+c").collect();
        assert_eq!(parts, ["a", "b", "c"]);

        let single: Vec<_> = split_sections("no delimiter here").collect();
        assert_eq!(single, ["no delimiter here"]);
    }

    #[test]
    fn decodes_first_section_behind_header() {
        let section =
            decode_section("Dungeonlab+pulse:0,1,8=0,11,16,1,1/70.00-1,80.00-0,90.00-0").unwrap();

        assert_eq!(
            section.group,
            FrequencyGroup {
                offset_start: 0,
                offset_end: 11,
                duration_raw: 16,
                change_type: 1,
                reserved: 1,
            }
        );
        assert_eq!(section.intensity_samples, [70, 80, 90]);
    }

    #[test]
    fn truncates_intensity_decimals() {
        assert_eq!(parse_intensities("65.99-1,88.33-0,0.01-1"), [65, 88, 0]);
    }

    #[test]
    fn ignores_malformed_intensity_tokens() {
        assert_eq!(parse_intensities("50.00-1,abc,60-1,70.00,80.00-0"), [50, 80]);
    }

    #[test]
    fn clamps_out_of_range_intensity() {
        assert_eq!(parse_intensities("150.00-1"), [MAX_INTENSITY]);
    }

    #[test]
    fn section_without_tuple_is_dropped() {
        assert_eq!(
            decode_section("0,0,9,1/50.00-1"),
            Err(SkipReason::MissingFrequencyGroup)
        );
        assert_eq!(decode_section("garbage"), Err(SkipReason::MissingSlash));
    }

    #[test]
    fn later_slash_can_carry_the_tuple() {
        let section = decode_section("x/y 5,6,7,2,0/40.00-1").unwrap();
        assert_eq!(section.group.offset_start, 5);
        assert_eq!(section.intensity_samples, [40]);
    }

    #[test]
    fn tuple_without_samples_keeps_empty_list() {
        let section = decode_section("0,0,9,1,1/").unwrap();
        assert!(section.intensity_samples.is_empty());
    }

    #[test]
    fn maps_change_type_codes() {
        assert_eq!(ChangeType::from_code(1), ChangeType::Flat);
        assert_eq!(ChangeType::from_code(4), ChangeType::Flat);
        assert_eq!(ChangeType::from_code(2), ChangeType::IntraSectionRamp);
        assert_eq!(ChangeType::from_code(3), ChangeType::IntraRepeatRamp);
        assert_eq!(ChangeType::from_code(9), ChangeType::Unknown(9));
    }
}
