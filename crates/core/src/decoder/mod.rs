//! Turns an encoded pattern string into a [`FinalSequence`].
//!
//! Decoding is a pure function of the pattern and the [`DecoderConfig`]. A
//! missing header or an undecodable section does not fail the decode; both
//! are recorded as [`DecodeIssue`]s so callers and tests can see exactly what
//! was skipped.

use serde::{Deserialize, Serialize};

use crate::{
    extract_header, frequency_ticks,
    interpolate::combine,
    loop_count,
    section::{decode_section, SkipReason},
    split_sections, CombinedPoint, DecoderConfig, FinalSequence, FrequencyGroup, PulsePatternError,
    Result, WaveformHeader,
};

/// A non-fatal problem found while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecodeIssue {
    /// No `+pulse:` marker with a valid tuple.
    MissingHeader,
    /// The section at `index` had no `int,int,int,int,int/` tuple and was dropped.
    MalformedSection { index: usize, reason: SkipReason },
}

/// One section after loop expansion, frequency generation and interpolation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedSection {
    /// Position among the raw sections, dropped ones included.
    pub index: usize,
    pub group: FrequencyGroup,
    pub intensity_samples: Vec<u32>,
    pub loop_count: usize,
    pub frequency_ticks: Vec<u32>,
    pub combined_points: Vec<CombinedPoint>,
}

/// Result of a successful decode along with per-section diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedWaveform {
    pub header: Option<WaveformHeader>,
    pub sections: Vec<DecodedSection>,
    pub issues: Vec<DecodeIssue>,
    pub sequence: FinalSequence,
}

impl DecodedWaveform {
    pub fn frequency_groups(&self) -> impl Iterator<Item = &FrequencyGroup> {
        self.sections.iter().map(|section| &section.group)
    }

    pub fn intensity_lists(&self) -> impl Iterator<Item = &[u32]> {
        self.sections
            .iter()
            .map(|section| section.intensity_samples.as_slice())
    }

    pub fn loop_counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.sections.iter().map(|section| section.loop_count)
    }

    pub fn frequency_ticks(&self) -> impl Iterator<Item = &[u32]> {
        self.sections
            .iter()
            .map(|section| section.frequency_ticks.as_slice())
    }

    /// Index and reason of every dropped section, in order.
    pub fn dropped_sections(&self) -> impl Iterator<Item = (usize, SkipReason)> + '_ {
        self.issues.iter().filter_map(|issue| match issue {
            DecodeIssue::MalformedSection { index, reason } => Some((*index, *reason)),
            DecodeIssue::MissingHeader => None,
        })
    }

    pub fn summary(&self) -> DecodeSummary {
        DecodeSummary {
            rest_time_seconds: self.header.map(|header| header.rest_time_seconds),
            sections: self.sections.len(),
            dropped_sections: self.dropped_sections().count(),
            ticks: self.sections.iter().map(|s| s.frequency_ticks.len()).sum(),
            points: self.sequence.len(),
        }
    }
}

/// Compact overview of a decode, suitable for logs and listings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecodeSummary {
    pub rest_time_seconds: Option<f64>,
    pub sections: usize,
    pub dropped_sections: usize,
    pub ticks: usize,
    pub points: usize,
}

/// Reusable decoder bound to a validated configuration.
#[derive(Debug, Clone, Copy)]
pub struct WaveformDecoder {
    config: DecoderConfig,
}

impl WaveformDecoder {
    pub fn new(config: DecoderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decodes `pattern`.
    ///
    /// Fails with [`PulsePatternError::EmptyIntensityList`] when a section has
    /// a frequency group but no samples, and with
    /// [`PulsePatternError::NoSectionsDecoded`] when nothing survives.
    pub fn decode(&self, pattern: &str) -> Result<DecodedWaveform> {
        let header = extract_header(pattern);
        let mut issues = Vec::new();
        if header.is_none() {
            tracing::debug!("pattern has no pulse header");
            issues.push(DecodeIssue::MissingHeader);
        }

        let mut sections = Vec::new();
        for (index, raw) in split_sections(pattern).enumerate() {
            let section = match decode_section(raw) {
                Ok(section) => section,
                Err(reason) => {
                    tracing::debug!(index, %reason, "dropping section");
                    issues.push(DecodeIssue::MalformedSection { index, reason });
                    continue;
                }
            };
            sections.push(self.expand(index, section.group, section.intensity_samples)?);
        }

        if sections.is_empty() {
            return Err(PulsePatternError::NoSectionsDecoded { header });
        }

        let sequence = FinalSequence::assemble(
            sections
                .iter()
                .flat_map(|section| section.combined_points.iter().cloned()),
            self.config.range_steps,
        );

        Ok(DecodedWaveform {
            header,
            sections,
            issues,
            sequence,
        })
    }

    fn expand(
        &self,
        index: usize,
        group: FrequencyGroup,
        intensity_samples: Vec<u32>,
    ) -> Result<DecodedSection> {
        let loops = loop_count(group.duration_raw, intensity_samples.len())
            .ok_or(PulsePatternError::EmptyIntensityList { section: index })?;
        let ticks = frequency_ticks(
            &group,
            intensity_samples.len(),
            loops,
            self.config.frequency_dispatch,
        );
        let combined_points = combine(&ticks, &intensity_samples, self.config.range_steps);

        tracing::debug!(
            index,
            loop_count = loops,
            ticks = ticks.len(),
            "decoded section"
        );

        Ok(DecodedSection {
            index,
            group,
            intensity_samples,
            loop_count: loops,
            frequency_ticks: ticks,
            combined_points,
        })
    }
}

/// Convenience wrapper around [`WaveformDecoder::decode`].
pub fn decode_waveform(pattern: &str, config: &DecoderConfig) -> Result<DecodedWaveform> {
    WaveformDecoder::new(*config)?.decode(pattern)
}
