use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{FrequencyDispatch, PulsePatternError, Result};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub decoder: DecoderConfig,
    pub stream: StreamConfig,
    /// Named waveform patterns, see [`crate::WaveformLibrary`].
    pub waveforms: BTreeMap<String, String>,
}

impl AppConfig {
    /// Reads a JSON configuration file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(?path, "loading configuration");
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.decoder.validate()?;
        self.stream.validate()
    }
}

/// Settings that shape the decoded sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Subpoints generated per tick transition.
    pub range_steps: usize,
    pub frequency_dispatch: FrequencyDispatch,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            range_steps: 4,
            frequency_dispatch: FrequencyDispatch::default(),
        }
    }
}

impl DecoderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.range_steps == 0 {
            return Err(PulsePatternError::InvalidRangeSteps);
        }
        Ok(())
    }
}

/// How a device client is expected to feed a sequence to the hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub batch_size: usize,
    pub batch_interval_ms: u64,
    /// Longer sequences are cut to this many points before batching.
    pub max_points: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            batch_size: 100,
            batch_interval_ms: 50,
            max_points: 500,
        }
    }
}

impl StreamConfig {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(PulsePatternError::InvalidBatchSize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = AppConfig::from_json("{}").unwrap();

        assert_eq!(config.decoder, DecoderConfig::default());
        assert_eq!(config.decoder.range_steps, 4);
        assert_eq!(config.decoder.frequency_dispatch, FrequencyDispatch::ReferenceFlat);
        assert_eq!(config.stream.batch_size, 100);
        assert_eq!(config.stream.batch_interval_ms, 50);
        assert_eq!(config.stream.max_points, 500);
        assert!(config.waveforms.is_empty());
    }

    #[test]
    fn reads_partial_sections() {
        let config = AppConfig::from_json(
            r#"{
                "decoder": { "frequency_dispatch": "three-way" },
                "stream": { "max_points": 200 },
                "waveforms": { "breath": "A+pulse:0,1,8=0,0,9,1,1/50.00-1" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.decoder.range_steps, 4);
        assert_eq!(config.decoder.frequency_dispatch, FrequencyDispatch::ThreeWay);
        assert_eq!(config.stream.max_points, 200);
        assert_eq!(config.stream.batch_size, 100);
        assert!(config.waveforms.contains_key("breath"));
    }

    #[test]
    fn rejects_zero_range_steps() {
        let err = AppConfig::from_json(r#"{ "decoder": { "range_steps": 0 } }"#).unwrap_err();
        assert!(matches!(err, PulsePatternError::InvalidRangeSteps));
    }

    #[test]
    fn rejects_zero_batch_size() {
        let err = AppConfig::from_json(r#"{ "stream": { "batch_size": 0 } }"#).unwrap_err();
        assert!(matches!(err, PulsePatternError::InvalidBatchSize));
    }

    #[test]
    fn surfaces_json_errors() {
        let err = AppConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, PulsePatternError::Json(_)));
    }

    #[test]
    fn round_trips_through_json() {
        let mut config = AppConfig::default();
        config.decoder.range_steps = 2;
        config
            .waveforms
            .insert("tap".to_string(), "0,0,0,1,1/10.00-1".to_string());

        let json = serde_json::to_string(&config).unwrap();
        let back = AppConfig::from_json(&json).unwrap();

        assert_eq!(back.decoder.range_steps, 2);
        assert_eq!(back.waveforms, config.waveforms);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = AppConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, PulsePatternError::Io(_)));
    }
}
