use std::collections::BTreeMap;

use crate::{decode_waveform, AppConfig, DecodedWaveform, DecoderConfig, PulsePatternError, Result};

/// Registry of named waveform patterns, ordered by name.
#[derive(Debug, Clone, Default)]
pub struct WaveformLibrary {
    waveforms: BTreeMap<String, String>,
}

impl WaveformLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            waveforms: config.waveforms.clone(),
        }
    }

    /// Adds or replaces a waveform.
    pub fn register(&mut self, name: impl Into<String>, pattern: impl Into<String>) {
        self.waveforms.insert(name.into(), pattern.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.waveforms.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.waveforms.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.waveforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waveforms.is_empty()
    }

    pub fn decode(&self, name: &str, config: &DecoderConfig) -> Result<DecodedWaveform> {
        let pattern = self
            .get(name)
            .ok_or_else(|| PulsePatternError::UnknownWaveform(name.to_string()))?;
        decode_waveform(pattern, config)
    }

    /// Decodes every waveform. A failure in one entry is reported alongside
    /// the others rather than aborting the run.
    pub fn decode_all<'a>(
        &'a self,
        config: &DecoderConfig,
    ) -> Vec<(&'a str, Result<DecodedWaveform>)> {
        self.waveforms
            .iter()
            .map(|(name, pattern)| (name.as_str(), decode_waveform(pattern, config)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> WaveformLibrary {
        let mut library = WaveformLibrary::new();
        library.register("steady", "A+pulse:10,0,0=0,0,9,1,1/50.00-1,50.00-1");
        library.register("broken", "A+pulse:10,0,0=nothing here");
        library
    }

    #[test]
    fn decodes_registered_waveforms() {
        let decoded = library()
            .decode("steady", &DecoderConfig::default())
            .unwrap();
        assert_eq!(decoded.sequence.len(), 12);
    }

    #[test]
    fn errors_on_missing_waveforms() {
        let err = library()
            .decode("missing", &DecoderConfig::default())
            .unwrap_err();
        assert!(format!("{err}").contains("missing"));
    }

    #[test]
    fn decode_all_reports_each_entry() {
        let library = library();
        let results = library.decode_all(&DecoderConfig::default());

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "broken");
        assert!(matches!(
            results[0].1,
            Err(PulsePatternError::NoSectionsDecoded { .. })
        ));
        assert_eq!(results[1].0, "steady");
        assert!(results[1].1.is_ok());
    }

    #[test]
    fn builds_from_config() {
        let config = AppConfig::from_json(r#"{ "waveforms": { "b": "0,0,0,1,1/1.00-1", "a": "x" } }"#)
            .unwrap();
        let library = WaveformLibrary::from_config(&config);

        assert_eq!(library.names().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(library.get("b"), Some("0,0,0,1,1/1.00-1"));
        assert_eq!(library.len(), 2);
    }
}
