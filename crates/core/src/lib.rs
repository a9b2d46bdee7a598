//! Core library for decoding textual pulse waveform patterns.
//!
//! A pattern such as
//! `Label+pulse:18,1,8=0,11,16,1,1/70.00-1,80.00-0+section+...` is decoded
//! into a [`FinalSequence`] of combined points: per tick, a run of
//! interpolated frequency values paired with a run of interpolated intensity
//! values. Each module owns one stage of that pipeline (header extraction,
//! section decoding, loop timing, frequency profiles, interpolation and
//! assembly). Device transport is left to callers; [`StreamPlan`] only
//! describes how a sequence would be batched for them.

pub mod config;
pub mod decoder;
pub mod error;
pub mod frequency;
pub mod header;
pub mod interpolate;
pub mod library;
pub mod section;
pub mod sequence;
pub mod stream;
pub mod timing;

mod scan;

pub use config::{AppConfig, DecoderConfig, StreamConfig};
pub use decoder::{
    decode_waveform, DecodeIssue, DecodeSummary, DecodedSection, DecodedWaveform, WaveformDecoder,
};
pub use error::{PulsePatternError, Result};
pub use frequency::{frequency_ticks, FrequencyDispatch};
pub use header::{extract_header, WaveformHeader};
pub use interpolate::value_range;
pub use library::WaveformLibrary;
pub use section::{
    decode_section, split_sections, ChangeType, FrequencyGroup, Section, SkipReason,
};
pub use sequence::{CombinedPoint, FinalSequence};
pub use stream::{ScheduledBatch, StreamPlan};
pub use timing::loop_count;
