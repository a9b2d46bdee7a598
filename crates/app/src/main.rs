use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pulse_pattern_core::{
    decode_waveform, AppConfig, DecodedWaveform, DecoderConfig, FrequencyDispatch,
    PulsePatternError, StreamConfig, StreamPlan, WaveformLibrary,
};
use tracing_subscriber::EnvFilter;

fn main() -> pulse_pattern_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode {
            pattern,
            decoder,
            json,
        } => run_decode(&pattern, &decoder.into_config(), json),
        Commands::Library { config, name, json } => run_library(&config, name.as_deref(), json),
        Commands::Plan {
            pattern,
            decoder,
            stream,
        } => run_plan(&pattern, &decoder.into_config(), &stream.into_config()),
    }
}

fn run_decode(
    pattern: &str,
    config: &DecoderConfig,
    json: bool,
) -> pulse_pattern_core::Result<()> {
    tracing::info!(
        range_steps = config.range_steps,
        dispatch = %config.frequency_dispatch,
        "decoding pattern"
    );

    let decoded = decode_waveform(pattern, config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&decoded)?);
    } else {
        print_sequence(&decoded);
    }
    Ok(())
}

fn run_library(
    config_path: &PathBuf,
    name: Option<&str>,
    json: bool,
) -> pulse_pattern_core::Result<()> {
    tracing::info!(?config_path, name, "decoding waveform library");

    let config = AppConfig::load(config_path)?;
    let library = WaveformLibrary::from_config(&config);
    if library.is_empty() {
        return Err(PulsePatternError::msg(format!(
            "no waveforms defined in {}",
            config_path.display()
        )));
    }

    if let Some(name) = name {
        let decoded = library.decode(name, &config.decoder)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&decoded)?);
        } else {
            print_sequence(&decoded);
        }
        return Ok(());
    }

    let mut failures = 0;
    for (name, result) in library.decode_all(&config.decoder) {
        match result {
            Ok(decoded) => {
                let summary = decoded.summary();
                if json {
                    println!("{}", serde_json::to_string(&(name, summary))?);
                } else {
                    println!(
                        "{name}: {} sections ({} dropped), {} ticks, {} points",
                        summary.sections, summary.dropped_sections, summary.ticks, summary.points
                    );
                }
            }
            Err(err) => {
                failures += 1;
                tracing::warn!(name, %err, "waveform failed to decode");
            }
        }
    }

    if failures > 0 {
        return Err(PulsePatternError::msg(format!(
            "{failures} of {} waveforms failed to decode",
            library.len()
        )));
    }
    Ok(())
}

fn run_plan(
    pattern: &str,
    decoder: &DecoderConfig,
    stream: &StreamConfig,
) -> pulse_pattern_core::Result<()> {
    let decoded = decode_waveform(pattern, decoder)?;
    let plan = StreamPlan::new(&decoded.sequence, stream)?;

    tracing::info!(
        batches = plan.batches().len(),
        points = plan.total_points(),
        dropped = plan.dropped_points(),
        "planned stream"
    );

    for (index, batch) in plan.batches().iter().enumerate() {
        println!(
            "batch {index}: +{} ms, {} points",
            batch.offset_ms,
            batch.points.len()
        );
    }
    if plan.dropped_points() > 0 {
        println!(
            "{} points beyond the {}-point limit are not sent",
            plan.dropped_points(),
            stream.max_points
        );
    }
    Ok(())
}

fn print_sequence(decoded: &DecodedWaveform) {
    println!("[");
    for point in decoded.sequence.points() {
        println!("    ({:?}, {:?}),", point.frequency, point.intensity);
    }
    println!("]");

    match decoded.header {
        Some(header) => println!(
            "pulse params: {:?}, rest time: {} -> {}s",
            header.pulse_params, header.rest_time_raw, header.rest_time_seconds
        ),
        None => println!("pulse params: none"),
    }
    for (index, reason) in decoded.dropped_sections() {
        println!("section {index} skipped: {reason}");
    }
    println!("total points: {}", decoded.sequence.len());
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Decode pulse waveform patterns", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a pattern string and print its combined points.
    Decode {
        /// Encoded waveform pattern.
        pattern: String,
        #[command(flatten)]
        decoder: DecoderArgs,
        /// Print the full decode report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Decode the waveforms listed in a JSON configuration file.
    Library {
        /// Path to the configuration file.
        config: PathBuf,
        /// Decode only this waveform and print its points.
        #[arg(short, long)]
        name: Option<String>,
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Show how a decoded pattern would be batched for a device.
    Plan {
        /// Encoded waveform pattern.
        pattern: String,
        #[command(flatten)]
        decoder: DecoderArgs,
        #[command(flatten)]
        stream: StreamArgs,
    },
}

#[derive(clap::Args, Debug)]
struct DecoderArgs {
    /// Subpoints generated per tick.
    #[arg(short, long, default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..))]
    range_steps: u16,
    /// `reference-flat` keeps every section flat, `three-way` honours ramps.
    #[arg(long, default_value_t = FrequencyDispatch::ReferenceFlat)]
    dispatch: FrequencyDispatch,
}

impl DecoderArgs {
    fn into_config(self) -> DecoderConfig {
        DecoderConfig {
            range_steps: usize::from(self.range_steps),
            frequency_dispatch: self.dispatch,
        }
    }
}

#[derive(clap::Args, Debug)]
struct StreamArgs {
    /// Points per batch.
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u16).range(1..))]
    batch_size: u16,
    /// Delay between batches in milliseconds.
    #[arg(long, default_value_t = 50)]
    interval_ms: u64,
    /// Points kept before batching.
    #[arg(long, default_value_t = 500)]
    max_points: usize,
}

impl StreamArgs {
    fn into_config(self) -> StreamConfig {
        StreamConfig {
            batch_size: usize::from(self.batch_size),
            batch_interval_ms: self.interval_ms,
            max_points: self.max_points,
        }
    }
}
