/// Sixband - six-band mono equalizer
use clap::{Parser, Subcommand};
use sixband_cli::{config::EqConfig, parse_gain_spec, wav};
use sixband_core::{GainPreset, SampleRate, STANDARD_BANDS};
use sixband_dsp::{design_band, EqualizerEngine, ProcessingStatus};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sixband")]
#[command(about = "Six-band Butterworth equalizer for mono 16-bit WAV files", long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Equalize a WAV file
    Apply {
        /// Input file (16-bit mono PCM WAV)
        input: PathBuf,

        /// Output file
        output: PathBuf,

        /// Configuration file path (defaults to ./sixband.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Start from a named preset
        #[arg(short, long)]
        preset: Option<String>,

        /// Band gain override as BAND=DB, repeatable (e.g. --gain 2=+6)
        #[arg(short, long = "gain", value_parser = parse_gain_arg)]
        gains: Vec<(usize, i32)>,
    },
    /// List the equalizer bands
    Bands {
        /// Check every band against this sample rate
        #[arg(short, long)]
        sample_rate: Option<u32>,
    },
    /// List the gain presets
    Presets,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "sixband=debug,sixband_cli=debug,sixband_dsp=debug"
    } else {
        "sixband=info,sixband_cli=info,sixband_dsp=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Apply {
            input,
            output,
            config,
            preset,
            gains,
        } => {
            apply(&input, &output, config, preset, &gains)?;
        }
        Commands::Bands { sample_rate } => {
            list_bands(sample_rate.map(SampleRate::new));
        }
        Commands::Presets => {
            list_presets();
        }
    }

    Ok(())
}

fn parse_gain_arg(spec: &str) -> Result<(usize, i32), String> {
    parse_gain_spec(spec).map_err(|e| e.to_string())
}

fn apply(
    input: &Path,
    output: &Path,
    config_path: Option<PathBuf>,
    preset: Option<String>,
    gain_overrides: &[(usize, i32)],
) -> anyhow::Result<()> {
    // Load configuration
    let mut config = EqConfig::load(config_path.as_deref())?;
    config.apply_overrides(preset, gain_overrides)?;
    config.validate()?;
    let gains = config.gain_vector()?;

    tracing::info!("Gains (dB): {:?}", gains.as_array());

    let buffer = wav::read_mono_i16(input)?;
    tracing::info!(
        "Loaded {} ({} samples, {}, {:.2} s)",
        input.display(),
        buffer.len(),
        buffer.sample_rate,
        buffer.duration_secs()
    );

    let engine = EqualizerEngine::new();
    let processed = engine.apply(&buffer, &gains)?;

    if let Some((min, max)) = processed.buffer.min_max() {
        tracing::info!("Output range: min {:.4}, max {:.4}", min, max);
    }
    if let ProcessingStatus::Degraded(reason) = processed.status {
        tracing::warn!("Output degraded: {}", reason);
    }

    wav::write_mono_i16(output, &processed.buffer)?;
    tracing::info!("Wrote {}", output.display());

    Ok(())
}

fn list_bands(sample_rate: Option<SampleRate>) {
    for (index, band) in STANDARD_BANDS.iter().enumerate() {
        let mut line = format!("{}  {:<14} {}", index, band.label(), band.kind().name());

        if let Some(rate) = sample_rate {
            let status = match design_band(band, rate) {
                Ok(coeffs) => {
                    let centre = band.reference_hz(rate);
                    format!(
                        "ok, {:+.2} dB at {:.0} Hz",
                        coeffs.magnitude_db_at(centre, rate),
                        centre
                    )
                }
                Err(e) => format!("invalid: {}", e),
            };
            line.push_str(&format!("  [{}: {}]", rate, status));
        }

        println!("{}", line);
    }
}

fn list_presets() {
    for preset in GainPreset::ALL {
        println!(
            "{:<13} {:<13} {:?}",
            preset.id(),
            preset.name(),
            preset.gains().as_array()
        );
    }
}
