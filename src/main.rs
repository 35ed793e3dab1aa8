//! pixelcat: batch image converter with Pixilart project support
//!
//! Thin command-line host over the library: every subcommand calls the same
//! operations a GUI front end would.

use clap::{Parser, Subcommand};
use image::DynamicImage;
use pixelcat::{open_source, save_bitmap, AdjustmentSession, AppSettings, BatchJob, TargetFormat};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "pixelcat", version)]
#[command(about = "View-side adjustments and batch conversion for images and .pixil projects")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert many files into one directory
    Batch {
        /// Input files (.pixil, PNG, JPEG, BMP, ...)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Output directory (defaults to the last one used)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
        /// Output format: PNG, JPEG, JPG, BMP or ICO; output files take its lower-cased name
        /// as extension (defaults to the saved preference)
        #[arg(short, long)]
        format: Option<TargetFormat>,
    },
    /// Rotate and adjust a single image, then save it
    Adjust {
        /// Input file
        input: PathBuf,
        /// Output file; the format follows the extension
        output: PathBuf,
        /// Clockwise quarter turns
        #[arg(long, default_value_t = 0)]
        rotate: u32,
        /// Brightness factor (1.0 = unchanged)
        #[arg(long, default_value_t = 1.0)]
        brightness: f32,
        /// Contrast factor (1.0 = unchanged)
        #[arg(long, default_value_t = 1.0)]
        contrast: f32,
    },
    /// Print dimensions and color type
    Info {
        /// Input file
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let mut settings = AppSettings::load();

    let ok = match cli.command {
        Commands::Batch {
            inputs,
            out_dir,
            format,
        } => run_batch(&mut settings, inputs, out_dir, format),
        Commands::Adjust {
            input,
            output,
            rotate,
            brightness,
            contrast,
        } => open_recent(&mut settings, &input).is_some_and(|image| {
            let mut session = AdjustmentSession::new(image);
            for _ in 0..rotate % 4 {
                session.rotate();
            }
            session.set_brightness(brightness);
            session.set_contrast(contrast);
            save_bitmap(&session.rendered(), &output)
        }),
        Commands::Info { input } => open_recent(&mut settings, &input).is_some_and(|image| {
            println!(
                "{}: {}x{} {:?}",
                input.display(),
                image.width(),
                image.height(),
                image.color()
            );
            true
        }),
    };

    if settings.is_modified() {
        settings.save();
    }

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run_batch(
    settings: &mut AppSettings,
    inputs: Vec<PathBuf>,
    out_dir: Option<PathBuf>,
    format: Option<TargetFormat>,
) -> bool {
    let Some(out_dir) = out_dir.or_else(|| settings.last_output_dir.clone()) else {
        eprintln!("No output directory given and none remembered; pass --out-dir");
        return false;
    };
    let format = format.unwrap_or(settings.default_format);

    let mut job = BatchJob::new(out_dir, format);
    let added = job.add_paths(inputs.iter().cloned());
    if added < inputs.len() {
        log::info!("Ignored {} duplicate input(s)", inputs.len() - added);
    }

    let mut report = |done: usize, total: usize| eprintln!("[{}/{}]", done, total);
    let summary = job.run(Some(&mut report));

    settings.record_output_dir(job.output_dir());
    eprintln!(
        "Converted {} of {} file(s) to {} in {}",
        summary.succeeded,
        summary.total,
        job.format(),
        job.output_dir().display()
    );
    summary.is_complete_success()
}

/// Open an input and remember it on success
fn open_recent(settings: &mut AppSettings, path: &Path) -> Option<DynamicImage> {
    match open_source(path) {
        Ok(image) => {
            settings.add_recent_file(path.to_path_buf());
            Some(image)
        }
        Err(e) => {
            log::error!("Failed to open {}: {}", path.display(), e);
            eprintln!("Failed to open {}: {}", path.display(), e);
            None
        }
    }
}
