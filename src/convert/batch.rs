//! Sequential batch conversion
//!
//! Items are converted one after another on the calling thread. A failing
//! item is logged and skipped; it never aborts the job. Hosts that need a
//! responsive UI run the whole batch on a worker thread.

use std::path::{Path, PathBuf};

use super::{convert, Source};
use crate::formats::TargetFormat;

/// Outcome of a batch run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Items converted successfully
    pub succeeded: usize,
    /// Items attempted (always the input length)
    pub total: usize,
}

impl BatchSummary {
    pub fn failed(&self) -> usize {
        self.total - self.succeeded
    }

    pub fn is_complete_success(&self) -> bool {
        self.succeeded == self.total
    }
}

/// Output path for `input`: its stem plus the format's extension, under `output_dir`
pub fn output_path(input: &Path, output_dir: &Path, format: TargetFormat) -> Option<PathBuf> {
    let stem = input.file_stem()?;
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(format.extension());
    Some(output_dir.join(name))
}

/// Convert every path into `output_dir`.
///
/// `on_progress` is called after each item with `(processed, total)`.
pub fn batch_convert<P: AsRef<Path>>(
    paths: &[P],
    output_dir: &Path,
    format: TargetFormat,
    mut on_progress: Option<&mut dyn FnMut(usize, usize)>,
) -> BatchSummary {
    let total = paths.len();
    let mut summary = BatchSummary {
        succeeded: 0,
        total,
    };

    // Items still run (and fail) so progress and accounting stay exact
    if let Err(e) = std::fs::create_dir_all(output_dir) {
        log::error!(
            "Failed to create output directory {}: {}",
            output_dir.display(),
            e
        );
    }

    log::info!(
        "Starting batch of {} item(s) to {} as {}",
        total,
        output_dir.display(),
        format
    );

    for (index, path) in paths.iter().enumerate() {
        let path = path.as_ref();

        let converted = match output_path(path, output_dir, format) {
            Some(target) => convert(Source::Path(path), &target, format),
            None => {
                log::error!("Cannot derive an output name for {}", path.display());
                false
            }
        };

        if converted {
            summary.succeeded += 1;
        } else {
            log::warn!("Skipping {}", path.display());
        }

        if let Some(callback) = on_progress.as_deref_mut() {
            callback(index + 1, total);
        }
    }

    log::info!(
        "Batch finished: {}/{} converted",
        summary.succeeded,
        summary.total
    );
    summary
}

/// An ordered list of unique input files plus where and how to convert them
#[derive(Clone, Debug)]
pub struct BatchJob {
    paths: Vec<PathBuf>,
    output_dir: PathBuf,
    format: TargetFormat,
}

impl BatchJob {
    pub fn new(output_dir: impl Into<PathBuf>, format: TargetFormat) -> Self {
        Self {
            paths: Vec::new(),
            output_dir: output_dir.into(),
            format,
        }
    }

    /// Queue a file. Returns `false` if it was already queued.
    pub fn add_path(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.paths.contains(&path) {
            return false;
        }
        self.paths.push(path);
        true
    }

    /// Queue several files, skipping duplicates. Returns how many were added.
    pub fn add_paths<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        paths
            .into_iter()
            .map(|path| self.add_path(path))
            .filter(|&added| added)
            .count()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn format(&self) -> TargetFormat {
        self.format
    }

    pub fn set_format(&mut self, format: TargetFormat) {
        self.format = format;
    }

    pub fn set_output_dir(&mut self, output_dir: impl Into<PathBuf>) {
        self.output_dir = output_dir.into();
    }

    /// Run the job; see [`batch_convert`]
    pub fn run(&self, on_progress: Option<&mut dyn FnMut(usize, usize)>) -> BatchSummary {
        batch_convert(&self.paths, &self.output_dir, self.format, on_progress)
    }
}
