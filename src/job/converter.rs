// src/job/converter.rs
use crate::error::{SegyError, Result};
use crate::job::JobConfig;
use crate::reader::TraceSequenceReader;
use crate::split::{FilePlan, Split, SplitPlanner, Storage};
use crate::types::FormatParameters;
use crate::writer::{ParquetOptions, TraceParquetWriter};
use crossbeam_channel::unbounded;
use log::{debug, error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

/// One split together with the parameters of the file it belongs to.
#[derive(Debug, Clone)]
pub struct SplitTask {
    /// Job-wide index, used to name the part file
    pub part: usize,
    pub split: Split,
    pub params: Arc<FormatParameters>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOutcome {
    pub part: usize,
    pub traces: u64,
    /// Part file, absent when the split held no traces
    pub output: Option<PathBuf>,
    pub attempts: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobReport {
    pub files: usize,
    pub splits: usize,
    pub traces: u64,
    pub outputs: Vec<PathBuf>,
}

pub fn part_path(output_dir: &Path, part: usize) -> PathBuf {
    output_dir.join(format!("part-{:05}.parquet", part))
}

/// Flatten file plans into independently runnable tasks
pub fn split_tasks(plans: &[FilePlan]) -> Vec<SplitTask> {
    plans
        .iter()
        .flat_map(|plan| plan.splits.iter().map(move |split| (split, &plan.params)))
        .enumerate()
        .map(|(part, (split, params))| SplitTask {
            part,
            split: split.clone(),
            params: Arc::clone(params),
        })
        .collect()
}

/// Decode one split into its part file, returning the trace count.
///
/// The part file is only created once the first trace is decoded.
pub(crate) fn convert_split<S: Storage>(
    storage: &S,
    task: &SplitTask,
    output: &Path,
    options: &ParquetOptions,
) -> Result<u64> {
    let source = storage.open_for_read(&task.split.path)?;
    let reader = TraceSequenceReader::new(source, &task.split, Arc::clone(&task.params))?;

    let mut writer: Option<TraceParquetWriter<fs::File>> = None;
    for trace in reader {
        let trace = trace?;
        let w = match writer.as_mut() {
            Some(w) => w,
            None => writer.insert(TraceParquetWriter::create(output, options)?),
        };
        w.write_trace(trace)?;
    }

    match writer {
        Some(w) => w.close(),
        None => Ok(0),
    }
}

/// Run a split, retrying the whole split on retryable failures.
pub(crate) fn run_split_task<S: Storage>(
    storage: &S,
    task: &SplitTask,
    output_dir: &Path,
    options: &ParquetOptions,
    max_attempts: u32,
) -> Result<SplitOutcome> {
    let output = part_path(output_dir, task.part);
    let max_attempts = max_attempts.max(1);
    let mut attempts = 0;

    loop {
        attempts += 1;
        match convert_split(storage, task, &output, options) {
            Ok(traces) => {
                debug!(
                    "Split {} ({} @ {}): {} traces",
                    task.part,
                    task.split.path.display(),
                    task.split.offset,
                    traces
                );
                return Ok(SplitOutcome {
                    part: task.part,
                    traces,
                    output: (traces > 0).then(|| output.clone()),
                    attempts,
                });
            }
            Err(e) if e.is_retryable() && attempts < max_attempts => {
                warn!(
                    "Split {} attempt {}/{} failed, retrying: {}",
                    task.part, attempts, max_attempts, e
                );
            }
            Err(e) => {
                fs::remove_file(&output).ok();
                return Err(SegyError::SplitFailed {
                    path: task.split.path.display().to_string(),
                    offset: task.split.offset,
                    attempts,
                    source: Box::new(e),
                });
            }
        }
    }
}

/// Fold per-split results into a report; the lowest-numbered failure wins.
pub(crate) fn summarize(plans: &[FilePlan], mut results: Vec<(usize, Result<SplitOutcome>)>) -> Result<JobReport> {
    results.sort_by_key(|(part, _)| *part);

    let mut report = JobReport {
        files: plans.len(),
        splits: results.len(),
        ..Default::default()
    };
    let mut first_error = None;

    for (part, result) in results {
        match result {
            Ok(outcome) => {
                report.traces += outcome.traces;
                report.outputs.extend(outcome.output);
            }
            Err(e) => {
                error!("Split {} failed: {}", part, e);
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(report),
    }
}

/// Converts SEG-Y files to Parquet part files using a pool of worker threads.
pub struct Converter<S: Storage> {
    storage: Arc<S>,
    config: JobConfig,
}

impl<S: Storage> Converter<S> {
    pub fn new(storage: S, config: JobConfig) -> Self {
        Self::with_shared_storage(Arc::new(storage), config)
    }

    pub fn with_shared_storage(storage: Arc<S>, config: JobConfig) -> Self {
        Converter { storage, config }
    }

    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    /// `input` itself when it is a file, otherwise the files in it sorted by name
    pub fn input_files(&self, input: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        self.storage.list(input.as_ref())
    }

    /// Plan every file under `input`. Any failure aborts the whole job.
    pub fn plan(&self, input: impl AsRef<Path>) -> Result<Vec<FilePlan>> {
        let files = self.input_files(input)?;
        let planner = SplitPlanner::new(self.storage.as_ref(), self.config.split.clone());
        files.iter().map(|file| planner.plan(file)).collect()
    }

    /// Plan and convert everything under `input` into `output_dir`
    pub fn run(&self, input: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Result<JobReport> {
        let plans = self.plan(input)?;
        self.execute(&plans, output_dir)
    }

    /// Convert already planned files
    pub fn execute(&self, plans: &[FilePlan], output_dir: impl AsRef<Path>) -> Result<JobReport> {
        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir)?;

        let tasks = split_tasks(plans);
        let workers = self.config.workers.clamp(1, tasks.len().max(1));
        let options = self.config.parquet_options();
        let max_attempts = self.config.max_attempts;
        info!(
            "Converting {} split(s) from {} file(s) with {} worker(s)",
            tasks.len(),
            plans.len(),
            workers
        );

        let (task_tx, task_rx) = unbounded::<SplitTask>();
        let (result_tx, result_rx) = unbounded();
        for task in tasks {
            task_tx
                .send(task)
                .map_err(|_| SegyError::Worker("task queue closed".to_string()))?;
        }
        drop(task_tx);

        let storage = self.storage.as_ref();
        thread::scope(|scope| {
            for _ in 0..workers {
                let task_rx = task_rx.clone();
                let result_tx = result_tx.clone();
                let options = &options;
                scope.spawn(move || {
                    for task in task_rx.iter() {
                        let result = run_split_task(storage, &task, output_dir, options, max_attempts);
                        if result_tx.send((task.part, result)).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        drop(result_tx);

        let report = summarize(plans, result_rx.iter().collect())?;
        info!(
            "Converted {} traces into {} part file(s)",
            report.traces,
            report.outputs.len()
        );
        Ok(report)
    }
}
