// src/job/async_converter.rs
use crate::error::{SegyError, Result};
use crate::job::converter::{run_split_task, split_tasks, summarize, JobReport};
use crate::job::JobConfig;
use crate::split::{FilePlan, SplitPlanner, Storage};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Async front end of [`Converter`](crate::job::Converter).
///
/// Decoding stays on blocking threads; at most `workers` splits are in
/// flight at a time.
pub struct AsyncConverter<S: Storage + 'static> {
    storage: Arc<S>,
    config: JobConfig,
}

impl<S: Storage + 'static> AsyncConverter<S> {
    pub fn new(storage: S, config: JobConfig) -> Self {
        AsyncConverter {
            storage: Arc::new(storage),
            config,
        }
    }

    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    pub async fn plan(&self, input: impl AsRef<Path>) -> Result<Vec<FilePlan>> {
        let storage = Arc::clone(&self.storage);
        let policy = self.config.split.clone();
        let input = input.as_ref().to_path_buf();

        tokio::task::spawn_blocking(move || -> Result<Vec<FilePlan>> {
            let files = storage.list(&input)?;
            let planner = SplitPlanner::new(storage.as_ref(), policy);
            files.iter().map(|file| planner.plan(file)).collect()
        })
        .await
        .map_err(|e| SegyError::Worker(e.to_string()))?
    }

    pub async fn run(&self, input: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Result<JobReport> {
        let plans = self.plan(input).await?;
        self.execute(&plans, output_dir).await
    }

    pub async fn execute(&self, plans: &[FilePlan], output_dir: impl AsRef<Path>) -> Result<JobReport> {
        let output_dir: PathBuf = output_dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&output_dir).await?;

        let tasks = split_tasks(plans);
        let permits = Arc::new(Semaphore::new(self.config.workers.max(1)));
        let options = self.config.parquet_options();
        let max_attempts = self.config.max_attempts;
        info!("Converting {} split(s) from {} file(s)", tasks.len(), plans.len());

        let mut set = JoinSet::new();
        let mut worker_error = None;
        for task in tasks {
            let permit = match Arc::clone(&permits).acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    worker_error = Some(SegyError::Worker(e.to_string()));
                    break;
                }
            };
            let storage = Arc::clone(&self.storage);
            let output_dir = output_dir.clone();
            let options = options.clone();

            set.spawn_blocking(move || {
                let _permit = permit;
                let result = run_split_task(storage.as_ref(), &task, &output_dir, &options, max_attempts);
                (task.part, result)
            });
        }

        // every spawned task has finished before this returns
        let mut results = Vec::new();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => {
                    error!("Split task did not complete: {}", e);
                    worker_error.get_or_insert(SegyError::Worker(e.to_string()));
                }
            }
        }

        match worker_error {
            Some(e) => Err(e),
            None => summarize(plans, results),
        }
    }
}
