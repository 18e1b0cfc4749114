//! JSONL log of activation runs.
//!
//! One record per run, appended to `activate-<timestamp>-<run>.jsonl` under
//! the configured directory. Runs keep appending to the newest file until it
//! reaches `rotation_mb`, then a new file is started.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use activate_types::GroupSelection;

use crate::activator::PackageOutcome;
use crate::error::ActivationFailure;
use crate::orchestrator::ActivationReport;
use crate::paths::default_paths;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub enabled: bool,
    pub path: PathBuf,
    pub rotation_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_paths().logs_dir(),
            rotation_mb: 50,
        }
    }
}

/// Appends [`RunRecord`]s to the newest run log in the configured directory.
///
/// Successive runs, including runs from separate processes, share a file
/// until it reaches `rotation_mb`. A full file is never reopened.
#[derive(Debug)]
pub struct ActivationLogger {
    config: LogConfig,
    current: Mutex<Option<RunLogFile>>,
}

#[derive(Debug)]
struct RunLogFile {
    path: PathBuf,
    file: File,
}

impl ActivationLogger {
    pub fn new(config: LogConfig) -> Self {
        Self {
            config,
            current: Mutex::new(None),
        }
    }

    /// Path of the file currently being appended to, if any.
    pub fn current_file(&self) -> Option<PathBuf> {
        self.current.lock().as_ref().map(|log| log.path.clone())
    }

    pub fn log_run(&self, record: &RunRecord) -> Result<()> {
        if !self.config.enabled {
            return Ok(());
        }

        let mut current = self.current.lock();
        if current.as_ref().map_or(true, |log| self.is_full(&log.path)) {
            *current = Some(self.open_run_log(record)?);
        }

        if let Some(log) = current.as_mut() {
            let line = serde_json::to_string(record)?;
            writeln!(log.file, "{}", line)
                .with_context(|| format!("writing run log {}", log.path.display()))?;
        }
        Ok(())
    }

    fn open_run_log(&self, record: &RunRecord) -> Result<RunLogFile> {
        let dir = &self.config.path;
        fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory {}", dir.display()))?;

        let path = match latest_run_log(dir) {
            Some(path) if !self.is_full(&path) => path,
            _ => dir.join(format!(
                "{}{}-{}{}",
                RUN_LOG_PREFIX,
                Utc::now().format("%Y%m%d-%H%M%S"),
                record.run_id.get(..8).unwrap_or(record.run_id.as_str()),
                RUN_LOG_SUFFIX
            )),
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening run log {}", path.display()))?;
        Ok(RunLogFile { path, file })
    }

    fn is_full(&self, path: &Path) -> bool {
        fs::metadata(path)
            .map(|m| m.len() >= self.config.rotation_mb.saturating_mul(1024 * 1024))
            .unwrap_or(false)
    }
}

const RUN_LOG_PREFIX: &str = "activate-";
const RUN_LOG_SUFFIX: &str = ".jsonl";

/// Newest run log in `dir`. Names embed a sortable timestamp.
fn latest_run_log(dir: &Path) -> Option<PathBuf> {
    fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(RUN_LOG_PREFIX) && n.ends_with(RUN_LOG_SUFFIX))
        })
        .max()
}

/// Read every run recorded in `path`, oldest first.
pub fn read_runs(path: &Path) -> Result<Vec<RunRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading run log {}", path.display()))?;
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line)
                .with_context(|| format!("parsing run record in {}", path.display()))
        })
        .collect()
}

/// Per-package line of a [`RunRecord`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageRecord {
    pub name: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<String>,
}

/// One activation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub ts: String,
    pub run_id: String,
    pub groups: Vec<String>,
    pub platform: String,
    pub packages: Vec<PackageRecord>,
    pub skipped: Vec<String>,
    pub success: bool,
    pub error: Option<String>,
    pub duration_ms: u128,
}

impl RunRecord {
    pub fn from_result(
        groups: &GroupSelection,
        platform: &str,
        result: &Result<ActivationReport, ActivationFailure>,
        duration_ms: u128,
    ) -> Self {
        let (packages, skipped, error) = match result {
            Ok(report) => (
                report
                    .activated
                    .iter()
                    .map(|p| package_record(&p.name, &p.outcome))
                    .collect(),
                report.skipped.iter().map(|s| s.name.clone()).collect(),
                None,
            ),
            Err(failure) => (
                failure
                    .failures()
                    .iter()
                    .filter_map(|f| {
                        Some(PackageRecord {
                            name: f.package()?.to_string(),
                            status: "failed".to_string(),
                            paths: f.path().map(|p| vec![p.to_string()]).unwrap_or_default(),
                        })
                    })
                    .collect(),
                Vec::new(),
                Some(failure.to_string()),
            ),
        };

        Self {
            ts: Utc::now().to_rfc3339(),
            run_id: Uuid::new_v4().to_string(),
            groups: groups.iter().map(str::to_string).collect(),
            platform: platform.to_string(),
            packages,
            skipped,
            success: result.is_ok(),
            error,
            duration_ms,
        }
    }
}

fn package_record(name: &str, outcome: &PackageOutcome) -> PackageRecord {
    let (status, paths) = match outcome {
        PackageOutcome::Loaded { paths } => ("loaded", paths.clone()),
        PackageOutcome::NoDefaultModule { .. } => ("no_default_module", Vec::new()),
        PackageOutcome::Disabled => ("disabled", Vec::new()),
    };
    PackageRecord {
        name: name.to_string(),
        status: status.to_string(),
        paths,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::ActivatedPackage;
    use tempfile::TempDir;

    fn report() -> ActivationReport {
        ActivationReport {
            groups: vec!["default".to_string()],
            platform: "linux".to_string(),
            activated: vec![
                ActivatedPackage {
                    name: "two".to_string(),
                    outcome: PackageOutcome::Loaded {
                        paths: vec!["two".to_string()],
                    },
                },
                ActivatedPackage {
                    name: "four".to_string(),
                    outcome: PackageOutcome::Disabled,
                },
            ],
            skipped: Vec::new(),
        }
    }

    #[test]
    fn test_record_from_success() {
        let record =
            RunRecord::from_result(&GroupSelection::default_only(), "linux", &Ok(report()), 3);
        assert!(record.success);
        assert_eq!(record.packages[0].status, "loaded");
        assert_eq!(record.packages[0].paths, vec!["two"]);
        assert_eq!(record.packages[1].status, "disabled");
        assert!(record.error.is_none());
    }

    #[test]
    fn test_record_from_failure() {
        let failure = ActivationFailure::MissingExplicitModule {
            package: "two".to_string(),
            path: "fail".to_string(),
            message: "cannot load such file -- fail".to_string(),
        };
        let record =
            RunRecord::from_result(&GroupSelection::default_only(), "linux", &Err(failure), 1);
        assert!(!record.success);
        assert_eq!(
            record.packages,
            vec![PackageRecord {
                name: "two".to_string(),
                status: "failed".to_string(),
                paths: vec!["fail".to_string()],
            }]
        );
        assert!(record.error.unwrap().contains("cannot load such file -- fail"));
    }

    fn logger(dir: &Path, rotation_mb: u64) -> ActivationLogger {
        ActivationLogger::new(LogConfig {
            enabled: true,
            path: dir.to_path_buf(),
            rotation_mb,
        })
    }

    fn success_record() -> RunRecord {
        RunRecord::from_result(&GroupSelection::default_only(), "linux", &Ok(report()), 3)
    }

    #[test]
    fn test_logger_writes_jsonl_records() {
        let temp = TempDir::new().expect("tempdir");
        let log_dir = temp.path().join("logs");
        let logger = logger(&log_dir, 50);

        logger.log_run(&success_record()).expect("log");
        logger.log_run(&success_record()).expect("log");

        let file = logger.current_file().expect("log file");
        assert!(file.starts_with(&log_dir));
        let runs = read_runs(&file).expect("read log");
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].packages[0].status, "loaded");
        assert_ne!(runs[0].run_id, runs[1].run_id);
    }

    #[test]
    fn test_later_runs_append_to_newest_log() {
        let temp = TempDir::new().expect("tempdir");

        let first = logger(temp.path(), 50);
        first.log_run(&success_record()).expect("log");
        let second = logger(temp.path(), 50);
        second.log_run(&success_record()).expect("log");

        assert_eq!(first.current_file(), second.current_file());
        let file = second.current_file().expect("log file");
        assert_eq!(read_runs(&file).expect("read log").len(), 2);
    }

    #[test]
    fn test_full_log_starts_a_new_file() {
        let temp = TempDir::new().expect("tempdir");

        let first = logger(temp.path(), 0);
        first.log_run(&success_record()).expect("log");
        let second = logger(temp.path(), 0);
        second.log_run(&success_record()).expect("log");

        assert_ne!(first.current_file(), second.current_file());
        assert_eq!(fs::read_dir(temp.path()).expect("read dir").count(), 2);
    }

    #[test]
    fn test_disabled_logger_writes_nothing() {
        let temp = TempDir::new().expect("tempdir");
        let log_dir = temp.path().join("logs");
        let logger = ActivationLogger::new(LogConfig {
            enabled: false,
            path: log_dir.clone(),
            rotation_mb: 50,
        });

        logger.log_run(&success_record()).expect("log");
        assert!(!log_dir.exists());
        assert!(logger.current_file().is_none());
    }
}
