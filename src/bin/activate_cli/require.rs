//! Require command - activate the selected packages

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::warn;

use activate_core::{
    ActivateConfig, ActivationContext, ActivationLogger, FailureMode, LogConfig, ModuleRuntime,
    RunRecord,
};

use super::output::{print_failure, print_report};
use super::SelectionArgs;

#[derive(Parser, Debug)]
pub struct RequireCmd {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Load-path directory searched for module files. Repeatable, searched in order.
    #[arg(long = "load-path", short = 'I', value_name = "DIR")]
    pub load_paths: Vec<PathBuf>,

    /// Keep activating after a failure and report every failing package
    #[arg(long)]
    pub collect_failures: bool,

    /// Directory for the JSONL run log
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Do not write the run log
    #[arg(long)]
    pub no_log: bool,
}

impl RequireCmd {
    pub fn execute(&self, config: &ActivateConfig, json_output: bool, verbose: bool) -> Result<()> {
        let set = self.selection.load_resolved_set()?;
        let groups = self.selection.group_selection(config);
        let mode = if self.collect_failures {
            FailureMode::Collect
        } else {
            FailureMode::FailFast
        };
        let orchestrator = self.selection.orchestrator(config).with_failure_mode(mode);

        let mut runtime = ModuleRuntime::new(config.search_path(self.load_paths.clone()));
        let started = Instant::now();
        let result = orchestrator.activate(&set, &groups, &mut runtime);
        let elapsed = started.elapsed().as_millis();

        let log_config = LogConfig {
            enabled: config.log_enabled && !self.no_log,
            path: self
                .log_dir
                .clone()
                .unwrap_or_else(|| config.log_config().path),
            ..config.log_config()
        };
        let record = RunRecord::from_result(&groups, orchestrator.platform(), &result, elapsed);
        if let Err(e) = ActivationLogger::new(log_config).log_run(&record) {
            warn!(error = %e, "failed to write activation log");
        }

        match result {
            Ok(report) => {
                print_report(&report, runtime.transcript(), json_output, verbose)?;
                Ok(())
            }
            Err(failure) => {
                let plan = orchestrator.plan(&set, &groups);
                let contexts: Vec<ActivationContext> =
                    ActivationContext::for_failure(&plan, &failure)
                        .into_iter()
                        .map(|ctx| ctx.with_groups(groups.iter()))
                        .collect();
                print_failure(&failure, &contexts, runtime.transcript(), json_output)?;
                Err(failure.into())
            }
        }
    }
}
