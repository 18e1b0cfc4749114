//! Plan command - show the activation order without loading

use anyhow::Result;
use clap::Parser;

use activate_core::ActivateConfig;

use super::output::print_plan;
use super::SelectionArgs;

#[derive(Parser, Debug)]
pub struct PlanCmd {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

impl PlanCmd {
    pub fn execute(&self, config: &ActivateConfig, json_output: bool) -> Result<()> {
        let set = self.selection.load_resolved_set()?;
        let groups = self.selection.group_selection(config);
        let plan = self.selection.orchestrator(config).plan(&set, &groups);
        print_plan(&plan, &groups, json_output)
    }
}
