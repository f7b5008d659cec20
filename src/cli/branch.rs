//! Branch detail command: roles of one branch with level and skill filters.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::content::{Branch, BranchRole, BranchStats, ContentStore, LevelFilter};
use clap::Args;
use serde::Serialize;

/// Show the roles of a branch
#[derive(Debug, Clone, Args)]
pub struct BranchArgs {
    /// Branch key (e.g., "cse"). Unknown or missing keys show the default branch
    #[arg(value_name = "ID")]
    pub id: Option<String>,

    /// Role level filter: all, beginner, intermediate, advanced
    #[arg(short, long, value_name = "LEVEL", default_value = "all")]
    pub level: String,

    /// Only roles listing this skill (case-insensitive)
    #[arg(short, long, value_name = "SKILL")]
    pub skill: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct BranchOutput<'a> {
    requested: Option<&'a str>,
    resolved: &'a str,
    fallback: bool,
    name: &'a str,
    stats: &'a BranchStats,
    filter: String,
    roles: Vec<&'a BranchRole>,
}

impl BranchArgs {
    /// Execute the branch command
    pub fn execute(&self, content: &ContentStore) -> CliResult<()> {
        let filter: LevelFilter = self
            .level
            .parse()
            .map_err(|e: anyhow::Error| CliError::validation(e.to_string()))?;

        let requested = self.id.as_deref();
        let branch = content.resolve_branch(requested);
        let fallback = requested.is_some_and(|id| id != branch.id);

        let roles = select_roles(branch, filter, self.skill.as_deref());

        if self.json {
            return print_json(&BranchOutput {
                requested,
                resolved: &branch.id,
                fallback,
                name: &branch.name,
                stats: &branch.stats,
                filter: filter.to_string(),
                roles,
            });
        }

        if fallback {
            eprintln!(
                "Note: no branch '{}', showing '{}'",
                requested.unwrap_or_default(),
                branch.id
            );
        }

        println!("{}", branch.name);
        println!("{}", "=".repeat(branch.name.len()));
        println!(
            "Roles: {}   Avg salary: {}   Job growth: {}",
            branch.stats.total_roles, branch.stats.avg_salary, branch.stats.job_growth
        );
        println!("Filter: {filter}");
        println!();

        for role in &roles {
            println!(
                "{:>3}. {:<32} {:<12} {:<14} {}",
                role.id, role.title, role.level, role.avg_salary, role.time_to_learn
            );
        }
        println!();
        println!("{} of {} roles shown", roles.len(), branch.roles.len());

        Ok(())
    }
}

/// Applies the level filter, then the optional skill filter.
fn select_roles<'a>(
    branch: &'a Branch,
    filter: LevelFilter,
    skill: Option<&str>,
) -> Vec<&'a BranchRole> {
    branch
        .roles_at(filter)
        .into_iter()
        .filter(|role| skill.map_or(true, |s| role.has_skill(s)))
        .collect()
}
