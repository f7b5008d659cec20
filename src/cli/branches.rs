//! Branch catalog listing.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::content::ContentStore;
use clap::Args;
use serde::Serialize;

/// List engineering branches
#[derive(Debug, Clone, Args)]
pub struct BranchesArgs {
    /// Only show branches whose name contains this text (case-insensitive)
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct BranchEntry<'a> {
    id: &'a str,
    name: &'a str,
    description: &'a str,
    role_count: usize,
    detailed: bool,
}

impl BranchesArgs {
    /// Execute the branches command
    pub fn execute(&self, content: &ContentStore) -> CliResult<()> {
        let query = self.search.as_deref().unwrap_or("");
        let entries: Vec<BranchEntry> = content
            .search_branches(query)
            .into_iter()
            .map(|summary| BranchEntry {
                id: &summary.id,
                name: &summary.name,
                description: &summary.description,
                role_count: summary.role_count,
                detailed: content.get_branch(&summary.id).is_some(),
            })
            .collect();

        if self.json {
            return print_json(&entries);
        }

        if entries.is_empty() {
            return Err(CliError::validation(format!(
                "No branches match '{query}'"
            )));
        }

        for entry in &entries {
            let marker = if entry.detailed { "*" } else { " " };
            println!(
                "{marker} {:<5} {:<34} {:>3} roles  {}",
                entry.id, entry.name, entry.role_count, entry.description
            );
        }
        println!();
        println!("* detailed role table available");

        Ok(())
    }
}
