//! Roadmap command: a role's learning path with step progress.

use crate::cli::common::{print_json, CliResult};
use crate::content::{ContentStore, Roadmap, DEFAULT_ROADMAP_KEY};
use crate::progress::ProgressTracker;
use clap::Args;
use serde::Serialize;

/// Show the learning roadmap for a role
#[derive(Debug, Clone, Args)]
pub struct RoadmapArgs {
    /// Role key (e.g., "1"). Unknown or missing keys show the default roadmap
    #[arg(value_name = "ROLE")]
    pub role: Option<String>,

    /// Completed step indices, comma separated (e.g., "0,2")
    #[arg(short, long, value_name = "STEPS", value_delimiter = ',')]
    pub completed: Vec<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct RoadmapOutput<'a> {
    requested: Option<&'a str>,
    fallback: bool,
    progress: u8,
    completed: Vec<usize>,
    roadmap: &'a Roadmap,
}

impl RoadmapArgs {
    /// Execute the roadmap command
    pub fn execute(&self, content: &ContentStore) -> CliResult<()> {
        let requested = self.role.as_deref();
        let roadmap = content.resolve_roadmap(requested);
        let fallback = content
            .get_roadmap(requested.unwrap_or(DEFAULT_ROADMAP_KEY))
            .is_none();

        let mut tracker = ProgressTracker::new(roadmap.step_count());
        for &index in &self.completed {
            if index >= roadmap.step_count() {
                eprintln!(
                    "Note: ignoring step {index}, roadmap has {} steps",
                    roadmap.step_count()
                );
                continue;
            }
            if !tracker.is_completed(index) {
                tracker.toggle_step(index);
            }
        }

        if self.json {
            return print_json(&RoadmapOutput {
                requested,
                fallback,
                progress: tracker.percentage(),
                completed: tracker.completed().iter().copied().collect(),
                roadmap,
            });
        }

        if fallback {
            eprintln!(
                "Note: no roadmap for role '{}', showing the general roadmap",
                requested.unwrap_or_default()
            );
        }

        print_roadmap(roadmap, &tracker);
        Ok(())
    }
}

/// Renders a roadmap as plain text.
fn print_roadmap(roadmap: &Roadmap, tracker: &ProgressTracker) {
    println!("{}", roadmap.role);
    println!("{}", "=".repeat(roadmap.role.len()));
    println!("{}", roadmap.description);
    println!(
        "Duration: {}   Difficulty: {}",
        roadmap.duration, roadmap.difficulty
    );
    println!(
        "Progress: {}% ({}/{} steps)",
        tracker.percentage(),
        tracker.completed_count(),
        tracker.total_steps()
    );
    println!();

    for (index, step) in roadmap.steps.iter().enumerate() {
        let mark = if tracker.is_completed(index) { "x" } else { " " };
        println!("[{mark}] {}  ({})", step.title, step.duration);
        for item in &step.items {
            println!("    - {}", item.name);
            for resource in &item.resources {
                println!("        {}: {}", resource.title, resource.url);
            }
        }
    }

    if !roadmap.projects.is_empty() {
        println!();
        println!("Projects:");
        for project in &roadmap.projects {
            println!("  - {project}");
        }
    }

    if !roadmap.certifications.is_empty() {
        println!();
        println!("Certifications:");
        for cert in &roadmap.certifications {
            println!("  - {cert}");
        }
    }
}
