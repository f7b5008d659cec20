//! Load-time validation of the content tables.
//!
//! Malformed entries are rejected when the store is built so that the
//! resolver can stay infallible afterwards.

use anyhow::{bail, Result};
use regex::Regex;
use std::collections::{HashMap, HashSet};

use super::model::{Branch, BranchSummary, Roadmap};
use super::DEFAULT_ROADMAP_KEY;

/// Checks every roadmap and the presence of the fallback entry.
pub fn validate_roadmaps(roadmaps: &HashMap<String, Roadmap>) -> Result<()> {
    if !roadmaps.contains_key(DEFAULT_ROADMAP_KEY) {
        bail!("Roadmap table has no '{DEFAULT_ROADMAP_KEY}' entry");
    }

    let url_pattern = Regex::new(r"^https?://\S+$")?;

    for (key, roadmap) in roadmaps {
        if roadmap.role.trim().is_empty() {
            bail!("Roadmap '{key}' has an empty role name");
        }
        if roadmap.steps.is_empty() {
            bail!("Roadmap '{key}' has no steps");
        }
        for (step_idx, step) in roadmap.steps.iter().enumerate() {
            if step.title.trim().is_empty() {
                bail!("Roadmap '{key}' step {step_idx} has an empty title");
            }
            for item in &step.items {
                for resource in &item.resources {
                    if !url_pattern.is_match(&resource.url) {
                        bail!(
                            "Roadmap '{key}' item '{}' has an invalid resource URL: {}",
                            item.name,
                            resource.url
                        );
                    }
                }
            }
        }
    }

    Ok(())
}

/// Checks detailed branches, the catalog, and the designated default branch.
pub fn validate_branches(
    branches: &[Branch],
    catalog: &[BranchSummary],
    default_branch: &str,
) -> Result<()> {
    let mut seen_branches = HashSet::new();
    for branch in branches {
        if !seen_branches.insert(branch.id.as_str()) {
            bail!("Branch '{}' is defined more than once", branch.id);
        }

        if branch.roles.len() != branch.stats.total_roles {
            bail!(
                "Branch '{}' declares {} roles but lists {}",
                branch.id,
                branch.stats.total_roles,
                branch.roles.len()
            );
        }

        let mut seen_roles = HashSet::new();
        for role in &branch.roles {
            if !seen_roles.insert(role.id) {
                bail!("Branch '{}' has duplicate role id {}", branch.id, role.id);
            }
            if role.title.trim().is_empty() {
                bail!("Branch '{}' role {} has an empty title", branch.id, role.id);
            }
        }
    }

    if !seen_branches.contains(default_branch) {
        bail!("Default branch '{default_branch}' has no detailed entry");
    }

    let mut seen_catalog = HashSet::new();
    for entry in catalog {
        if !seen_catalog.insert(entry.id.as_str()) {
            bail!("Catalog lists branch '{}' more than once", entry.id);
        }
        if let Some(branch) = branches.iter().find(|b| b.id == entry.id) {
            if branch.stats.total_roles != entry.role_count {
                bail!(
                    "Catalog advertises {} roles for '{}' but the branch declares {}",
                    entry.role_count,
                    entry.id,
                    branch.stats.total_roles
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::model::{
        BranchRole, BranchStats, Level, Resource, RoadmapItem, RoadmapStep,
    };

    fn roadmap(url: &str) -> Roadmap {
        Roadmap {
            role: "Tech Professional".to_string(),
            description: String::new(),
            duration: "6-12 months".to_string(),
            difficulty: Level::Intermediate,
            steps: vec![RoadmapStep {
                title: "1. Foundation Building".to_string(),
                duration: "2-3 months".to_string(),
                items: vec![RoadmapItem {
                    name: "Core Concepts".to_string(),
                    resources: vec![Resource {
                        title: "Course".to_string(),
                        url: url.to_string(),
                    }],
                }],
            }],
            projects: vec![],
            certifications: vec![],
        }
    }

    fn branch(id: &str, declared: usize, role_ids: &[u32]) -> Branch {
        Branch {
            id: id.to_string(),
            name: id.to_uppercase(),
            stats: BranchStats {
                avg_salary: String::new(),
                job_growth: String::new(),
                total_roles: declared,
            },
            roles: role_ids
                .iter()
                .map(|&id| BranchRole {
                    id,
                    title: format!("Role {id}"),
                    level: Level::Beginner,
                    description: String::new(),
                    avg_salary: String::new(),
                    demand: String::new(),
                    skills: vec![],
                    time_to_learn: String::new(),
                    color: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_missing_default_roadmap_rejected() {
        let mut table = HashMap::new();
        table.insert("1".to_string(), roadmap("https://example.com"));
        let err = validate_roadmaps(&table).unwrap_err();
        assert!(err.to_string().contains("'default'"));
    }

    #[test]
    fn test_bad_resource_url_rejected() {
        let mut table = HashMap::new();
        table.insert("default".to_string(), roadmap("ftp://example.com"));
        assert!(validate_roadmaps(&table).is_err());
    }

    #[test]
    fn test_roadmap_without_steps_rejected() {
        let mut empty = roadmap("https://example.com");
        empty.steps.clear();
        let mut table = HashMap::new();
        table.insert("default".to_string(), roadmap("https://example.com"));
        table.insert("7".to_string(), empty);
        let err = validate_roadmaps(&table).unwrap_err();
        assert!(err.to_string().contains("'7'"));
    }

    #[test]
    fn test_role_count_mismatch_rejected() {
        let branches = vec![branch("cse", 3, &[1, 2])];
        assert!(validate_branches(&branches, &[], "cse").is_err());
    }

    #[test]
    fn test_duplicate_role_ids_rejected() {
        let branches = vec![branch("cse", 2, &[1, 1])];
        let err = validate_branches(&branches, &[], "cse").unwrap_err();
        assert!(err.to_string().contains("duplicate role id 1"));
    }

    #[test]
    fn test_unknown_default_branch_rejected() {
        let branches = vec![branch("cse", 1, &[1])];
        assert!(validate_branches(&branches, &[], "it").is_err());
    }

    #[test]
    fn test_catalog_count_must_agree_with_detail() {
        let branches = vec![branch("cse", 1, &[1])];
        let catalog = vec![BranchSummary {
            id: "cse".to_string(),
            name: "CSE".to_string(),
            description: String::new(),
            role_count: 45,
        }];
        assert!(validate_branches(&branches, &catalog, "cse").is_err());
    }

    #[test]
    fn test_catalog_only_branches_allowed() {
        let branches = vec![branch("cse", 1, &[1])];
        let catalog = vec![BranchSummary {
            id: "it".to_string(),
            name: "IT".to_string(),
            description: String::new(),
            role_count: 38,
        }];
        assert!(validate_branches(&branches, &catalog, "cse").is_ok());
    }
}
