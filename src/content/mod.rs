//! Static career content and the key-based resolver.
//!
//! The branch and roadmap tables are embedded in the binary at compile time
//! and validated once when the store is built. After that every lookup is
//! infallible: unknown keys resolve to a designated fallback record.

pub mod model;
pub mod validate;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

pub use model::{
    Branch, BranchRole, BranchStats, BranchSummary, Level, LevelFilter, Resource, Roadmap,
    RoadmapItem, RoadmapStep,
};

/// Key of the roadmap returned for unknown or missing role keys.
pub const DEFAULT_ROADMAP_KEY: &str = "default";

/// File names used when tables are loaded from a directory.
pub const ROADMAPS_FILE: &str = "roadmaps.json";
/// See [`ROADMAPS_FILE`].
pub const BRANCHES_FILE: &str = "branches.json";

/// Schema of roadmaps.json.
#[derive(Debug, Deserialize)]
struct RoadmapDocument {
    #[allow(dead_code)]
    version: String,
    roadmaps: HashMap<String, Roadmap>,
}

/// Schema of branches.json.
#[derive(Debug, Deserialize)]
struct BranchDocument {
    #[allow(dead_code)]
    version: String,
    default_branch: String,
    catalog: Vec<BranchSummary>,
    branches: Vec<Branch>,
}

/// Immutable content tables with fallback resolution.
#[derive(Debug, Clone)]
pub struct ContentStore {
    /// Roadmaps sorted by key
    roadmaps: Vec<(String, Roadmap)>,
    /// Roadmap key -> index into `roadmaps`
    roadmap_lookup: HashMap<String, usize>,
    /// Index of the "default" roadmap
    default_roadmap: usize,
    /// Detailed branches in authored order
    branches: Vec<Branch>,
    /// Branch id -> index into `branches`
    branch_lookup: HashMap<String, usize>,
    /// Index of the designated default branch
    default_branch: usize,
    /// Branch index page entries
    catalog: Vec<BranchSummary>,
}

impl ContentStore {
    /// Loads the tables embedded in the binary.
    pub fn load() -> Result<Self> {
        Self::from_json(
            include_str!("roadmaps.json"),
            include_str!("branches.json"),
        )
        .context("Failed to load embedded content tables")
    }

    /// Loads `roadmaps.json` and `branches.json` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let roadmaps_path = dir.join(ROADMAPS_FILE);
        let branches_path = dir.join(BRANCHES_FILE);

        let roadmaps = fs::read_to_string(&roadmaps_path).context(format!(
            "Failed to read roadmap table: {}",
            roadmaps_path.display()
        ))?;
        let branches = fs::read_to_string(&branches_path).context(format!(
            "Failed to read branch table: {}",
            branches_path.display()
        ))?;

        Self::from_json(&roadmaps, &branches)
            .context(format!("Invalid content tables in {}", dir.display()))
    }

    /// Parses and validates both tables.
    pub fn from_json(roadmaps_json: &str, branches_json: &str) -> Result<Self> {
        let roadmap_doc: RoadmapDocument =
            serde_json::from_str(roadmaps_json).context("Failed to parse roadmap table")?;
        let branch_doc: BranchDocument =
            serde_json::from_str(branches_json).context("Failed to parse branch table")?;

        validate::validate_roadmaps(&roadmap_doc.roadmaps)?;
        validate::validate_branches(
            &branch_doc.branches,
            &branch_doc.catalog,
            &branch_doc.default_branch,
        )?;

        let mut roadmaps: Vec<(String, Roadmap)> = roadmap_doc.roadmaps.into_iter().collect();
        roadmaps.sort_by(|a, b| a.0.cmp(&b.0));

        let roadmap_lookup: HashMap<String, usize> = roadmaps
            .iter()
            .enumerate()
            .map(|(idx, (key, _))| (key.clone(), idx))
            .collect();
        let default_roadmap = *roadmap_lookup
            .get(DEFAULT_ROADMAP_KEY)
            .context("Roadmap table has no default entry")?;

        let branch_lookup: HashMap<String, usize> = branch_doc
            .branches
            .iter()
            .enumerate()
            .map(|(idx, branch)| (branch.id.clone(), idx))
            .collect();
        let default_branch = *branch_lookup
            .get(branch_doc.default_branch.as_str())
            .context("Default branch is not in the branch table")?;

        debug!(
            roadmaps = roadmaps.len(),
            branches = branch_doc.branches.len(),
            "Content tables loaded"
        );

        Ok(Self {
            roadmaps,
            roadmap_lookup,
            default_roadmap,
            branches: branch_doc.branches,
            branch_lookup,
            default_branch,
            catalog: branch_doc.catalog,
        })
    }

    /// Resolves a role key to its roadmap.
    ///
    /// A missing key is treated as `"default"`; an unknown key returns the
    /// `"default"` roadmap.
    ///
    /// # Examples
    ///
    /// ```
    /// use nextstep::content::ContentStore;
    ///
    /// let store = ContentStore::load().unwrap();
    /// assert_eq!(store.resolve_roadmap(Some("1")).role, "Full Stack Developer");
    /// assert_eq!(store.resolve_roadmap(Some("999")), store.resolve_roadmap(None));
    /// ```
    #[must_use]
    pub fn resolve_roadmap(&self, key: Option<&str>) -> &Roadmap {
        let key = key.unwrap_or(DEFAULT_ROADMAP_KEY);
        match self.get_roadmap(key) {
            Some(roadmap) => roadmap,
            None => {
                debug!(key, "Unknown role key, using default roadmap");
                &self.roadmaps[self.default_roadmap].1
            }
        }
    }

    /// Strict roadmap lookup.
    #[must_use]
    pub fn get_roadmap(&self, key: &str) -> Option<&Roadmap> {
        let idx = self.roadmap_lookup.get(key)?;
        self.roadmaps.get(*idx).map(|(_, roadmap)| roadmap)
    }

    /// Roadmap for a role listed under a branch.
    #[must_use]
    pub fn roadmap_for_role(&self, role: &BranchRole) -> &Roadmap {
        self.resolve_roadmap(Some(role.roadmap_key().as_str()))
    }

    /// Resolves a branch key to its detailed branch.
    ///
    /// Missing and unknown keys return the designated default branch.
    #[must_use]
    pub fn resolve_branch(&self, key: Option<&str>) -> &Branch {
        if let Some(branch) = key.and_then(|k| self.get_branch(k)) {
            return branch;
        }
        debug!(?key, "Unknown branch key, using default branch");
        &self.branches[self.default_branch]
    }

    /// Strict branch lookup.
    #[must_use]
    pub fn get_branch(&self, key: &str) -> Option<&Branch> {
        let idx = self.branch_lookup.get(key)?;
        self.branches.get(*idx)
    }

    /// Key of the designated default branch.
    #[must_use]
    pub fn default_branch_id(&self) -> &str {
        &self.branches[self.default_branch].id
    }

    /// All branch index entries in authored order.
    #[must_use]
    pub fn catalog(&self) -> &[BranchSummary] {
        &self.catalog
    }

    /// Catalog entries whose name contains `query`, ignoring case.
    ///
    /// An empty query returns the whole catalog.
    #[must_use]
    pub fn search_branches(&self, query: &str) -> Vec<&BranchSummary> {
        let query_lower = query.trim().to_lowercase();
        self.catalog
            .iter()
            .filter(|entry| entry.name.to_lowercase().contains(&query_lower))
            .collect()
    }

    /// Roadmap keys in sorted order.
    pub fn roadmap_keys(&self) -> impl Iterator<Item = &str> {
        self.roadmaps.iter().map(|(key, _)| key.as_str())
    }

    /// Number of roadmaps, including the default.
    #[must_use]
    pub fn roadmap_count(&self) -> usize {
        self.roadmaps.len()
    }
}
