//! Record types for the roadmap and branch tables.
//!
//! These mirror the embedded JSON documents one-to-one. Ordering of every
//! sequence is the authored order and is significant for display and for
//! step numbering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Experience level of a role, also used as a roadmap's difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    /// Entry level
    Beginner,
    /// Some prior experience expected
    Intermediate,
    /// Specialist or senior track
    Advanced,
}

impl Level {
    /// All levels in ascending order.
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    /// Display label as authored in the tables.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() so column widths in table output apply
        f.pad(self.label())
    }
}

impl FromStr for Level {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => anyhow::bail!(
                "Unknown level '{other}'. Expected beginner, intermediate or advanced"
            ),
        }
    }
}

/// Role filter used by the branch detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelFilter {
    /// Every role
    #[default]
    All,
    /// Only roles at the given level
    Only(Level),
}

impl LevelFilter {
    /// Filters in the order the branch page cycles through them.
    pub const CYCLE: [Self; 4] = [
        Self::All,
        Self::Only(Level::Beginner),
        Self::Only(Level::Intermediate),
        Self::Only(Level::Advanced),
    ];

    /// Returns true if a role at `level` passes this filter.
    #[must_use]
    pub fn matches(self, level: Level) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == level,
        }
    }

    /// Next filter in [`Self::CYCLE`], wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::CYCLE.iter().position(|f| *f == self).unwrap_or(0);
        Self::CYCLE[(idx + 1) % Self::CYCLE.len()]
    }
}

impl fmt::Display for LevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(level) => f.write_str(&level.label().to_lowercase()),
        }
    }
}

impl FromStr for LevelFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<Level>().map(Self::Only)
    }
}

/// External learning resource linked from a roadmap item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Link text
    pub title: String,
    /// Absolute http(s) URL
    pub url: String,
}

/// A named topic inside a roadmap step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapItem {
    /// Topic name (e.g., "Git & GitHub")
    pub name: String,
    /// Resources in authored order
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// One stage of a roadmap. Its position in [`Roadmap::steps`] is the index
/// used for progress tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapStep {
    /// Numbered title (e.g., "1. Master the Fundamentals")
    pub title: String,
    /// Free-text duration label (e.g., "2-3 months")
    pub duration: String,
    /// Topics in authored order
    pub items: Vec<RoadmapItem>,
}

/// Learning roadmap for a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roadmap {
    /// Role name (e.g., "Full Stack Developer")
    pub role: String,
    /// One-line summary
    pub description: String,
    /// Total duration label (e.g., "6-12 months")
    pub duration: String,
    /// Overall difficulty
    pub difficulty: Level,
    /// Ordered steps
    pub steps: Vec<RoadmapStep>,
    /// Suggested portfolio projects
    #[serde(default)]
    pub projects: Vec<String>,
    /// Suggested certifications
    #[serde(default)]
    pub certifications: Vec<String>,
}

impl Roadmap {
    /// Number of steps, the denominator for progress.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Total number of resources across all steps.
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.steps
            .iter()
            .flat_map(|step| &step.items)
            .map(|item| item.resources.len())
            .sum()
    }
}

/// A career role listed under a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRole {
    /// Numeric id, also the role's roadmap key
    pub id: u32,
    /// Role title
    pub title: String,
    /// Experience level
    pub level: Level,
    /// One-line summary
    pub description: String,
    /// Salary range label (e.g., "$85k - $130k")
    pub avg_salary: String,
    /// Market demand label (e.g., "Very High")
    pub demand: String,
    /// Key skills, display order as authored
    pub skills: Vec<String>,
    /// Learning time label
    pub time_to_learn: String,
    /// Opaque display token
    pub color: String,
}

impl BranchRole {
    /// Key of this role's entry in the roadmap table.
    #[must_use]
    pub fn roadmap_key(&self) -> String {
        self.id.to_string()
    }

    /// Case-insensitive skill membership.
    #[must_use]
    pub fn has_skill(&self, skill: &str) -> bool {
        let wanted = skill.trim();
        self.skills.iter().any(|s| s.eq_ignore_ascii_case(wanted))
    }
}

/// Headline figures for a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchStats {
    /// Salary range label
    pub avg_salary: String,
    /// Job growth label (e.g., "22%")
    pub job_growth: String,
    /// Declared role count; must equal the length of the role table
    pub total_roles: usize,
}

/// An engineering discipline with its detailed role table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Branch key (e.g., "cse")
    pub id: String,
    /// Display name
    pub name: String,
    /// Headline figures
    pub stats: BranchStats,
    /// Roles in authored order
    pub roles: Vec<BranchRole>,
}

impl Branch {
    /// Roles passing the level filter, in table order.
    #[must_use]
    pub fn roles_at(&self, filter: LevelFilter) -> Vec<&BranchRole> {
        self.roles.iter().filter(|r| filter.matches(r.level)).collect()
    }

    /// Roles listing the given skill, in table order.
    #[must_use]
    pub fn roles_with_skill(&self, skill: &str) -> Vec<&BranchRole> {
        self.roles.iter().filter(|r| r.has_skill(skill)).collect()
    }

    /// Looks up a role by id.
    #[must_use]
    pub fn role(&self, id: u32) -> Option<&BranchRole> {
        self.roles.iter().find(|r| r.id == id)
    }
}

/// Entry on the branch index page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchSummary {
    /// Branch key
    pub id: String,
    /// Display name
    pub name: String,
    /// Focus areas
    pub description: String,
    /// Advertised number of roles
    pub role_count: usize,
}
