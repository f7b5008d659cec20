//! Properties of the built-in content tables, checked through the public API.

use nextstep::content::{ContentStore, Level, LevelFilter, DEFAULT_ROADMAP_KEY};
use nextstep::progress::{compute_progress, ProgressTracker};
use std::collections::{BTreeSet, HashSet};

fn store() -> ContentStore {
    ContentStore::load().expect("built-in tables should load")
}

#[test]
fn test_every_lookup_resolves() {
    let content = store();
    let default_role = content.resolve_roadmap(None).role.clone();

    for key in ["", "0", "-1", "default", "1 ", "🚀", "9999999999999"] {
        let roadmap = content.resolve_roadmap(Some(key));
        if content.get_roadmap(key).is_none() {
            assert_eq!(roadmap.role, default_role, "key {key:?}");
        }
    }

    for key in ["", "CSE", "mech", "ae"] {
        assert_eq!(content.resolve_branch(Some(key)).id, content.default_branch_id());
    }
}

#[test]
fn test_default_roadmap_key_present() {
    let content = store();
    assert!(content.roadmap_keys().any(|key| key == DEFAULT_ROADMAP_KEY));
    assert_eq!(content.roadmap_count(), 4);
}

#[test]
fn test_roadmaps_are_well_formed() {
    let content = store();
    for key in content.roadmap_keys() {
        let roadmap = content.get_roadmap(key).unwrap();
        assert!(!roadmap.role.is_empty());
        assert!(roadmap.step_count() > 0, "{key} has no steps");
        for step in &roadmap.steps {
            for item in &step.items {
                for resource in &item.resources {
                    assert!(
                        resource.url.starts_with("https://"),
                        "{key}: {}",
                        resource.url
                    );
                }
            }
        }
    }
}

#[test]
fn test_role_ids_unique_and_counted() {
    let content = store();
    let branch = content.resolve_branch(None);

    let ids: HashSet<u32> = branch.roles.iter().map(|r| r.id).collect();
    assert_eq!(ids.len(), branch.roles.len());
    assert_eq!(branch.roles.len(), branch.stats.total_roles);

    let by_level: usize = Level::ALL
        .iter()
        .map(|&level| branch.roles_at(LevelFilter::Only(level)).len())
        .sum();
    assert_eq!(by_level, branch.roles.len());
}

#[test]
fn test_role_roadmaps_fall_back_for_missing_keys() {
    let content = store();
    let branch = content.resolve_branch(None);

    let frontend = branch.role(8).unwrap();
    assert_eq!(content.roadmap_for_role(frontend).role, "Frontend Developer");

    let ai = branch.role(3).unwrap();
    assert_eq!(
        content.roadmap_for_role(ai).role,
        content.resolve_roadmap(None).role
    );
}

#[test]
fn test_catalog_matches_detailed_branches() {
    let content = store();
    for summary in content.catalog() {
        if let Some(branch) = content.get_branch(&summary.id) {
            assert_eq!(branch.stats.total_roles, summary.role_count);
            assert_eq!(branch.name, summary.name);
        }
    }
}

#[test]
fn test_progress_over_real_roadmap() {
    let content = store();
    let roadmap = content.get_roadmap("1").unwrap();

    let mut tracker = ProgressTracker::new(roadmap.step_count());
    for index in 0..roadmap.step_count() {
        tracker.toggle_step(index);
    }
    assert_eq!(tracker.percentage(), 100);
    assert_eq!(
        compute_progress(roadmap.step_count(), &BTreeSet::from([0, 1])),
        40
    );
}
