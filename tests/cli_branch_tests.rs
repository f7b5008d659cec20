//! End-to-end tests for `nextstep branches` and `nextstep branch`.

mod fixtures;
use fixtures::*;

// ============================================================================
// Catalog
// ============================================================================

#[test]
fn test_branches_lists_catalog() {
    let output = run_isolated(&["branches", "--json"]);
    assert_success(&output);

    let result = stdout_json(&output);
    let entries = result.as_array().expect("Should be an array");
    assert_eq!(entries.len(), 8);
    assert_eq!(entries[0]["id"], "cse");
    assert_eq!(entries[0]["role_count"], 45);
    assert_eq!(entries[0]["detailed"], true);
    assert!(entries[1..].iter().all(|e| e["detailed"] == false));
}

#[test]
fn test_branches_search_is_case_insensitive() {
    let output = run_isolated(&["branches", "--search", "ENGINEERING", "--json"]);
    assert_success(&output);

    let result = stdout_json(&output);
    let ids: Vec<&str> = result
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids.len(), 6);
    assert!(!ids.contains(&"it"));
    assert!(!ids.contains(&"ece"));
}

#[test]
fn test_branches_search_no_match() {
    let output = run_isolated(&["branches", "-s", "astrology"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No branches match"));

    // JSON mode reports an empty list instead
    let output = run_isolated(&["branches", "-s", "astrology", "--json"]);
    assert_success(&output);
    assert_eq!(stdout_json(&output), serde_json::json!([]));
}

// ============================================================================
// Branch detail
// ============================================================================

#[test]
fn test_branch_roles_match_stats() {
    let output = run_isolated(&["branch", "cse", "--json"]);
    assert_success(&output);

    let result = stdout_json(&output);
    assert_eq!(result["resolved"], "cse");
    assert_eq!(result["fallback"], false);
    assert_eq!(result["name"], "Computer Science & Engineering");
    assert_eq!(
        result["roles"].as_array().unwrap().len() as u64,
        result["stats"]["total_roles"].as_u64().unwrap()
    );
}

#[test]
fn test_branch_unknown_falls_back_to_default() {
    let output = run_isolated(&["branch", "xyz", "--json"]);
    assert_success(&output);

    let result = stdout_json(&output);
    assert_eq!(result["requested"], "xyz");
    assert_eq!(result["resolved"], "cse");
    assert_eq!(result["fallback"], true);
}

#[test]
fn test_branch_catalog_entry_without_details_falls_back() {
    let output = run_isolated(&["branch", "me"]);
    assert_success(&output);
    assert!(String::from_utf8_lossy(&output.stderr).contains("no branch 'me'"));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Computer Science & Engineering"));
}

#[test]
fn test_branch_level_filter() {
    let output = run_isolated(&["branch", "cse", "--level", "advanced", "--json"]);
    assert_success(&output);

    let result = stdout_json(&output);
    assert_eq!(result["filter"], "advanced");
    let roles = result["roles"].as_array().unwrap();
    assert!(!roles.is_empty());
    assert!(roles.iter().all(|r| r["level"] == "Advanced"));
}

#[test]
fn test_branch_skill_filter() {
    let output = run_isolated(&["branch", "-l", "beginner", "-s", "react", "--json"]);
    assert_success(&output);

    let result = stdout_json(&output);
    let titles: Vec<&str> = result["roles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Frontend Developer"]);
}

#[test]
fn test_branch_invalid_level() {
    let output = run_isolated(&["branch", "cse", "--level", "expert"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("expert"));
}
