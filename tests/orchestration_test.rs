use git_autotag::boundary::BoundaryWarning;
use git_autotag::cli::{run_release, ReleaseRequest};
use git_autotag::config::Config;
use git_autotag::domain::{BumpLevel, Tag};
use git_autotag::git::MockRepository;
use git_autotag::issues::{NoIssueTracker, StaticIssueLabels};
use git_autotag::AutotagError;
use std::collections::BTreeMap;

/// main: a1 (tagged v1.2.3) <- b2 <- c3 ..., one commit per message
fn repo_after_release(messages: &[&str]) -> MockRepository {
    let mut repo = MockRepository::new();
    repo.add_commit("a1", "chore: release 1.2.3");
    repo.add_tag("v1.2.3", "a1");

    let mut tip = "a1".to_string();
    for (i, message) in messages.iter().enumerate() {
        tip = format!("c{}", i);
        repo.add_commit(tip.clone(), *message);
    }
    repo.set_branch_head("main", tip.clone());
    repo.set_branch_head("feature-x", tip);
    repo
}

fn request(branch: &str) -> ReleaseRequest {
    ReleaseRequest::from_config(&Config::default(), branch, false).unwrap()
}

fn request_with(config: Config, branch: &str) -> ReleaseRequest {
    ReleaseRequest::from_config(&config, branch, false).unwrap()
}

#[test]
fn test_feat_wins_over_fix_on_release_branch() {
    let repo = repo_after_release(&["fix: y", "feat: add x"]);
    let mut req = request("main");
    req.with_v = true;

    let outcome = run_release(&repo, &NoIssueTracker, &req).unwrap();

    assert_eq!(outcome.bump, BumpLevel::Minor);
    assert_eq!(outcome.tag, "v1.2.3");
    assert_eq!(outcome.version, "1.2.3");
    assert_eq!(outcome.new_version, "1.3.0");
    assert_eq!(outcome.new_tag, "v1.3.0");
    assert!(outcome.created);
    assert_eq!(repo.created_tags(), vec![Tag::new("v1.3.0", "c1")]);
}

#[test]
fn test_breaking_change_bumps_major() {
    let repo = repo_after_release(&["chore: cleanup", "BREAKING CHANGE: drop api"]);

    let outcome = run_release(&repo, &NoIssueTracker, &request("main")).unwrap();

    assert_eq!(outcome.bump, BumpLevel::Major);
    assert_eq!(outcome.new_version, "2.0.0");
    assert_eq!(outcome.new_tag, "2.0.0");
}

#[test]
fn test_default_bump_when_commits_ask_nothing() {
    let repo = repo_after_release(&["update readme"]);

    let outcome = run_release(&repo, &NoIssueTracker, &request("main")).unwrap();
    assert_eq!(outcome.bump, BumpLevel::None);
    assert_eq!(outcome.new_version, "1.3.0");

    let patch_default = Config {
        bump: BumpLevel::Patch,
        ..Config::default()
    };
    let repo = repo_after_release(&["update readme"]);
    let outcome = run_release(&repo, &NoIssueTracker, &request_with(patch_default, "main")).unwrap();
    assert_eq!(outcome.new_version, "1.2.4");
}

#[test]
fn test_commit_level_beats_default() {
    let config = Config {
        bump: BumpLevel::Major,
        ..Config::default()
    };
    let repo = repo_after_release(&["fix: typo"]);

    let outcome = run_release(&repo, &NoIssueTracker, &request_with(config, "main")).unwrap();
    assert_eq!(outcome.new_version, "1.2.4");
}

#[test]
fn test_non_release_branch_gets_prerelease() {
    let repo = repo_after_release(&["BREAKING CHANGE: everything"]);
    let mut req = request("feature-x");
    req.dry_run = true;

    let outcome = run_release(&repo, &NoIssueTracker, &req).unwrap();

    assert_eq!(outcome.new_version, "1.2.4-feature-x.0");
    assert_eq!(outcome.new_tag, "1.2.4-feature-x.0");
    assert!(!outcome.created);
    assert!(repo.created_tags().is_empty());
}

#[test]
fn test_prerelease_series_continues() {
    let mut repo = repo_after_release(&["feat: one", "feat: two"]);
    repo.add_tag("v1.2.4-feature-x.0", "c0");

    let outcome = run_release(&repo, &NoIssueTracker, &request("feature-x")).unwrap();

    assert_eq!(outcome.tag, "v1.2.4-feature-x.0");
    assert_eq!(outcome.version, "1.2.4-feature-x.0");
    assert_eq!(outcome.new_version, "1.2.4-feature-x.1");
}

#[test]
fn test_release_from_prerelease_promotes_it() {
    let mut repo = repo_after_release(&["feat: one", "fix: two"]);
    repo.add_tag("v1.3.0-rc.0", "c0");

    let outcome = run_release(&repo, &NoIssueTracker, &request("main")).unwrap();

    // boundary is the stable v1.2.3 commit, so the feat is still seen
    assert_eq!(outcome.bump, BumpLevel::Minor);
    assert_eq!(outcome.tag, "v1.3.0-rc.0");
    assert_eq!(outcome.new_version, "1.3.0");
}

#[test]
fn test_no_new_commits_short_circuits() {
    let mut repo = repo_after_release(&["feat: shipped"]);
    repo.add_tag("v1.3.0", "c0");

    let outcome = run_release(&repo, &NoIssueTracker, &request("main")).unwrap();

    assert_eq!(outcome.tag, "v1.3.0");
    assert_eq!(outcome.new_tag, outcome.tag);
    assert_eq!(outcome.new_version, outcome.version);
    assert!(!outcome.created);
    assert!(repo.created_tags().is_empty());
    assert!(outcome
        .warnings
        .iter()
        .any(|w| matches!(w, BoundaryWarning::NoNewCommits { .. })));
}

#[test]
fn test_history_before_stable_tag_is_ignored() {
    let mut repo = MockRepository::new();
    repo.add_commit("a1", "feat: old feature");
    repo.add_commit("b2", "chore: release");
    repo.add_commit("c3", "fix: after release");
    repo.add_tag("v2.0.0", "b2");
    repo.set_branch_head("main", "c3");

    let outcome = run_release(&repo, &NoIssueTracker, &request("main")).unwrap();

    assert_eq!(outcome.bump, BumpLevel::Patch);
    assert_eq!(outcome.new_version, "2.0.1");
}

#[test]
fn test_first_release_without_tags() {
    let mut repo = MockRepository::new();
    repo.add_commit("a1", "initial import");
    repo.add_tag("latest", "a1");
    repo.set_branch_head("master", "a1");

    let outcome = run_release(&repo, &NoIssueTracker, &request("master")).unwrap();

    assert_eq!(outcome.tag, "0.0.0");
    assert_eq!(outcome.version, "0.0.0");
    assert_eq!(outcome.new_version, "0.1.0");
    assert_eq!(
        outcome.warnings,
        vec![BoundaryWarning::UnparsableTag {
            tag: "latest".to_string()
        }]
    );
}

#[test]
fn test_wip_commits_are_skipped() {
    let config = Config {
        bump: BumpLevel::Patch,
        ..Config::default()
    };
    let repo = repo_after_release(&["feat: half done #wip", "BREAKING CHANGE: also wip #wip"]);

    let outcome = run_release(&repo, &NoIssueTracker, &request_with(config, "main")).unwrap();
    assert_eq!(outcome.bump, BumpLevel::None);
    assert_eq!(outcome.new_version, "1.2.4");
}

#[test]
fn test_issue_label_escalation() {
    let config = Config {
        bump: BumpLevel::Patch,
        ..Config::default()
    };
    let issues = StaticIssueLabels::new()
        .with_issue(7, ["enhancement"])
        .with_issue(8, ["bug"])
        .with_failure(9);

    let repo = repo_after_release(&["fixes #7 add export"]);
    let outcome = run_release(&repo, &issues, &request_with(config.clone(), "main")).unwrap();
    assert_eq!(outcome.bump, BumpLevel::Minor);
    assert_eq!(outcome.new_version, "1.3.0");

    let repo = repo_after_release(&["fix #8 crash"]);
    let outcome = run_release(&repo, &issues, &request_with(config.clone(), "main")).unwrap();
    assert_eq!(outcome.bump, BumpLevel::Patch);

    let repo = repo_after_release(&["fix #9 flaky"]);
    let outcome = run_release(&repo, &issues, &request_with(config, "main")).unwrap();
    assert_eq!(outcome.bump, BumpLevel::None);
    assert_eq!(outcome.new_version, "1.2.4");
}

#[test]
fn test_custom_commit_types() {
    let mut commit_types = BTreeMap::new();
    commit_types.insert("docs".to_string(), BumpLevel::Minor);
    commit_types.insert("hotfix".to_string(), BumpLevel::Patch);
    let config = Config {
        bump: BumpLevel::Patch,
        commit_types,
        ..Config::default()
    };

    let repo = repo_after_release(&["docs: describe outputs"]);
    let outcome = run_release(&repo, &NoIssueTracker, &request_with(config.clone(), "main")).unwrap();
    assert_eq!(outcome.bump, BumpLevel::Minor);

    let repo = repo_after_release(&["hotfix(api): null check"]);
    let outcome = run_release(&repo, &NoIssueTracker, &request_with(config, "main")).unwrap();
    assert_eq!(outcome.bump, BumpLevel::Patch);
}

#[test]
fn test_explicit_tag() {
    let repo = repo_after_release(&["feat: something"]);
    let mut req = request("main");
    req.explicit_tag = Some("v9.0.0".to_string());

    let outcome = run_release(&repo, &NoIssueTracker, &req).unwrap();

    assert_eq!(outcome.new_tag, "v9.0.0");
    assert_eq!(outcome.new_version, "9.0.0");
    assert_eq!(repo.created_tags(), vec![Tag::new("v9.0.0", "c0")]);
}

#[test]
fn test_explicit_tag_already_exists() {
    let repo = repo_after_release(&["feat: something"]);
    let mut req = request("main");
    req.explicit_tag = Some("v1.2.3".to_string());

    let err = run_release(&repo, &NoIssueTracker, &req).unwrap_err();

    assert!(matches!(err, AutotagError::Tag(_)));
    assert_eq!(err.to_string(), "Tag error: tag already exists v1.2.3");
    assert!(repo.created_tags().is_empty());
}

#[test]
fn test_push_to_remote() {
    let repo = repo_after_release(&["fix: bug"]);
    let mut req = request("main");
    req.push_remote = Some("origin".to_string());

    let outcome = run_release(&repo, &NoIssueTracker, &req).unwrap();

    assert!(outcome.created);
    assert!(outcome.pushed);
    assert_eq!(
        repo.pushed_tags(),
        vec![("origin".to_string(), "1.2.4".to_string())]
    );
}

#[test]
fn test_release_branch_patterns() {
    let config = Config {
        release_branches: "^stable$".to_string(),
        ..Config::default()
    };
    let mut repo = repo_after_release(&["fix: backport"]);
    repo.set_branch_head("release/stable", "c0");

    let outcome = run_release(&repo, &NoIssueTracker, &request_with(config.clone(), "release/stable")).unwrap();
    assert_eq!(outcome.branch, "release/stable");
    assert_eq!(outcome.new_version, "1.2.4");

    // main no longer matches, so it gets a pre-release
    let outcome = run_release(&repo, &NoIssueTracker, &request_with(config, "main")).unwrap();
    assert_eq!(outcome.new_version, "1.2.4-main.0");
}

#[test]
fn test_nested_branch_matches_on_last_segment() {
    let config = Config {
        release_branches: "^main$".to_string(),
        ..Config::default()
    };
    let mut repo = repo_after_release(&["fix: y"]);
    repo.set_branch_head("feature/main", "c0");

    let outcome = run_release(&repo, &NoIssueTracker, &request_with(config, "feature/main")).unwrap();
    assert_eq!(outcome.new_version, "1.2.4");
    assert_eq!(outcome.new_tag, "1.2.4");
}

#[test]
fn test_empty_release_pattern_matches_every_branch() {
    let config = Config {
        release_branches: "main, ".to_string(),
        ..Config::default()
    };
    let repo = repo_after_release(&["fix: y"]);

    let outcome = run_release(&repo, &NoIssueTracker, &request_with(config, "feature-x")).unwrap();
    assert_eq!(outcome.new_version, "1.2.4");
}

#[test]
fn test_unknown_branch_fails_before_tagging() {
    let repo = repo_after_release(&["feat: x"]);
    let mut req = request("ghost");
    req.branch_forced = true;

    let err = run_release(&repo, &NoIssueTracker, &req).unwrap_err();
    assert!(matches!(err, AutotagError::Branch(_)));
    assert!(repo.created_tags().is_empty());
}
