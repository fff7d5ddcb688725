use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use git_autotag::boundary::BoundaryWarning;
use git_autotag::cli::{run_release, ReleaseRequest};
use git_autotag::config::{self, Config};
use git_autotag::domain::BumpLevel;
use git_autotag::git::{Git2Repository, Repository};
use git_autotag::issues::{GithubIssues, IssueLabelLookup, NoIssueTracker};
use git_autotag::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-autotag",
    version,
    about = "Create semantic version tags from conventional commits"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, env = "INPUT_BRANCH", help = "Explicitly specify branch to tag")]
    branch: Option<String>,

    #[arg(
        long,
        env = "INPUT_RELEASE-BRANCH",
        help = "Comma-separated regular expressions naming release branches"
    )]
    release_branch: Option<String>,

    #[arg(long, env = "INPUT_BUMP", help = "Default bump on release branches (patch, minor, major)")]
    bump: Option<String>,

    #[arg(long, env = "INPUT_WITH-V", help = "Prefix new tags with 'v'")]
    with_v: bool,

    #[arg(long, env = "INPUT_TAG", help = "Create this tag instead of computing one")]
    tag: Option<String>,

    #[arg(
        long,
        env = "INPUT_ISSUE-LABELS",
        help = "Comma-separated issue labels that turn a fix into a minor change"
    )]
    issue_labels: Option<String>,

    #[arg(
        long,
        env = "INPUT_COMMIT-TYPES",
        help = "JSON object of extra commit type rules, e.g. {\"docs\":\"minor\"}"
    )]
    commit_types: Option<String>,

    #[arg(long, env = "INPUT_DRY-RUN", help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, help = "Token for issue label lookups")]
    github_token: Option<String>,

    #[arg(long, env = "GITHUB_REPOSITORY", help = "Repository as owner/repo for issue lookups")]
    repository: Option<String>,

    #[arg(long, value_name = "REMOTE", help = "Push the created tag to this remote")]
    push: Option<String>,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,

    #[arg(long, default_value = ".", help = "Path inside the git repository")]
    path: String,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .init();

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = config::load_config(args.config.as_deref()).context("Error loading config")?;
    apply_overrides(&mut config, &args)?;

    let repo = Git2Repository::open(&args.path).context("Git repository error")?;

    let (branch, branch_forced) = resolve_branch(&repo, args.branch.as_deref())?;

    let mut request = ReleaseRequest::from_config(&config, branch, branch_forced)?;
    request.dry_run = args.dry_run;
    request.explicit_tag = args.tag.clone().filter(|tag| !tag.is_empty());
    if args.push.is_some() {
        request.push_remote = args.push.clone();
    }

    let issues = issue_tracker(args.github_token.as_deref(), args.repository.as_deref());

    let outcome = run_release(&repo, issues.as_ref(), &request)?;

    for warning in &outcome.warnings {
        if !matches!(warning, BoundaryWarning::UnparsableTag { .. }) {
            ui::display_boundary_warning(warning);
        }
    }

    ui::display_tag_change(&outcome);
    if outcome.pushed {
        ui::display_success(&format!("Pushed tag: {}", outcome.new_tag));
    } else if outcome.created {
        ui::display_success(&format!("Created tag: {}", outcome.new_tag));
        ui::display_manual_push_instruction(&outcome.new_tag, "origin");
    } else if request.dry_run {
        ui::display_status("Dry run, no tag was created");
    }

    ui::write_outputs(&outcome)?;
    Ok(())
}

/// Layer command-line values over the loaded configuration
fn apply_overrides(config: &mut Config, args: &Args) -> Result<()> {
    if let Some(release_branches) = &args.release_branch {
        config.release_branches = release_branches.clone();
    }

    if let Some(bump) = args.bump.as_deref().filter(|bump| !bump.is_empty()) {
        config.bump = BumpLevel::parse(bump)?;
    }

    config.with_v = config.with_v || args.with_v;

    if let Some(labels) = &args.issue_labels {
        config.issue_labels = config::parse_issue_labels(labels);
    }

    if let Some(json) = &args.commit_types {
        config.apply_rule_overlay(json);
    }

    Ok(())
}

/// Branch to tag and whether it was requested explicitly
fn resolve_branch<R: Repository>(repo: &R, forced: Option<&str>) -> Result<(String, bool)> {
    if let Some(branch) = forced.filter(|branch| !branch.is_empty()) {
        info!("check forced branch {}", branch);
        return Ok((branch.to_string(), true));
    }

    if let Ok(github_ref) = std::env::var("GITHUB_REF") {
        if !github_ref.is_empty() {
            let branch = github_ref
                .strip_prefix("refs/heads/")
                .unwrap_or(&github_ref)
                .to_string();
            info!("load the history of branch {} from context ref {}", branch, github_ref);
            return Ok((branch, false));
        }
    }

    let branch = repo
        .current_branch()
        .context("Cannot determine the branch to tag")?;
    Ok((branch, false))
}

fn issue_tracker(token: Option<&str>, repository: Option<&str>) -> Box<dyn IssueLabelLookup> {
    let unavailable = |reason: String| -> Box<dyn IssueLabelLookup> {
        warn!("{}", BoundaryWarning::IssueTrackerUnavailable { reason });
        Box::new(NoIssueTracker)
    };

    match (token, repository) {
        (Some(token), Some(repository)) if !token.is_empty() => {
            match GithubIssues::new(token, repository) {
                Ok(client) => {
                    info!("run for {}", client.repository());
                    Box::new(client)
                }
                Err(e) => unavailable(e.to_string()),
            }
        }
        _ => unavailable("no GitHub token or repository configured".to_string()),
    }
}
