use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use git_next_tag::cli::{run_next_tag, NextTagArgs};
use git_next_tag::config;
use git_next_tag::domain::{self, BumpRequest};
use git_next_tag::git::{Git2Repository, Repository};
use git_next_tag::ui::{self, TerminalConfirm};

#[derive(clap::Parser)]
#[command(
    name = "git-next-tag",
    version,
    about = "Create the next release tag from an explicit version bump"
)]
#[command(group(
    ArgGroup::new("bump")
        .args(["major", "minor", "patch", "alpha", "beta", "gamma", "rc", "finalize"])
        .multiple(false)
))]
struct Args {
    #[arg(long, help = "Increment major version")]
    major: bool,

    #[arg(long, help = "Increment minor version")]
    minor: bool,

    #[arg(long, help = "Increment patch version")]
    patch: bool,

    #[arg(long, help = "Increment alpha version")]
    alpha: bool,

    #[arg(long, help = "Increment beta version")]
    beta: bool,

    #[arg(long, help = "Increment gamma version")]
    gamma: bool,

    #[arg(long, help = "Increment release candidate version")]
    rc: bool,

    #[arg(
        long,
        help = "Keep the current pre-marked version, setting its -pre marker from --pre"
    )]
    finalize: bool,

    #[arg(long, help = "Mark the new version as a -pre development snapshot")]
    pre: bool,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Skip confirmation prompts")]
    force: bool,

    #[arg(long, help = "Push the new tag to the remote")]
    push: bool,

    #[arg(long, help = "Remote to push to (default from configuration)")]
    remote: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Write a default configuration file and exit")]
    init: bool,

    #[arg(long, help = "List tags newest first and exit")]
    list: bool,

    #[arg(short, long, help = "Show debug logging")]
    verbose: bool,
}

impl Args {
    fn bump_request(&self) -> BumpRequest {
        let selected = [
            (self.major, BumpRequest::Major),
            (self.minor, BumpRequest::Minor),
            (self.patch, BumpRequest::Patch),
            (self.alpha, BumpRequest::Alpha),
            (self.beta, BumpRequest::Beta),
            (self.gamma, BumpRequest::Gamma),
            (self.rc, BumpRequest::ReleaseCandidate),
            (self.finalize, BumpRequest::MarkPre),
        ];
        selected
            .into_iter()
            .find_map(|(set, request)| set.then_some(request))
            .unwrap_or(BumpRequest::Unspecified)
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let repo = Git2Repository::open(".").context("Not in a git repository")?;
    let root = repo.workdir().map(|p| p.to_path_buf());

    if args.init {
        let root = root.context("Cannot write configuration into a bare repository")?;
        let path = config::write_default_config(&root)?;
        ui::display_success(&format!("Wrote {}", path.display()));
        return Ok(());
    }

    if args.list {
        let mut tags = domain::parse_tags(repo.list_tags()?);
        domain::sort_newest_first(&mut tags);
        ui::display_tags(&tags);
        return Ok(());
    }

    let config = config::load_config(args.config.as_deref(), root.as_deref())
        .context("Error loading config")?;

    let workflow_args = NextTagArgs {
        bump: args.bump_request(),
        pre: args.pre,
        force: args.force,
        dry_run: args.dry_run,
        push: args.push,
        remote: args.remote.clone(),
    };

    let result = run_next_tag(&repo, &config, &workflow_args, &mut TerminalConfirm)?;

    if result.created {
        println!(
            "\n{} Tagged version {}{}\n",
            console::style("✓").green(),
            result.tag,
            if result.pushed { " and pushed it" } else { "" }
        );
    }

    Ok(())
}
