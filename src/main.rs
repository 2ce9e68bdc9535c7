mod cli;

use anyhow::Context;
use bom_artifact_sync::adapters::outbound::console::StderrProgressReporter;
use bom_artifact_sync::adapters::outbound::filesystem::PropertySnapshotFile;
use bom_artifact_sync::adapters::outbound::network::{BomServiceClient, CachingBomService};
use bom_artifact_sync::adapters::outbound::storage::InMemoryPropertyStore;
use bom_artifact_sync::application::dto::{RepositoryTarget, SyncReport, SyncSettings};
use bom_artifact_sync::application::services::InspectionStatusStore;
use bom_artifact_sync::application::use_cases::SyncRepositoriesUseCase;
use bom_artifact_sync::config::{self, ConfigFile, CONFIG_FILENAME};
use bom_artifact_sync::inspection::domain::InspectionStatus;
use bom_artifact_sync::ports::inbound::RepositorySyncPort;
use bom_artifact_sync::ports::outbound::PropertyStore;
use bom_artifact_sync::shared::error::ExitCode;
use bom_artifact_sync::shared::Result;
use cli::{Args, Command};
use owo_colors::OwoColorize;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // clap exits with code 2 on invalid arguments
    let args = Args::parse_args();
    init_tracing(args.quiet);

    match run(args).await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn init_tracing(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = load_config(&args)?;
    let settings = config.sync_settings()?;
    let targets = config.targets(&args.repositories)?;
    if targets.is_empty() {
        anyhow::bail!(
            "No repositories configured.\n\n💡 Hint: Add entries under `repositories:` in {}.",
            CONFIG_FILENAME
        );
    }

    let snapshot = PropertySnapshotFile::new(args.property_file.clone());
    let store = snapshot.load().with_context(|| {
        format!(
            "Failed to load property file: {}\n\n💡 Hint: Point --property-file at the JSON snapshot of your repositories.",
            snapshot.path().display()
        )
    })?;
    for target in &targets {
        store.add_repository(&target.key);
    }

    if !args.command.needs_service() {
        print_status(&store, &settings, &targets)?;
        return Ok(ExitCode::Success);
    }

    let service = config.bom_service.as_ref().ok_or_else(|| {
        anyhow::anyhow!(
            "No BOM service configured.\n\n💡 Hint: Set `bom_service.url` in {}.",
            CONFIG_FILENAME
        )
    })?;
    let client = BomServiceClient::new(&service.url, config.api_token(), config.service_timeout())?;
    let reporter = if args.quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    };

    let use_case = SyncRepositoriesUseCase::new(CachingBomService::new(client), store, reporter, settings);
    let report = match args.command {
        Command::Identify => use_case.identify(&targets).await,
        Command::Update => use_case.update(&targets).await,
        _ => use_case.run(&targets).await,
    };

    snapshot.save(use_case.property_store())?;
    print_report(&report);

    if report.has_failures() {
        Ok(ExitCode::Failures)
    } else {
        Ok(ExitCode::Success)
    }
}

fn load_config(args: &Args) -> Result<ConfigFile> {
    if let Some(ref path) = args.config {
        return config::load_config_from_path(path);
    }

    let cwd = std::env::current_dir()?;
    config::discover_config(&cwd)?.ok_or_else(|| {
        anyhow::anyhow!(
            "No config file found in {}\n\n💡 Hint: Create {} or pass --config <CONFIG>.",
            cwd.display(),
            CONFIG_FILENAME
        )
    })
}

fn print_report(report: &SyncReport) {
    for repository in &report.repositories {
        if repository.has_failures() {
            println!("{} {}", "✗".red(), repository.repository.bold());
        } else {
            println!("{} {}", "✓".green(), repository.repository.bold());
        }
        for outcome in &repository.outcomes {
            println!("    {}", outcome);
        }
    }
}

/// Artifact tally by inspection status
#[derive(Debug, Default, PartialEq, Eq)]
struct StatusCounts {
    not_inspected: usize,
    pending: usize,
    success: usize,
    failure: usize,
}

fn count_statuses<S: PropertyStore>(
    store: &S,
    statuses: &InspectionStatusStore<'_, S>,
    repo_key: &str,
) -> Result<StatusCounts> {
    let mut counts = StatusCounts::default();
    for path in store.list_artifacts(repo_key)? {
        match statuses.get(&path)? {
            None => counts.not_inspected += 1,
            Some(InspectionStatus::Pending) => counts.pending += 1,
            Some(InspectionStatus::Success) => counts.success += 1,
            Some(InspectionStatus::Failure) => counts.failure += 1,
        }
    }
    Ok(counts)
}

fn print_status(
    store: &InMemoryPropertyStore,
    settings: &SyncSettings,
    targets: &[RepositoryTarget],
) -> Result<()> {
    let statuses = InspectionStatusStore::new(store, &settings.keys, &settings.dates);

    for target in targets {
        let root = target.root();
        let inspection = statuses
            .get(&root)?
            .map_or_else(|| "NOT_INSPECTED".to_string(), |s| s.to_string());
        let update = statuses
            .update_status(&root)?
            .map_or_else(|| "-".to_string(), |s| s.to_string());
        let last_update = statuses
            .last_update(&root)?
            .map_or_else(|| "-".to_string(), |d| d.to_rfc3339());
        let failed_replays = statuses.update_failure_count(&root)?;
        let counts = count_statuses(store, &statuses, &target.key)?;

        println!("{} ({})", target.key.bold(), target.package_type);
        println!(
            "    inspection: {}  update: {}  last update: {}  failed replays: {}",
            inspection, update, last_update, failed_replays
        );
        println!(
            "    artifacts: {} success, {} pending, {} failure, {} not inspected",
            counts.success, counts.pending, counts.failure, counts.not_inspected
        );
    }
    Ok(())
}
