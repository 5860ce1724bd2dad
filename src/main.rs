use std::fmt::Write;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use odh_lint::check::parse_version;
use odh_lint::cli::{Cli, Commands, ListArgs, RunArgs};
use odh_lint::config::{Config, ConfigLoader, FileConfigLoader};
use odh_lint::reader::snapshot;
use odh_lint::{
    CheckGroup, CheckRegistry, EXIT_CHECKS_FAILED, EXIT_CONFIG_ERROR, EXIT_SUCCESS,
    ExecutionSummary, Executor, RunContext, Target, checks, cluster,
};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match &cli.command {
        Commands::Run(args) => run_checks(args, &cli),
        Commands::List(args) => run_list(args, &cli),
    };

    std::process::exit(exit_code);
}

/// Log to stderr. `RUST_LOG` wins over `-v` when set.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn builtin_registry() -> odh_lint::Result<CheckRegistry> {
    let registry = CheckRegistry::new();
    checks::register_builtin(&registry)?;
    Ok(registry)
}

fn load_config(config_path: Option<&Path>, no_config: bool) -> odh_lint::Result<Config> {
    if no_config {
        return Ok(Config::default());
    }

    let loader = FileConfigLoader::new();
    config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))
}

fn resolve_group(flag: Option<&str>, config: &Config) -> odh_lint::Result<Option<CheckGroup>> {
    match flag {
        Some(group) => Ok(Some(group.parse::<CheckGroup>()?)),
        None => config.run.group(),
    }
}

fn run_checks(args: &RunArgs, cli: &Cli) -> i32 {
    match run_checks_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_checks_impl(args: &RunArgs, cli: &Cli) -> odh_lint::Result<i32> {
    // 1. Configuration, with CLI flags taking precedence
    let config = load_config(args.config.as_deref(), cli.no_config)?;
    let group = resolve_group(args.group.as_deref(), &config)?;
    let patterns = if args.checks.is_empty() {
        config.run.checks.clone()
    } else {
        args.checks.clone()
    };
    let target_version = match args.target_version.as_deref() {
        Some(v) => Some(parse_version(v)?),
        None => config.versions.target()?,
    };

    // 2. Cluster snapshot and target
    let reader = Arc::new(snapshot::load(&args.snapshot)?);
    let current_version = match args.current_version.as_deref() {
        Some(v) => Some(parse_version(v)?),
        None => cluster::detect_platform_version(reader.as_ref())?,
    };
    if target_version.is_none() {
        tracing::info!("no target version set, version-gated checks will not apply");
    }
    let target = Target::new(reader)
        .with_current_version(current_version)
        .with_target_version(target_version);

    // 3. Execute
    let registry = builtin_registry()?;
    let timeout = match args.timeout {
        Some(0) => None,
        Some(secs) => Some(Duration::from_secs(secs)),
        None => config.run.timeout(),
    };
    let ctx = timeout.map_or_else(RunContext::new, RunContext::with_timeout);
    let executions = Executor::new(&registry).execute_selective(&ctx, &target, &patterns, group)?;

    // 4. Report
    let output = args.format.formatter(cli.color.into()).format(&executions)?;
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    let summary = ExecutionSummary::from_executions(&executions);
    if config.run.fail_on.is_failure(&summary) {
        Ok(EXIT_CHECKS_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

fn run_list(args: &ListArgs, cli: &Cli) -> i32 {
    match run_list_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_list_impl(args: &ListArgs, cli: &Cli) -> odh_lint::Result<i32> {
    let config = load_config(None, cli.no_config)?;
    let group = resolve_group(args.group.as_deref(), &config)?;
    let registry = builtin_registry()?;

    let mut selected = if args.checks.is_empty() {
        registry.list_by_pattern(odh_lint::selector::WILDCARD, group)?
    } else {
        registry.list_by_patterns(&args.checks, group)?
    };
    selected.sort_by(|a, b| a.id().cmp(b.id()));

    let mut output = String::new();
    for check in &selected {
        let _ = writeln!(
            output,
            "{:<50} {:<11} {}",
            check.id(),
            check.group().as_str(),
            check.name()
        );
    }
    write_output(None, &output, cli.quiet)?;
    Ok(EXIT_SUCCESS)
}

fn write_output(output_path: Option<&Path>, content: &str, quiet: bool) -> odh_lint::Result<()> {
    if let Some(path) = output_path {
        fs::write(path, content)?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}
