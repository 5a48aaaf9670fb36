use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use fastauto_core::route::{self, ClassifyOptions, Method, NameInfo};
use fastauto_core::{
    FastautoError, Result, RouteRequest, RouteScaffolder, Scaffold, SecurityRequest,
    SecurityScaffolder, Settings,
};

mod args;
use args::{Cli, Commands, ConfigAction, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let project_dir = resolve_project_dir(cli.project);
    let quiet = cli.quiet;

    let result = match cli.command {
        Some(Commands::Init { force }) => handle_init(&project_dir, force, quiet),
        Some(Commands::Route {
            route,
            field,
            methods,
            dry_run,
            force,
        }) => {
            let request = RouteRequest {
                route,
                is_field: field,
                methods,
                force,
            };
            handle_route(&project_dir, &request, dry_run, quiet)
        }
        Some(Commands::Security {
            kind,
            name,
            dry_run,
            force,
        }) => {
            let request = SecurityRequest {
                name,
                security_type: kind,
                force,
            };
            handle_security(&project_dir, &request, dry_run, quiet)
        }
        Some(Commands::Classify { route, field, json }) => handle_classify(&route, field, json),
        Some(Commands::Config { action }) => handle_config(action, &project_dir),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => {
            let _ = Cli::command().print_help();
            println!();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the flag-derived level.
fn init_tracing(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn resolve_project_dir(cli_project: Option<PathBuf>) -> PathBuf {
    cli_project
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn join_methods(methods: &[Method]) -> String {
    methods
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "fastauto", &mut io::stdout());
}

// ============================================================================
// Init
// ============================================================================

fn handle_init(project_dir: &Path, force: bool, quiet: bool) -> Result<()> {
    let path = Settings::init(project_dir, force)?;
    if !quiet {
        println!("{} {}", "Initialized:".green(), path.display());
    }
    Ok(())
}

// ============================================================================
// Scaffolding
// ============================================================================

fn handle_route(
    project_dir: &Path,
    request: &RouteRequest,
    dry_run: bool,
    quiet: bool,
) -> Result<()> {
    let settings = Settings::load(project_dir)?;
    let scaffolder = RouteScaffolder::from_settings(&settings, project_dir);

    let scaffold = if dry_run {
        scaffolder.plan(request)?
    } else {
        scaffolder.create(request)?
    };

    report(&scaffold, &request.methods, dry_run, quiet);
    Ok(())
}

fn handle_security(
    project_dir: &Path,
    request: &SecurityRequest,
    dry_run: bool,
    quiet: bool,
) -> Result<()> {
    let settings = Settings::load(project_dir)?;
    let scaffolder = SecurityScaffolder::from_settings(&settings, project_dir);

    let scaffold = if dry_run {
        scaffolder.plan(request)?
    } else {
        scaffolder.create(request)?
    };

    report(&scaffold, &[], dry_run, quiet);
    Ok(())
}

fn report(scaffold: &Scaffold, requested: &[Method], dry_run: bool, quiet: bool) {
    for warning in &scaffold.warnings {
        eprintln!("{} {}", "Warning:".yellow(), warning);
    }

    // A dry run's output is the file itself, so it ignores --quiet.
    if dry_run {
        println!("{}", format!("// {}", scaffold.path.display()).dimmed());
        print!("{}", scaffold.source);
        return;
    }

    if quiet {
        return;
    }

    println!("{} {}", "Created:".green(), scaffold.path.display());
    if let Some(info) = &scaffold.name_info {
        println!(
            "  {} {}",
            info.name.cyan().bold(),
            format!("({})", info.route_type).dimmed()
        );
        println!(
            "  methods: {}",
            join_methods(&route::resolve_methods(info, requested))
        );
    }
}

// ============================================================================
// Classify
// ============================================================================

fn handle_classify(route: &str, field: bool, json: bool) -> Result<()> {
    let info = route::classify(route, ClassifyOptions { is_field: field });

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    print_name_info(route, &info);
    Ok(())
}

fn print_name_info(route: &str, info: &NameInfo) {
    let or_dash = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    println!();
    println!("{} {}", "Route:".bold(), route);
    println!("  {:<11} {}", "name", info.name.cyan().bold());
    println!("  {:<11} {}", "type", info.route_type);
    println!("  {:<11} {}", "methods", join_methods(&info.suggested_methods));
    println!("  {:<11} {}", "parameters", info.parameters.join(", "));
    println!("  {:<11} {}", "resource", or_dash(&info.resource));
    println!("  {:<11} {}", "action", or_dash(&info.action));
    println!();
}

// ============================================================================
// Config
// ============================================================================

fn handle_config(action: ConfigAction, project_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let settings = Settings::load(project_dir)?;
            match settings.get(&key) {
                Some(value) => {
                    println!("{}", value);
                }
                None => {
                    return Err(FastautoError::ConfigKeyNotFound { key });
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut settings = Settings::load(project_dir)?;
            settings.set(&key, &value)?;
            settings.save(project_dir)?;
            println!("{} {} = {}", "Set:".green(), key, value);
        }
        ConfigAction::List => {
            let settings = Settings::load(project_dir)?;
            println!();
            for (key, value) in settings.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Path => {
            println!("{}", Settings::path(project_dir).display());
        }
    }
    Ok(())
}
