use clap::Parser;
use clap::error::ErrorKind;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use tracker_cli::cli::{Cli, Command, collect_overrides};
use tracker_cli::render;
use tracker_core::config;
use tracker_core::error::AppError;
use tracker_core::model::Task;
use tracker_core::{Listing, TaskStore};

const LOG_ENV_VAR: &str = "TASKS_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn print_task(cli: &Cli, verb: &str, task: &Task) -> Result<(), AppError> {
    if cli.json {
        println!("{}", render::render_task_json(task)?);
    } else {
        println!("{verb}: {} ({})", task.title, task.id);
    }
    Ok(())
}

/// JSON output stays a bare array on stdout; an empty view is still
/// announced on stderr.
fn print_listing(
    cli: &Cli,
    listing: &Listing<'_>,
    plain: fn(&Listing<'_>) -> String,
    empty_notice: &str,
) -> Result<(), AppError> {
    if cli.json {
        println!("{}", render::render_tasks_json(listing.tasks())?);
        if listing.is_empty() {
            eprintln!("{empty_notice}");
        }
    } else if cli.table && !listing.is_empty() {
        print!("{}", render::render_table(listing.tasks()));
    } else {
        print!("{}", plain(listing));
    }
    Ok(())
}

fn run_command(cli: &Cli, store: &mut TaskStore) -> Result<(), AppError> {
    match &cli.command {
        Command::List => {
            let tasks: Vec<&Task> = store.list_all().iter().collect();
            if cli.json {
                println!("{}", render::render_tasks_json(&tasks)?);
            } else if cli.table && !tasks.is_empty() {
                print!("{}", render::render_table(&tasks));
            } else {
                print!("{}", render::render_all(store.list_all()));
            }
        }
        Command::Add {
            title,
            description,
            deadline,
        } => {
            let task = store.add(title, description.as_deref(), deadline.as_deref())?;
            print_task(cli, "Task added successfully", &task)?;
        }
        Command::Edit {
            id,
            title,
            description,
            deadline,
        } => {
            let task = store.edit(
                id,
                title.as_deref(),
                description.as_deref(),
                deadline.as_deref(),
            )?;
            print_task(cli, "Task edited successfully", &task)?;
        }
        Command::Complete { id } => {
            let task = store.complete(id)?;
            print_task(cli, "Task marked as completed", &task)?;
        }
        Command::Delete { id } => {
            let task = store.delete(id)?;
            print_task(cli, "Task deleted successfully", &task)?;
        }
        Command::Expired => {
            print_listing(
                cli,
                &store.list_expired(),
                render::render_expired,
                render::NO_EXPIRED_TASKS,
            )?;
        }
        Command::Pending => {
            print_listing(
                cli,
                &store.list_pending(),
                render::render_pending,
                render::NO_PENDING_TASKS,
            )?;
        }
    }

    Ok(())
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let overrides = collect_overrides(&cli.config_override)?;

    let loaded = config::load_config_with_fallback();
    if let Some(err) = loaded.error.as_ref() {
        warn!(error = %err, "using default configuration");
    }

    let path = loaded.config.resolve_store_path(&overrides);
    let mut store = TaskStore::open(path);
    debug!(path = %store.path().display(), count = store.len(), "opened task store");

    run_command(cli, &mut store)
}

fn main() {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err)
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) =>
        {
            err.exit()
        }
        Err(err) => {
            let err = normalize_parse_error(err);
            eprintln!("ERROR: {}", err);
            std::process::exit(err.exit_code());
        }
    };

    if let Err(err) = run(&cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(err.exit_code());
    }
}
