use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracker_core::config::ConfigOverrides;
use tracker_core::error::AppError;

#[derive(Parser, Debug)]
#[command(name = "tasks", author, version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Render listings as a table
    #[arg(long, global = true, conflicts_with = "json")]
    pub table: bool,

    /// Override configuration values (format KEY=VALUE, key: store_path)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show all tasks
    ///
    /// Example: tasks list
    List,
    /// Add a new task
    ///
    /// Example: tasks add "Buy milk" "2 litres" 2099-01-31
    Add {
        title: String,
        description: Option<String>,
        /// YYYY-MM-DD, D.M.YYYY or DD.MM.YYYY, strictly after today
        deadline: Option<String>,
    },
    /// Edit a task; empty values keep the current field
    ///
    /// Example: tasks edit 1684000000000 "Buy oat milk"
    /// Example: tasks edit 1684000000000 "" "" 31.01.2099
    Edit {
        id: String,
        title: Option<String>,
        description: Option<String>,
        deadline: Option<String>,
    },
    /// Mark a task as completed
    ///
    /// Example: tasks complete 1684000000000
    Complete { id: String },
    /// Delete a task
    ///
    /// Example: tasks delete 1684000000000
    Delete { id: String },
    /// Show incomplete tasks whose deadline has passed
    ///
    /// Example: tasks expired
    Expired,
    /// Show incomplete tasks with a deadline, earliest first
    ///
    /// Example: tasks pending
    Pending,
}

/// Applies one `KEY=VALUE` override. `store_path` (alias `store`) is the
/// only key; dashes and case in the key are ignored.
pub fn apply_config_override(overrides: &mut ConfigOverrides, raw: &str) -> Result<(), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("override '{raw}' must be in KEY=VALUE format"))?;

    let key = key.trim().to_ascii_lowercase().replace('-', "_");
    match key.as_str() {
        "" => Err("override key cannot be empty".to_string()),
        "store_path" | "store" => {
            let value = value.trim();
            if value.is_empty() {
                return Err("store_path override cannot be empty".to_string());
            }
            overrides.store_path = Some(PathBuf::from(value));
            Ok(())
        }
        other => Err(format!("unknown config field '{other}'")),
    }
}

pub fn collect_overrides(raw: &[String]) -> Result<ConfigOverrides, AppError> {
    let mut overrides = ConfigOverrides::default();
    for entry in raw {
        apply_config_override(&mut overrides, entry).map_err(AppError::invalid_input)?;
    }

    Ok(overrides)
}
