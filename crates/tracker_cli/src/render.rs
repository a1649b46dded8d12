use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracker_core::Listing;
use tracker_core::error::AppError;
use tracker_core::model::Task;

const SEPARATOR: &str = "----------------------------";

pub const ALL_HEADER: &str = "All tasks:";
pub const EXPIRED_HEADER: &str = "Expired tasks:";
pub const PENDING_HEADER: &str = "Pending tasks (sorted by deadline):";

pub const NO_TASKS: &str = "No tasks.";
pub const NO_EXPIRED_TASKS: &str = "No expired tasks.";
pub const NO_PENDING_TASKS: &str = "No pending tasks.";

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Deadline")]
    deadline: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Completed")]
    completion_date: String,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            deadline: task.deadline.clone().unwrap_or_default(),
            status: task.status_label().to_string(),
            completion_date: task.completion_date.clone().unwrap_or_default(),
        }
    }
}

fn description_label(task: &Task) -> &str {
    match task.description.as_deref() {
        Some(description) if !description.is_empty() => description,
        _ => "No description",
    }
}

fn push_task_block(lines: &mut Vec<String>, task: &Task, with_status: bool) {
    lines.push(format!("  ID: {}", task.id));
    lines.push(format!("  Title: {}", task.title));
    lines.push(format!("  Description: {}", description_label(task)));
    lines.push(format!(
        "  Deadline: {}",
        task.deadline.as_deref().unwrap_or("No deadline")
    ));
    if with_status {
        lines.push(format!("  Status: {}", task.status_label()));
        lines.push(format!(
            "  Completion Date: {}",
            task.completion_date.as_deref().unwrap_or("Not completed")
        ));
    }
    lines.push(SEPARATOR.to_string());
}

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn render_all(tasks: &[Task]) -> String {
    let mut lines = vec![ALL_HEADER.to_string()];
    if tasks.is_empty() {
        lines.push(NO_TASKS.to_string());
    }
    for task in tasks {
        push_task_block(&mut lines, task, true);
    }
    finish(lines)
}

/// Expired listing. Nothing but the notice is printed when no task expired.
pub fn render_expired(listing: &Listing<'_>) -> String {
    match listing {
        Listing::Empty => finish(vec![NO_EXPIRED_TASKS.to_string()]),
        Listing::Tasks(tasks) => {
            let mut lines = vec![EXPIRED_HEADER.to_string()];
            for task in tasks {
                push_task_block(&mut lines, task, false);
            }
            finish(lines)
        }
    }
}

pub fn render_pending(listing: &Listing<'_>) -> String {
    let mut lines = vec![PENDING_HEADER.to_string()];
    match listing {
        Listing::Empty => lines.push(NO_PENDING_TASKS.to_string()),
        Listing::Tasks(tasks) => {
            for task in tasks {
                push_task_block(&mut lines, task, false);
            }
        }
    }
    finish(lines)
}

pub fn render_table(tasks: &[&Task]) -> String {
    let mut table = Table::new(tasks.iter().map(|task| TaskRow::from(*task)));
    table.with(Style::psql());
    format!("{table}\n")
}

pub fn render_tasks_json(tasks: &[&Task]) -> Result<String, AppError> {
    serde_json::to_string_pretty(tasks).map_err(|err| AppError::invalid_data(err.to_string()))
}

pub fn render_task_json(task: &Task) -> Result<String, AppError> {
    serde_json::to_string_pretty(task).map_err(|err| AppError::invalid_data(err.to_string()))
}
