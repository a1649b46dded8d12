use crate::clock::{Clock, SystemClock};
use crate::deadline::{DeadlineValidator, deadline_start, parse_deadline};
use crate::error::AppError;
use crate::model::Task;
use crate::storage::json_store;
use std::path::{Path, PathBuf};
use time::macros::format_description;
use tracing::{debug, warn};

/// Result of a filtered view. `Empty` is reported instead of an empty list so
/// callers can print a dedicated message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing<'a> {
    Tasks(Vec<&'a Task>),
    Empty,
}

impl<'a> Listing<'a> {
    fn from_tasks(tasks: Vec<&'a Task>) -> Self {
        if tasks.is_empty() {
            Self::Empty
        } else {
            Self::Tasks(tasks)
        }
    }

    pub fn tasks(&self) -> &[&'a Task] {
        match self {
            Self::Tasks(tasks) => tasks,
            Self::Empty => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// The task collection backed by one JSON file.
///
/// Every mutating call validates first, then changes the in-memory list, then
/// writes the whole list back. A failed write is returned to the caller even
/// though memory already reflects the change.
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
    clock: Box<dyn Clock>,
    last_issued_id: Option<i128>,
}

impl TaskStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::open_with_clock(path, Box::new(SystemClock))
    }

    pub fn open_with_clock(path: impl Into<PathBuf>, clock: Box<dyn Clock>) -> Self {
        let mut store = Self {
            path: path.into(),
            tasks: Vec::new(),
            clock,
            last_issued_id: None,
        };
        store.load();
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Replaces the in-memory list with the file contents. An unreadable or
    /// malformed file yields an empty list.
    pub fn load(&mut self) {
        self.tasks = match json_store::load_tasks(&self.path) {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "task store unreadable, starting with an empty list"
                );
                Vec::new()
            }
        };
        debug!(count = self.tasks.len(), "loaded tasks");
    }

    pub fn save(&self) -> Result<(), AppError> {
        json_store::save_tasks(&self.path, &self.tasks)
    }

    pub fn add(
        &mut self,
        title: &str,
        description: Option<&str>,
        deadline: Option<&str>,
    ) -> Result<Task, AppError> {
        let deadline = non_empty(deadline);
        if let Some(deadline) = deadline {
            DeadlineValidator::new(self.clock.as_ref()).check(deadline)?;
        }

        let mut task = Task::new(self.next_id(), title.to_string());
        task.description = description.map(str::to_string);
        task.deadline = deadline.map(str::to_string);

        self.tasks.push(task.clone());
        debug!(id = %task.id, "added task");
        self.save()?;

        Ok(task)
    }

    /// Applies every supplied non-empty value. Missing or empty values keep
    /// the current field.
    pub fn edit(
        &mut self,
        id: &str,
        title: Option<&str>,
        description: Option<&str>,
        deadline: Option<&str>,
    ) -> Result<Task, AppError> {
        let index = self.position(id)?;

        let deadline = non_empty(deadline);
        if let Some(deadline) = deadline {
            DeadlineValidator::new(self.clock.as_ref()).check(deadline)?;
        }

        let task = &mut self.tasks[index];
        if let Some(title) = non_empty(title) {
            task.title = title.to_string();
        }
        if let Some(description) = non_empty(description) {
            task.description = Some(description.to_string());
        }
        if let Some(deadline) = deadline {
            task.deadline = Some(deadline.to_string());
        }

        let updated = task.clone();
        debug!(id = %updated.id, "edited task");
        self.save()?;

        Ok(updated)
    }

    pub fn complete(&mut self, id: &str) -> Result<Task, AppError> {
        let index = self.position(id)?;
        let completion_format =
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
        let completion_date = self
            .clock
            .now()
            .format(&completion_format)
            .map_err(|err| AppError::invalid_data(err.to_string()))?;

        let task = &mut self.tasks[index];
        task.completed = true;
        task.completion_date = Some(completion_date);

        let updated = task.clone();
        debug!(id = %updated.id, "completed task");
        self.save()?;

        Ok(updated)
    }

    pub fn delete(&mut self, id: &str) -> Result<Task, AppError> {
        let index = self.position(id)?;
        let removed = self.tasks.remove(index);
        debug!(id = %removed.id, "deleted task");
        self.save()?;

        Ok(removed)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn list_all(&self) -> &[Task] {
        &self.tasks
    }

    /// Incomplete tasks whose deadline began before now, in stored order.
    pub fn list_expired(&self) -> Listing<'_> {
        let now = self.clock.now();
        let expired = self
            .tasks
            .iter()
            .filter(|task| !task.completed)
            .filter(|task| {
                task.deadline
                    .as_deref()
                    .and_then(parse_deadline)
                    .is_some_and(|date| deadline_start(date, now.offset()) < now)
            })
            .collect();

        Listing::from_tasks(expired)
    }

    /// Incomplete tasks that carry a deadline, earliest deadline first.
    /// Tasks without a deadline are left out. Deadlines that no longer parse
    /// sort last.
    pub fn list_pending(&self) -> Listing<'_> {
        let mut pending: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|task| !task.completed && task.deadline.is_some())
            .collect();

        pending.sort_by_key(|task| {
            let date = task.deadline.as_deref().and_then(parse_deadline);
            (date.is_none(), date)
        });

        Listing::from_tasks(pending)
    }

    /// Ids match exactly; a blank or padded id is simply not found.
    fn position(&self, id: &str) -> Result<usize, AppError> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| AppError::not_found(format!("task '{id}' not found")))
    }

    /// Millisecond timestamp ids, bumped past anything already issued or
    /// stored so that rapid adds never collide.
    fn next_id(&mut self) -> String {
        let mut candidate = self.clock.now().unix_timestamp_nanos() / 1_000_000;
        if let Some(last) = self.last_issued_id
            && candidate <= last
        {
            candidate = last + 1;
        }
        while self
            .tasks
            .iter()
            .any(|task| task.id == candidate.to_string())
        {
            candidate += 1;
        }

        self.last_issued_id = Some(candidate);
        candidate.to_string()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
