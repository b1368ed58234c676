use crate::core::models::{EntityId, Task, TaskSummary};
use crate::core::persist::{ensure_dir, load_document, save_document};
use crate::core::repository::Repository;
use crate::core::types::{Priority, TaskStatus};
use crate::errors::{Error, Result};
use crate::store::ID_OVERFLOW;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const TASKS_FILE: &str = "tasks.json";

pub type TaskBook = Repository<Task>;

#[derive(Debug, Deserialize)]
struct TaskFile {
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    next_id: EntityId,
}

#[derive(Debug, Serialize)]
struct TaskFileRef<'a> {
    tasks: &'a [Task],
    next_id: EntityId,
}

#[derive(Debug, Clone)]
pub struct TaskStore {
    data_dir: PathBuf,
    path: PathBuf,
}

impl TaskStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let path = data_dir.join(TASKS_FILE);
        Self { data_dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<TaskBook> {
        ensure_dir(&self.data_dir)?;
        Ok(match load_document::<TaskFile>(&self.path)? {
            Some(file) => Repository::restore(file.tasks, file.next_id)
                .ok_or_else(|| Error::corrupt(&self.path, ID_OVERFLOW))?,
            None => TaskBook::new(),
        })
    }

    pub fn save(&self, book: &TaskBook) -> Result<()> {
        let file = TaskFileRef {
            tasks: book.as_slice(),
            next_id: book.peek_next_id(),
        };
        save_document(&self.path, &file)
    }

    pub fn add_task(
        &self,
        name: &str,
        description: &str,
        deadline: &str,
        estimated_hours: f64,
        priority: Priority,
    ) -> Result<Task> {
        let estimated_hours = finite_hours(estimated_hours, "estimated hours")?;
        let mut book = self.load()?;
        let task = Task::new(name, description, deadline, estimated_hours, priority);
        let task = book
            .insert(task)
            .ok_or_else(|| Error::corrupt(&self.path, ID_OVERFLOW))?
            .clone();
        self.save(&book)?;
        Ok(task)
    }

    /// `Ok(None)` when no task has `task_id`; nothing is written then.
    pub fn update_task_status(
        &self,
        task_id: EntityId,
        status: TaskStatus,
        note: &str,
    ) -> Result<Option<Task>> {
        self.modify(task_id, |task| {
            task.set_status(status);
            task.push_note(note);
        })
    }

    pub fn update_task_progress(
        &self,
        task_id: EntityId,
        actual_hours: f64,
        note: &str,
    ) -> Result<Option<Task>> {
        let actual_hours = finite_hours(actual_hours, "actual hours")?;
        self.modify(task_id, |task| {
            task.set_actual_hours(actual_hours);
            task.push_note(note);
        })
    }

    pub fn get_all_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.load()?.as_slice().to_vec())
    }

    pub fn get_pending_tasks(&self) -> Result<Vec<Task>> {
        let book = self.load()?;
        Ok(book
            .query()
            .r#where(|t| t.status.is_open())
            .collect()
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn get_tasks_by_status(&self, status: TaskStatus) -> Result<Vec<Task>> {
        let book = self.load()?;
        Ok(book
            .query()
            .r#where(move |t| t.status == status)
            .collect()
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn get_tasks_summary(&self) -> Result<TaskSummary> {
        let book = self.load()?;
        let count = |status: TaskStatus| book.query().r#where(move |t| t.status == status).count();

        Ok(TaskSummary {
            total: book.len(),
            pending: count(TaskStatus::Pending),
            in_progress: count(TaskStatus::InProgress),
            completed: count(TaskStatus::Completed),
            cancelled: count(TaskStatus::Cancelled),
            total_estimated_hours: book
                .query()
                .r#where(|t| t.status.is_open())
                .collect()
                .iter()
                .map(|t| t.estimated_hours)
                .sum(),
            high_priority_pending: book
                .query()
                .r#where(|t| t.status.is_open() && t.priority == Priority::High)
                .count(),
        })
    }

    fn modify<F>(&self, task_id: EntityId, f: F) -> Result<Option<Task>>
    where
        F: FnOnce(&mut Task),
    {
        let mut book = self.load()?;
        let Some(task) = book.get_mut(task_id) else {
            return Ok(None);
        };
        f(task);
        let updated = task.clone();
        self.save(&book)?;
        Ok(Some(updated))
    }
}

/// JSON has no encoding for NaN or infinity, so such hours would not load back.
pub fn finite_hours(hours: f64, name: &str) -> Result<f64> {
    if hours.is_finite() {
        Ok(hours)
    } else {
        Err(Error::parse(format!(
            "Invalid {name}: '{hours}'. Expected a finite number."
        )))
    }
}
