use std::path::PathBuf;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::task::{utc_midnight, TaskPriority, TaskRecord, TaskStatus};
use crate::model::user::{Assignee, User};
use crate::timeline::DateUpdate;

/// Errors from the task store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read task data: {0}")]
    Io(#[from] std::io::Error),
    #[error("task data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no task with id {0}")]
    UnknownTask(Uuid),
}

/// On-disk shape of the store file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    tasks: Vec<TaskRecord>,
}

/// JSON-file task store.
///
/// Plays both external roles the timeline talks to: the data-fetch
/// collaborator (`fetch`) and the commit target for finished gestures
/// (`apply_date_update`). Nothing else in the app touches the file.
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn open(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store file location in the platform data directory.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("", "", "Taskline")
            .map(|dirs| dirs.data_dir().join("tasks.json"))
            .unwrap_or_else(|| PathBuf::from("tasks.json"))
    }

    /// Load all records, seeding the sample set on first run.
    pub fn fetch(&self) -> Result<(Vec<TaskRecord>, Vec<User>), StoreError> {
        if !self.path.exists() {
            let file = sample_data();
            self.write(&file)?;
            log::info!("seeded task store at {:?}", self.path);
            return Ok((file.tasks, file.users));
        }
        let file = self.read()?;
        Ok((file.tasks, file.users))
    }

    /// Apply a partial date update to one task. Only the date field(s)
    /// present in the update are touched; everything else on the record is
    /// left as-is.
    pub fn apply_date_update(&self, update: &DateUpdate) -> Result<(), StoreError> {
        let mut file = self.read()?;
        let task = file
            .tasks
            .iter_mut()
            .find(|t| t.id == update.task_id)
            .ok_or(StoreError::UnknownTask(update.task_id))?;
        if let Some(start) = update.start {
            task.start_time = Some(utc_midnight(start));
        }
        if let Some(due) = update.due_date {
            task.due_date = Some(utc_midnight(due));
        }
        self.write(&file)
    }

    fn read(&self) -> Result<StoreFile, StoreError> {
        let json = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn write(&self, file: &StoreFile) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(file)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Starter data set written on first run, spread around today so the
/// default window has something to show.
fn sample_data() -> StoreFile {
    let today = Utc::now().date_naive();
    let day = |offset: i64| utc_midnight(today + Duration::days(offset));

    let alice = User {
        id: Uuid::new_v4(),
        name: "Alice Nguyen".to_string(),
        email: Some("alice@example.com".to_string()),
    };
    let bruno = User {
        id: Uuid::new_v4(),
        name: "Bruno Keller".to_string(),
        email: Some("bruno@example.com".to_string()),
    };

    let make = |title: &str,
                start: i64,
                due: i64,
                status: TaskStatus,
                priority: TaskPriority,
                category: &str,
                folder: &str| {
        let mut task = TaskRecord::new(title, day(start));
        task.due_date = Some(day(due));
        task.status = status;
        task.priority = priority;
        task.category = Some(category.to_string());
        task.folder = Some(folder.to_string());
        task
    };

    let mut kickoff = make(
        "Project kickoff",
        -9,
        -6,
        TaskStatus::Completed,
        TaskPriority::High,
        "planning",
        "Website relaunch",
    );
    kickoff.assignees = vec![Assignee::Resolved(alice.clone())];

    let mut requirements = make(
        "Requirements gathering",
        -6,
        2,
        TaskStatus::InProgress,
        TaskPriority::High,
        "planning",
        "Website relaunch",
    );
    requirements.description = "Interviews with stakeholders, writeup of scope".to_string();
    requirements.assignees = vec![Assignee::Resolved(alice.clone())];

    let mut wireframes = make(
        "Wireframes",
        -2,
        6,
        TaskStatus::InProgress,
        TaskPriority::Medium,
        "design",
        "Website relaunch",
    );
    wireframes.assignees = vec![Assignee::Unresolved(bruno.id)];

    let mut content_audit = make(
        "Content audit",
        0,
        9,
        TaskStatus::Todo,
        TaskPriority::Low,
        "content",
        "Website relaunch",
    );
    content_audit.tags = vec!["seo".to_string()];

    let mut api_design = make(
        "API design review",
        3,
        8,
        TaskStatus::Todo,
        TaskPriority::Urgent,
        "engineering",
        "Backend",
    );
    api_design.assignees = vec![Assignee::Unresolved(bruno.id)];

    let migration = make(
        "Database migration dry run",
        7,
        12,
        TaskStatus::Todo,
        TaskPriority::High,
        "engineering",
        "Backend",
    );

    let mut newsletter = TaskRecord::new("Draft October newsletter", day(1));
    newsletter.status = TaskStatus::Todo;
    newsletter.priority = TaskPriority::Low;
    newsletter.category = Some("content".to_string());

    StoreFile {
        users: vec![alice, bruno],
        tasks: vec![
            kickoff,
            requirements,
            wireframes,
            content_audit,
            api_design,
            migration,
            newsletter,
        ],
    }
}
