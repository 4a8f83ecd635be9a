use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{Assignee, UserDirectory};
use crate::timeline::Interval;

/// Workflow state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Todo => "To do",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Completed => "Completed",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            TaskStatus::Todo => egui_phosphor::regular::CIRCLE,
            TaskStatus::InProgress => egui_phosphor::regular::CLOCK,
            TaskStatus::Completed => egui_phosphor::regular::CHECK_CIRCLE,
        }
    }
}

/// Priority of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub fn label(self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
            TaskPriority::Urgent => "Urgent",
        }
    }
}

/// A task record as supplied by the task store.
///
/// The timeline never mutates these; date changes travel back through a
/// [`crate::timeline::DateUpdate`] and the list is replaced wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub assignees: Vec<Assignee>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskRecord {
    /// Minimal record used for seeding and tests.
    pub fn new(title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            category: None,
            folder: None,
            tags: Vec::new(),
            assignees: Vec::new(),
            created_at: Some(created_at),
            start_time: None,
            due_date: None,
        }
    }

    /// The day-granular interval the task's bar occupies.
    ///
    /// Start: explicit start time, else creation time, else due date, else
    /// `today`. End: due date, else start + 1 day. Timestamps are reduced
    /// to day boundaries before any arithmetic, and the result always
    /// satisfies `end >= start`. A task with no usable dates still lands
    /// somewhere instead of being dropped.
    pub fn interval(&self, today: NaiveDate) -> Interval {
        let start = self
            .start_time
            .or(self.created_at)
            .or(self.due_date)
            .map(|dt| dt.date_naive())
            .unwrap_or(today);
        let end = self
            .due_date
            .map(|dt| dt.date_naive())
            .unwrap_or_else(|| start + Duration::days(1));
        Interval::new(start, end)
    }

    /// Case-insensitive match against title, description and category.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self
                .category
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&query))
    }
}

/// Resolve every assignee on every task against the directory, once,
/// before any layout or render pass looks at them.
pub fn resolve_assignees(tasks: &mut [TaskRecord], directory: &UserDirectory) {
    for task in tasks {
        for assignee in &mut task.assignees {
            assignee.resolve(directory);
        }
    }
}

/// Midnight UTC for a plain date; the canonical form for committed dates.
pub fn utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// How tasks are partitioned into timeline groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    None,
    Folder,
    Category,
    Assignee,
    Status,
}

impl GroupBy {
    pub const ALL: [GroupBy; 5] = [
        GroupBy::None,
        GroupBy::Folder,
        GroupBy::Category,
        GroupBy::Assignee,
        GroupBy::Status,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GroupBy::None => "No grouping",
            GroupBy::Folder => "Folder",
            GroupBy::Category => "Category",
            GroupBy::Assignee => "Assignee",
            GroupBy::Status => "Status",
        }
    }

    /// Group key for one task under this mode.
    pub fn key_for(self, task: &TaskRecord) -> String {
        match self {
            GroupBy::None => "All tasks".to_string(),
            GroupBy::Folder => task
                .folder
                .clone()
                .unwrap_or_else(|| "No folder".to_string()),
            GroupBy::Category => match &task.category {
                Some(category) => capitalize(category),
                None => "No category".to_string(),
            },
            GroupBy::Assignee => match task.assignees.first() {
                Some(assignee) => assignee
                    .name()
                    .map(str::to_string)
                    .unwrap_or_else(|| "Assigned".to_string()),
                None => "Unassigned".to_string(),
            },
            GroupBy::Status => task.status.label().to_string(),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::user::User;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn today() -> NaiveDate {
        d(2025, 6, 1)
    }

    #[test]
    fn interval_prefers_explicit_start_time() {
        let mut task = TaskRecord::new("t", utc_midnight(d(2025, 5, 1)));
        task.start_time = Some(utc_midnight(d(2025, 5, 10)));
        task.due_date = Some(utc_midnight(d(2025, 5, 14)));
        let iv = task.interval(today());
        assert_eq!(iv.start, d(2025, 5, 10));
        assert_eq!(iv.end, d(2025, 5, 14));
    }

    #[test]
    fn interval_falls_back_to_creation_then_due() {
        let mut task = TaskRecord::new("t", utc_midnight(d(2025, 5, 1)));
        task.due_date = Some(utc_midnight(d(2025, 5, 4)));
        let iv = task.interval(today());
        assert_eq!(iv.start, d(2025, 5, 1));
        assert_eq!(iv.end, d(2025, 5, 4));

        task.created_at = None;
        let iv = task.interval(today());
        assert_eq!(iv.start, d(2025, 5, 4));
        assert_eq!(iv.end, d(2025, 5, 4));
    }

    #[test]
    fn dateless_task_defaults_to_today_plus_one() {
        let mut task = TaskRecord::new("t", utc_midnight(d(2025, 5, 1)));
        task.created_at = None;
        let iv = task.interval(today());
        assert_eq!(iv.start, today());
        assert_eq!(iv.end, today() + Duration::days(1));
    }

    #[test]
    fn due_before_start_clamps_to_single_day() {
        let mut task = TaskRecord::new("t", utc_midnight(d(2025, 5, 10)));
        task.due_date = Some(utc_midnight(d(2025, 5, 3)));
        let iv = task.interval(today());
        assert_eq!(iv.start, d(2025, 5, 10));
        assert_eq!(iv.end, d(2025, 5, 10));
    }

    #[test]
    fn group_keys_per_mode() {
        let mut task = TaskRecord::new("t", utc_midnight(d(2025, 5, 1)));
        task.category = Some("general".to_string());
        task.folder = Some("Launch".to_string());
        task.assignees = vec![Assignee::Resolved(User {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            email: None,
        })];

        assert_eq!(GroupBy::None.key_for(&task), "All tasks");
        assert_eq!(GroupBy::Folder.key_for(&task), "Launch");
        assert_eq!(GroupBy::Category.key_for(&task), "General");
        assert_eq!(GroupBy::Assignee.key_for(&task), "Alice");
        assert_eq!(GroupBy::Status.key_for(&task), "To do");

        task.assignees = vec![Assignee::Unresolved(Uuid::new_v4())];
        assert_eq!(GroupBy::Assignee.key_for(&task), "Assigned");
        task.assignees.clear();
        assert_eq!(GroupBy::Assignee.key_for(&task), "Unassigned");
    }

    #[test]
    fn search_matches_title_description_category() {
        let mut task = TaskRecord::new("Ship the beta", utc_midnight(d(2025, 5, 1)));
        task.description = "final QA pass".to_string();
        task.category = Some("release".to_string());
        assert!(task.matches("BETA"));
        assert!(task.matches("qa"));
        assert!(task.matches("Release"));
        assert!(!task.matches("marketing"));
        assert!(task.matches(""));
    }
}
