/// Task model and collection operations
///
/// Tasks belong to a project through a weak `project_id` reference: the
/// ID must be well-formed but the project is never looked up. The same
/// rule applies to `assigned_to`.
///
/// Status and priority are free-form enum fields with no transition
/// graph; any valid value can be set at any time.
///
/// # Document shape
///
/// ```text
/// {
///   _id: ObjectId,
///   task_title: string,
///   task_description: string,   // default ""
///   project_id: string,         // ObjectId hex, never checked for existence
///   assigned_to: string,        // ObjectId hex or ""
///   status: string,             // TODO | IN_PROGRESS | REVIEW | DONE | CANCELLED
///   priority: string,           // LOW | MEDIUM | HIGH | URGENT
///   due_date?: Date,            // absent when not supplied
///   estimated_hours: number | null,
///   actual_hours: number,       // default 0
///   created_at: Date,
///   updated_at: Date,
///   created_by: string          // fixed "system" placeholder
/// }
/// ```

use crate::{models::CREATED_BY_SYSTEM, pagination::PageRequest};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, DateTime, Document},
    options::FindOptions,
    results::{InsertOneResult, UpdateResult},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

/// Name of the tasks collection
pub const COLLECTION: &str = "tasks";

/// Task workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not started (the default)
    Todo,

    /// Being worked on
    InProgress,

    /// Awaiting review
    Review,

    /// Finished
    Done,

    /// Abandoned
    Cancelled,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

impl TaskStatus {
    /// Converts the status to its stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Review => "REVIEW",
            TaskStatus::Done => "DONE",
            TaskStatus::Cancelled => "CANCELLED",
        }
    }

    /// Parses a status from its string form, `None` when not a member
    /// of the allowed set
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "TODO" => Some(TaskStatus::Todo),
            "IN_PROGRESS" => Some(TaskStatus::InProgress),
            "REVIEW" => Some(TaskStatus::Review),
            "DONE" => Some(TaskStatus::Done),
            "CANCELLED" => Some(TaskStatus::Cancelled),
            _ => None,
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,

    /// The default when a task is created without a priority
    Medium,

    High,

    Urgent,
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

impl TaskPriority {
    /// Converts the priority to its stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "LOW",
            TaskPriority::Medium => "MEDIUM",
            TaskPriority::High => "HIGH",
            TaskPriority::Urgent => "URGENT",
        }
    }

    /// Parses a priority from its string form, `None` when not a member
    /// of the allowed set
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "LOW" => Some(TaskPriority::Low),
            "MEDIUM" => Some(TaskPriority::Medium),
            "HIGH" => Some(TaskPriority::High),
            "URGENT" => Some(TaskPriority::Urgent),
            _ => None,
        }
    }
}

/// Task document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task ID, assigned by the database at insertion
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Task title
    pub task_title: String,

    /// Description, empty string when not supplied
    pub task_description: String,

    /// Weak reference to the owning project (ObjectId hex)
    pub project_id: String,

    /// Weak reference to the assigned user (ObjectId hex or "")
    pub assigned_to: String,

    /// Workflow status
    pub status: TaskStatus,

    /// Priority
    pub priority: TaskPriority,

    /// Due date; absent when not supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime>,

    /// Estimated effort in hours, null when not supplied
    pub estimated_hours: Option<f64>,

    /// Actual effort in hours, starts at 0
    pub actual_hours: f64,

    /// When the task was created
    pub created_at: DateTime,

    /// When the task was last updated
    pub updated_at: DateTime,

    /// Fixed "system" placeholder (no session model exists)
    pub created_by: String,
}

/// Input for creating a new task
///
/// References and dates arrive here already validated; this type only
/// carries defaults into the document.
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Task title (required)
    pub task_title: String,

    /// Optional description
    pub task_description: Option<String>,

    /// Owning project reference (required, ObjectId hex)
    pub project_id: String,

    /// Optional assignee reference (ObjectId hex)
    pub assigned_to: Option<String>,

    /// Optional status (defaults to TODO)
    pub status: Option<TaskStatus>,

    /// Optional priority (defaults to MEDIUM)
    pub priority: Option<TaskPriority>,

    /// Optional due date
    pub due_date: Option<DateTime>,

    /// Optional estimated hours
    pub estimated_hours: Option<f64>,
}

/// Input for a partial task update
///
/// Only `Some` fields are written. `task_description`,
/// `estimated_hours`, and `actual_hours` are doubly optional so a
/// client can clear them with an explicit null. Of the three, only
/// `estimated_hours` is nullable in the document; clearing the other
/// two writes their defaults ("" and 0) so every stored document stays
/// readable as a `Task`.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    /// New title
    pub task_title: Option<String>,

    /// New description; `Some(None)` clears to ""
    pub task_description: Option<Option<String>>,

    /// New assignee reference
    pub assigned_to: Option<String>,

    /// New status
    pub status: Option<TaskStatus>,

    /// New priority
    pub priority: Option<TaskPriority>,

    /// New due date
    pub due_date: Option<DateTime>,

    /// New estimated hours; `Some(None)` stores null
    pub estimated_hours: Option<Option<f64>>,

    /// New actual hours; `Some(None)` resets to 0
    pub actual_hours: Option<Option<f64>>,
}

impl UpdateTask {
    /// Builds the `$set` document for this update
    ///
    /// `updated_at` is always stamped. Cleared fields are written as
    /// their document defaults (or null for `estimated_hours`, the one
    /// nullable field).
    pub fn set_document(self) -> Document {
        let mut set = doc! { "updated_at": DateTime::now() };

        if let Some(task_title) = self.task_title {
            set.insert("task_title", task_title);
        }
        if let Some(task_description) = self.task_description {
            set.insert("task_description", task_description.unwrap_or_default());
        }
        if let Some(assigned_to) = self.assigned_to {
            set.insert("assigned_to", assigned_to);
        }
        if let Some(status) = self.status {
            set.insert("status", status.as_str());
        }
        if let Some(priority) = self.priority {
            set.insert("priority", priority.as_str());
        }
        if let Some(due_date) = self.due_date {
            set.insert("due_date", due_date);
        }
        if let Some(estimated_hours) = self.estimated_hours {
            match estimated_hours {
                Some(value) => set.insert("estimated_hours", value),
                None => set.insert("estimated_hours", Bson::Null),
            };
        }
        if let Some(actual_hours) = self.actual_hours {
            set.insert("actual_hours", actual_hours.unwrap_or_default());
        }

        set
    }
}

impl Task {
    fn collection(db: &Database) -> Collection<Task> {
        db.collection::<Task>(COLLECTION)
    }

    /// Builds a task document with defaults applied
    pub fn new(data: CreateTask) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            task_title: data.task_title,
            task_description: data.task_description.unwrap_or_default(),
            project_id: data.project_id,
            assigned_to: data.assigned_to.unwrap_or_default(),
            status: data.status.unwrap_or_default(),
            priority: data.priority.unwrap_or_default(),
            due_date: data.due_date,
            estimated_hours: data.estimated_hours,
            actual_hours: 0.0,
            created_at: now,
            updated_at: now,
            created_by: CREATED_BY_SYSTEM.to_string(),
        }
    }

    /// Inserts a task document
    pub async fn insert(db: &Database, task: &Task) -> mongodb::error::Result<InsertOneResult> {
        Self::collection(db).insert_one(task, None).await
    }

    /// Looks up a task by ID
    pub async fn find_by_id(db: &Database, id: ObjectId) -> mongodb::error::Result<Option<Task>> {
        Self::collection(db).find_one(doc! { "_id": id }, None).await
    }

    /// Applies a partial update to a task
    ///
    /// `updated_at` is always stamped with the current time, even when
    /// no other field is supplied.
    pub async fn update(
        db: &Database,
        id: ObjectId,
        data: UpdateTask,
    ) -> mongodb::error::Result<UpdateResult> {
        Self::collection(db)
            .update_one(doc! { "_id": id }, doc! { "$set": data.set_document() }, None)
            .await
    }

    /// Lists tasks matching a filter, newest first
    pub async fn list(
        db: &Database,
        filter: Document,
        page: &PageRequest,
    ) -> mongodb::error::Result<Vec<Task>> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .skip(page.skip())
            .limit(page.limit_i64())
            .build();

        let cursor = Self::collection(db).find(filter, options).await?;
        cursor.try_collect().await
    }

    /// Counts tasks matching a filter
    pub async fn count(db: &Database, filter: Document) -> mongodb::error::Result<u64> {
        Self::collection(db).count_documents(filter, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    fn sample_create() -> CreateTask {
        CreateTask {
            task_title: "Write report".to_string(),
            task_description: None,
            project_id: ObjectId::new().to_hex(),
            assigned_to: None,
            status: None,
            priority: None,
            due_date: None,
            estimated_hours: None,
        }
    }

    #[test]
    fn test_status_round_trip() {
        for value in ["TODO", "IN_PROGRESS", "REVIEW", "DONE", "CANCELLED"] {
            let status = TaskStatus::parse(value).unwrap();
            assert_eq!(status.as_str(), value);
        }
        assert_eq!(TaskStatus::parse("PLANNING"), None);
    }

    #[test]
    fn test_priority_round_trip() {
        for value in ["LOW", "MEDIUM", "HIGH", "URGENT"] {
            let priority = TaskPriority::parse(value).unwrap();
            assert_eq!(priority.as_str(), value);
        }
        assert_eq!(TaskPriority::parse("CRITICAL"), None);
    }

    #[test]
    fn test_new_applies_defaults() {
        let task = Task::new(sample_create());

        assert!(task.id.is_none());
        assert_eq!(task.task_description, "");
        assert_eq!(task.assigned_to, "");
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.estimated_hours, None);
        assert_eq!(task.actual_hours, 0.0);
        assert_eq!(task.created_by, CREATED_BY_SYSTEM);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_document_shape() {
        let task = Task::new(sample_create());
        let document = bson::to_document(&task).unwrap();

        assert!(!document.contains_key("_id"));
        assert!(!document.contains_key("due_date"));
        assert_eq!(document.get("estimated_hours"), Some(&Bson::Null));
        assert_eq!(document.get_f64("actual_hours").unwrap(), 0.0);
        assert_eq!(document.get_str("status").unwrap(), "TODO");
        assert_eq!(document.get_str("priority").unwrap(), "MEDIUM");
    }

    #[test]
    fn test_cleared_fields_keep_document_readable() {
        let task = Task::new(CreateTask {
            task_description: Some("draft".to_string()),
            estimated_hours: Some(8.0),
            ..sample_create()
        });
        let mut document = bson::to_document(&task).unwrap();

        let set = UpdateTask {
            task_description: Some(None),
            estimated_hours: Some(None),
            actual_hours: Some(None),
            ..UpdateTask::default()
        }
        .set_document();

        // apply the $set the way the driver would
        for (key, value) in set {
            document.insert(key, value);
        }

        let updated: Task = bson::from_document(document).unwrap();
        assert_eq!(updated.task_description, "");
        assert_eq!(updated.estimated_hours, None);
        assert_eq!(updated.actual_hours, 0.0);
    }

    #[test]
    fn test_set_document_stamps_updated_at_only_when_empty() {
        let set = UpdateTask::default().set_document();

        assert_eq!(set.len(), 1);
        assert!(set.contains_key("updated_at"));
    }
}
