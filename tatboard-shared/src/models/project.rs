/// Project model and collection operations
///
/// Projects are create-and-read only in the current API surface: there
/// is no update or delete route. The project name is a unique business
/// key, enforced with a pre-insert lookup (not a database index).
///
/// # Document shape
///
/// ```text
/// {
///   _id: ObjectId,
///   project_name: string,     // unique business key
///   description: string,      // default ""
///   leader_id: string,        // ObjectId hex of a user, or "" — never
///                             // checked for existence
///   start_date: Date,
///   end_date?: Date,          // absent when not supplied
///   budget: number | null,
///   status: string,           // PLANNING | IN_PROGRESS | COMPLETED
///                             //   | CANCELLED | ON_HOLD
///   created_at: Date,
///   updated_at: Date,
///   created_by: string        // fixed "system" placeholder
/// }
/// ```

use crate::{models::CREATED_BY_SYSTEM, pagination::PageRequest};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    options::FindOptions,
    results::InsertOneResult,
    Collection, Database,
};
use serde::{Deserialize, Serialize};

/// Name of the projects collection
pub const COLLECTION: &str = "projects";

/// Project lifecycle status
///
/// Free-form in the sense that there is no transition graph: any valid
/// value can be set at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    /// Not started yet (the default)
    Planning,

    /// Work is underway
    InProgress,

    /// Delivered
    Completed,

    /// Abandoned
    Cancelled,

    /// Paused
    OnHold,
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Planning
    }
}

impl ProjectStatus {
    /// Converts the status to its stored string form
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "PLANNING",
            ProjectStatus::InProgress => "IN_PROGRESS",
            ProjectStatus::Completed => "COMPLETED",
            ProjectStatus::Cancelled => "CANCELLED",
            ProjectStatus::OnHold => "ON_HOLD",
        }
    }

    /// Parses a status from its string form, `None` when not a member
    /// of the allowed set
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PLANNING" => Some(ProjectStatus::Planning),
            "IN_PROGRESS" => Some(ProjectStatus::InProgress),
            "COMPLETED" => Some(ProjectStatus::Completed),
            "CANCELLED" => Some(ProjectStatus::Cancelled),
            "ON_HOLD" => Some(ProjectStatus::OnHold),
            _ => None,
        }
    }
}

/// Project document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique project ID, assigned by the database at insertion
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Project name, unique across all projects
    pub project_name: String,

    /// Description, empty string when not supplied
    pub description: String,

    /// Weak reference to the leading user (ObjectId hex or "")
    pub leader_id: String,

    /// When the project starts
    pub start_date: DateTime,

    /// When the project ends; must be strictly after `start_date` when
    /// present (enforced before the document is built)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime>,

    /// Budget, null when not supplied
    pub budget: Option<f64>,

    /// Lifecycle status
    pub status: ProjectStatus,

    /// When the project was created
    pub created_at: DateTime,

    /// When the project was last updated
    pub updated_at: DateTime,

    /// Fixed "system" placeholder (no session model exists)
    pub created_by: String,
}

/// Input for creating a new project
///
/// Dates arrive here already parsed and the start/end ordering already
/// checked; this type only carries defaults into the document.
#[derive(Debug, Clone)]
pub struct CreateProject {
    /// Project name (required, unique)
    pub project_name: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional leader reference (ObjectId hex)
    pub leader_id: Option<String>,

    /// Start date (required)
    pub start_date: DateTime,

    /// Optional end date, strictly after the start date
    pub end_date: Option<DateTime>,

    /// Optional budget
    pub budget: Option<f64>,

    /// Optional status (defaults to PLANNING)
    pub status: Option<ProjectStatus>,
}

impl Project {
    fn collection(db: &Database) -> Collection<Project> {
        db.collection::<Project>(COLLECTION)
    }

    /// Builds a project document with defaults applied
    pub fn new(data: CreateProject) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            project_name: data.project_name,
            description: data.description.unwrap_or_default(),
            leader_id: data.leader_id.unwrap_or_default(),
            start_date: data.start_date,
            end_date: data.end_date,
            budget: data.budget,
            status: data.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
            created_by: CREATED_BY_SYSTEM.to_string(),
        }
    }

    /// Inserts a project document
    pub async fn insert(
        db: &Database,
        project: &Project,
    ) -> mongodb::error::Result<InsertOneResult> {
        Self::collection(db).insert_one(project, None).await
    }

    /// Looks up a project by its unique name
    pub async fn find_by_name(
        db: &Database,
        project_name: &str,
    ) -> mongodb::error::Result<Option<Project>> {
        Self::collection(db)
            .find_one(doc! { "project_name": project_name }, None)
            .await
    }

    /// Looks up a project by ID
    pub async fn find_by_id(db: &Database, id: ObjectId) -> mongodb::error::Result<Option<Project>> {
        Self::collection(db).find_one(doc! { "_id": id }, None).await
    }

    /// Lists projects matching a filter, newest first
    pub async fn list(
        db: &Database,
        filter: Document,
        page: &PageRequest,
    ) -> mongodb::error::Result<Vec<Project>> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .skip(page.skip())
            .limit(page.limit_i64())
            .build();

        let cursor = Self::collection(db).find(filter, options).await?;
        cursor.try_collect().await
    }

    /// Counts projects matching a filter
    pub async fn count(db: &Database, filter: Document) -> mongodb::error::Result<u64> {
        Self::collection(db).count_documents(filter, None).await
    }
}
