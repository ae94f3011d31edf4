/// Task endpoints
///
/// Tasks reference their project (and optionally an assignee) through
/// weak ObjectId references: the shape is validated, existence is not.
///
/// # Endpoints
///
/// - `GET  /api/tasks` - List with filters + pagination
/// - `POST /api/tasks` - Create
/// - `PUT  /api/tasks/:id` - Partial update
///
/// List filters that reference another entity (`project_id`,
/// `assigned_to`) are applied only when well-formed; malformed ones are
/// silently dropped from the filter.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::{non_empty, Envelope},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use tatboard_shared::{
    models::task::{CreateTask, Task, TaskPriority, TaskStatus, UpdateTask},
    pagination::{PageRequest, PageSummary},
    validation::{deserialize_explicit_null, is_valid_object_id, parse_date, parse_object_id},
};

/// List query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    #[serde(default)]
    pub project_id: Option<String>,

    #[serde(default)]
    pub assigned_to: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub priority: Option<String>,

    #[serde(default)]
    pub page: Option<String>,

    #[serde(default)]
    pub limit: Option<String>,
}

/// Create task request
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    /// Task title (required)
    #[serde(default)]
    pub task_title: Option<String>,

    /// Optional description
    #[serde(default)]
    pub task_description: Option<String>,

    /// Owning project reference (required, ObjectId hex)
    #[serde(default)]
    pub project_id: Option<String>,

    /// Optional assignee reference (ObjectId hex)
    #[serde(default)]
    pub assigned_to: Option<String>,

    /// Optional status (defaults to TODO)
    #[serde(default)]
    pub status: Option<String>,

    /// Optional priority (defaults to MEDIUM)
    #[serde(default)]
    pub priority: Option<String>,

    /// Optional due date
    #[serde(default)]
    pub due_date: Option<String>,

    /// Optional estimated hours
    #[serde(default)]
    pub estimated_hours: Option<f64>,
}

/// Partial update request
///
/// `task_description`, `estimated_hours`, and `actual_hours` distinguish
/// an explicit null from the field being omitted: null clears the field
/// (to "", null, and 0 respectively), omission leaves it alone.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub task_title: Option<String>,

    #[serde(default, deserialize_with = "deserialize_explicit_null")]
    pub task_description: Option<Option<String>>,

    #[serde(default)]
    pub assigned_to: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub priority: Option<String>,

    #[serde(default)]
    pub due_date: Option<String>,

    #[serde(default, deserialize_with = "deserialize_explicit_null")]
    pub estimated_hours: Option<Option<f64>>,

    #[serde(default, deserialize_with = "deserialize_explicit_null")]
    pub actual_hours: Option<Option<f64>>,
}

/// Task as returned to clients
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    #[serde(rename = "_id")]
    pub id: String,

    pub task_title: String,

    pub task_description: String,

    pub project_id: String,

    pub assigned_to: String,

    pub status: TaskStatus,

    pub priority: TaskPriority,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    pub estimated_hours: Option<f64>,

    pub actual_hours: f64,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    pub created_by: String,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id.map(|id| id.to_hex()).unwrap_or_default(),
            task_title: task.task_title,
            task_description: task.task_description,
            project_id: task.project_id,
            assigned_to: task.assigned_to,
            status: task.status,
            priority: task.priority,
            due_date: task.due_date.map(|d| d.to_chrono()),
            estimated_hours: task.estimated_hours,
            actual_hours: task.actual_hours,
            created_at: task.created_at.to_chrono(),
            updated_at: task.updated_at.to_chrono(),
            created_by: task.created_by,
        }
    }
}

/// Payload of a list response
#[derive(Debug, Serialize)]
pub struct TaskList {
    pub tasks: Vec<TaskResponse>,

    pub pagination: PageSummary,
}

/// List tasks
///
/// Supports `project_id`, `assigned_to`, `status`, and `priority`
/// filters plus `page`/`limit` pagination; results are sorted by
/// creation time, newest first.
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<Envelope<TaskList>>> {
    let mut filter = Document::new();
    if let Some(project_id) = non_empty(&query.project_id) {
        if is_valid_object_id(project_id) {
            filter.insert("project_id", project_id);
        }
    }
    if let Some(assigned_to) = non_empty(&query.assigned_to) {
        if is_valid_object_id(assigned_to) {
            filter.insert("assigned_to", assigned_to);
        }
    }
    if let Some(status) = non_empty(&query.status) {
        filter.insert("status", status);
    }
    if let Some(priority) = non_empty(&query.priority) {
        filter.insert("priority", priority);
    }

    let page = PageRequest::from_params(query.page.as_deref(), query.limit.as_deref());

    let tasks = Task::list(&state.db, filter.clone(), &page).await?;
    let total = Task::count(&state.db, filter).await?;

    Ok(Json(Envelope::ok(
        "Tasks retrieved successfully",
        TaskList {
            tasks: tasks.into_iter().map(TaskResponse::from).collect(),
            pagination: PageSummary::new(&page, total),
        },
    )))
}

/// Create a task
///
/// Validates the required fields, the reference shapes, the optional
/// due date, and the enum values, then inserts and re-reads the created
/// document.
///
/// # Errors
///
/// - `400 Bad Request`: validation failure
/// - `500 Internal Server Error`: unacknowledged insert or driver failure
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<TaskResponse>>)> {
    let (Some(task_title), Some(project_id)) =
        (non_empty(&req.task_title), non_empty(&req.project_id))
    else {
        return Err(ApiError::BadRequest(
            "Task title and project ID are required".to_string(),
        ));
    };

    if !is_valid_object_id(project_id) {
        return Err(ApiError::BadRequest(
            "Invalid project ID format".to_string(),
        ));
    }

    let assigned_to = match non_empty(&req.assigned_to) {
        Some(assigned_to) => {
            if !is_valid_object_id(assigned_to) {
                return Err(ApiError::BadRequest(
                    "Invalid assigned user ID format".to_string(),
                ));
            }
            Some(assigned_to.to_string())
        }
        None => None,
    };

    let due_date = match non_empty(&req.due_date) {
        Some(raw) => Some(
            parse_date(raw)
                .ok_or_else(|| ApiError::BadRequest("Invalid due date format".to_string()))?,
        ),
        None => None,
    };

    let status = match non_empty(&req.status) {
        Some(raw) => Some(
            TaskStatus::parse(raw)
                .ok_or_else(|| ApiError::BadRequest("Invalid task status".to_string()))?,
        ),
        None => None,
    };

    let priority = match non_empty(&req.priority) {
        Some(raw) => Some(
            TaskPriority::parse(raw)
                .ok_or_else(|| ApiError::BadRequest("Invalid task priority".to_string()))?,
        ),
        None => None,
    };

    let task = Task::new(CreateTask {
        task_title: task_title.to_string(),
        task_description: non_empty(&req.task_description).map(str::to_string),
        project_id: project_id.to_string(),
        assigned_to,
        status,
        priority,
        due_date,
        estimated_hours: req.estimated_hours,
    });

    let result = Task::insert(&state.db, &task).await?;
    let Some(inserted_id) = result.inserted_id.as_object_id() else {
        return Err(ApiError::WriteUnacknowledged(
            "Failed to create task".to_string(),
        ));
    };

    let created = Task::find_by_id(&state.db, inserted_id)
        .await?
        .ok_or_else(|| ApiError::InternalError("Created task missing on re-read".to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok(
            "Task created successfully",
            TaskResponse::from(created),
        )),
    ))
}

/// Partially update a task
///
/// The task's existence is confirmed before any field validation, so an
/// update against a missing task is a clean 404. Only fields present in
/// the body are changed; `updated_at` is stamped regardless. The updated
/// document is re-read and returned in full.
///
/// # Errors
///
/// - `400 Bad Request`: malformed ID/reference, invalid enum, bad date
/// - `404 Not Found`: no such task
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Envelope<TaskResponse>>> {
    let id = parse_object_id(&id)
        .ok_or_else(|| ApiError::BadRequest("Invalid task ID format".to_string()))?;

    if Task::find_by_id(&state.db, id).await?.is_none() {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    let assigned_to = match non_empty(&req.assigned_to) {
        Some(assigned_to) => {
            if !is_valid_object_id(assigned_to) {
                return Err(ApiError::BadRequest(
                    "Invalid assigned user ID format".to_string(),
                ));
            }
            Some(assigned_to.to_string())
        }
        None => None,
    };

    let status = match non_empty(&req.status) {
        Some(raw) => Some(
            TaskStatus::parse(raw)
                .ok_or_else(|| ApiError::BadRequest("Invalid task status".to_string()))?,
        ),
        None => None,
    };

    let priority = match non_empty(&req.priority) {
        Some(raw) => Some(
            TaskPriority::parse(raw)
                .ok_or_else(|| ApiError::BadRequest("Invalid task priority".to_string()))?,
        ),
        None => None,
    };

    let due_date = match non_empty(&req.due_date) {
        Some(raw) => Some(
            parse_date(raw)
                .ok_or_else(|| ApiError::BadRequest("Invalid due date format".to_string()))?,
        ),
        None => None,
    };

    let update = UpdateTask {
        task_title: non_empty(&req.task_title).map(str::to_string),
        task_description: req.task_description,
        assigned_to,
        status,
        priority,
        due_date,
        estimated_hours: req.estimated_hours,
        actual_hours: req.actual_hours,
    };

    let result = Task::update(&state.db, id, update).await?;
    if result.matched_count == 0 {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    let updated = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::InternalError("Updated task missing on re-read".to_string()))?;

    Ok(Json(Envelope::ok(
        "Task updated successfully",
        TaskResponse::from(updated),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_task_response_shape() {
        let mut task = Task::new(CreateTask {
            task_title: "Write report".to_string(),
            task_description: None,
            project_id: ObjectId::new().to_hex(),
            assigned_to: None,
            status: None,
            priority: None,
            due_date: None,
            estimated_hours: None,
        });
        task.id = Some(ObjectId::new());

        let json = serde_json::to_value(TaskResponse::from(task)).unwrap();

        assert_eq!(json["status"], "TODO");
        assert_eq!(json["priority"], "MEDIUM");
        assert_eq!(json["actual_hours"], 0.0);
        assert_eq!(json["estimated_hours"], serde_json::Value::Null);
        assert!(json.get("due_date").is_none());
    }

    #[test]
    fn test_update_request_distinguishes_null_hours() {
        let body: UpdateTaskRequest =
            serde_json::from_str(r#"{"estimated_hours": null, "actual_hours": 2.5}"#).unwrap();
        assert_eq!(body.estimated_hours, Some(None));
        assert_eq!(body.actual_hours, Some(Some(2.5)));

        let body: UpdateTaskRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(body.estimated_hours, None);
        assert_eq!(body.actual_hours, None);
    }
}
