/// Project endpoints
///
/// Projects are create-and-read only: there is no update or delete
/// route. The project name is a unique business key checked with a
/// pre-insert lookup.
///
/// # Endpoints
///
/// - `GET  /api/prjects` - List with filters + pagination
/// - `POST /api/prjects` - Create
/// - `GET  /api/prjects/:id` - Fetch one
///
/// A `leader_id` list filter that is not a well-formed ObjectId is
/// silently dropped from the filter rather than rejected.

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
    models::project::{CreateProject, Project, ProjectStatus},
    pagination::{PageRequest, PageSummary},
    validation::{is_valid_object_id, parse_date, parse_object_id},
};

/// List query parameters
///
/// `page` and `limit` are read as strings so that non-numeric values
/// fall back to the defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListProjectsQuery {
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub leader_id: Option<String>,

    #[serde(default)]
    pub page: Option<String>,

    #[serde(default)]
    pub limit: Option<String>,
}

/// Create project request
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    /// Project name (required, unique)
    #[serde(default)]
    pub project_name: Option<String>,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Optional leader reference (ObjectId hex)
    #[serde(default)]
    pub leader_id: Option<String>,

    /// Start date (required)
    #[serde(default)]
    pub start_date: Option<String>,

    /// Optional end date, strictly after the start date
    #[serde(default)]
    pub end_date: Option<String>,

    /// Optional budget
    #[serde(default)]
    pub budget: Option<f64>,

    /// Optional status (defaults to PLANNING)
    #[serde(default)]
    pub status: Option<String>,
}

/// Project as returned to clients
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    #[serde(rename = "_id")]
    pub id: String,

    pub project_name: String,

    pub description: String,

    pub leader_id: String,

    pub start_date: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,

    pub budget: Option<f64>,

    pub status: ProjectStatus,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    pub created_by: String,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id.map(|id| id.to_hex()).unwrap_or_default(),
            project_name: project.project_name,
            description: project.description,
            leader_id: project.leader_id,
            start_date: project.start_date.to_chrono(),
            end_date: project.end_date.map(|d| d.to_chrono()),
            budget: project.budget,
            status: project.status,
            created_at: project.created_at.to_chrono(),
            updated_at: project.updated_at.to_chrono(),
            created_by: project.created_by,
        }
    }
}

/// Payload of a list response
#[derive(Debug, Serialize)]
pub struct ProjectList {
    pub projects: Vec<ProjectResponse>,

    pub pagination: PageSummary,
}

/// List projects
///
/// Supports `status` and `leader_id` filters plus `page`/`limit`
/// pagination; results are sorted by creation time, newest first.
pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ListProjectsQuery>,
) -> ApiResult<Json<Envelope<ProjectList>>> {
    let mut filter = Document::new();
    if let Some(status) = non_empty(&query.status) {
        filter.insert("status", status);
    }
    if let Some(leader_id) = non_empty(&query.leader_id) {
        if is_valid_object_id(leader_id) {
            filter.insert("leader_id", leader_id);
        }
    }

    let page = PageRequest::from_params(query.page.as_deref(), query.limit.as_deref());

    let projects = Project::list(&state.db, filter.clone(), &page).await?;
    let total = Project::count(&state.db, filter).await?;

    Ok(Json(Envelope::ok(
        "Projects retrieved successfully",
        ProjectList {
            projects: projects.into_iter().map(ProjectResponse::from).collect(),
            pagination: PageSummary::new(&page, total),
        },
    )))
}

/// Create a project
///
/// Validates required fields, date formats and ordering, the optional
/// leader reference, and the status value, then checks the name for
/// duplicates and inserts. The created document is re-read so the
/// response reflects exactly what was stored.
///
/// # Errors
///
/// - `400 Bad Request`: validation failure or duplicate name
/// - `500 Internal Server Error`: unacknowledged insert or driver failure
pub async fn create_project(
    State(state): State<AppState>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<ProjectResponse>>)> {
    let (Some(project_name), Some(start_date)) =
        (non_empty(&req.project_name), non_empty(&req.start_date))
    else {
        return Err(ApiError::BadRequest(
            "Project name and start date are required".to_string(),
        ));
    };

    let start_date = parse_date(start_date)
        .ok_or_else(|| ApiError::BadRequest("Invalid start date format".to_string()))?;

    let end_date = match non_empty(&req.end_date) {
        Some(raw) => {
            let end_date = parse_date(raw)
                .ok_or_else(|| ApiError::BadRequest("Invalid end date format".to_string()))?;
            if end_date <= start_date {
                return Err(ApiError::BadRequest(
                    "End date must be after start date".to_string(),
                ));
            }
            Some(end_date)
        }
        None => None,
    };

    let leader_id = match non_empty(&req.leader_id) {
        Some(leader_id) => {
            if !is_valid_object_id(leader_id) {
                return Err(ApiError::BadRequest(
                    "Invalid leader ID format".to_string(),
                ));
            }
            Some(leader_id.to_string())
        }
        None => None,
    };

    let status = match non_empty(&req.status) {
        Some(raw) => Some(
            ProjectStatus::parse(raw)
                .ok_or_else(|| ApiError::BadRequest("Invalid project status".to_string()))?,
        ),
        None => None,
    };

    if Project::find_by_name(&state.db, project_name)
        .await?
        .is_some()
    {
        return Err(ApiError::BadRequest(
            "Project name already exists".to_string(),
        ));
    }

    let project = Project::new(CreateProject {
        project_name: project_name.to_string(),
        description: non_empty(&req.description).map(str::to_string),
        leader_id,
        start_date,
        end_date,
        budget: req.budget,
        status,
    });

    let result = Project::insert(&state.db, &project).await?;
    let Some(inserted_id) = result.inserted_id.as_object_id() else {
        return Err(ApiError::WriteUnacknowledged(
            "Failed to create project".to_string(),
        ));
    };

    let created = Project::find_by_id(&state.db, inserted_id)
        .await?
        .ok_or_else(|| {
            ApiError::InternalError("Created project missing on re-read".to_string())
        })?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok(
            "Project created successfully",
            ProjectResponse::from(created),
        )),
    ))
}

/// Fetch a project by ID
///
/// # Errors
///
/// - `400 Bad Request`: malformed ID
/// - `404 Not Found`: no such project
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<ProjectResponse>>> {
    let id = parse_object_id(&id)
        .ok_or_else(|| ApiError::BadRequest("Invalid project ID format".to_string()))?;

    let project = Project::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(Envelope::ok(
        "Project found",
        ProjectResponse::from(project),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};

    #[test]
    fn test_project_response_shape() {
        let mut project = Project::new(CreateProject {
            project_name: "P1".to_string(),
            description: None,
            leader_id: None,
            start_date: BsonDateTime::now(),
            end_date: None,
            budget: Some(1000.0),
            status: None,
        });
        project.id = Some(ObjectId::new());

        let json = serde_json::to_value(ProjectResponse::from(project)).unwrap();

        assert_eq!(json["status"], "PLANNING");
        assert_eq!(json["budget"], 1000.0);
        assert_eq!(json["created_by"], "system");
        // end_date is omitted entirely when absent
        assert!(json.get("end_date").is_none());
        assert!(json["start_date"].is_string());
    }
}
