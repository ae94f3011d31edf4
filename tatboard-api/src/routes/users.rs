/// User endpoints
///
/// Signup, fetch, partial update, and login. The password is hashed with
/// Argon2id at creation (and re-hashed on update when supplied); neither
/// the plaintext nor the hash ever appears in a response body.
///
/// # Endpoints
///
/// - `POST /api/users/create-user` - Create a user
/// - `GET  /api/users/user/:id` - Fetch a user
/// - `PUT  /api/users/update/:id` - Partial update
/// - `POST /api/users/login` - Verify credentials
///
/// Login deliberately maps both "no such email" and "wrong password" to
/// the identical 401 body so callers cannot enumerate accounts.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::{non_empty, Envelope},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tatboard_shared::{
    auth::password,
    models::user::{CreateUser, UpdateUser, User},
    validation::{deserialize_explicit_null, parse_object_id},
};

/// Minimum password length accepted on update
const MIN_PASSWORD_LENGTH: usize = 6;

/// Create user request
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// Display name (required)
    #[serde(default)]
    pub name: Option<String>,

    /// Email address (required, unique)
    #[serde(default)]
    pub email: Option<String>,

    /// Plaintext password (required; hashed before storage)
    #[serde(default)]
    pub password: Option<String>,

    /// Optional phone number
    #[serde(default)]
    pub phone: Option<String>,

    /// Optional role (defaults to "user")
    #[serde(default)]
    pub role: Option<String>,
}

/// Partial update request
///
/// Only supplied fields change. `phone` distinguishes an explicit null
/// (clear the number) from the field being omitted.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "deserialize_explicit_null")]
    pub phone: Option<Option<String>>,

    #[serde(default)]
    pub role: Option<String>,

    /// New plaintext password, minimum 6 characters
    #[serde(default)]
    pub password: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

/// User as returned to clients: the stored document minus the password
/// hash
#[derive(Debug, Serialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,

    pub name: String,

    pub email: String,

    pub phone: Option<String>,

    pub role: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            role: user.role.clone(),
            created_at: user.created_at.to_chrono(),
            updated_at: user.updated_at.to_chrono(),
        }
    }
}

/// Payload of a successful signup
#[derive(Debug, Serialize)]
pub struct CreatedUser {
    #[serde(rename = "insertedId")]
    pub inserted_id: String,

    pub user: UserResponse,
}

/// Payload of a successful update
#[derive(Debug, Serialize)]
pub struct UpdatedUser {
    #[serde(rename = "modifiedCount")]
    pub modified_count: u64,
}

/// Create a new user
///
/// Validates the required fields, hashes the password, checks the email
/// for duplicates, and inserts. The duplicate check is a pre-insert
/// lookup, so concurrent signups with the same email can race; the last
/// line of defense would be a unique index, which this deployment does
/// not have.
///
/// # Errors
///
/// - `400 Bad Request`: name, email, or password missing
/// - `409 Conflict`: email already exists
/// - `500 Internal Server Error`: database or hashing failure
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<CreatedUser>>)> {
    let (Some(name), Some(email), Some(plaintext)) = (
        non_empty(&req.name),
        non_empty(&req.email),
        non_empty(&req.password),
    ) else {
        return Err(ApiError::BadRequest(
            "Name, email, and password are required".to_string(),
        ));
    };

    let password_hash = password::hash_password(plaintext)?;

    if User::find_by_email(&state.db, email).await?.is_some() {
        return Err(ApiError::Conflict("Email already exists".to_string()));
    }

    let mut user = User::new(CreateUser {
        name: name.to_string(),
        email: email.to_string(),
        phone: non_empty(&req.phone).map(str::to_string),
        role: non_empty(&req.role).map(str::to_string),
        password_hash,
    });

    let result = User::insert(&state.db, &user).await?;
    let inserted_id = result.inserted_id.as_object_id().ok_or_else(|| {
        ApiError::InternalError("Insert did not return an ObjectId".to_string())
    })?;
    user.id = Some(inserted_id);

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok(
            "User created successfully",
            CreatedUser {
                inserted_id: inserted_id.to_hex(),
                user: UserResponse::from(&user),
            },
        )),
    ))
}

/// Fetch a user by ID
///
/// # Errors
///
/// - `400 Bad Request`: malformed ID
/// - `404 Not Found`: no such user
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<UserResponse>>> {
    let id = parse_object_id(&id)
        .ok_or_else(|| ApiError::BadRequest("Invalid user ID format".to_string()))?;

    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(Envelope::ok("User found", UserResponse::from(&user))))
}

/// Partially update a user
///
/// Only fields present in the body are changed; `updatedAt` is stamped
/// even when the body is empty. A supplied password must be at least 6
/// characters and is re-hashed before storage.
///
/// # Errors
///
/// - `400 Bad Request`: malformed ID or short password
/// - `404 Not Found`: no such user
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<Envelope<UpdatedUser>>> {
    let id = parse_object_id(&id)
        .ok_or_else(|| ApiError::BadRequest("Invalid user ID format".to_string()))?;

    let password_hash = match non_empty(&req.password) {
        Some(plaintext) => {
            if plaintext.chars().count() < MIN_PASSWORD_LENGTH {
                return Err(ApiError::BadRequest(
                    "Password must be at least 6 characters long".to_string(),
                ));
            }
            Some(password::hash_password(plaintext)?)
        }
        None => None,
    };

    let update = UpdateUser {
        name: non_empty(&req.name).map(str::to_string),
        email: non_empty(&req.email).map(str::to_string),
        phone: req.phone,
        role: non_empty(&req.role).map(str::to_string),
        password_hash,
    };

    let result = User::update(&state.db, id, update).await?;

    if result.matched_count == 0 {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    Ok(Json(Envelope::ok(
        "User updated successfully",
        UpdatedUser {
            modified_count: result.modified_count,
        },
    )))
}

/// Verify credentials and return the user record
///
/// Both an unknown email and a wrong password produce the identical 401
/// body; there are no session tokens, the record itself is the result.
///
/// # Errors
///
/// - `400 Bad Request`: email or password missing
/// - `401 Unauthorized`: invalid credentials
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<Envelope<UserResponse>>> {
    let (Some(email), Some(plaintext)) = (non_empty(&req.email), non_empty(&req.password)) else {
        return Err(ApiError::BadRequest(
            "Email and password are required".to_string(),
        ));
    };

    let user = User::find_by_email(&state.db, email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = password::verify_password(plaintext, &user.password)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    Ok(Json(Envelope::ok(
        "Login successful",
        UserResponse::from(&user),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_user_response_never_contains_password() {
        let mut user = User::new(CreateUser {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            phone: None,
            role: None,
            password_hash: "$argon2id$super-secret-hash".to_string(),
        });
        user.id = Some(ObjectId::new());

        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();
        let rendered = json.to_string();

        assert!(json.get("password").is_none());
        assert!(!rendered.contains("super-secret-hash"));
        assert_eq!(json["name"], "A");
        assert_eq!(json["role"], "user");
        assert!(json["_id"].is_string());
        assert!(json["createdAt"].is_string());
    }

    #[test]
    fn test_update_request_distinguishes_null_phone() {
        let body: UpdateUserRequest = serde_json::from_str(r#"{"phone": null}"#).unwrap();
        assert_eq!(body.phone, Some(None));

        let body: UpdateUserRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(body.phone, None);
    }
}
