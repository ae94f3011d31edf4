/// Document models for Tatboard
///
/// This module contains the MongoDB document models and their collection
/// operations. One document per entity instance; no joins, no
/// cross-collection integrity enforcement.
///
/// # Models
///
/// - `user`: accounts with hashed passwords (`users` collection)
/// - `project`: projects with a unique name (`projects` collection)
/// - `task`: tasks referencing a project (`tasks` collection)
///
/// References between entities (`leader_id`, `project_id`,
/// `assigned_to`) are stored as plain ObjectId hex strings and are never
/// checked for existence.
///
/// # Example
///
/// ```no_run
/// use tatboard_shared::models::user::{CreateUser, User};
/// use tatboard_shared::db::client::{connect, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let db = connect(&DatabaseConfig::default()).await?;
///
/// let user = User::new(CreateUser {
///     name: "John Doe".to_string(),
///     email: "user@example.com".to_string(),
///     phone: None,
///     role: None,
///     password_hash: "$argon2id$...".to_string(),
/// });
///
/// let result = User::insert(&db, &user).await?;
/// # Ok(())
/// # }
/// ```

pub mod project;
pub mod task;
pub mod user;

/// Placeholder actor recorded in `created_by` fields
///
/// There is no session model, so documents are attributed to a fixed
/// system actor.
pub const CREATED_BY_SYSTEM: &str = "system";
