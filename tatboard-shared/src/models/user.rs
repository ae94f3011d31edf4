/// User model and collection operations
///
/// Users are the login identities of the system. The email address is
/// the login key and must be unique; uniqueness is enforced with a
/// pre-insert lookup rather than a database index, so two concurrent
/// creates with the same email can race (a documented limitation).
///
/// # Document shape
///
/// ```text
/// {
///   _id: ObjectId,
///   name: string,
///   email: string,           // unique business key
///   phone: string | null,
///   role: string,            // default "user"
///   password: string,        // Argon2id PHC hash, never sent to clients
///   createdAt: Date,
///   updatedAt: Date
/// }
/// ```
///
/// # Example
///
/// ```no_run
/// use tatboard_shared::models::user::{CreateUser, User};
/// # async fn example(db: mongodb::Database) -> mongodb::error::Result<()> {
/// if User::find_by_email(&db, "user@example.com").await?.is_none() {
///     let user = User::new(CreateUser {
///         name: "John Doe".to_string(),
///         email: "user@example.com".to_string(),
///         phone: None,
///         role: None,
///         password_hash: "$argon2id$...".to_string(),
///     });
///     User::insert(&db, &user).await?;
/// }
/// # Ok(())
/// # }
/// ```

use mongodb::{
    bson::{doc, oid::ObjectId, Bson, DateTime},
    results::{InsertOneResult, UpdateResult},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

/// Name of the users collection
pub const COLLECTION: &str = "users";

/// Role assigned when a signup does not specify one
pub const DEFAULT_ROLE: &str = "user";

/// User document
///
/// Timestamp fields are camelCase in storage (and on the wire), matching
/// the documents already in the collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID, assigned by the database at insertion
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Display name
    pub name: String,

    /// Email address, the unique login key
    pub email: String,

    /// Optional phone number (explicitly null when absent)
    pub phone: Option<String>,

    /// Free-form role string, default "user"
    pub role: String,

    /// Argon2id password hash in PHC string format
    ///
    /// Responses use a separate wire struct; this field must never reach
    /// a client.
    pub password: String,

    /// When the user was created
    #[serde(rename = "createdAt")]
    pub created_at: DateTime,

    /// When the user was last updated
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime,
}

/// Input for creating a new user
///
/// The password arrives here already hashed; controllers hash before
/// touching the model layer.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Optional phone number
    pub phone: Option<String>,

    /// Optional role (defaults to "user")
    pub role: Option<String>,

    /// Argon2id hash of the signup password
    pub password_hash: String,
}

/// Input for a partial user update
///
/// Only `Some` fields are written. `phone` is doubly optional so a
/// client can clear it with an explicit null.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    /// New display name
    pub name: Option<String>,

    /// New email address
    pub email: Option<String>,

    /// New phone number; `Some(None)` stores null
    pub phone: Option<Option<String>>,

    /// New role
    pub role: Option<String>,

    /// New password hash (minimum-length policy is the controller's job)
    pub password_hash: Option<String>,
}

impl User {
    fn collection(db: &Database) -> Collection<User> {
        db.collection::<User>(COLLECTION)
    }

    /// Builds a user document with defaults applied
    ///
    /// Both timestamps are set from the same instant, so a freshly
    /// created user always has `createdAt == updatedAt`.
    pub fn new(data: CreateUser) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name: data.name,
            email: data.email,
            phone: data.phone,
            role: data.role.unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            password: data.password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Inserts a user document
    pub async fn insert(db: &Database, user: &User) -> mongodb::error::Result<InsertOneResult> {
        Self::collection(db).insert_one(user, None).await
    }

    /// Looks up a user by email (the unique login key)
    pub async fn find_by_email(db: &Database, email: &str) -> mongodb::error::Result<Option<User>> {
        Self::collection(db)
            .find_one(doc! { "email": email }, None)
            .await
    }

    /// Looks up a user by ID
    pub async fn find_by_id(db: &Database, id: ObjectId) -> mongodb::error::Result<Option<User>> {
        Self::collection(db).find_one(doc! { "_id": id }, None).await
    }

    /// Applies a partial update to a user
    ///
    /// `updatedAt` is always stamped with the current time, even when no
    /// other field is supplied. Returns the driver's update result; a
    /// matched count of zero means the user does not exist.
    pub async fn update(
        db: &Database,
        id: ObjectId,
        data: UpdateUser,
    ) -> mongodb::error::Result<UpdateResult> {
        let mut set = doc! { "updatedAt": DateTime::now() };

        if let Some(name) = data.name {
            set.insert("name", name);
        }
        if let Some(email) = data.email {
            set.insert("email", email);
        }
        if let Some(phone) = data.phone {
            match phone {
                Some(value) => set.insert("phone", value),
                None => set.insert("phone", Bson::Null),
            };
        }
        if let Some(role) = data.role {
            set.insert("role", role);
        }
        if let Some(password_hash) = data.password_hash {
            set.insert("password", password_hash);
        }

        Self::collection(db)
            .update_one(doc! { "_id": id }, doc! { "$set": set }, None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    fn sample_create() -> CreateUser {
        CreateUser {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            phone: None,
            role: None,
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    #[test]
    fn test_new_applies_defaults() {
        let user = User::new(sample_create());

        assert!(user.id.is_none());
        assert_eq!(user.role, DEFAULT_ROLE);
        assert_eq!(user.phone, None);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_new_keeps_supplied_role_and_phone() {
        let user = User::new(CreateUser {
            phone: Some("0812345678".to_string()),
            role: Some("admin".to_string()),
            ..sample_create()
        });

        assert_eq!(user.role, "admin");
        assert_eq!(user.phone.as_deref(), Some("0812345678"));
    }

    #[test]
    fn test_document_shape() {
        let user = User::new(sample_create());
        let document = bson::to_document(&user).unwrap();

        // _id is skipped before insertion so the database assigns it
        assert!(!document.contains_key("_id"));
        assert!(document.contains_key("createdAt"));
        assert!(document.contains_key("updatedAt"));
        assert_eq!(document.get_str("role").unwrap(), "user");
        assert_eq!(document.get("phone"), Some(&Bson::Null));
    }

    #[test]
    fn test_update_user_default_is_empty() {
        let update = UpdateUser::default();
        assert!(update.name.is_none());
        assert!(update.email.is_none());
        assert!(update.phone.is_none());
        assert!(update.role.is_none());
        assert!(update.password_hash.is_none());
    }
}
