/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: Signup, fetch, partial update, login
/// - `projects`: List, create, fetch
/// - `tasks`: List, create, partial update
///
/// Every response uses the shared envelope: successes are
/// `{ "success": true, "message": ..., "data": ... }` and failures are
/// `{ "success": false, "message": ... }` (see `crate::error`).

pub mod health;
pub mod projects;
pub mod tasks;
pub mod users;

use serde::Serialize;

/// Success half of the shared response envelope
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    /// Always true
    pub success: bool,

    /// Human-readable outcome message
    pub message: String,

    /// Route-specific payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    /// Wraps a payload in the success envelope
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

/// Treats empty strings as absent, matching how the API has always read
/// optional body and query fields
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let envelope = Envelope::ok("User found", serde_json::json!({ "name": "A" }));
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "User found");
        assert_eq!(json["data"]["name"], "A");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(&None), None);
        assert_eq!(non_empty(&Some(String::new())), None);
        assert_eq!(non_empty(&Some("x".to_string())), Some("x"));
    }
}
