use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::utils::AppError;

/// User document as stored in the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub score: i64,
}

impl User {
    /// Builds a new document with a freshly minted id.
    pub fn new(fields: UserFields) -> Self {
        User {
            id: ObjectId::new(),
            name: fields.name,
            score: fields.score,
        }
    }
}

/// Body accepted by `POST /user` and `PUT /user/{userId}`.
///
/// Fields are optional at the serde level so that a missing field is reported
/// as a validation failure instead of a generic parse error.
#[derive(Debug, Default, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserPayload {
    pub name: Option<String>,
    pub score: Option<i64>,
}

/// The mutable part of a user, after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct UserFields {
    pub name: String,
    pub score: i64,
}

impl UserPayload {
    pub fn validate(self) -> Result<UserFields, AppError> {
        let mut violations = Vec::new();

        let name = match self.name {
            Some(name) if !name.trim().is_empty() => Some(name),
            _ => {
                violations.push("name: field is required");
                None
            }
        };

        if self.score.is_none() {
            violations.push("score: field is required");
        }

        match (name, self.score) {
            (Some(name), Some(score)) => Ok(UserFields { name, score }),
            _ => Err(AppError::Validation(violations.join("; "))),
        }
    }
}

/// User as returned to clients, with the id rendered as hex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub score: i64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id.to_hex(),
            name: user.name,
            score: user.score,
        }
    }
}

/// Acknowledgement returned by `POST /user`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUser {
    pub inserted_id: String,
}

/// Parses the `userId` path segment. Anything that is not a 24-char hex
/// ObjectId is rejected up front.
pub fn parse_user_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw)
        .map_err(|_| AppError::InvalidRequest(format!("Invalid user ID: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_complete_payload() {
        let payload = UserPayload { name: Some("Misty".into()), score: Some(0) };
        let fields = payload.validate().unwrap();
        assert_eq!(fields, UserFields { name: "Misty".into(), score: 0 });
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let payload = UserPayload { name: Some("   ".into()), score: Some(10) };
        match payload.validate() {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "name: field is required"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_lists_every_missing_field() {
        match UserPayload::default().validate() {
            Err(AppError::Validation(msg)) => {
                assert_eq!(msg, "name: field is required; score: field is required")
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_user_id() {
        let id = ObjectId::new();
        assert_eq!(parse_user_id(&id.to_hex()).unwrap(), id);
        assert!(matches!(parse_user_id("not-an-id"), Err(AppError::InvalidRequest(_))));
        assert!(matches!(parse_user_id(""), Err(AppError::InvalidRequest(_))));
    }

    #[test]
    fn test_user_document_uses_mongo_id_field() {
        let user = User::new(UserFields { name: "Brock".into(), score: 7 });
        let doc = mongodb::bson::to_document(&user).unwrap();
        assert_eq!(doc.get_object_id("_id").unwrap(), user.id);
        assert_eq!(doc.get_i64("score").unwrap(), 7);
    }

    #[test]
    fn test_response_renders_hex_id() {
        let user = User::new(UserFields { name: "Brock".into(), score: 7 });
        let hex = user.id.to_hex();
        let response = UserResponse::from(user);
        assert_eq!(response.id, hex);
        assert_eq!(response.id.len(), 24);
    }
}
