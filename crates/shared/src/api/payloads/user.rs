use serde::{Deserialize, Serialize};

use crate::{
    api::error::{ValidateModel, ValidationError},
    types::Uuid,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUserPayload {
    #[serde(default)]
    pub username: String,
}

impl NewUserPayload {
    pub fn new<T: Into<String>>(username: T) -> Self {
        Self {
            username: username.into(),
        }
    }
}

impl ValidateModel for NewUserPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() {
            Err(ValidationError::new("username is required"))?;
        }
        Ok(())
    }
}

/// A registered user as returned by create and list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub username: String,
    #[serde(rename = "_id")]
    pub id: Uuid,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_blank_username_is_invalid() {
        assert!(NewUserPayload::new("").validate().is_err());
        assert!(NewUserPayload::new("   ").validate().is_err());
        assert!(NewUserPayload::new("fcc_test").validate().is_ok());
    }

    #[test]
    fn test_missing_username_deserializes_as_blank() {
        let payload: NewUserPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_response_uses_underscore_id() {
        let id = Uuid::parse("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let value = serde_json::to_value(UserResponse {
            username: "fcc_test".into(),
            id,
        })
        .unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "username": "fcc_test",
                "_id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            })
        );
    }
}
