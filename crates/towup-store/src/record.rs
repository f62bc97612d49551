//! The persisted session record and its validating parser.

use serde::{Deserialize, Serialize};
use towup_identity::{EntityId, Role};

use crate::StoreError;

/// The durable mirror of an established session.
///
/// All four fields are mandatory: a record is only ever written as a
/// complete bundle, and [`SessionRecord::from_json`] refuses to produce a
/// partial one. Field names match the backend/cookie vocabulary
/// (`expiresAt`, `entityId`) via `rename_all = "camelCase"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Opaque bearer credential.
    pub token: String,
    /// Absolute expiry instant, milliseconds since the Unix epoch.
    pub expires_at: u64,
    /// Identifier of the authenticated principal.
    pub entity_id: EntityId,
    /// Account type of the authenticated principal.
    pub role: Role,
}

/// Loose intermediate used only during parsing. Every field is optional
/// here so validation can name the first missing one instead of failing
/// with a generic serde error.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    token: Option<String>,
    expires_at: Option<u64>,
    entity_id: Option<EntityId>,
    role: Option<Role>,
}

impl SessionRecord {
    /// Parses and validates a stored document.
    ///
    /// Returns `Ok(None)` when the document carries no token (an anonymous
    /// or cleared store). A token without expiry, entity id, or role is an
    /// error — treating such a record as valid would grant indefinite
    /// access on malformed state.
    pub fn from_json(raw: &str) -> Result<Option<Self>, StoreError> {
        let parsed: RawRecord = serde_json::from_str(raw)
            .map_err(|err| StoreError::Malformed(err.to_string()))?;

        let Some(token) = parsed.token else {
            return Ok(None);
        };

        let expires_at = parsed
            .expires_at
            .ok_or(StoreError::Incomplete("expiresAt"))?;
        let entity_id = parsed
            .entity_id
            .ok_or(StoreError::Incomplete("entityId"))?;
        let role = parsed.role.ok_or(StoreError::Incomplete("role"))?;

        Ok(Some(Self {
            token,
            expires_at,
            entity_id,
            role,
        }))
    }

    /// Serializes the record for writing.
    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SessionRecord {
        SessionRecord {
            token: "abc".to_string(),
            expires_at: 1_700_000_000_000,
            entity_id: EntityId::from("42"),
            role: Role::FleetOwner,
        }
    }

    #[test]
    fn test_round_trip_preserves_all_fields() {
        let json = record().to_json().unwrap();
        let loaded = SessionRecord::from_json(&json).unwrap().unwrap();
        assert_eq!(loaded, record());
    }

    #[test]
    fn test_json_uses_camel_case_field_names() {
        let json = record().to_json().unwrap();
        assert!(json.contains(r#""expiresAt":1700000000000"#));
        assert!(json.contains(r#""entityId":"42""#));
        assert!(json.contains(r#""role":"FLEET_OWNER""#));
    }

    #[test]
    fn test_document_without_token_is_empty() {
        let loaded = SessionRecord::from_json("{}").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_token_without_expiry_is_incomplete() {
        let result = SessionRecord::from_json(r#"{"token":"xyz"}"#);
        assert!(
            matches!(result, Err(StoreError::Incomplete("expiresAt"))),
            "a token with no expiry must never parse as valid"
        );
    }

    #[test]
    fn test_token_without_entity_id_is_incomplete() {
        let result = SessionRecord::from_json(
            r#"{"token":"xyz","expiresAt":1700000000000}"#,
        );
        assert!(matches!(result, Err(StoreError::Incomplete("entityId"))));
    }

    #[test]
    fn test_token_without_role_is_incomplete() {
        let result = SessionRecord::from_json(
            r#"{"token":"xyz","expiresAt":1700000000000,"entityId":"42"}"#,
        );
        assert!(matches!(result, Err(StoreError::Incomplete("role"))));
    }

    #[test]
    fn test_garbage_document_is_malformed() {
        let result = SessionRecord::from_json("not json at all");
        assert!(matches!(result, Err(StoreError::Malformed(_))));
    }

    #[test]
    fn test_unknown_role_value_is_malformed() {
        let result = SessionRecord::from_json(
            r#"{"token":"xyz","expiresAt":1,"entityId":"42","role":"DRIVER"}"#,
        );
        assert!(matches!(result, Err(StoreError::Malformed(_))));
    }

    #[test]
    fn test_unparseable_expiry_is_malformed() {
        let result = SessionRecord::from_json(
            r#"{"token":"xyz","expiresAt":"soon","entityId":"42","role":"TOW_TRUCK"}"#,
        );
        assert!(matches!(result, Err(StoreError::Malformed(_))));
    }
}
