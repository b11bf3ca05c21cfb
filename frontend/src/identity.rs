use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};

/// localStorage key holding the serialized user record.
pub const IDENTITY_KEY: &str = "user";

/// The slice of the stored user record the chrome cares about. Extra fields
/// in the stored JSON are ignored, and both fields may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredIdentity {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl StoredIdentity {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Name shown in the profile summary: name, else email, else "Guest".
pub fn display_name(identity: Option<&StoredIdentity>) -> String {
    identity
        .and_then(|id| id.name.clone().or_else(|| id.email.clone()))
        .unwrap_or_else(|| "Guest".to_string())
}

/// Read the stored user record. A missing key is the never-logged-in case;
/// a record that fails to parse is logged and treated the same way.
pub fn load_stored_identity() -> Option<StoredIdentity> {
    let raw = LocalStorage::raw().get_item(IDENTITY_KEY).ok().flatten()?;

    match StoredIdentity::from_json(&raw) {
        Ok(identity) => Some(identity),
        Err(e) => {
            leptos::logging::error!("failed to parse stored user record: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_display_name_guest_when_absent() {
        assert_eq!(display_name(None), "Guest");
    }

    #[wasm_bindgen_test]
    fn test_display_name_prefers_name() {
        let identity = StoredIdentity {
            name: Some("Alice".to_string()),
            email: Some("alice@example.com".to_string()),
        };
        assert_eq!(display_name(Some(&identity)), "Alice");
    }

    #[wasm_bindgen_test]
    fn test_display_name_falls_back_to_email() {
        let identity = StoredIdentity {
            name: None,
            email: Some("alice@example.com".to_string()),
        };
        assert_eq!(display_name(Some(&identity)), "alice@example.com");
    }

    #[wasm_bindgen_test]
    fn test_display_name_guest_when_record_empty() {
        let identity = StoredIdentity::default();
        assert_eq!(display_name(Some(&identity)), "Guest");
    }

    #[wasm_bindgen_test]
    fn test_from_json_accepts_extra_fields() {
        let identity =
            StoredIdentity::from_json(r#"{"id":"x","name":"Alice","role":"teacher"}"#).unwrap();
        assert_eq!(identity.name.as_deref(), Some("Alice"));
        assert_eq!(identity.email, None);
    }

    #[wasm_bindgen_test]
    fn test_from_json_rejects_malformed_input() {
        assert!(StoredIdentity::from_json("not json at all").is_err());
        assert!(StoredIdentity::from_json("{\"name\":").is_err());
    }
}
