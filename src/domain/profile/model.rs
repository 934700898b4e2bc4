//! Store profile — static configuration, no real auth behind it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreProfile {
    pub name: String,
    pub email: String,
    pub role: String,
    pub store_name: String,
}

impl Default for StoreProfile {
    fn default() -> Self {
        Self {
            name: "Store Manager".to_string(),
            email: "manager@expirysync.com".to_string(),
            role: "admin".to_string(),
            store_name: "Main Store".to_string(),
        }
    }
}

impl StoreProfile {
    pub fn apply_patch(&mut self, patch: ProfilePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(store_name) = patch.store_name {
            self.store_name = store_name;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub store_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_merges_only_present_fields() {
        let mut profile = StoreProfile::default();
        profile.apply_patch(ProfilePatch {
            store_name: Some("Depot 7".into()),
            ..Default::default()
        });
        assert_eq!(profile.store_name, "Depot 7");
        assert_eq!(profile.name, "Store Manager");
        assert_eq!(profile.role, "admin");
    }
}
