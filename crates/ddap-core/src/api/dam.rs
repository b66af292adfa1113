use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One DAM instance from the directory listing. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamInfo {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceResponse {
    #[serde(default)]
    pub resources: BTreeMap<String, Resource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub views: BTreeMap<String, View>,
    #[serde(default)]
    pub ui: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    #[serde(default)]
    pub ui: BTreeMap<String, String>,
    #[serde(default)]
    pub interfaces: BTreeMap<String, InterfaceDescription>,
    #[serde(default)]
    pub roles: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_role: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterfaceDescription {
    #[serde(default)]
    pub uri: Vec<String>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_roles_keep_a_stable_order() {
        let response: ResourceResponse = serde_json::from_str(
            r#"{
                "resources": {
                    "thousand-genomes": {
                        "views": {
                            "discovery-access": {
                                "roles": {"viewer": {}, "admin": {}, "discovery": {}},
                                "interfaces": {"http:gcp:gs": {"uri": ["https://storage.example.com/g"]}}
                            }
                        }
                    }
                }
            }"#,
        )
        .expect("catalog");

        let view = &response.resources["thousand-genomes"].views["discovery-access"];
        let roles: Vec<&String> = view.roles.keys().collect();
        assert_eq!(roles, ["admin", "discovery", "viewer"]);
        assert_eq!(
            view.interfaces["http:gcp:gs"].uri,
            ["https://storage.example.com/g"]
        );
    }
}
