use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::constants::{SERVICE_NAME, SERVICE_VERSION};

/// Informational payload served at the root path.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub endpoints: BTreeMap<String, String>,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        let endpoints = [
            ("/upload", "POST - Upload a clip"),
            ("/clips", "GET - List all clips"),
            ("/clips/<clip_id>", "GET - Download specific clip"),
            ("/delete/<clip_id>", "DELETE - Delete a clip"),
        ]
        .into_iter()
        .map(|(path, description)| (path.to_string(), description.to_string()))
        .collect();

        Self {
            service: SERVICE_NAME.to_string(),
            version: SERVICE_VERSION.to_string(),
            endpoints,
        }
    }
}
