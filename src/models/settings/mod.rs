// Settings module
// Widget options from the `options` attribute (JSON) or an options file (TOML)

use crate::error::{Result, WidgetError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Permission flags gating the tooltip actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Permissions {
    pub can_edit: bool,
    pub can_delete: bool,
}

impl Permissions {
    pub fn new(can_edit: bool, can_delete: bool) -> Self {
        Self {
            can_edit,
            can_delete,
        }
    }

    pub fn read_only() -> Self {
        Self::default()
    }
}

/// Options supplied by the host application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetOptions {
    pub initial_view: Option<String>,
    pub views: Option<Value>,
    pub header_toolbar: Option<Value>,
    pub slot_duration: Option<String>,
    pub has_change_permission: bool,
    pub has_delete_permission: bool,
}

impl WidgetOptions {
    /// Parse the `options` attribute. A missing attribute yields defaults.
    pub fn from_json_str(value: Option<&str>) -> Result<Self> {
        match value.map(str::trim) {
            None | Some("") | Some("null") => Ok(Self::default()),
            Some(raw) => serde_json::from_str(raw).map_err(|e| WidgetError::malformed("options", e)),
        }
    }

    pub fn from_toml_str(value: &str) -> Result<Self> {
        Ok(toml::from_str(value)?)
    }

    /// Load options from a TOML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse options file {}", path.display()))
    }

    /// Effective permissions; a read-only widget grants nothing.
    pub fn permissions(&self, read_only: bool) -> Permissions {
        if read_only {
            return Permissions::read_only();
        }
        Permissions::new(self.has_change_permission, self.has_delete_permission)
    }
}

/// Configuration handed to the calendar surface on init and on option resets.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduler_license_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_toolbar: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_duration: Option<String>,
    pub theme_system: String,
    pub now_indicator: bool,
    pub resource_area_header_content: String,
    pub resource_area_width: String,
    pub filter_resources_with_events: bool,
    pub editable: bool,
    pub event_overlap: bool,
    pub event_resource_editable: bool,
}

impl SurfaceOptions {
    pub fn from_options(
        options: &WidgetOptions,
        read_only: bool,
        license_key: Option<&str>,
    ) -> Self {
        Self {
            scheduler_license_key: license_key.map(str::to_string),
            initial_view: options.initial_view.clone(),
            views: options.views.clone(),
            header_toolbar: options.header_toolbar.clone(),
            slot_duration: options.slot_duration.clone(),
            theme_system: "bootstrap5".to_string(),
            now_indicator: true,
            resource_area_header_content: "Instruments".to_string(),
            resource_area_width: "200px".to_string(),
            filter_resources_with_events: true,
            editable: options.has_change_permission && !read_only,
            event_overlap: false,
            event_resource_editable: false,
        }
    }
}
