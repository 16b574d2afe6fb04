// External Crate Imports
use color_eyre::Result;
use serde::{Deserialize, Serialize};

// Local Crate Imports
use crate::file::SelectedFile;

// Public API ==========================================================================================================

/// The argument object a host passes to the widget on every render
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HostArguments {
    #[serde(default)]
    pub signed_url: Option<String>,
    #[serde(default)]
    pub theme: Option<Theme>,
}

impl HostArguments {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// An empty URL is as good as no URL at all
    #[must_use]
    pub fn signed_url(&self) -> Option<&str> {
        self.signed_url.as_deref().filter(|url| !url.is_empty())
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub base: String,
}

impl Theme {
    #[must_use]
    pub fn dark() -> Self {
        Self {
            base: "dark".to_owned(),
        }
    }

    #[must_use]
    pub fn light() -> Self {
        Self {
            base: "light".to_owned(),
        }
    }

    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.base == "dark"
    }
}

/// Everything the widget needs from the runtime embedding it
pub trait HostBridge {
    fn arguments(&self) -> HostArguments;

    /// Called exactly once per confirmed upload
    fn emit_result(&self, value: &SelectedFile);
}

/// Blocking, user-facing messages
pub trait Alerts {
    fn alert(&self, message: &str);
}

// Unit Tests ==========================================================================================================
