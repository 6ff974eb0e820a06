//! Widget configuration consumed at construction.
//!
//! The config is moved into `UserWidget::new` and ceases to exist there.
//! The `sign_on` provider id is taken out during initialization so it
//! cannot be read back afterwards.

use serde::Deserialize;

/// Display strings handed back to the host renderer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplayTexts {
    pub login: String,
    pub login_title: String,
    pub logout: String,
    pub logout_title: String,
    pub username_title: String,
}

impl Default for DisplayTexts {
    fn default() -> Self {
        Self {
            login: "Login".to_string(),
            login_title: "click here for login".to_string(),
            logout: "Logout".to_string(),
            logout_title: "click here for logout".to_string(),
            username_title: "this is your username".to_string(),
        }
    }
}

/// Instance configuration for one widget.
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetConfig {
    /// Share the session of the surrounding context instead of owning one.
    #[serde(default = "default_context")]
    pub context: bool,
    /// Provider identifier; consumed during widget initialization.
    #[serde(default)]
    pub sign_on: Option<String>,
    #[serde(default)]
    pub texts: DisplayTexts,
}

fn default_context() -> bool {
    true
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            context: true,
            sign_on: Some(crate::provider::PRODUCTION_PROVIDER.to_string()),
            texts: DisplayTexts::default(),
        }
    }
}
