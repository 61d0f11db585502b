use serde::Deserialize;
use std::fmt;

use crate::upload::UploadReceipt;

/// Id of the optional `<script type="application/json">` element holding the widget config.
pub const CONFIG_ELEMENT_ID: &str = "video-upload-config";

/// Runtime settings for the upload panel.
///
/// Every field has a default, so the embedded JSON only needs to name what it
/// overrides:
///
/// ```json
/// { "api_base_url": "https://videos.example.com", "preview_on_upload": true }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub api_base_url: String,
    pub upload_path: String,
    /// Where relative paths returned by the upload endpoint are served from.
    pub media_base_url: String,
    /// Switch the panel to the player once the server returns a video path.
    pub preview_on_upload: bool,
    /// Abort the request after this many milliseconds. `None` waits forever.
    pub timeout_ms: Option<u32>,
    /// Picker filter passed to the `accept` attribute.
    pub accept: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            upload_path: "/upload-video".to_string(),
            media_base_url: "http://localhost:8080/media".to_string(),
            preview_on_upload: false,
            timeout_ms: None,
            accept: "video/*".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "Invalid widget config: {}", e),
            ConfigError::Invalid(reason) => write!(f, "Invalid widget config: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl WidgetConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: WidgetConfig = serde_json::from_str(json)?;

        if config.api_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api_base_url is empty".to_string()));
        }
        if config.timeout_ms == Some(0) {
            config.timeout_ms = None;
        }

        Ok(config)
    }

    /// Reads the config embedded in the host page, falling back to defaults.
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|element| element.text_content());

        match text {
            Some(text) => Self::from_json(&text).unwrap_or_else(|e| {
                log::warn!("{}; using defaults", e);
                Self::default()
            }),
            None => {
                log::debug!("no #{} element, using default config", CONFIG_ELEMENT_ID);
                Self::default()
            }
        }
    }

    pub fn upload_url(&self) -> String {
        join_url(&self.api_base_url, &self.upload_path)
    }

    /// URL to preview after a successful upload, if the policy allows one.
    pub fn preview_url(&self, receipt: &UploadReceipt) -> Option<String> {
        if !self.preview_on_upload {
            return None;
        }

        let path = receipt.video_path.as_deref()?;
        if is_absolute(path) {
            Some(path.to_string())
        } else {
            Some(join_url(&self.media_base_url, path))
        }
    }
}

fn is_absolute(url: &str) -> bool {
    ["http://", "https://", "blob:", "data:"]
        .iter()
        .any(|scheme| url.starts_with(scheme))
}

fn join_url(base: &str, path: &str) -> String {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt(path: &str) -> UploadReceipt {
        UploadReceipt {
            video_path: Some(path.to_string()),
            message: None,
        }
    }

    #[test]
    fn defaults_target_local_backend() {
        let config = WidgetConfig::default();
        assert_eq!(config.upload_url(), "http://localhost:8080/upload-video");
        assert!(!config.preview_on_upload);
        assert_eq!(config.timeout_ms, None);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            WidgetConfig::from_json(r#"{ "api_base_url": "https://api.example.com/" }"#).unwrap();
        assert_eq!(config.upload_url(), "https://api.example.com/upload-video");
        assert_eq!(config.accept, "video/*");
    }

    #[test]
    fn zero_timeout_means_none() {
        let config = WidgetConfig::from_json(r#"{ "timeout_ms": 0 }"#).unwrap();
        assert_eq!(config.timeout_ms, None);
    }

    #[test]
    fn rejects_bad_json_and_empty_base() {
        assert!(matches!(
            WidgetConfig::from_json("{ nope"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            WidgetConfig::from_json(r#"{ "api_base_url": "  " }"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn preview_url_follows_policy() {
        let mut config = WidgetConfig::default();
        assert_eq!(config.preview_url(&receipt("videos/1/.mp4")), None);

        config.preview_on_upload = true;
        assert_eq!(
            config.preview_url(&receipt("videos/1/.mp4")).as_deref(),
            Some("http://localhost:8080/media/videos/1/.mp4")
        );
        assert_eq!(
            config
                .preview_url(&receipt("https://cdn.example.com/a.mp4"))
                .as_deref(),
            Some("https://cdn.example.com/a.mp4")
        );
        assert_eq!(config.preview_url(&UploadReceipt::default()), None);
    }
}
