use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys::File;

pub mod fetch;

#[cfg(test)]
mod tests;

/// Multipart field the backend reads the video from.
pub const FILE_FIELD: &str = "file";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadError {
    /// The server answered with a non-success status.
    Rejected { status: u16, status_text: String },
    /// The request never produced a response.
    Network(String),
    /// The request was aborted after the configured timeout.
    TimedOut(u32),
    /// The browser refused to build the request.
    Form(String),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::Rejected {
                status,
                status_text,
            } => write!(f, "Upload rejected: {} {}", status, status_text),
            UploadError::Network(msg) => write!(f, "Upload failed: {}", msg),
            UploadError::TimedOut(ms) => write!(f, "Upload timed out after {} ms", ms),
            UploadError::Form(msg) => write!(f, "Could not prepare upload: {}", msg),
        }
    }
}

impl std::error::Error for UploadError {}

impl From<JsValue> for UploadError {
    fn from(value: JsValue) -> Self {
        UploadError::Network(js_error_message(value))
    }
}

pub(crate) fn js_error_message(value: JsValue) -> String {
    if let Some(msg) = value.as_string() {
        msg
    } else if let Some(msg) = js_sys::Error::from(value).message().as_string() {
        msg
    } else {
        "Unknown error".to_string()
    }
}

/// Status line and body text of an upload response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// What the server told us about a stored video.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadReceipt {
    pub video_path: Option<String>,
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ReplyBody {
    Path(String),
    Detailed {
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        video_path: Option<String>,
    },
}

impl UploadReceipt {
    /// Accepts either a bare JSON string (the stored object path) or an object
    /// with `message` and `video_path`. Anything else yields an empty receipt.
    pub fn from_body(body: &str) -> Self {
        let body = body.trim();
        if body.is_empty() {
            return Self::default();
        }

        match serde_json::from_str::<ReplyBody>(body) {
            Ok(ReplyBody::Path(path)) => Self {
                video_path: non_empty(path),
                message: None,
            },
            Ok(ReplyBody::Detailed {
                message,
                video_path,
            }) => Self {
                video_path: video_path.and_then(non_empty),
                message,
            },
            Err(e) => {
                log::debug!("upload response body is not a known shape: {}", e);
                Self::default()
            }
        }
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Transport used to send a single file as `multipart/form-data`.
#[async_trait(?Send)]
pub trait UploadClient {
    type File;

    /// POST `file` to `url` as the form part named `field`.
    async fn post_multipart(
        &self,
        url: &str,
        field: &str,
        file: &Self::File,
    ) -> Result<HttpReply, UploadError>;
}

/// Shared, comparable handle to the browser-side client, suitable for component props.
#[derive(Clone)]
pub struct UploadClientHandle(Rc<dyn UploadClient<File = File>>);

impl UploadClientHandle {
    pub fn new<C>(client: C) -> Self
    where
        C: UploadClient<File = File> + 'static,
    {
        Self(Rc::new(client))
    }
}

impl Deref for UploadClientHandle {
    type Target = dyn UploadClient<File = File>;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl PartialEq for UploadClientHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Upload one video and interpret the response.
pub async fn upload_video<C>(client: &C, url: &str, file: &C::File) -> Result<UploadReceipt, UploadError>
where
    C: UploadClient + ?Sized,
{
    let reply = client.post_multipart(url, FILE_FIELD, file).await?;

    if !reply.is_success() {
        log::warn!("upload to {} answered {} {}", url, reply.status, reply.status_text);
        return Err(UploadError::Rejected {
            status: reply.status,
            status_text: reply.status_text,
        });
    }

    Ok(UploadReceipt::from_body(&reply.body))
}
