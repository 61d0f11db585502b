use async_trait::async_trait;
use std::future::Future;
use futures::future::{self, Either};
use futures::pin_mut;
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, File, FormData, Request, RequestInit, Response};

use super::{js_error_message, HttpReply, UploadClient, UploadError};

/// Sends uploads through `window.fetch`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchClient {
    timeout_ms: Option<u32>,
}

impl FetchClient {
    /// A zero timeout means no timeout.
    pub fn new(timeout_ms: Option<u32>) -> Self {
        Self {
            timeout_ms: timeout_ms.filter(|ms| *ms > 0),
        }
    }
}

fn form_error(value: wasm_bindgen::JsValue) -> UploadError {
    UploadError::Form(js_error_message(value))
}

/// Sends the request and reads the whole reply, headers and body.
async fn exchange(request: &Request) -> Result<HttpReply, UploadError> {
    let window = web_sys::window()
        .ok_or_else(|| UploadError::Network("no global window exists".to_string()))?;

    let value = JsFuture::from(window.fetch_with_request(request)).await?;
    let response: Response = value
        .dyn_into()
        .map_err(|_| UploadError::Network("fetch did not return a Response".to_string()))?;

    // A body that cannot be read still leaves the status meaningful.
    let body = match response.text() {
        Ok(promise) => JsFuture::from(promise)
            .await
            .ok()
            .and_then(|text| text.as_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    };

    Ok(HttpReply {
        status: response.status(),
        status_text: response.status_text(),
        body,
    })
}

#[async_trait(?Send)]
impl UploadClient for FetchClient {
    type File = File;

    async fn post_multipart(
        &self,
        url: &str,
        field: &str,
        file: &File,
    ) -> Result<HttpReply, UploadError> {
        let form = FormData::new().map_err(form_error)?;
        form.append_with_blob_and_filename(field, file, &file.name())
            .map_err(form_error)?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&form);

        let controller = AbortController::new().ok();
        if let Some(controller) = &controller {
            init.set_signal(Some(&controller.signal()));
        }

        let request = Request::new_with_str_and_init(url, &init).map_err(form_error)?;

        let Some(ms) = self.timeout_ms else {
            return exchange(&request).await;
        };

        let result = within_deadline(exchange(&request), TimeoutFuture::new(ms), ms).await;
        if let (Err(UploadError::TimedOut(_)), Some(controller)) = (&result, &controller) {
            controller.abort();
        }
        result
    }
}

/// Runs `work` to completion unless `deadline` fires first.
async fn within_deadline<W, D>(work: W, deadline: D, ms: u32) -> Result<HttpReply, UploadError>
where
    W: Future<Output = Result<HttpReply, UploadError>>,
    D: Future<Output = ()>,
{
    pin_mut!(work, deadline);
    match future::select(work, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(UploadError::TimedOut(ms)),
    }
}
