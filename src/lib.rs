use wasm_bindgen::prelude::*;

pub mod app;
pub mod components;
pub mod config;
pub mod state;
pub mod upload;

use crate::config::WidgetConfig;
use crate::upload::{fetch::FetchClient, UploadClientHandle};

#[wasm_bindgen(start)]
pub fn run_app() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    let config = WidgetConfig::load();
    log::debug!("upload endpoint: {}", config.upload_url());

    yew::Renderer::<app::App>::with_props(app::AppProps {
        client: UploadClientHandle::new(FetchClient::new(config.timeout_ms)),
        config,
        initial_video_url: None,
    })
    .render();
}
