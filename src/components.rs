pub mod file_input;
pub mod remove_button;
pub mod status_banner;
pub mod video_preview;
