//! Server-rendered pages. Both renderers are pure functions of their input.

pub mod gallery;
pub mod upload_form;

pub use gallery::{render_gallery, render_gallery_error};
pub use upload_form::render_upload_form;
