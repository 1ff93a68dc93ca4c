use crate::state::AppState;
use crate::utils::helpers;
use crate::views;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, Result, web};
use tracing::{error, info};

pub async fn gallery(state: web::Data<AppState>) -> Result<HttpResponse> {
    info!("Rendering gallery");

    match state.photos.find_all().await {
        Ok(photos) => Ok(helpers::html(views::render_gallery(&photos))),
        Err(e) => {
            error!("Failed to load photos for gallery: {}", e);
            Ok(HttpResponse::InternalServerError()
                .content_type(ContentType::html())
                .body(views::render_gallery_error()))
        }
    }
}

pub async fn upload_form() -> HttpResponse {
    helpers::html(views::render_upload_form())
}
