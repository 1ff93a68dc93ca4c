use crate::models::photo::{PhotoError, UploadResponse};
use crate::requests::photo::{UploadForm, UploadFormError};
use crate::state::AppState;
use crate::utils::helpers::{self, ApiError};
use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Result, web};
use tracing::{error, info, warn};

pub async fn all(state: web::Data<AppState>) -> Result<HttpResponse> {
    info!("Getting all photos");

    match state.photos.find_all().await {
        Ok(photos) => Ok(HttpResponse::Ok().json(photos)),
        Err(PhotoError::Database(e)) => {
            error!("Database error getting all photos: {}", e);
            Ok(ApiError::new("Failed to fetch photos")
                .to_response(StatusCode::INTERNAL_SERVER_ERROR))
        }
    }
}

pub async fn upload(state: web::Data<AppState>, payload: Multipart) -> Result<HttpResponse> {
    let photo = match UploadForm::read(payload, &state.gate, &state.storage).await {
        Ok(UploadForm::Accepted { photo }) => photo,
        Ok(UploadForm::Rejected) => {
            warn!("Rejected upload with invalid authorization id");
            return Ok(helpers::unauthorized());
        }
        Err(UploadFormError::Multipart(e)) => return Err(e.into()),
        Err(UploadFormError::Storage(e)) => {
            error!("Storage error staging photo: {}", e);
            return Ok(ApiError::new("Failed to upload photo")
                .to_response(StatusCode::INTERNAL_SERVER_ERROR));
        }
    };

    let Some(photo) = photo else {
        return Ok(ApiError::new("Missing photo file").to_response(StatusCode::BAD_REQUEST));
    };

    info!(
        "Uploading photo {} ({} bytes)",
        photo.filename,
        photo.upload.len()
    );

    let url = match photo.upload.commit(&photo.filename).await {
        Ok(url) => url,
        Err(e) => {
            error!("Storage error uploading photo: {}", e);
            return Ok(ApiError::new("Failed to upload photo")
                .to_response(StatusCode::INTERNAL_SERVER_ERROR));
        }
    };

    // The file stays on disk if the insert fails.
    match state.photos.insert(&url).await {
        Ok(photo) => {
            info!("Successfully stored photo {} at {}", photo.id, photo.url);
            Ok(HttpResponse::Ok().json(UploadResponse::stored(url)))
        }
        Err(PhotoError::Database(e)) => {
            error!("Database error recording photo {}: {}", url, e);
            Ok(ApiError::new("Failed to upload photo")
                .to_response(StatusCode::INTERNAL_SERVER_ERROR))
        }
    }
}
