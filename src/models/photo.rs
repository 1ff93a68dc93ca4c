use crate::database::connection::DbPool;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum PhotoError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Metadata for one uploaded image. Rows are written once and never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: Uuid,
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}

impl Photo {
    pub fn new(url: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            url,
            uploaded_at: Utc::now(),
        }
    }

    pub async fn create(pool: &DbPool, url: &str) -> Result<Self, PhotoError> {
        let photo = Self::new(url.to_string());

        let photo = sqlx::query_as::<_, Photo>(
            "INSERT INTO photos (id, url, uploaded_at)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(photo.id)
        .bind(photo.url)
        .bind(photo.uploaded_at)
        .fetch_one(pool)
        .await?;

        Ok(photo)
    }

    // No ORDER BY: listing follows the table's natural order.
    pub async fn find_all(pool: &DbPool) -> Result<Vec<Self>, PhotoError> {
        let photos = sqlx::query_as::<_, Photo>("SELECT id, url, uploaded_at FROM photos")
            .fetch_all(pool)
            .await?;

        Ok(photos)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub url: String,
}

impl UploadResponse {
    pub fn stored(url: String) -> Self {
        Self {
            message: "Uploaded locally".to_string(),
            url,
        }
    }
}
