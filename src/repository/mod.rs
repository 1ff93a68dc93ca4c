use async_trait::async_trait;

use crate::database::connection::DbPool;
use crate::models::photo::{Photo, PhotoError};

#[cfg(any(test, feature = "test-support"))]
pub mod memory;

/// Storage for photo records. Records can be added and listed, nothing else.
#[async_trait]
pub trait PhotoRepository: Send + Sync {
    async fn insert(&self, url: &str) -> Result<Photo, PhotoError>;

    async fn find_all(&self) -> Result<Vec<Photo>, PhotoError>;
}

#[derive(Clone)]
pub struct PgPhotoRepository {
    pool: DbPool,
}

impl PgPhotoRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PhotoRepository for PgPhotoRepository {
    async fn insert(&self, url: &str) -> Result<Photo, PhotoError> {
        Photo::create(&self.pool, url).await
    }

    async fn find_all(&self) -> Result<Vec<Photo>, PhotoError> {
        Photo::find_all(&self.pool).await
    }
}
