use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::PhotoRepository;
use crate::models::photo::{Photo, PhotoError};

/// Vec-backed repository for tests. A failing instance answers every call
/// with a closed-pool error.
#[derive(Debug, Default)]
pub struct InMemoryPhotoRepository {
    photos: Mutex<Vec<Photo>>,
    failing: bool,
}

impl InMemoryPhotoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            photos: Mutex::default(),
            failing: true,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Photo>> {
        self.photos.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check(&self) -> Result<(), PhotoError> {
        if self.failing {
            return Err(PhotoError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl PhotoRepository for InMemoryPhotoRepository {
    async fn insert(&self, url: &str) -> Result<Photo, PhotoError> {
        self.check()?;
        let photo = Photo::new(url.to_string());
        self.lock().push(photo.clone());
        Ok(photo)
    }

    async fn find_all(&self) -> Result<Vec<Photo>, PhotoError> {
        self.check()?;
        Ok(self.lock().clone())
    }
}
