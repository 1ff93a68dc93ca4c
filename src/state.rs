use std::path::PathBuf;
use std::sync::Arc;

use crate::repository::PhotoRepository;
use crate::services::access::AccessGate;
use crate::services::storage::UploadStorage;

/// Everything the handlers need, built once at startup.
pub struct AppState {
    pub photos: Arc<dyn PhotoRepository>,
    pub gate: AccessGate,
    pub storage: UploadStorage,
    pub public_dir: PathBuf,
}

impl AppState {
    pub fn new(
        photos: Arc<dyn PhotoRepository>,
        gate: AccessGate,
        storage: UploadStorage,
        public_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            photos,
            gate,
            storage,
            public_dir: public_dir.into(),
        }
    }
}
