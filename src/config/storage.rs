use std::env;
use std::path::PathBuf;

use crate::utils::avatar::LocalFileStorage;

/// Avatar upload storage configuration.
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
    pub public_base_url: String,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./uploads")),
            public_base_url: env::var("UPLOAD_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000/static".to_string()),
        }
    }

    pub fn storage(&self) -> LocalFileStorage {
        LocalFileStorage::new(self.upload_dir.clone(), self.public_base_url.clone())
    }
}
