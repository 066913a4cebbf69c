//! Avatar helpers: Gravatar defaults and uploaded-avatar storage.

use anyhow::anyhow;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use tokio::fs;
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Maximum accepted avatar upload size (2 MiB).
pub const MAX_AVATAR_BYTES: usize = 2 * 1024 * 1024;

/// Content types accepted for avatar uploads.
pub const ALLOWED_AVATAR_TYPES: &[&str] = &["image/png", "image/jpeg", "image/webp"];

/// Builds a Gravatar URL for an email address.
///
/// Gravatar hashes the trimmed, lowercased address; SHA-256 hashes are
/// accepted alongside legacy MD5.
pub fn gravatar_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let digest = Sha256::digest(normalized.as_bytes());
    format!(
        "https://www.gravatar.com/avatar/{}?d=identicon",
        hex::encode(digest)
    )
}

/// Local filesystem storage for uploaded avatars.
///
/// Files are written under the configured upload directory and served
/// from `{public_base_url}/{key}`.
#[derive(Clone, Debug)]
pub struct LocalFileStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalFileStorage {
    pub fn new(root: PathBuf, public_base_url: String) -> Self {
        Self {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Saves avatar bytes for a user and returns the public URL.
    ///
    /// The key embeds the user id so a re-upload replaces the previous
    /// file's URL deterministically apart from the random suffix.
    pub async fn save_avatar(
        &self,
        user_id: Uuid,
        extension: &str,
        content: &[u8],
    ) -> Result<String, AppError> {
        if content.len() > MAX_AVATAR_BYTES {
            return Err(AppError::bad_request(anyhow!(
                "Avatar exceeds maximum size of {} bytes",
                MAX_AVATAR_BYTES
            )));
        }

        let key = format!("avatars/{}-{}.{}", user_id, Uuid::new_v4(), extension);
        let path = self.root.join(&key);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::internal(anyhow!("Failed to create upload dir: {}", e)))?;
        }

        fs::write(&path, content)
            .await
            .map_err(|e| AppError::internal(anyhow!("Failed to write avatar: {}", e)))?;

        Ok(format!("{}/{}", self.public_base_url, key))
    }
}

/// Maps an accepted avatar content type to a file extension.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/png" => Some("png"),
        "image/jpeg" => Some("jpg"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}
