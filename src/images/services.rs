use bytes::Bytes;
use rand::Rng;
use thiserror::Error;
use tracing::{error, info};

use crate::storage::StorageClient;

pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("file is not supported: {0}")]
    UnsupportedType(String),
    #[error("file size exceeds 2 MB ({size} bytes)")]
    TooLarge { size: usize },
    #[error("upload to file host failed: {0}")]
    Hosting(String),
}

/// An image file received from a client, not yet stored anywhere.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub body: Bytes,
    pub content_type: String,
}

/// A file accepted and stored by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub key: String,
    pub url: String,
}

fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        _ => None,
    }
}

pub fn validate_image(content_type: &str, size: usize) -> Result<(), UploadError> {
    if ext_from_mime(content_type).is_none() {
        return Err(UploadError::UnsupportedType(content_type.to_string()));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(UploadError::TooLarge { size });
    }
    Ok(())
}

/// Object key for a profile image. Deterministic for a given rng state.
pub fn object_key<R: Rng + ?Sized>(rng: &mut R, content_type: &str) -> String {
    let ext = ext_from_mime(content_type).unwrap_or("bin");
    format!("users/user-image-{}.{}", rng.gen::<u64>(), ext)
}

/// Runs the gate, then hands the bytes to the file host under `key`.
pub async fn upload_image(
    storage: &dyn StorageClient,
    image: ImageUpload,
    key: String,
) -> Result<StoredImage, UploadError> {
    validate_image(&image.content_type, image.body.len())?;

    storage
        .put_object(&key, image.body, &image.content_type)
        .await
        .map_err(|e| {
            error!(error = %e, key = %key, "put_object failed");
            UploadError::Hosting(e.to_string())
        })?;

    let url = storage.public_url(&key);
    info!(key = %key, "image uploaded");
    Ok(StoredImage { key, url })
}
