pub mod services;

pub use services::{ImageUpload, UploadError, MAX_IMAGE_BYTES};
