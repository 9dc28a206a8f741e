//! Image upload collaborator: format checks, unique naming and disk writes.

pub mod image_storage;

pub use image_storage::{ImageStorage, ImageUpload, StoredImage};
