//! Image resource resolution.
//!
//! The engine reserves an image's layout box from the extent carried in the
//! document tree; the resolver is only consulted at draw time, and a missing
//! or undecodable resource merely skips the draw command while the reserved
//! box (and therefore surrounding positions) stays intact.

use std::collections::HashMap;
use std::fmt;

use crate::model::ImageRef;

/// Decoded image resource: raw bytes plus pixel dimensions.
#[derive(Clone)]
pub struct ImageData {
    pub bytes: Vec<u8>,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceError {
    NotFound,
    Undecodable,
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::NotFound => write!(f, "image resource not found"),
            ResourceError::Undecodable => write!(f, "image bytes could not be decoded"),
        }
    }
}

impl std::error::Error for ResourceError {}

/// Maps opaque references to image data at draw time.
pub trait ImageResolver {
    fn resolve(&self, image: &ImageRef) -> Result<ImageData, ResourceError>;
}

/// A keyed in-memory store, convenient for suppliers that extract all image
/// parts up front.
#[derive(Default)]
pub struct MemoryImages {
    entries: HashMap<String, ImageData>,
}

impl MemoryImages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store already-decoded image data under a key.
    pub fn insert(&mut self, key: impl Into<String>, data: ImageData) {
        self.entries.insert(key.into(), data);
    }

    /// Store PNG bytes, decoding the pixel dimensions from the stream.
    pub fn insert_png(&mut self, key: impl Into<String>, bytes: Vec<u8>) -> Result<(), ResourceError> {
        use image::GenericImageView;

        let decoded = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png)
            .map_err(|_| ResourceError::Undecodable)?;
        let (pixel_width, pixel_height) = decoded.dimensions();
        self.entries.insert(
            key.into(),
            ImageData {
                bytes,
                pixel_width,
                pixel_height,
            },
        );
        Ok(())
    }
}

impl ImageResolver for MemoryImages {
    fn resolve(&self, image: &ImageRef) -> Result<ImageData, ResourceError> {
        self.entries
            .get(&image.0)
            .cloned()
            .ok_or(ResourceError::NotFound)
    }
}
