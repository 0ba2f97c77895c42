use std::{
    convert::TryFrom,
    path::Path,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use image::{DynamicImage, RgbaImage};
use lazy_static::lazy_static;

use crate::{
    graphics::{TextureId, TextureSource},
    math::Size,
};

lazy_static! {
    static ref GLOBAL_ID_CELL: AtomicU64 = AtomicU64::new(0);
}

/// Embeds a texture in the binary.
#[macro_export]
macro_rules! include_texture {
    ($image_path:expr) => {{
        let image_bytes = std::include_bytes!($image_path);
        <$crate::texture::Texture as std::convert::TryFrom<&[u8]>>::try_from(image_bytes)
    }};
}

/// An image that can be drawn as a sprite. Cheap to clone.
///
/// Each texture receives a process-wide unique [`TextureId`] at creation.
/// The sprite queue groups consecutive draws by that id, so two clones of
/// the same texture batch together while two separately loaded copies of the
/// same image do not.
#[derive(Debug, Clone)]
pub struct Texture {
    id: TextureId,
    /// The image behind the texture.
    pub image: Arc<RgbaImage>,
}

impl Texture {
    /// Creates a new texture from an image.
    #[must_use]
    pub fn new(image: &DynamicImage) -> Self {
        let image = image.to_rgba8();
        let id = TextureId::new(GLOBAL_ID_CELL.fetch_add(1, Ordering::SeqCst));
        Self {
            id,
            image: Arc::new(image),
        }
    }

    /// Loads a texture from an image at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let img = image::open(path)?;

        Ok(Self::new(&img))
    }

    /// Returns the raw image data.
    #[must_use]
    pub fn rgba_pixels(&self) -> Vec<u8> {
        (*self.image).clone().into_vec()
    }
}

impl TextureSource for Texture {
    fn id(&self) -> TextureId {
        self.id
    }

    fn size(&self) -> Size<u32> {
        let (w, h) = self.image.dimensions();
        Size::new(w, h)
    }
}

impl<'a> TryFrom<&'a [u8]> for Texture {
    type Error = crate::Error;

    fn try_from(bytes: &[u8]) -> crate::Result<Self> {
        let img = image::load_from_memory(bytes)?;

        Ok(Self::new(&img))
    }
}
