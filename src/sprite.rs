use crate::{
    color::Color,
    graphics::TextureId,
    math::{Angle, Point, Vector},
};

mod batch;
mod geometry;
mod pipeline;

pub use self::{
    batch::{SpriteBatch, DEFAULT_PORTION_CAPACITY},
    pipeline::{Vertex, INDICES_PER_SPRITE, VERTICES_PER_SPRITE},
};

/// Per-sprite draw settings with the engine's defaults.
///
/// The defaults match a plain blit: white tint, no rotation, the top-left
/// corner as the pivot, and a scale of 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteOptions {
    /// The tint color applied to the sprite's texture.
    pub color: Color,
    /// The rotation applied around the sprite's origin.
    pub rotation: Angle,
    /// The pivot offset, subtracted from the sprite's local rectangle before
    /// scaling and rotating.
    pub origin: Vector,
    /// The uniform scale factor.
    pub scale: f32,
}

impl Default for SpriteOptions {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            rotation: Angle::zero(),
            origin: Vector::zero(),
            scale: 1.,
        }
    }
}

/// One queued sprite: the texture to sample and where to place it.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SpriteCommand {
    pub texture: TextureId,
    pub position: Point,
    pub color: Color,
    pub rotation: Angle,
    pub origin: Vector,
    pub scale: f32,
}
