//! A 2d sprite batching engine.
//!
//! Sprites are queued between [`SpriteBatch::begin`](sprite::SpriteBatch::begin)
//! and [`SpriteBatch::end`](sprite::SpriteBatch::end), and flushed to the GPU
//! as one indexed draw call per run of consecutive sprites that share a
//! texture. The GPU itself is reached through the narrow [`Graphics`]
//! contract, which the hosting renderer implements.

#![forbid(unsafe_code)]
#![warn(
    clippy::cargo,
    missing_docs,
    clippy::nursery,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![cfg_attr(doc, deny(rustdoc::all))]
#![allow(
    clippy::option_if_let_else,
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]

mod color;
mod error;
/// The contract between the batching engine and the hosting GPU subsystem.
pub mod graphics;
/// Math types for 2d geometry.
pub mod math;
/// The sprite queue and the batching pipeline behind it.
pub mod sprite;
#[cfg(test)]
mod tests;
/// Types for managing textures.
pub mod texture;

// Re-exports
pub use euclid;
pub use image;

pub use self::{
    color::{Color, Rgba8},
    error::Error,
    graphics::Graphics,
};

/// A collection of commonly used exports provided by this crate.
pub mod prelude {
    pub use super::{
        graphics::{
            BlendMode, Graphics, IndexBufferId, ShaderId, ShaderPair, ShaderParameter, TextureId,
            TextureSource, TextureUnit, VertexBufferId,
        },
        include_texture,
        math::{Angle, Point, Size, Vector},
        sprite::{SpriteBatch, SpriteOptions},
        texture::Texture,
        Color, Error,
    };
}

/// Alias for [`std::result::Result`] where the error type is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
