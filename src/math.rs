//! Math types for 2d geometry.
//!
//! These are thin aliases over [`euclid`] types, tagged with the units this
//! crate works in.

/// A unit representing physical pixels on a display.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pixels;

/// A unit representing the renderer's normalized device space: both axes in
/// the range `[-1, 1]`, origin at the center of the screen, y-up.
#[derive(Clone, Copy, Debug, Default)]
pub struct Clip;

/// A type representing an x and y coordinate.
pub type Point = euclid::Point2D<f32, Pixels>;
/// A type representing a vector with magnitudes x and y.
pub type Vector = euclid::Vector2D<f32, Pixels>;
/// A type representing a width and height.
pub type Size<T = u32> = euclid::Size2D<T, Pixels>;
/// A type representing an angle of measurement.
pub type Angle = euclid::Angle<f32>;
/// An affine transform between pixel-space coordinates.
pub type Transform2D = euclid::Transform2D<f32, Pixels, Pixels>;
/// A matrix mapping pixel-space coordinates into [`Clip`] space.
pub type ProjectionMatrix = euclid::Transform3D<f32, Pixels, Clip>;

/// Returns the projection that maps pixel coordinates (origin top-left,
/// y-down) onto [`Clip`] space.
///
/// Sprite vertices are positioned in pixel units, so the x axis is scaled by
/// `2 / width` and translated by `-1`, and the y axis is scaled by
/// `-2 / height` and translated by `+1`, flipping it to point down. The
/// viewport may be resized between frames; callers rebuild this from the
/// current size every frame.
#[must_use]
pub fn screen_projection(viewport: Size<u32>) -> ProjectionMatrix {
    let width = viewport.width as f32;
    let height = viewport.height as f32;
    ProjectionMatrix::scale(2. / width, -2. / height, 1.)
        .then_translate(euclid::Vector3D::new(-1., 1., 0.))
}
