use super::{
    pipeline::{Vertex, VERTICES_PER_SPRITE},
    SpriteCommand,
};
use crate::math::{Point, Size, Transform2D};

/// Texture coordinates for a sprite's four corners, in the same top-left,
/// top-right, bottom-right, bottom-left order the positions are emitted in.
const CORNER_UVS: [[f32; 2]; 4] = [[0., 0.], [1., 0.], [1., 1.], [0., 1.]];

/// Writes the vertex data for one portion: four vertices per sprite, in
/// winding order, with the sprite's packed color on every corner.
///
/// All sprites in a portion share one texture, so the caller resolves the
/// texture's dimensions once instead of per sprite.
pub(crate) fn write_portion(
    vertices: &mut [Vertex],
    sprites: &[SpriteCommand],
    texture_size: Size<u32>,
) {
    debug_assert_eq!(vertices.len(), sprites.len() * VERTICES_PER_SPRITE);
    let width = texture_size.width as f32;
    let height = texture_size.height as f32;

    for (sprite, quad) in sprites
        .iter()
        .zip(vertices.chunks_exact_mut(VERTICES_PER_SPRITE))
    {
        let corners = corner_positions(sprite, width, height);
        let color = sprite.color.to_rgba8();
        for ((vertex, position), uv) in quad.iter_mut().zip(&corners).zip(&CORNER_UVS) {
            *vertex = Vertex {
                position: [position.x, position.y, 0.],
                color,
                uv: *uv,
            };
        }
    }
}

/// Returns the sprite's four transformed corners in top-left, top-right,
/// bottom-right, bottom-left order.
fn corner_positions(sprite: &SpriteCommand, width: f32, height: f32) -> [Point; 4] {
    if sprite.rotation.radians == 0. && sprite.scale == 1. {
        // An unrotated, unscaled sprite reduces to an axis-aligned
        // rectangle anchored at `position - origin`.
        let top_left = sprite.position - sprite.origin;
        [
            top_left,
            Point::new(top_left.x + width, top_left.y),
            Point::new(top_left.x + width, top_left.y + height),
            Point::new(top_left.x, top_left.y + height),
        ]
    } else {
        let transform = sprite_transform(sprite);
        [
            transform.transform_point(Point::new(0., 0.)),
            transform.transform_point(Point::new(width, 0.)),
            transform.transform_point(Point::new(width, height)),
            transform.transform_point(Point::new(0., height)),
        ]
    }
}

/// Builds `Translate(position) · Rotate(rotation) · Scale(scale) ·
/// Translate(-origin)`, flattened so the rotation costs one sine/cosine
/// evaluation per sprite.
fn sprite_transform(sprite: &SpriteCommand) -> Transform2D {
    let (sin, cos) = sprite.rotation.radians.sin_cos();
    let (sin, cos) = (sin * sprite.scale, cos * sprite.scale);
    let origin = sprite.origin;
    let position = sprite.position;
    Transform2D::new(
        cos,
        sin,
        -sin,
        cos,
        position.x - origin.x * cos + origin.y * sin,
        position.y - origin.x * sin - origin.y * cos,
    )
}
