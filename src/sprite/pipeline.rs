use bytemuck::{Pod, Zeroable};

use crate::color::Rgba8;

/// The number of vertices each sprite occupies in the vertex buffer. Two of
/// the quad's corners are shared by both triangles.
pub const VERTICES_PER_SPRITE: usize = 4;

/// The number of indices each sprite occupies in the index buffer: two
/// triangles of three indices each.
pub const INDICES_PER_SPRITE: usize = 6;

/// The vertex attributes each sprite corner carries.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// The position in pixel coordinates. `z` is always 0; sprites live on
    /// a flat plane.
    pub position: [f32; 3],
    /// The packed vertex color.
    pub color: Rgba8,
    /// The texture coordinate.
    pub uv: [f32; 2],
}

/// Returns the index data for a batch of up to `capacity` sprites: for each
/// sprite slot `i`, the triangles `(4i, 4i+1, 4i+2)` and `(4i+2, 4i+3, 4i)`.
///
/// The topology never changes, so the buffer built from this is filled once
/// at construction and reused by every portion.
pub(crate) fn quad_indices(capacity: usize) -> Vec<u16> {
    let mut indices = Vec::with_capacity(capacity * INDICES_PER_SPRITE);
    for sprite in 0..capacity {
        let first_vertex = (sprite * VERTICES_PER_SPRITE) as u16;
        // The first triangle of the quad.
        indices.push(first_vertex);
        indices.push(first_vertex + 1);
        indices.push(first_vertex + 2);
        // The second triangle.
        indices.push(first_vertex + 2);
        indices.push(first_vertex + 3);
        indices.push(first_vertex);
    }
    indices
}
