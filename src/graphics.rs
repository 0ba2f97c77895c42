use crate::{color::Color, math::Size, sprite::Vertex};

/// Identifies a vertex buffer created through
/// [`Graphics::create_vertex_buffer`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct VertexBufferId(u64);

impl VertexBufferId {
    /// Returns an id wrapping `id`. Ids are minted by the [`Graphics`]
    /// implementation and are opaque to this crate.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Identifies an index buffer created through
/// [`Graphics::create_index_buffer`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct IndexBufferId(u64);

impl IndexBufferId {
    /// Returns an id wrapping `id`. Ids are minted by the [`Graphics`]
    /// implementation and are opaque to this crate.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Identifies a compiled shader owned by the hosting renderer.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct ShaderId(u64);

impl ShaderId {
    /// Returns an id wrapping `id`.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Identifies a texture in the collaborator's texture table.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct TextureId(u64);

impl TextureId {
    /// Returns an id wrapping `id`.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// The vertex/fragment shader program pair used to draw sprites.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ShaderPair {
    /// The vertex shader.
    pub vertex: ShaderId,
    /// The fragment shader.
    pub fragment: ShaderId,
}

/// Fixed-function blend states.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BlendMode {
    /// Source pixels overwrite the destination.
    Opaque,
    /// Source pixels are blended with the destination using the source
    /// alpha.
    Alpha,
}

/// Texture units the sprite shaders sample from.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TextureUnit {
    /// The diffuse map sampled for sprite color.
    Diffuse,
}

/// Named shader parameters set while flushing a frame.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ShaderParameter {
    /// The material's diffuse color multiplier.
    MaterialDiffuse,
    /// The model-to-world transform.
    ModelTransform,
    /// The combined view and projection transform.
    ViewProjection,
}

/// A type that names a texture in the collaborator's texture table and can
/// be queued with [`SpriteBatch::draw`](crate::sprite::SpriteBatch::draw).
///
/// The sprite queue stores only the [`TextureId`]. Ownership of the texture
/// stays with the caller, which must keep it alive and registered with the
/// [`Graphics`] implementation until the frame's
/// [`end`](crate::sprite::SpriteBatch::end) call has been issued.
pub trait TextureSource {
    /// The id used to group and bind this texture.
    fn id(&self) -> TextureId;

    /// The pixel dimensions of this texture.
    fn size(&self) -> Size<u32>;
}

/// The contract the hosting GPU subsystem implements for this engine.
///
/// The engine issues all of its GPU work through this trait: one-time buffer
/// creation, per-portion vertex uploads, fixed-function state changes, and
/// indexed draw submission. Handles passed in are expected to be valid;
/// implementations may reject or ignore stale ones, and the engine does not
/// validate them itself.
pub trait Graphics {
    /// Creates an immutable index buffer initialized with `contents`. The
    /// buffer is written once here and never touched again.
    fn create_index_buffer(&mut self, contents: &[u16]) -> IndexBufferId;

    /// Creates a dynamic vertex buffer with room for `capacity` vertices
    /// using the [`Vertex`] attribute layout: 3d position, packed 32-bit
    /// color, 2d texture coordinate.
    fn create_vertex_buffer(&mut self, capacity: usize) -> VertexBufferId;

    /// Maps the first `count` vertex slots of `buffer` for writing and
    /// passes the mapping to `fill`. The mapping is committed when `fill`
    /// returns, before the buffer can be bound for drawing.
    fn write_vertices<F>(&mut self, buffer: VertexBufferId, count: usize, fill: F)
    where
        F: FnOnce(&mut [Vertex]);

    /// Selects the fixed-function blend state for subsequent draws.
    fn set_blend_mode(&mut self, mode: BlendMode);

    /// Binds `buffer` as the active vertex stream.
    fn bind_vertex_buffer(&mut self, buffer: VertexBufferId);

    /// Binds `buffer` as the active index stream.
    fn bind_index_buffer(&mut self, buffer: IndexBufferId);

    /// Binds the vertex/fragment shader program pair.
    fn bind_shaders(&mut self, shaders: ShaderPair);

    /// Sets a color-valued shader parameter.
    fn set_color_parameter(&mut self, parameter: ShaderParameter, color: Color);

    /// Sets a matrix-valued shader parameter. The matrix is row-major with
    /// the translation in the last row, as produced by
    /// [`Transform3D::to_array`](euclid::Transform3D::to_array).
    fn set_matrix_parameter(&mut self, parameter: ShaderParameter, matrix: [f32; 16]);

    /// Binds `texture` to `unit` for subsequent draws.
    fn bind_texture(&mut self, unit: TextureUnit, texture: TextureId);

    /// Returns the pixel dimensions of the current viewport.
    fn viewport_size(&self) -> Size<u32>;

    /// Returns the pixel dimensions of `texture`.
    fn texture_size(&self, texture: TextureId) -> Size<u32>;

    /// Issues one indexed triangle-list draw call over the bound buffers.
    fn draw_indexed(
        &mut self,
        index_count: usize,
        first_index: usize,
        vertex_count: usize,
        first_vertex: usize,
    );
}
