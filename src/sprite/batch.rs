use tracing::{instrument, trace};

use super::{
    geometry,
    pipeline::{quad_indices, INDICES_PER_SPRITE, VERTICES_PER_SPRITE},
    SpriteCommand, SpriteOptions,
};
use crate::{
    color::Color,
    graphics::{
        BlendMode, Graphics, IndexBufferId, ShaderPair, ShaderParameter, TextureSource,
        TextureUnit, VertexBufferId,
    },
    math::{screen_projection, Point, ProjectionMatrix},
};

/// The default maximum number of sprites a single portion may contain.
///
/// One portion is one draw call, and the bound also sizes the static index
/// buffer and the shared vertex buffer.
/// [`SpriteBatch::with_portion_capacity`] overrides it per batch.
pub const DEFAULT_PORTION_CAPACITY: usize = 2000;

/// Accumulates sprite draw requests for a frame and flushes them as one
/// indexed draw call per run of consecutive sprites that share a texture.
///
/// Runs are formed purely by submission order. Interleaving textures breaks
/// runs apart; the engine never reorders sprites to merge them, so callers
/// control the draw-call count by the order they queue in.
///
/// All calls must happen on the one thread that owns the GPU context, in
/// `begin`, `draw`, `end` order for each frame. Queueing outside of a frame
/// is a contract violation; debug builds assert against it.
#[derive(Debug)]
pub struct SpriteBatch {
    vertex_buffer: VertexBufferId,
    index_buffer: IndexBufferId,
    shaders: ShaderPair,
    portion_capacity: usize,
    sprites: Vec<SpriteCommand>,
    recording: bool,
}

impl SpriteBatch {
    /// Creates a batch with [`DEFAULT_PORTION_CAPACITY`], allocating its
    /// index and vertex buffers through `gfx`.
    pub fn new<G: Graphics>(gfx: &mut G, shaders: ShaderPair) -> Self {
        Self::with_portion_capacity(gfx, shaders, DEFAULT_PORTION_CAPACITY)
    }

    /// Creates a batch whose portions hold at most `portion_capacity`
    /// sprites.
    ///
    /// The index buffer is filled with the full quad topology here and
    /// never written again. The vertex buffer holds `portion_capacity * 4`
    /// slots and is rewritten from slot 0 for every portion.
    ///
    /// # Panics
    ///
    /// Panics if `portion_capacity` is 0, or too large for its vertex
    /// range to be addressed by 16-bit indices.
    pub fn with_portion_capacity<G: Graphics>(
        gfx: &mut G,
        shaders: ShaderPair,
        portion_capacity: usize,
    ) -> Self {
        assert!(portion_capacity > 0, "portion capacity must be non-zero");
        assert!(
            portion_capacity * VERTICES_PER_SPRITE <= usize::from(u16::MAX) + 1,
            "portion capacity exceeds the 16-bit index range"
        );
        let index_buffer = gfx.create_index_buffer(&quad_indices(portion_capacity));
        let vertex_buffer = gfx.create_vertex_buffer(portion_capacity * VERTICES_PER_SPRITE);
        Self {
            vertex_buffer,
            index_buffer,
            shaders,
            portion_capacity,
            sprites: Vec::new(),
            recording: false,
        }
    }

    /// Returns the maximum number of sprites a single portion may contain.
    #[must_use]
    pub const fn portion_capacity(&self) -> usize {
        self.portion_capacity
    }

    /// Begins a new frame, discarding any sprites from the previous one.
    pub fn begin(&mut self) {
        self.sprites.clear();
        self.recording = true;
    }

    /// Queues one sprite. Nothing touches the GPU until
    /// [`end`](Self::end).
    ///
    /// The caller keeps ownership of `texture` and must keep it valid until
    /// this frame's `end` call has been issued.
    pub fn draw(&mut self, texture: &impl TextureSource, position: Point, options: SpriteOptions) {
        debug_assert!(self.recording, "draw() called outside a begin()/end() frame");
        self.sprites.push(SpriteCommand {
            texture: texture.id(),
            position,
            color: options.color,
            rotation: options.rotation,
            origin: options.origin,
            scale: options.scale,
        });
    }

    /// Flushes the frame: partitions the queued sprites into same-texture
    /// runs and issues one draw call per run.
    ///
    /// An empty frame returns without touching any GPU state. Otherwise the
    /// blend mode, buffers, shaders, and shader parameters are set up once,
    /// and the projection is rebuilt from the viewport's current size so
    /// resizes between frames take effect immediately.
    #[instrument(name = "SpriteBatch::end", level = "trace", skip(self, gfx))]
    pub fn end<G: Graphics>(&mut self, gfx: &mut G) {
        debug_assert!(self.recording, "end() called without begin()");
        self.recording = false;
        if self.sprites.is_empty() {
            return;
        }

        gfx.set_blend_mode(BlendMode::Alpha);
        gfx.bind_vertex_buffer(self.vertex_buffer);
        gfx.bind_index_buffer(self.index_buffer);
        gfx.bind_shaders(self.shaders);

        // Each vertex already carries its sprite's tint, so the material
        // multiplier stays white.
        gfx.set_color_parameter(ShaderParameter::MaterialDiffuse, Color::WHITE);
        // Sprite positions are emitted directly in screen space.
        gfx.set_matrix_parameter(
            ShaderParameter::ModelTransform,
            ProjectionMatrix::identity().to_array(),
        );
        gfx.set_matrix_parameter(
            ShaderParameter::ViewProjection,
            screen_projection(gfx.viewport_size()).to_array(),
        );

        let mut start = 0;
        let mut portions = 0_usize;
        while start < self.sprites.len() {
            let count = self.portion_length(start);
            self.render_portion(gfx, start, count);
            start += count;
            portions += 1;
        }
        trace!(sprites = self.sprites.len(), portions, "flushed frame");
    }

    /// Returns the length of the run of sprites starting at `start` that
    /// share its texture, capped at the portion capacity.
    fn portion_length(&self, start: usize) -> usize {
        let texture = self.sprites[start].texture;
        let mut count = 1;
        while count < self.portion_capacity {
            match self.sprites.get(start + count) {
                Some(sprite) if sprite.texture == texture => count += 1,
                _ => break,
            }
        }
        count
    }

    /// Uploads one portion's vertices and issues its draw call.
    fn render_portion<G: Graphics>(&self, gfx: &mut G, start: usize, count: usize) {
        let sprites = &self.sprites[start..start + count];
        let texture = sprites[0].texture;
        let texture_size = gfx.texture_size(texture);

        // The vertex buffer is remapped from slot 0 for every portion; the
        // mapping is committed before the draw call below is issued.
        gfx.write_vertices(self.vertex_buffer, count * VERTICES_PER_SPRITE, |vertices| {
            geometry::write_portion(vertices, sprites, texture_size);
        });

        gfx.bind_texture(TextureUnit::Diffuse, texture);
        gfx.draw_indexed(count * INDICES_PER_SPRITE, 0, count * VERTICES_PER_SPRITE, 0);
    }
}
