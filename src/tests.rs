use std::collections::HashMap;

use bytemuck::Zeroable;
use image::{DynamicImage, RgbaImage};
use tracing::Level;

use crate::{
    color::Color,
    graphics::{
        BlendMode, Graphics, IndexBufferId, ShaderId, ShaderPair, ShaderParameter, TextureId,
        TextureSource, TextureUnit, VertexBufferId,
    },
    math::{screen_projection, Point, ProjectionMatrix, Size, Vector},
    sprite::{SpriteBatch, SpriteOptions, Vertex, INDICES_PER_SPRITE, VERTICES_PER_SPRITE},
    texture::Texture,
};

/// Every contract call a batch makes, in order.
#[derive(Debug, Clone, PartialEq)]
enum Call {
    CreateIndexBuffer {
        id: IndexBufferId,
        indices: usize,
    },
    CreateVertexBuffer {
        id: VertexBufferId,
        capacity: usize,
    },
    SetBlendMode(BlendMode),
    BindVertexBuffer(VertexBufferId),
    BindIndexBuffer(IndexBufferId),
    BindShaders(ShaderPair),
    SetColorParameter(ShaderParameter, Color),
    SetMatrixParameter(ShaderParameter, [f32; 16]),
    WriteVertices {
        buffer: VertexBufferId,
        count: usize,
    },
    BindTexture(TextureUnit, TextureId),
    DrawIndexed {
        index_count: usize,
        first_index: usize,
        vertex_count: usize,
        first_vertex: usize,
    },
}

/// A [`Graphics`] collaborator that records every call instead of talking to
/// a GPU, standing in for the hosting renderer.
struct RecordingGraphics {
    viewport: Size<u32>,
    texture_sizes: HashMap<TextureId, Size<u32>>,
    index_buffers: Vec<Vec<u16>>,
    vertex_capacities: Vec<usize>,
    calls: Vec<Call>,
    writes: Vec<Vec<Vertex>>,
}

impl RecordingGraphics {
    fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Size::new(width, height),
            texture_sizes: HashMap::new(),
            index_buffers: Vec::new(),
            vertex_capacities: Vec::new(),
            calls: Vec::new(),
            writes: Vec::new(),
        }
    }

    /// Creates a texture and registers its size in this collaborator's
    /// texture table.
    fn texture(&mut self, width: u32, height: u32) -> Texture {
        let texture = Texture::new(&DynamicImage::ImageRgba8(RgbaImage::new(width, height)));
        self.texture_sizes.insert(texture.id(), texture.size());
        texture
    }

    fn draws(&self) -> Vec<(usize, usize, usize, usize)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::DrawIndexed {
                    index_count,
                    first_index,
                    vertex_count,
                    first_vertex,
                } => Some((*index_count, *first_index, *vertex_count, *first_vertex)),
                _ => None,
            })
            .collect()
    }

    fn bound_textures(&self) -> Vec<TextureId> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::BindTexture(TextureUnit::Diffuse, texture) => Some(*texture),
                _ => None,
            })
            .collect()
    }

    fn view_projections(&self) -> Vec<[f32; 16]> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::SetMatrixParameter(ShaderParameter::ViewProjection, matrix) => Some(*matrix),
                _ => None,
            })
            .collect()
    }
}

impl Graphics for RecordingGraphics {
    fn create_index_buffer(&mut self, contents: &[u16]) -> IndexBufferId {
        let id = IndexBufferId::new(self.index_buffers.len() as u64);
        self.index_buffers.push(contents.to_vec());
        self.calls.push(Call::CreateIndexBuffer {
            id,
            indices: contents.len(),
        });
        id
    }

    fn create_vertex_buffer(&mut self, capacity: usize) -> VertexBufferId {
        let id = VertexBufferId::new(self.vertex_capacities.len() as u64);
        self.vertex_capacities.push(capacity);
        self.calls.push(Call::CreateVertexBuffer { id, capacity });
        id
    }

    fn write_vertices<F>(&mut self, buffer: VertexBufferId, count: usize, fill: F)
    where
        F: FnOnce(&mut [Vertex]),
    {
        assert!(
            count <= self.vertex_capacities[buffer.get() as usize],
            "write exceeds the buffer's capacity"
        );
        let mut vertices = vec![Vertex::zeroed(); count];
        fill(&mut vertices);
        self.writes.push(vertices);
        self.calls.push(Call::WriteVertices { buffer, count });
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.calls.push(Call::SetBlendMode(mode));
    }

    fn bind_vertex_buffer(&mut self, buffer: VertexBufferId) {
        self.calls.push(Call::BindVertexBuffer(buffer));
    }

    fn bind_index_buffer(&mut self, buffer: IndexBufferId) {
        self.calls.push(Call::BindIndexBuffer(buffer));
    }

    fn bind_shaders(&mut self, shaders: ShaderPair) {
        self.calls.push(Call::BindShaders(shaders));
    }

    fn set_color_parameter(&mut self, parameter: ShaderParameter, color: Color) {
        self.calls.push(Call::SetColorParameter(parameter, color));
    }

    fn set_matrix_parameter(&mut self, parameter: ShaderParameter, matrix: [f32; 16]) {
        self.calls.push(Call::SetMatrixParameter(parameter, matrix));
    }

    fn bind_texture(&mut self, unit: TextureUnit, texture: TextureId) {
        self.calls.push(Call::BindTexture(unit, texture));
    }

    fn viewport_size(&self) -> Size<u32> {
        self.viewport
    }

    fn texture_size(&self, texture: TextureId) -> Size<u32> {
        self.texture_sizes[&texture]
    }

    fn draw_indexed(
        &mut self,
        index_count: usize,
        first_index: usize,
        vertex_count: usize,
        first_vertex: usize,
    ) {
        self.calls.push(Call::DrawIndexed {
            index_count,
            first_index,
            vertex_count,
            first_vertex,
        });
    }
}

fn shaders() -> ShaderPair {
    ShaderPair {
        vertex: ShaderId::new(1),
        fragment: ShaderId::new(2),
    }
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .try_init();
}

#[test]
fn construction_allocates_static_buffers() {
    let mut gfx = RecordingGraphics::new(800, 600);
    let batch = SpriteBatch::new(&mut gfx, shaders());

    assert_eq!(batch.portion_capacity(), 2000);
    assert_eq!(gfx.index_buffers[0].len(), 2000 * INDICES_PER_SPRITE);
    assert_eq!(gfx.vertex_capacities[0], 2000 * VERTICES_PER_SPRITE);
}

#[test]
fn empty_frame_is_a_no_op() {
    let mut gfx = RecordingGraphics::new(800, 600);
    let mut batch = SpriteBatch::new(&mut gfx, shaders());
    let setup = gfx.calls.len();

    batch.begin();
    batch.end(&mut gfx);

    assert_eq!(gfx.calls.len(), setup);
    assert!(gfx.writes.is_empty());
}

#[test]
fn a_frame_issues_state_setup_then_portions() {
    init_logging();
    let mut gfx = RecordingGraphics::new(800, 600);
    let mut batch = SpriteBatch::new(&mut gfx, shaders());
    let texture = gfx.texture(32, 32);
    let setup = gfx.calls.len();

    batch.begin();
    batch.draw(&texture, Point::new(10., 10.), SpriteOptions::default());
    batch.end(&mut gfx);

    let vertex_buffer = VertexBufferId::new(0);
    let expected = [
        Call::SetBlendMode(BlendMode::Alpha),
        Call::BindVertexBuffer(vertex_buffer),
        Call::BindIndexBuffer(IndexBufferId::new(0)),
        Call::BindShaders(shaders()),
        Call::SetColorParameter(ShaderParameter::MaterialDiffuse, Color::WHITE),
        Call::SetMatrixParameter(
            ShaderParameter::ModelTransform,
            ProjectionMatrix::identity().to_array(),
        ),
        Call::SetMatrixParameter(
            ShaderParameter::ViewProjection,
            screen_projection(Size::new(800, 600)).to_array(),
        ),
        Call::WriteVertices {
            buffer: vertex_buffer,
            count: VERTICES_PER_SPRITE,
        },
        Call::BindTexture(TextureUnit::Diffuse, texture.id()),
        Call::DrawIndexed {
            index_count: INDICES_PER_SPRITE,
            first_index: 0,
            vertex_count: VERTICES_PER_SPRITE,
            first_vertex: 0,
        },
    ];
    assert_eq!(gfx.calls[setup..], expected[..]);
}

#[test]
fn texture_runs_become_portions() {
    let mut gfx = RecordingGraphics::new(800, 600);
    let mut batch = SpriteBatch::new(&mut gfx, shaders());
    let a = gfx.texture(32, 32);
    let b = gfx.texture(16, 16);

    batch.begin();
    batch.draw(&a, Point::new(0., 0.), SpriteOptions::default());
    batch.draw(&a, Point::new(32., 0.), SpriteOptions::default());
    batch.draw(&b, Point::new(64., 0.), SpriteOptions::default());
    batch.draw(&a, Point::new(96., 0.), SpriteOptions::default());
    batch.end(&mut gfx);

    assert_eq!(gfx.bound_textures(), vec![a.id(), b.id(), a.id()]);
    assert_eq!(
        gfx.draws(),
        vec![(12, 0, 8, 0), (6, 0, 4, 0), (6, 0, 4, 0)]
    );
    let written: Vec<usize> = gfx.writes.iter().map(Vec::len).collect();
    assert_eq!(written, vec![8, 4, 4]);
}

#[test]
fn oversized_runs_split_at_the_portion_capacity() {
    let mut gfx = RecordingGraphics::new(800, 600);
    let mut batch = SpriteBatch::with_portion_capacity(&mut gfx, shaders(), 4);
    let texture = gfx.texture(32, 32);

    batch.begin();
    for sprite in 0..5 {
        batch.draw(
            &texture,
            Point::new(sprite as f32 * 32., 0.),
            SpriteOptions::default(),
        );
    }
    batch.end(&mut gfx);

    assert_eq!(gfx.draws(), vec![(24, 0, 16, 0), (6, 0, 4, 0)]);
}

#[test]
fn portions_reconstruct_the_submission_order() {
    let mut gfx = RecordingGraphics::new(800, 600);
    let mut batch = SpriteBatch::with_portion_capacity(&mut gfx, shaders(), 3);
    let a = gfx.texture(8, 8);
    let b = gfx.texture(8, 8);
    let c = gfx.texture(8, 8);

    let submitted = [&a, &a, &b, &b, &b, &b, &c, &a];
    batch.begin();
    for texture in &submitted {
        batch.draw(*texture, Point::new(0., 0.), SpriteOptions::default());
    }
    batch.end(&mut gfx);

    let mut reconstructed = Vec::new();
    for (texture, (_, _, vertex_count, _)) in
        gfx.bound_textures().into_iter().zip(gfx.draws())
    {
        let sprites = vertex_count / VERTICES_PER_SPRITE;
        assert!(sprites <= batch.portion_capacity());
        reconstructed.extend(std::iter::repeat(texture).take(sprites));
    }
    let submitted_ids: Vec<TextureId> = submitted.iter().map(|texture| texture.id()).collect();
    assert_eq!(reconstructed, submitted_ids);
}

#[test]
fn corners_track_the_queued_position() {
    let mut gfx = RecordingGraphics::new(800, 600);
    let mut batch = SpriteBatch::new(&mut gfx, shaders());
    let texture = gfx.texture(32, 32);

    batch.begin();
    batch.draw(&texture, Point::new(10., 10.), SpriteOptions::default());
    batch.end(&mut gfx);

    let positions: Vec<[f32; 3]> = gfx.writes[0].iter().map(|vertex| vertex.position).collect();
    assert_eq!(
        positions,
        vec![
            [10., 10., 0.],
            [42., 10., 0.],
            [42., 42., 0.],
            [10., 42., 0.]
        ]
    );
}

#[test]
fn origin_shifts_emitted_corners() {
    let mut gfx = RecordingGraphics::new(800, 600);
    let mut batch = SpriteBatch::new(&mut gfx, shaders());
    let texture = gfx.texture(32, 32);

    batch.begin();
    batch.draw(
        &texture,
        Point::new(10., 10.),
        SpriteOptions {
            origin: Vector::new(16., 16.),
            ..SpriteOptions::default()
        },
    );
    batch.end(&mut gfx);

    let positions: Vec<[f32; 3]> = gfx.writes[0].iter().map(|vertex| vertex.position).collect();
    assert_eq!(
        positions,
        vec![[-6., -6., 0.], [26., -6., 0.], [26., 26., 0.], [-6., 26., 0.]]
    );
}

#[test]
fn projection_tracks_viewport_resizes() {
    let mut gfx = RecordingGraphics::new(800, 600);
    let mut batch = SpriteBatch::new(&mut gfx, shaders());
    let texture = gfx.texture(32, 32);

    batch.begin();
    batch.draw(&texture, Point::new(0., 0.), SpriteOptions::default());
    batch.end(&mut gfx);

    gfx.viewport = Size::new(1024, 768);
    batch.begin();
    batch.draw(&texture, Point::new(0., 0.), SpriteOptions::default());
    batch.end(&mut gfx);

    let projections = gfx.view_projections();
    assert_eq!(projections.len(), 2);

    let first = projections[0];
    assert_eq!(first[0], 2. / 800.);
    assert_eq!(first[5], -2. / 600.);
    assert_eq!(first[10], 1.);
    assert_eq!(first[12], -1.);
    assert_eq!(first[13], 1.);
    assert_eq!(first[15], 1.);

    let second = projections[1];
    assert_eq!(second[0], 2. / 1024.);
    assert_eq!(second[5], -2. / 768.);
}

#[test]
fn vertex_tint_matches_the_queued_color() {
    let mut gfx = RecordingGraphics::new(800, 600);
    let mut batch = SpriteBatch::new(&mut gfx, shaders());
    let texture = gfx.texture(32, 32);
    let tint = Color::new(0., 0.5, 1., 0.5);

    batch.begin();
    batch.draw(
        &texture,
        Point::new(0., 0.),
        SpriteOptions {
            color: tint,
            ..SpriteOptions::default()
        },
    );
    batch.end(&mut gfx);

    let expected_uvs = [[0., 0.], [1., 0.], [1., 1.], [0., 1.]];
    for (vertex, uv) in gfx.writes[0].iter().zip(expected_uvs.iter()) {
        assert_eq!(vertex.color, tint.to_rgba8());
        assert_eq!(vertex.uv, *uv);
    }
}
