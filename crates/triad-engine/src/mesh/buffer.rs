use anyhow::{anyhow, Result};

use crate::device::{BufferUsage, GlApi, Topology};

use super::layout::{Position, VertexAttribute};

/// Static array buffer holding uploaded vertices. Released on drop.
pub struct VertexBuffer<'gl, G: GlApi> {
    gl: &'gl G,
    raw: G::Buffer,
    len: usize,
}

impl<'gl, G: GlApi> VertexBuffer<'gl, G> {
    pub fn raw(&self) -> G::Buffer {
        self.raw
    }

    /// Number of vertices uploaded.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<G: GlApi> Drop for VertexBuffer<'_, G> {
    fn drop(&mut self) {
        log::debug!("releasing vertex buffer {:?}", self.raw);
        self.gl.delete_buffer(self.raw);
    }
}

/// Vertex array object describing how a [`VertexBuffer`] feeds the pipeline.
/// Released on drop.
pub struct VertexArray<'gl, G: GlApi> {
    gl: &'gl G,
    raw: G::VertexArray,
    attributes: &'static [VertexAttribute],
}

impl<'gl, G: GlApi> VertexArray<'gl, G> {
    pub fn raw(&self) -> G::VertexArray {
        self.raw
    }

    /// Attributes recorded and enabled in this vertex array.
    pub fn attributes(&self) -> &'static [VertexAttribute] {
        self.attributes
    }

    pub fn bind(&self) {
        self.gl.bind_vertex_array(Some(self.raw));
    }
}

impl<G: GlApi> Drop for VertexArray<'_, G> {
    fn drop(&mut self) {
        log::debug!("releasing vertex array {:?}", self.raw);
        self.gl.delete_vertex_array(self.raw);
    }
}

/// Uploaded geometry: vertex array + backing buffer.
///
/// Field order is release order (vertex array, then buffer).
pub struct Mesh<'gl, G: GlApi> {
    vao: VertexArray<'gl, G>,
    vbo: VertexBuffer<'gl, G>,
    gl: &'gl G,
    vertex_count: i32,
}

impl<'gl, G: GlApi> Mesh<'gl, G> {
    pub fn vertex_array(&self) -> &VertexArray<'gl, G> {
        &self.vao
    }

    pub fn vertex_buffer(&self) -> &VertexBuffer<'gl, G> {
        &self.vbo
    }

    pub fn vertex_count(&self) -> i32 {
        self.vertex_count
    }

    /// Binds the vertex array and draws every vertex as a triangle list.
    pub fn draw(&self) {
        self.vao.bind();
        self.gl.draw_arrays(Topology::Triangles, 0, self.vertex_count);
    }
}

/// Uploads `vertices` into a new static buffer and describes them with a new
/// vertex array.
///
/// Both objects are unbound again before returning so later state changes
/// cannot touch the recorded layout.
pub fn upload<'gl, G: GlApi>(gl: &'gl G, vertices: &[Position]) -> Result<Mesh<'gl, G>> {
    let vertex_count = i32::try_from(vertices.len())
        .map_err(|_| anyhow!("{} vertices do not fit a single draw", vertices.len()))?;

    let vao = VertexArray {
        gl,
        raw: gl
            .create_vertex_array()
            .map_err(|e| anyhow!("failed to create vertex array: {e}"))?,
        attributes: Position::layout(),
    };
    let vbo = VertexBuffer {
        gl,
        raw: gl
            .create_buffer()
            .map_err(|e| anyhow!("failed to create vertex buffer: {e}"))?,
        len: vertices.len(),
    };

    gl.bind_vertex_array(Some(vao.raw));
    gl.bind_array_buffer(Some(vbo.raw));
    gl.array_buffer_data(bytemuck::cast_slice(vertices), BufferUsage::StaticDraw);

    for attr in vao.attributes {
        gl.vertex_attrib_pointer(attr);
        gl.enable_vertex_attrib_array(attr.index);
    }

    gl.bind_array_buffer(None);
    gl.bind_vertex_array(None);

    log::debug!("uploaded {} vertices", vertices.len());

    Ok(Mesh {
        vao,
        vbo,
        gl,
        vertex_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::fake::{Call, FakeGl};
    use crate::mesh::TRIANGLE_VERTICES;

    #[test]
    fn uploads_exact_triangle_floats() {
        let gl = FakeGl::new();
        let mesh = upload(&gl, &TRIANGLE_VERTICES).unwrap();

        let bytes = gl.buffer_contents(mesh.vertex_buffer().raw());
        let floats: Vec<f32> = bytes
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        assert_eq!(floats, vec![-0.5, -0.5, 0.0, 0.5, -0.5, 0.0, 0.0, 0.5, 0.0]);
        assert_eq!(mesh.vertex_buffer().len(), 3);
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn records_layout_and_unbinds() {
        let gl = FakeGl::new();
        let mesh = upload(&gl, &TRIANGLE_VERTICES).unwrap();
        let vao = mesh.vertex_array().raw();
        let vbo = mesh.vertex_buffer().raw();

        assert_eq!(
            gl.calls(),
            vec![
                Call::CreateVertexArray(vao),
                Call::CreateBuffer(vbo),
                Call::BindVertexArray(Some(vao)),
                Call::BindArrayBuffer(Some(vbo)),
                Call::ArrayBufferData(36, BufferUsage::StaticDraw),
                Call::VertexAttribPointer(VertexAttribute {
                    index: 0,
                    components: 3,
                    normalized: false,
                    stride: 12,
                    offset: 0,
                }),
                Call::EnableVertexAttribArray(0),
                Call::BindArrayBuffer(None),
                Call::BindVertexArray(None),
            ]
        );
        assert_eq!(mesh.vertex_array().attributes().len(), 1);
    }

    #[test]
    fn draw_requests_one_triangle() {
        let gl = FakeGl::new();
        let mesh = upload(&gl, &TRIANGLE_VERTICES).unwrap();
        gl.clear_calls();

        mesh.draw();

        assert_eq!(
            gl.calls(),
            vec![
                Call::BindVertexArray(Some(mesh.vertex_array().raw())),
                Call::DrawArrays(Topology::Triangles, 0, 3),
            ]
        );
    }

    #[test]
    fn drop_releases_array_then_buffer() {
        let gl = FakeGl::new();
        let (vao, vbo) = {
            let mesh = upload(&gl, &TRIANGLE_VERTICES).unwrap();
            (mesh.vertex_array().raw(), mesh.vertex_buffer().raw())
        };

        let calls = gl.calls();
        assert_eq!(
            &calls[calls.len() - 2..],
            &[Call::DeleteVertexArray(vao), Call::DeleteBuffer(vbo)]
        );
        assert!(gl.live_objects().is_empty());
    }

    #[test]
    fn allocation_failure_releases_partial_objects() {
        let gl = FakeGl::failing_allocations();
        assert!(upload(&gl, &TRIANGLE_VERTICES).is_err());
        assert!(gl.live_objects().is_empty());
    }
}
