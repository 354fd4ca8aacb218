use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;

use crate::device::GlApi;
use crate::mesh::{self, Mesh, Position, TRIANGLE_VERTICES};
use crate::shader::{self, ShaderPolicy, ShaderProgram, ShaderSources};

use super::Color;

/// Everything needed to build a [`TriangleScene`].
#[derive(Debug, Clone)]
pub struct SceneDesc {
    pub shaders: ShaderSources,
    pub vertices: Vec<Position>,
}

impl Default for SceneDesc {
    fn default() -> Self {
        Self {
            shaders: ShaderSources::TRIANGLE,
            vertices: TRIANGLE_VERTICES.to_vec(),
        }
    }
}

/// GPU objects for the single triangle draw.
///
/// Field order is release order: vertex array, vertex buffer, then program.
pub struct TriangleScene<'gl, G: GlApi> {
    mesh: Mesh<'gl, G>,
    program: ShaderProgram<'gl, G>,
    gl: &'gl G,
}

impl<'gl, G: GlApi> TriangleScene<'gl, G> {
    /// Builds the program, then uploads the mesh.
    pub fn new(gl: &'gl G, desc: &SceneDesc, policy: ShaderPolicy) -> Result<Self> {
        let program = shader::build(gl, &desc.shaders, policy).context("shader build failed")?;
        let mesh = mesh::upload(gl, &desc.vertices).context("geometry upload failed")?;

        Ok(Self { mesh, program, gl })
    }

    pub fn program(&self) -> &ShaderProgram<'gl, G> {
        &self.program
    }

    pub fn mesh(&self) -> &Mesh<'gl, G> {
        &self.mesh
    }

    /// Clears the color buffer and issues the draw. Presenting is up to the
    /// caller.
    pub fn draw(&self, clear: Color) {
        self.gl.clear_color(clear);
        self.gl.clear_color_buffer();

        self.program.bind();
        self.mesh.draw();
    }
}

/// Reads back the pixel at the center of a framebuffer of `size`.
///
/// Returns `None` for an empty framebuffer.
pub fn center_pixel<G: GlApi>(gl: &G, size: PhysicalSize<u32>) -> Option<[u8; 4]> {
    if size.width == 0 || size.height == 0 {
        return None;
    }
    let x = i32::try_from(size.width / 2).ok()?;
    let y = i32::try_from(size.height / 2).ok()?;
    Some(gl.read_pixel(x, y))
}
