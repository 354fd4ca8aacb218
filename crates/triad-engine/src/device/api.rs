use std::fmt::Debug;

use crate::mesh::VertexAttribute;
use crate::render::Color;
use crate::shader::ShaderStage;

/// Usage hint passed along with buffer uploads.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferUsage {
    /// Written once, drawn many times.
    StaticDraw,
}

/// Primitive topology for array draws.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Topology {
    Triangles,
}

/// The subset of OpenGL the engine issues.
///
/// Implementations assume a current context on the calling thread. Handles are
/// plain copyable names; ownership is tracked by the RAII wrappers in
/// `shader` and `mesh`, never by the implementation.
pub trait GlApi {
    type Shader: Copy + Debug;
    type Program: Copy + Debug;
    type Buffer: Copy + Debug;
    type VertexArray: Copy + Debug;

    // shaders
    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    // programs
    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn use_program(&self, program: Option<Self::Program>);
    fn delete_program(&self, program: Self::Program);

    // buffers + vertex arrays
    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    fn bind_array_buffer(&self, buffer: Option<Self::Buffer>);
    fn array_buffer_data(&self, data: &[u8], usage: BufferUsage);
    fn delete_buffer(&self, buffer: Self::Buffer);

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String>;
    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>);
    /// Records a float attribute against the currently bound array buffer.
    fn vertex_attrib_pointer(&self, attribute: &VertexAttribute);
    fn enable_vertex_attrib_array(&self, index: u32);
    fn delete_vertex_array(&self, vertex_array: Self::VertexArray);

    // framebuffer
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&self, color: Color);
    fn clear_color_buffer(&self);
    fn draw_arrays(&self, topology: Topology, first: i32, count: i32);

    /// Reads one RGBA8 pixel from the current read framebuffer.
    ///
    /// `(x, y)` uses GL window coordinates (origin bottom-left).
    fn read_pixel(&self, x: i32, y: i32) -> [u8; 4];
}
