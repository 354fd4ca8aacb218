use std::ffi::{c_void, CStr};

use glow::HasContext;

use super::api::{BufferUsage, GlApi, Topology};
use crate::mesh::VertexAttribute;
use crate::render::Color;
use crate::shader::ShaderStage;

/// `glow` function table for one context.
///
/// Only [`ContextWindow`](super::ContextWindow) constructs this, after its
/// context has been made current, and keeps that context current for as long
/// as the `Gl` is alive. Every raw call below relies on that.
pub struct Gl {
    raw: glow::Context,
}

impl Gl {
    /// Resolves entry points through `loader`.
    ///
    /// # Safety
    /// A context must be current on this thread and stay current for the
    /// lifetime of the returned value.
    pub(crate) unsafe fn load<F>(loader: F) -> Self
    where
        F: FnMut(&CStr) -> *const c_void,
    {
        let raw = unsafe { glow::Context::from_loader_function_cstr(loader) };
        Self { raw }
    }

    /// Returns the `(major, minor)` version reported by the driver.
    pub fn version(&self) -> (u32, u32) {
        let v = self.raw.version();
        (v.major, v.minor)
    }

    /// Returns the `GL_VERSION` and `GL_RENDERER` strings.
    pub fn describe(&self) -> (String, String) {
        unsafe {
            (
                self.raw.get_parameter_string(glow::VERSION),
                self.raw.get_parameter_string(glow::RENDERER),
            )
        }
    }
}

fn stage_enum(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

fn usage_enum(usage: BufferUsage) -> u32 {
    match usage {
        BufferUsage::StaticDraw => glow::STATIC_DRAW,
    }
}

fn topology_enum(topology: Topology) -> u32 {
    match topology {
        Topology::Triangles => glow::TRIANGLES,
    }
}

impl GlApi for Gl {
    type Shader = glow::Shader;
    type Program = glow::Program;
    type Buffer = glow::Buffer;
    type VertexArray = glow::VertexArray;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        unsafe { self.raw.create_shader(stage_enum(stage)) }
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { self.raw.shader_source(shader, source) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { self.raw.compile_shader(shader) }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.raw.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.raw.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { self.raw.delete_shader(shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { self.raw.create_program() }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.raw.attach_shader(program, shader) }
    }

    fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.raw.detach_shader(program, shader) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { self.raw.link_program(program) }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.raw.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.raw.get_program_info_log(program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { self.raw.use_program(program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { self.raw.delete_program(program) }
    }

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        unsafe { self.raw.create_buffer() }
    }

    fn bind_array_buffer(&self, buffer: Option<Self::Buffer>) {
        unsafe { self.raw.bind_buffer(glow::ARRAY_BUFFER, buffer) }
    }

    fn array_buffer_data(&self, data: &[u8], usage: BufferUsage) {
        unsafe {
            self.raw
                .buffer_data_u8_slice(glow::ARRAY_BUFFER, data, usage_enum(usage))
        }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { self.raw.delete_buffer(buffer) }
    }

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String> {
        unsafe { self.raw.create_vertex_array() }
    }

    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>) {
        unsafe { self.raw.bind_vertex_array(vertex_array) }
    }

    fn vertex_attrib_pointer(&self, attribute: &VertexAttribute) {
        unsafe {
            self.raw.vertex_attrib_pointer_f32(
                attribute.index,
                attribute.components,
                glow::FLOAT,
                attribute.normalized,
                attribute.stride,
                attribute.offset,
            )
        }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { self.raw.enable_vertex_attrib_array(index) }
    }

    fn delete_vertex_array(&self, vertex_array: Self::VertexArray) {
        unsafe { self.raw.delete_vertex_array(vertex_array) }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.raw.viewport(x, y, width, height) }
    }

    fn clear_color(&self, color: Color) {
        unsafe { self.raw.clear_color(color.r, color.g, color.b, color.a) }
    }

    fn clear_color_buffer(&self) {
        unsafe { self.raw.clear(glow::COLOR_BUFFER_BIT) }
    }

    fn draw_arrays(&self, topology: Topology, first: i32, count: i32) {
        unsafe { self.raw.draw_arrays(topology_enum(topology), first, count) }
    }

    fn read_pixel(&self, x: i32, y: i32) -> [u8; 4] {
        let mut px = [0u8; 4];
        unsafe {
            self.raw.read_pixels(
                x,
                y,
                1,
                1,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelPackData::Slice(Some(&mut px)),
            );
        }
        px
    }
}
