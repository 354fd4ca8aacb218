//! Recording stand-in for a GL context.
//!
//! Records every call in order and keeps just enough object state to answer
//! the status queries the engine makes. Compilation is "successful" when the
//! source declares `#version 330 core`, has a `void main()` and balanced
//! braces; linking needs exactly one compiled shader per stage.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};

use super::api::{BufferUsage, GlApi, Topology};
use crate::mesh::VertexAttribute;
use crate::render::Color;
use crate::shader::ShaderStage;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CreateShader(ShaderStage, u32),
    ShaderSource(u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    CreateBuffer(u32),
    BindArrayBuffer(Option<u32>),
    ArrayBufferData(usize, BufferUsage),
    DeleteBuffer(u32),
    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    VertexAttribPointer(VertexAttribute),
    EnableVertexAttribArray(u32),
    DeleteVertexArray(u32),
    Viewport(i32, i32, i32, i32),
    ClearColor(Color),
    Clear,
    DrawArrays(Topology, i32, i32),
    ReadPixel(i32, i32),
}

#[derive(Default)]
struct ShaderState {
    stage: Option<ShaderStage>,
    source: String,
    compiled: bool,
    log: String,
}

#[derive(Default)]
pub(crate) struct FakeGl {
    next_name: Cell<u32>,
    calls: RefCell<Vec<Call>>,
    live: RefCell<BTreeSet<u32>>,
    shaders: RefCell<HashMap<u32, ShaderState>>,
    attachments: RefCell<HashMap<u32, Vec<u32>>>,
    links: RefCell<HashMap<u32, (bool, String)>>,
    array_buffer: Cell<Option<u32>>,
    buffer_data: RefCell<HashMap<u32, Vec<u8>>>,
    pixel: Cell<[u8; 4]>,
    fail_allocations: Cell<bool>,
}

impl FakeGl {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Makes every `create_*` call fail.
    pub(crate) fn failing_allocations() -> Self {
        let gl = Self::default();
        gl.fail_allocations.set(true);
        gl
    }

    /// Sets the value `read_pixel` answers with.
    pub(crate) fn set_pixel(&self, px: [u8; 4]) {
        self.pixel.set(px);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Names created and not yet deleted.
    pub(crate) fn live_objects(&self) -> Vec<u32> {
        self.live.borrow().iter().copied().collect()
    }

    /// Bytes last uploaded into `buffer`.
    pub(crate) fn buffer_contents(&self, buffer: u32) -> Vec<u8> {
        self.buffer_data
            .borrow()
            .get(&buffer)
            .cloned()
            .unwrap_or_default()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn alloc(&self, what: &str) -> Result<u32, String> {
        if self.fail_allocations.get() {
            return Err(format!("out of {what} names"));
        }
        let name = self.next_name.get() + 1;
        self.next_name.set(name);
        self.live.borrow_mut().insert(name);
        Ok(name)
    }

    fn release(&self, name: u32) {
        self.live.borrow_mut().remove(&name);
    }
}

fn looks_valid(source: &str) -> bool {
    let opens = source.matches('{').count();
    let closes = source.matches('}').count();
    source.contains("#version 330 core") && source.contains("void main()") && opens == closes
}

impl GlApi for FakeGl {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type VertexArray = u32;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let name = self.alloc("shader")?;
        self.shaders.borrow_mut().insert(
            name,
            ShaderState {
                stage: Some(stage),
                ..Default::default()
            },
        );
        self.record(Call::CreateShader(stage, name));
        Ok(name)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        if let Some(s) = self.shaders.borrow_mut().get_mut(&shader) {
            s.source = source.to_string();
        }
        self.record(Call::ShaderSource(shader));
    }

    fn compile_shader(&self, shader: u32) {
        if let Some(s) = self.shaders.borrow_mut().get_mut(&shader) {
            s.compiled = looks_valid(&s.source);
            s.log = if s.compiled {
                String::new()
            } else {
                "0:1(1): error: syntax error, unexpected end of file".to_string()
            };
        }
        self.record(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.shaders
            .borrow()
            .get(&shader)
            .is_some_and(|s| s.compiled)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        self.shaders
            .borrow()
            .get(&shader)
            .map(|s| s.log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: u32) {
        self.release(shader);
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        let name = self.alloc("program")?;
        self.record(Call::CreateProgram(name));
        Ok(name)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.attachments
            .borrow_mut()
            .entry(program)
            .or_default()
            .push(shader);
        self.record(Call::AttachShader(program, shader));
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        if let Some(list) = self.attachments.borrow_mut().get_mut(&program) {
            list.retain(|s| *s != shader);
        }
        self.record(Call::DetachShader(program, shader));
    }

    fn link_program(&self, program: u32) {
        let attached = self
            .attachments
            .borrow()
            .get(&program)
            .cloned()
            .unwrap_or_default();
        let shaders = self.shaders.borrow();
        let compiled_stage = |stage: ShaderStage| {
            attached
                .iter()
                .filter(|name| {
                    shaders
                        .get(name)
                        .is_some_and(|s| s.stage == Some(stage) && s.compiled)
                })
                .count()
        };
        let ok = compiled_stage(ShaderStage::Vertex) == 1
            && compiled_stage(ShaderStage::Fragment) == 1;
        let log = if ok {
            String::new()
        } else {
            "error: linking with uncompiled/unspecialized shader".to_string()
        };
        self.links.borrow_mut().insert(program, (ok, log));
        self.record(Call::LinkProgram(program));
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.links.borrow().get(&program).is_some_and(|(ok, _)| *ok)
    }

    fn program_info_log(&self, program: u32) -> String {
        self.links
            .borrow()
            .get(&program)
            .map(|(_, log)| log.clone())
            .unwrap_or_default()
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn delete_program(&self, program: u32) {
        self.release(program);
        self.record(Call::DeleteProgram(program));
    }

    fn create_buffer(&self) -> Result<u32, String> {
        let name = self.alloc("buffer")?;
        self.record(Call::CreateBuffer(name));
        Ok(name)
    }

    fn bind_array_buffer(&self, buffer: Option<u32>) {
        self.array_buffer.set(buffer);
        self.record(Call::BindArrayBuffer(buffer));
    }

    fn array_buffer_data(&self, data: &[u8], usage: BufferUsage) {
        if let Some(buffer) = self.array_buffer.get() {
            self.buffer_data.borrow_mut().insert(buffer, data.to_vec());
        }
        self.record(Call::ArrayBufferData(data.len(), usage));
    }

    fn delete_buffer(&self, buffer: u32) {
        self.release(buffer);
        self.record(Call::DeleteBuffer(buffer));
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        let name = self.alloc("vertex array")?;
        self.record(Call::CreateVertexArray(name));
        Ok(name)
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.record(Call::BindVertexArray(vertex_array));
    }

    fn vertex_attrib_pointer(&self, attribute: &VertexAttribute) {
        self.record(Call::VertexAttribPointer(*attribute));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.release(vertex_array);
        self.record(Call::DeleteVertexArray(vertex_array));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn clear_color(&self, color: Color) {
        self.record(Call::ClearColor(color));
    }

    fn clear_color_buffer(&self) {
        self.record(Call::Clear);
    }

    fn draw_arrays(&self, topology: Topology, first: i32, count: i32) {
        self.record(Call::DrawArrays(topology, first, count));
    }

    fn read_pixel(&self, x: i32, y: i32) -> [u8; 4] {
        self.record(Call::ReadPixel(x, y));
        self.pixel.get()
    }
}
