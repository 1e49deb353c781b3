//! Recording driver for tests.
//!
//! Hands out sequential integer handles, records every state-changing call and
//! lets tests inject version strings, compile/link failures and error flags.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::coords::{ColorRgba, Viewport};

use super::{BufferTarget, GlDriver, ShaderStage};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CreateShader(ShaderStage, u32),
    ShaderSource(u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    BindAttribLocation(u32, u32, String),
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    UniformLocation(String),
    UniformMatrix4(Option<u32>, [f32; 16]),
    CreateBuffer(u32),
    BindBuffer(BufferTarget, Option<u32>),
    BufferData(BufferTarget, usize),
    DeleteBuffer(u32),
    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    DeleteVertexArray(u32),
    VertexAttribPointer { location: u32, components: i32, stride: i32, offset: i32 },
    EnableVertexAttribArray(u32),
    BindFramebuffer(Option<u32>),
    Viewport(Viewport),
    EnableDepthTest,
    ClearColor(ColorRgba),
    Clear,
    DrawTriangles(i32),
}

type Trigger = Box<dyn Fn(&Call) -> bool>;

pub(crate) struct FakeDriver {
    version: String,
    core_profile: bool,
    reject_stage: Option<ShaderStage>,
    reject_link: bool,
    refuse_buffers: bool,
    missing_uniforms: Vec<&'static str>,

    calls: RefCell<Vec<Call>>,
    sources: RefCell<HashMap<u32, String>>,
    next_id: Cell<u32>,
    pending_error: Cell<u32>,
    error_trigger: RefCell<Option<(Trigger, u32)>>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self {
            version: "4.6.0 FakeVendor 1.0".to_string(),
            core_profile: true,
            reject_stage: None,
            reject_link: false,
            refuse_buffers: false,
            missing_uniforms: Vec::new(),
            calls: RefCell::new(Vec::new()),
            sources: RefCell::new(HashMap::new()),
            next_id: Cell::new(1),
            pending_error: Cell::new(0),
            error_trigger: RefCell::new(None),
        }
    }

    // ── configuration ─────────────────────────────────────────────────────

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn with_core_profile(mut self, core_profile: bool) -> Self {
        self.core_profile = core_profile;
        self
    }

    pub fn rejecting_shader(mut self, stage: ShaderStage) -> Self {
        self.reject_stage = Some(stage);
        self
    }

    pub fn rejecting_link(mut self) -> Self {
        self.reject_link = true;
        self
    }

    pub fn refusing_buffers(mut self) -> Self {
        self.refuse_buffers = true;
        self
    }

    pub fn without_uniform(mut self, name: &'static str) -> Self {
        self.missing_uniforms.push(name);
        self
    }

    /// Sets the error flag immediately.
    pub fn raise_error(&self, code: u32) {
        self.pending_error.set(code);
    }

    /// Sets the error flag the first time a matching call is recorded.
    pub fn raise_error_on(&self, matches: impl Fn(&Call) -> bool + 'static, code: u32) {
        *self.error_trigger.borrow_mut() = Some((Box::new(matches), code));
    }

    // ── inspection ────────────────────────────────────────────────────────

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Source last uploaded to `shader`.
    pub fn source(&self, shader: u32) -> Option<String> {
        self.sources.borrow().get(&shader).cloned()
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn record(&self, call: Call) {
        let fire = match self.error_trigger.borrow().as_ref() {
            Some((matches, code)) if matches(&call) => Some(*code),
            _ => None,
        };
        if let Some(code) = fire {
            self.pending_error.set(code);
            *self.error_trigger.borrow_mut() = None;
        }
        self.calls.borrow_mut().push(call);
    }

    fn next_handle(&self) -> u32 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn stage_of(&self, shader: u32) -> Option<ShaderStage> {
        self.calls.borrow().iter().find_map(|c| match c {
            Call::CreateShader(stage, id) if *id == shader => Some(*stage),
            _ => None,
        })
    }
}

impl GlDriver for FakeDriver {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type VertexArray = u32;
    type Framebuffer = u32;
    type UniformLocation = u32;

    fn version_string(&self) -> String {
        self.version.clone()
    }

    fn is_core_profile(&self) -> bool {
        self.core_profile
    }

    fn get_error(&self) -> u32 {
        self.pending_error.replace(0)
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let id = self.next_handle();
        self.record(Call::CreateShader(stage, id));
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        self.sources.borrow_mut().insert(shader, source.to_string());
        self.record(Call::ShaderSource(shader));
    }

    fn compile_shader(&self, shader: u32) {
        self.record(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.reject_stage.is_none() || self.reject_stage != self.stage_of(shader)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        format!("0:1(1): error: shader {shader} rejected")
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        let id = self.next_handle();
        self.record(Call::CreateProgram(id));
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Call::AttachShader(program, shader));
    }

    fn bind_attrib_location(&self, program: u32, location: u32, name: &str) {
        self.record(Call::BindAttribLocation(program, location, name.to_string()));
    }

    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
    }

    fn program_link_status(&self, _program: u32) -> bool {
        !self.reject_link
    }

    fn program_info_log(&self, _program: u32) -> String {
        "error: unresolved varying".to_string()
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
    }

    fn uniform_location(&self, _program: u32, name: &str) -> Option<u32> {
        self.record(Call::UniformLocation(name.to_string()));
        if self.missing_uniforms.contains(&name) {
            None
        } else {
            Some(self.next_handle())
        }
    }

    fn uniform_matrix4(&self, location: Option<&u32>, value: &[f32; 16]) {
        self.record(Call::UniformMatrix4(location.copied(), *value));
    }

    fn create_buffer(&self) -> Result<u32, String> {
        if self.refuse_buffers {
            return Err("out of buffer names".to_string());
        }
        let id = self.next_handle();
        self.record(Call::CreateBuffer(id));
        Ok(id)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<u32>) {
        self.record(Call::BindBuffer(target, buffer));
    }

    fn buffer_data_static(&self, target: BufferTarget, data: &[u8]) {
        self.record(Call::BufferData(target, data.len()));
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        let id = self.next_handle();
        self.record(Call::CreateVertexArray(id));
        Ok(id)
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.record(Call::BindVertexArray(vertex_array));
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.record(Call::DeleteVertexArray(vertex_array));
    }

    fn vertex_attrib_pointer_f32(&self, location: u32, components: i32, stride: i32, offset: i32) {
        self.record(Call::VertexAttribPointer { location, components, stride, offset });
    }

    fn enable_vertex_attrib_array(&self, location: u32) {
        self.record(Call::EnableVertexAttribArray(location));
    }

    fn bind_framebuffer(&self, framebuffer: Option<u32>) {
        self.record(Call::BindFramebuffer(framebuffer));
    }

    fn viewport(&self, viewport: Viewport) {
        self.record(Call::Viewport(viewport));
    }

    fn enable_depth_test(&self) {
        self.record(Call::EnableDepthTest);
    }

    fn clear_color(&self, color: ColorRgba) {
        self.record(Call::ClearColor(color));
    }

    fn clear_color_and_depth(&self) {
        self.record(Call::Clear);
    }

    fn draw_triangles_u32(&self, index_count: i32) {
        self.record(Call::DrawTriangles(index_count));
    }
}
