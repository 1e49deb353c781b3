use glow::HasContext;

use crate::coords::{ColorRgba, Viewport};

use super::{BufferTarget, GlDriver, ShaderStage};

type Gl = glow::Context;

/// [`GlDriver`] backed by a `glow` context.
pub struct GlowDriver {
    gl: Gl,
}

impl GlowDriver {
    /// Wraps a loaded `glow` context.
    ///
    /// # Safety
    ///
    /// The context must stay current on the thread that calls into the driver,
    /// for as long as the driver is used.
    pub unsafe fn new(gl: Gl) -> Self {
        Self { gl }
    }
}

fn buffer_target(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Array => glow::ARRAY_BUFFER,
        BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
    }
}

fn shader_type(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

// Safety for every block below: `GlowDriver::new` requires the context to be
// current on the calling thread.
impl GlDriver for GlowDriver {
    type Shader = <Gl as HasContext>::Shader;
    type Program = <Gl as HasContext>::Program;
    type Buffer = <Gl as HasContext>::Buffer;
    type VertexArray = <Gl as HasContext>::VertexArray;
    type Framebuffer = <Gl as HasContext>::Framebuffer;
    type UniformLocation = <Gl as HasContext>::UniformLocation;

    fn version_string(&self) -> String {
        unsafe { self.gl.get_parameter_string(glow::VERSION) }
    }

    fn is_core_profile(&self) -> bool {
        let version = self.gl.version();
        // CONTEXT_PROFILE_MASK does not exist before desktop 3.2 or on ES and
        // would raise INVALID_ENUM.
        if version.is_embedded || (version.major, version.minor) < (3, 2) {
            return false;
        }
        let mask = unsafe { self.gl.get_parameter_i32(glow::CONTEXT_PROFILE_MASK) };
        (mask as u32) & glow::CONTEXT_CORE_PROFILE_BIT != 0
    }

    fn get_error(&self) -> u32 {
        unsafe { self.gl.get_error() }
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        unsafe { self.gl.create_shader(shader_type(stage)) }
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { self.gl.shader_source(shader, source) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.compile_shader(shader) }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.gl.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.delete_shader(shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { self.gl.create_program() }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn bind_attrib_location(&self, program: Self::Program, location: u32, name: &str) {
        unsafe { self.gl.bind_attrib_location(program, location, name) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { self.gl.link_program(program) }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.gl.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { self.gl.use_program(program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { self.gl.get_uniform_location(program, name) }
    }

    fn uniform_matrix4(&self, location: Option<&Self::UniformLocation>, value: &[f32; 16]) {
        unsafe { self.gl.uniform_matrix_4_f32_slice(location, false, value) }
    }

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        unsafe { self.gl.create_buffer() }
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>) {
        unsafe { self.gl.bind_buffer(buffer_target(target), buffer) }
    }

    fn buffer_data_static(&self, target: BufferTarget, data: &[u8]) {
        unsafe {
            self.gl
                .buffer_data_u8_slice(buffer_target(target), data, glow::STATIC_DRAW)
        }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { self.gl.delete_buffer(buffer) }
    }

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String> {
        unsafe { self.gl.create_vertex_array() }
    }

    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>) {
        unsafe { self.gl.bind_vertex_array(vertex_array) }
    }

    fn delete_vertex_array(&self, vertex_array: Self::VertexArray) {
        unsafe { self.gl.delete_vertex_array(vertex_array) }
    }

    fn vertex_attrib_pointer_f32(&self, location: u32, components: i32, stride: i32, offset: i32) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(location, components, glow::FLOAT, false, stride, offset)
        }
    }

    fn enable_vertex_attrib_array(&self, location: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(location) }
    }

    fn bind_framebuffer(&self, framebuffer: Option<Self::Framebuffer>) {
        unsafe { self.gl.bind_framebuffer(glow::FRAMEBUFFER, framebuffer) }
    }

    fn viewport(&self, viewport: Viewport) {
        let width = i32::try_from(viewport.width).unwrap_or(i32::MAX);
        let height = i32::try_from(viewport.height).unwrap_or(i32::MAX);
        unsafe { self.gl.viewport(0, 0, width, height) }
    }

    fn enable_depth_test(&self) {
        unsafe { self.gl.enable(glow::DEPTH_TEST) }
    }

    fn clear_color(&self, color: ColorRgba) {
        unsafe { self.gl.clear_color(color.r, color.g, color.b, color.a) }
    }

    fn clear_color_and_depth(&self) {
        unsafe { self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT) }
    }

    fn draw_triangles_u32(&self, index_count: i32) {
        unsafe {
            self.gl
                .draw_elements(glow::TRIANGLES, index_count, glow::UNSIGNED_INT, 0)
        }
    }
}
