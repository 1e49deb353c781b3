use std::fmt;

use crate::coords::{ColorRgba, Viewport};

/// Programmable pipeline stage of a shader object.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

/// Buffer binding point.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferTarget {
    /// Vertex attribute data.
    Array,
    /// Index data, captured by the bound vertex array.
    ElementArray,
}

/// The subset of OpenGL (ES) used by the cube surface.
///
/// Implementations forward to a context that is current on the calling thread.
/// Object creation failures are reported as driver strings; everything else is
/// fire-and-forget and must be followed by an error query (see
/// [`check`](super::check)).
pub trait GlDriver {
    type Shader: Copy + fmt::Debug + PartialEq;
    type Program: Copy + fmt::Debug + PartialEq;
    type Buffer: Copy + fmt::Debug + PartialEq;
    type VertexArray: Copy + fmt::Debug + PartialEq;
    type Framebuffer: Copy + fmt::Debug + PartialEq;
    type UniformLocation: Clone + fmt::Debug;

    // ── queries ───────────────────────────────────────────────────────────

    /// `GL_VERSION` as reported by the driver.
    fn version_string(&self) -> String;

    /// Whether the context runs a desktop core profile.
    fn is_core_profile(&self) -> bool;

    /// Pops the oldest recorded error flag; `0` means no error.
    fn get_error(&self) -> u32;

    // ── shaders & programs ────────────────────────────────────────────────

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn bind_attrib_location(&self, program: Self::Program, location: u32, name: &str);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn use_program(&self, program: Option<Self::Program>);
    fn delete_program(&self, program: Self::Program);

    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation>;

    /// Uploads a column-major 4x4 matrix. `None` is silently ignored by GL.
    fn uniform_matrix4(&self, location: Option<&Self::UniformLocation>, value: &[f32; 16]);

    // ── buffers & vertex arrays ───────────────────────────────────────────

    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>);

    /// Uploads `data` to the buffer bound at `target` with static usage.
    fn buffer_data_static(&self, target: BufferTarget, data: &[u8]);
    fn delete_buffer(&self, buffer: Self::Buffer);

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String>;
    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>);
    fn delete_vertex_array(&self, vertex_array: Self::VertexArray);

    /// Describes a float attribute read from the bound array buffer.
    fn vertex_attrib_pointer_f32(&self, location: u32, components: i32, stride: i32, offset: i32);
    fn enable_vertex_attrib_array(&self, location: u32);

    // ── frame ─────────────────────────────────────────────────────────────

    /// Binds a draw framebuffer; `None` selects the default one.
    fn bind_framebuffer(&self, framebuffer: Option<Self::Framebuffer>);
    fn viewport(&self, viewport: Viewport);
    fn enable_depth_test(&self);
    fn clear_color(&self, color: ColorRgba);
    fn clear_color_and_depth(&self);

    /// Indexed triangle list draw using `u32` indices from offset 0.
    fn draw_triangles_u32(&self, index_count: i32);
}
