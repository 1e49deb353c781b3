use crate::device::{check, BufferTarget, GlDriver, Slot};
use crate::error::{RenderError, Result};
use crate::mesh::{MeshData, Vertex};
use crate::shader::{ShaderDialect, ShaderProgram};

use super::FrameTransforms;

/// Owns every native object the cube needs.
///
/// Lifetime:
/// - all slots start `Unallocated`
/// - [`build_program`](Self::build_program) and [`initialize`](Self::initialize)
///   fill them one by one, so a failure leaves a consistent partial state
/// - [`teardown`](Self::teardown) deletes exactly what was allocated
pub struct GpuResources<D: GlDriver> {
    vertex_array: Slot<D::VertexArray>,
    vertex_buffer: Slot<D::Buffer>,
    index_buffer: Slot<D::Buffer>,
    program: ShaderProgram<D>,
    index_count: i32,
}

impl<D: GlDriver> Default for GpuResources<D> {
    fn default() -> Self {
        Self {
            vertex_array: Slot::Unallocated,
            vertex_buffer: Slot::Unallocated,
            index_buffer: Slot::Unallocated,
            program: ShaderProgram::new(),
            index_count: 0,
        }
    }
}

fn allocation(what: &'static str) -> impl FnOnce(String) -> RenderError {
    move |reason| RenderError::Allocation { what, reason }
}

impl<D: GlDriver> GpuResources<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles and links the cube program for `dialect`.
    pub fn build_program(&mut self, gl: &D, dialect: ShaderDialect) -> Result<()> {
        self.program.build(gl, dialect)
    }

    /// Creates the vertex array, vertex buffer and index buffer and uploads `mesh`.
    ///
    /// The vertex array is bound before any buffer so it captures the element
    /// buffer binding and both attribute pointers. Data is uploaded once with
    /// static usage.
    pub fn initialize(&mut self, gl: &D, mesh: MeshData<'_>) -> Result<()> {
        mesh.validate()?;
        let index_count = mesh.draw_count()?;

        let vertex_array = self
            .vertex_array
            .fill(gl.create_vertex_array().map_err(allocation("vertex array"))?);
        gl.bind_vertex_array(Some(vertex_array));
        check(gl, "bind vertex array")?;

        let vertex_buffer = self
            .vertex_buffer
            .fill(gl.create_buffer().map_err(allocation("vertex buffer"))?);
        gl.bind_buffer(BufferTarget::Array, Some(vertex_buffer));
        check(gl, "bind vertex buffer")?;
        gl.buffer_data_static(BufferTarget::Array, mesh.vertex_bytes());
        check(gl, "upload vertex buffer")?;

        let index_buffer = self
            .index_buffer
            .fill(gl.create_buffer().map_err(allocation("index buffer"))?);
        gl.bind_buffer(BufferTarget::ElementArray, Some(index_buffer));
        check(gl, "bind index buffer")?;
        gl.buffer_data_static(BufferTarget::ElementArray, mesh.index_bytes());
        check(gl, "upload index buffer")?;

        for attr in Vertex::ATTRIBUTES {
            gl.vertex_attrib_pointer_f32(
                attr.location,
                attr.components,
                Vertex::STRIDE,
                attr.offset,
            );
            check(gl, "set vertex attribute pointer")?;
            gl.enable_vertex_attrib_array(attr.location);
            check(gl, "enable vertex attribute")?;
        }

        // Unbind the array first so it keeps its element buffer.
        gl.bind_vertex_array(None);
        check(gl, "unbind vertex array")?;
        gl.bind_buffer(BufferTarget::Array, None);
        check(gl, "unbind vertex buffer")?;

        self.index_count = index_count;
        log::debug!(
            "uploaded {} vertices / {} indices",
            mesh.vertices.len(),
            mesh.indices.len()
        );
        Ok(())
    }

    /// Whether program and vertex state are both ready for drawing.
    pub fn is_ready(&self) -> bool {
        self.program.program().is_some() && self.vertex_array.is_allocated() && self.index_count > 0
    }

    /// Binds the program and the vertex array.
    pub fn bind_for_draw(&self, gl: &D) -> Result<()> {
        debug_assert!(self.is_ready(), "bind_for_draw before initialization");
        gl.use_program(self.program.program());
        check(gl, "use cube program")?;
        gl.bind_vertex_array(self.vertex_array.get());
        check(gl, "bind cube vertex array")
    }

    /// Uploads model, view and projection to the bound program.
    ///
    /// Stops at the first upload the driver rejects.
    pub fn upload_transforms(&self, gl: &D, transforms: &FrameTransforms) -> Result<()> {
        let uniforms = self.program.uniforms();
        gl.uniform_matrix4(uniforms.model.as_ref(), &transforms.model.to_cols_array());
        check(gl, "upload model matrix")?;
        gl.uniform_matrix4(uniforms.view.as_ref(), &transforms.view.to_cols_array());
        check(gl, "upload view matrix")?;
        gl.uniform_matrix4(
            uniforms.projection.as_ref(),
            &transforms.projection.to_cols_array(),
        );
        check(gl, "upload projection matrix")
    }

    /// Indexed triangle draw over the whole mesh.
    pub fn draw(&self, gl: &D) -> Result<()> {
        gl.draw_triangles_u32(self.index_count);
        check(gl, "draw cube")
    }

    fn holds_anything(&self) -> bool {
        self.vertex_array.is_allocated()
            || self.vertex_buffer.is_allocated()
            || self.index_buffer.is_allocated()
            || self.program.holds_anything()
    }

    /// Resets bindings, then deletes buffers, vertex array, program and shaders.
    ///
    /// Skips handles that were never created; a second call does nothing.
    pub fn teardown(&mut self, gl: &D) {
        let had_objects = self.holds_anything();

        if had_objects {
            gl.bind_buffer(BufferTarget::Array, None);
            gl.bind_buffer(BufferTarget::ElementArray, None);
            gl.bind_vertex_array(None);
            gl.use_program(None);
        }

        if let Some(buffer) = self.vertex_buffer.take() {
            gl.delete_buffer(buffer);
        }
        if let Some(buffer) = self.index_buffer.take() {
            gl.delete_buffer(buffer);
        }
        if let Some(vertex_array) = self.vertex_array.take() {
            gl.delete_vertex_array(vertex_array);
        }
        self.program.release(gl);
        self.index_count = 0;

        if had_objects {
            log::debug!("cube resources released");
        }
    }
}
