use crate::device::{check, GlDriver, ShaderStage, Slot};
use crate::error::{RenderError, Result};
use crate::mesh::Vertex;

use super::ShaderDialect;

/// GLSL body of the vertex stage (without `#version`).
pub const VERTEX_BODY: &str = include_str!("shaders/cube.vert");

/// GLSL body of the fragment stage (without `#version`).
pub const FRAGMENT_BODY: &str = include_str!("shaders/cube.frag");

pub const MODEL_UNIFORM: &str = "u_model";
pub const VIEW_UNIFORM: &str = "u_view";
pub const PROJECTION_UNIFORM: &str = "u_projection";

/// Attribute names bound before linking, so the body needs no `layout(location)`.
const ATTRIBUTES: [(u32, &str); 2] = [
    (Vertex::POSITION.location, "a_position"),
    (Vertex::COLOR.location, "a_color"),
];

/// Uniform locations of the three transform matrices.
///
/// A location is `None` when the linker optimized the uniform away; uploads to
/// it are skipped by GL.
#[derive(Debug, Clone)]
pub struct Uniforms<L> {
    pub model: Option<L>,
    pub view: Option<L>,
    pub projection: Option<L>,
}

impl<L> Default for Uniforms<L> {
    fn default() -> Self {
        Self {
            model: None,
            view: None,
            projection: None,
        }
    }
}

/// Compiles one stage.
///
/// A rejected shader is deleted before the compiler log is returned.
pub fn compile<D: GlDriver + ?Sized>(
    gl: &D,
    stage: ShaderStage,
    source: &str,
) -> Result<D::Shader> {
    let (create_op, compile_op) = match stage {
        ShaderStage::Vertex => ("create vertex shader", "compile vertex shader"),
        ShaderStage::Fragment => ("create fragment shader", "compile fragment shader"),
    };

    let shader = gl
        .create_shader(stage)
        .map_err(|reason| RenderError::Allocation { what: create_op, reason })?;

    let compiled = check(gl, create_op).and_then(|()| {
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if !gl.shader_compile_status(shader) {
            return Err(RenderError::Compile {
                stage,
                log: gl.shader_info_log(shader),
            });
        }
        check(gl, compile_op)
    });

    match compiled {
        Ok(()) => Ok(shader),
        Err(err) => {
            gl.delete_shader(shader);
            Err(err)
        }
    }
}

/// Links both stages into a program.
///
/// On failure the program object is deleted; the shader objects stay with the
/// caller.
pub fn link<D: GlDriver + ?Sized>(
    gl: &D,
    vertex: D::Shader,
    fragment: D::Shader,
) -> Result<D::Program> {
    let program = gl.create_program().map_err(|reason| RenderError::Allocation {
        what: "shader program",
        reason,
    })?;

    let linked = check(gl, "create program").and_then(|()| {
        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        check(gl, "attach shaders")?;

        for (location, name) in ATTRIBUTES {
            gl.bind_attrib_location(program, location, name);
        }
        gl.link_program(program);
        if !gl.program_link_status(program) {
            return Err(RenderError::Link {
                log: gl.program_info_log(program),
            });
        }
        check(gl, "link program")
    });

    match linked {
        Ok(()) => Ok(program),
        Err(err) => {
            gl.delete_program(program);
            Err(err)
        }
    }
}

/// Looks up a uniform; a missing one is logged, not an error.
pub fn resolve_uniform<D: GlDriver + ?Sized>(
    gl: &D,
    program: D::Program,
    name: &str,
) -> Option<D::UniformLocation> {
    let location = gl.uniform_location(program, name);
    if location.is_none() {
        log::debug!("uniform {name} is not active in the cube program");
    }
    location
}

/// Shader objects, linked program and uniform locations of the cube.
pub struct ShaderProgram<D: GlDriver> {
    vertex: Slot<D::Shader>,
    fragment: Slot<D::Shader>,
    program: Slot<D::Program>,
    uniforms: Uniforms<D::UniformLocation>,
}

impl<D: GlDriver> Default for ShaderProgram<D> {
    fn default() -> Self {
        Self {
            vertex: Slot::Unallocated,
            fragment: Slot::Unallocated,
            program: Slot::Unallocated,
            uniforms: Uniforms::default(),
        }
    }
}

impl<D: GlDriver> ShaderProgram<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs compile(vertex) → compile(fragment) → link → resolve×3.
    ///
    /// Each handle is stored as soon as it exists, so [`release`](Self::release)
    /// cleans up whatever a failed build left behind.
    pub fn build(&mut self, gl: &D, dialect: ShaderDialect) -> Result<()> {
        debug_assert!(!self.program.is_allocated(), "cube program built twice");

        let vertex = self
            .vertex
            .fill(compile(gl, ShaderStage::Vertex, &dialect.prepend(VERTEX_BODY))?);
        log::debug!("vertex shader compiled");

        let fragment = self
            .fragment
            .fill(compile(gl, ShaderStage::Fragment, &dialect.prepend(FRAGMENT_BODY))?);
        log::debug!("fragment shader compiled");

        let program = self.program.fill(link(gl, vertex, fragment)?);
        log::debug!("cube program linked");

        self.uniforms = Uniforms {
            model: resolve_uniform(gl, program, MODEL_UNIFORM),
            view: resolve_uniform(gl, program, VIEW_UNIFORM),
            projection: resolve_uniform(gl, program, PROJECTION_UNIFORM),
        };
        check(gl, "resolve uniforms")
    }

    #[inline]
    pub fn program(&self) -> Option<D::Program> {
        self.program.get()
    }

    #[inline]
    pub fn uniforms(&self) -> &Uniforms<D::UniformLocation> {
        &self.uniforms
    }

    /// Whether any shader or program object is currently owned.
    pub fn holds_anything(&self) -> bool {
        self.vertex.is_allocated() || self.fragment.is_allocated() || self.program.is_allocated()
    }

    /// Deletes the program, then the vertex and fragment shaders.
    ///
    /// Only allocated handles are deleted; calling this again is a no-op.
    pub fn release(&mut self, gl: &D) {
        if let Some(program) = self.program.take() {
            gl.delete_program(program);
        }
        if let Some(vertex) = self.vertex.take() {
            gl.delete_shader(vertex);
        }
        if let Some(fragment) = self.fragment.take() {
            gl.delete_shader(fragment);
        }
        self.uniforms = Uniforms::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::fake::{Call, FakeDriver};

    fn dialect() -> ShaderDialect {
        ShaderDialect { glsl: 330, es: false, core: true }
    }

    // ── compile ───────────────────────────────────────────────────────────

    #[test]
    fn compile_uploads_prefixed_source() {
        let gl = FakeDriver::new();
        let shader = compile(&gl, ShaderStage::Vertex, &dialect().prepend(VERTEX_BODY)).unwrap();
        let src = gl.source(shader).unwrap();
        assert!(src.starts_with("#version 330 core\n"));
        assert!(src.contains("u_projection * u_view * u_model"));
    }

    #[test]
    fn compile_failure_carries_log_and_deletes_shader() {
        let gl = FakeDriver::new().rejecting_shader(ShaderStage::Fragment);
        let err = compile(&gl, ShaderStage::Fragment, FRAGMENT_BODY).unwrap_err();
        match &err {
            RenderError::Compile { stage, log } => {
                assert_eq!(*stage, ShaderStage::Fragment);
                assert!(log.contains("rejected"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().starts_with("fragment shader compile error"));
        assert_eq!(gl.count(|c| matches!(c, Call::DeleteShader(_))), 1);
    }

    #[test]
    fn driver_error_during_compile_is_fatal() {
        let gl = FakeDriver::new();
        gl.raise_error_on(|c| matches!(c, Call::CompileShader(_)), 0x0500);
        let err = compile(&gl, ShaderStage::Vertex, VERTEX_BODY).unwrap_err();
        assert!(matches!(err, RenderError::Driver { op: "compile vertex shader", .. }));
    }

    // ── link ──────────────────────────────────────────────────────────────

    #[test]
    fn link_binds_attribute_locations_first() {
        let gl = FakeDriver::new();
        let program = link(&gl, 1, 2).unwrap();
        let calls = gl.calls();
        let bind = calls
            .iter()
            .position(|c| matches!(c, Call::BindAttribLocation(_, 0, n) if n == "a_position"))
            .unwrap();
        let link_at = calls.iter().position(|c| *c == Call::LinkProgram(program)).unwrap();
        assert!(bind < link_at);
        assert!(calls.contains(&Call::BindAttribLocation(program, 1, "a_color".to_string())));
    }

    #[test]
    fn link_failure_deletes_program() {
        let gl = FakeDriver::new().rejecting_link();
        let err = link(&gl, 1, 2).unwrap_err();
        assert!(matches!(err, RenderError::Link { .. }));
        assert_eq!(gl.count(|c| matches!(c, Call::DeleteProgram(_))), 1);
    }

    // ── build / release ───────────────────────────────────────────────────

    #[test]
    fn build_runs_stages_in_order() {
        let gl = FakeDriver::new();
        let mut program = ShaderProgram::new();
        program.build(&gl, dialect()).unwrap();

        let order: Vec<_> = gl
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateShader(ShaderStage::Vertex, _) => Some("vertex"),
                Call::CreateShader(ShaderStage::Fragment, _) => Some("fragment"),
                Call::LinkProgram(_) => Some("link"),
                Call::UniformLocation(_) => Some("uniform"),
                _ => None,
            })
            .collect();
        assert_eq!(order, ["vertex", "fragment", "link", "uniform", "uniform", "uniform"]);
        assert!(program.program().is_some());
        assert!(program.uniforms().projection.is_some());
    }

    #[test]
    fn missing_uniform_is_not_an_error() {
        let gl = FakeDriver::new().without_uniform(MODEL_UNIFORM);
        let mut program = ShaderProgram::new();
        program.build(&gl, dialect()).unwrap();
        assert!(program.uniforms().model.is_none());
        assert!(program.uniforms().view.is_some());
    }

    #[test]
    fn release_after_failed_fragment_only_deletes_vertex_shader() {
        let gl = FakeDriver::new().rejecting_shader(ShaderStage::Fragment);
        let mut program = ShaderProgram::new();
        assert!(program.build(&gl, dialect()).is_err());
        gl.clear_calls();

        program.release(&gl);
        program.release(&gl);
        assert_eq!(gl.calls(), vec![Call::DeleteShader(1)]);
    }
}
