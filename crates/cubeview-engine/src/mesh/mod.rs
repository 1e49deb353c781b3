//! Fixed cube geometry.
//!
//! `MeshData` borrows vertex and index slices; the cube lives in constants and is
//! uploaded once at surface initialization.

mod cube;
mod vertex;

pub use cube::{CUBE_INDICES, CUBE_VERTICES};
pub use vertex::{Vertex, VertexAttribute};

/// Indexed triangle list.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeshData<'a> {
    pub vertices: &'a [Vertex],
    pub indices: &'a [u32],
}

/// Structural problem found by [`MeshData::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    #[error("index count {0} is not a multiple of 3")]
    PartialTriangle(usize),
    #[error("{0} indices exceed a single draw call")]
    TooManyIndices(usize),
    #[error("index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        position: usize,
        index: u32,
        vertex_count: usize,
    },
}

impl<'a> MeshData<'a> {
    #[inline]
    pub const fn new(vertices: &'a [Vertex], indices: &'a [u32]) -> Self {
        Self { vertices, indices }
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Index count as the `GLsizei` a draw call takes.
    pub fn draw_count(&self) -> Result<i32, MeshError> {
        i32::try_from(self.indices.len()).map_err(|_| MeshError::TooManyIndices(self.indices.len()))
    }

    /// Checks that indices form whole triangles and reference existing vertices.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::PartialTriangle(self.indices.len()));
        }
        self.draw_count()?;
        let vertex_count = self.vertices.len();
        match self
            .indices
            .iter()
            .position(|&i| i as usize >= vertex_count)
        {
            Some(position) => Err(MeshError::IndexOutOfRange {
                position,
                index: self.indices[position],
                vertex_count,
            }),
            None => Ok(()),
        }
    }

    #[inline]
    pub fn vertex_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.vertices)
    }

    #[inline]
    pub fn index_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.indices)
    }
}
