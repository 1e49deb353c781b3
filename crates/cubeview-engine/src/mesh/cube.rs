use super::{MeshData, Vertex};

/// Cube corners at ±1 with one color per corner.
pub const CUBE_VERTICES: [Vertex; 8] = [
    // z = +1
    Vertex::new([-1.0, -1.0, 1.0], [1.0, 0.0, 0.0]),
    Vertex::new([1.0, -1.0, 1.0], [1.0, 0.5, 0.0]),
    Vertex::new([1.0, 1.0, 1.0], [1.0, 1.0, 0.0]),
    Vertex::new([-1.0, 1.0, 1.0], [0.5, 1.0, 0.0]),
    // z = -1
    Vertex::new([-1.0, -1.0, -1.0], [0.0, 0.0, 1.0]),
    Vertex::new([1.0, -1.0, -1.0], [0.0, 0.5, 1.0]),
    Vertex::new([1.0, 1.0, -1.0], [0.0, 1.0, 1.0]),
    Vertex::new([-1.0, 1.0, -1.0], [0.5, 0.0, 1.0]),
];

/// Two triangles per face, counter-clockwise as seen from outside the cube.
#[rustfmt::skip]
pub const CUBE_INDICES: [u32; 36] = [
    0, 1, 2,  0, 2, 3, // +z
    5, 4, 7,  5, 7, 6, // -z
    3, 2, 6,  3, 6, 7, // +y
    4, 5, 1,  4, 1, 0, // -y
    1, 5, 6,  1, 6, 2, // +x
    4, 0, 3,  4, 3, 7, // -x
];

impl MeshData<'static> {
    pub const fn cube() -> Self {
        Self::new(&CUBE_VERTICES, &CUBE_INDICES)
    }
}
