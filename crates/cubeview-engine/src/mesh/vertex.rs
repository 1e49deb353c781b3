use std::mem::{offset_of, size_of};

use bytemuck::{Pod, Zeroable};

/// Interleaved cube vertex as laid out in the vertex buffer.
///
/// The attribute table below is derived from this struct; reordering or
/// resizing fields updates stride and offsets with it.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// One float vertex attribute binding.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribute {
    /// Shader input location.
    pub location: u32,
    /// Number of `f32` components.
    pub components: i32,
    /// Byte offset inside [`Vertex`].
    pub offset: i32,
}

impl Vertex {
    /// Byte distance between consecutive vertices.
    pub const STRIDE: i32 = size_of::<Vertex>() as i32;

    pub const POSITION: VertexAttribute = VertexAttribute {
        location: 0,
        components: 3,
        offset: offset_of!(Vertex, position) as i32,
    };

    pub const COLOR: VertexAttribute = VertexAttribute {
        location: 1,
        components: 3,
        offset: offset_of!(Vertex, color) as i32,
    };

    pub const ATTRIBUTES: [VertexAttribute; 2] = [Self::POSITION, Self::COLOR];

    #[inline]
    pub const fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_tightly_packed() {
        assert_eq!(Vertex::STRIDE, 6 * size_of::<f32>() as i32);
        assert_eq!(Vertex::POSITION.offset, 0);
        assert_eq!(Vertex::COLOR.offset, 3 * size_of::<f32>() as i32);
    }

    #[test]
    fn attribute_locations_are_distinct() {
        let [a, b] = Vertex::ATTRIBUTES;
        assert_ne!(a.location, b.location);
    }

    #[test]
    fn bytes_follow_field_order() {
        let v = Vertex::new([1.0, 2.0, 3.0], [4.0, 5.0, 6.0]);
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&v));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }
}
