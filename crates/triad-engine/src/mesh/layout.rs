use bytemuck::{Pod, Zeroable};

/// One float vertex attribute as handed to `glVertexAttribPointer`.
///
/// All sizes are in bytes. The component type is always `f32`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribute {
    pub index: u32,
    pub components: i32,
    pub normalized: bool,
    pub stride: i32,
    pub offset: i32,
}

/// Position-only vertex (`location = 0`).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Position {
    pub xyz: [f32; 3],
}

impl Position {
    const ATTRS: [VertexAttribute; 1] = [VertexAttribute {
        index: 0,
        components: 3,
        normalized: false,
        stride: std::mem::size_of::<Position>() as i32,
        offset: 0,
    }];

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { xyz: [x, y, z] }
    }

    pub fn layout() -> &'static [VertexAttribute] {
        &Self::ATTRS
    }
}

/// Counter-clockwise triangle centred on the origin in NDC.
pub const TRIANGLE_VERTICES: [Position; 3] = [
    Position::new(-0.5, -0.5, 0.0),
    Position::new(0.5, -0.5, 0.0),
    Position::new(0.0, 0.5, 0.0),
];
