use std::fmt;

/// Programmable pipeline stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn label(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// GLSL source for one vertex + fragment pair.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ShaderSources {
    pub vertex: &'static str,
    pub fragment: &'static str,
}

impl ShaderSources {
    /// Pass-through position shader with a flat orange fill.
    pub const TRIANGLE: Self = Self {
        vertex: include_str!("glsl/triangle.vert"),
        fragment: include_str!("glsl/triangle.frag"),
    };

    pub fn get(&self, stage: ShaderStage) -> &'static str {
        match stage {
            ShaderStage::Vertex => self.vertex,
            ShaderStage::Fragment => self.fragment,
        }
    }
}

impl Default for ShaderSources {
    fn default() -> Self {
        Self::TRIANGLE
    }
}
