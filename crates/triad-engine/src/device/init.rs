use crate::shader::ShaderPolicy;

/// Requested context profile.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ContextProfile {
    /// No deprecated fixed-function entry points.
    Core,
    Compatibility,
}

/// Initialization parameters for the GL layer.
///
/// Keep this structure stable and minimal. Add configuration flags only when a
/// concrete platform or driver requirement exists.
#[derive(Debug, Clone)]
pub struct GlInit {
    /// Requested `(major, minor)` OpenGL version.
    ///
    /// The context is rejected if the driver reports anything older.
    pub version: (u8, u8),

    /// Requested profile.
    pub profile: ContextProfile,

    /// Wait for vertical sync on swap.
    pub vsync: bool,

    /// What to do when a shader stage fails to compile or the program fails
    /// to link.
    pub shader_policy: ShaderPolicy,
}

impl Default for GlInit {
    fn default() -> Self {
        Self {
            version: (3, 3),
            profile: ContextProfile::Core,
            vsync: true,
            shader_policy: ShaderPolicy::Strict,
        }
    }
}

impl GlInit {
    /// Returns true if a context reporting `(major, minor)` satisfies the request.
    pub fn accepts(&self, major: u32, minor: u32) -> bool {
        let (want_major, want_minor) = (u32::from(self.version.0), u32::from(self.version.1));
        (major, minor) >= (want_major, want_minor)
    }
}
