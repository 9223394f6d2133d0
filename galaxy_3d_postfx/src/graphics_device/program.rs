/// Program trait and program descriptor
///
/// A program is a linked full-screen shader (shared vertex stage plus an
/// effect-specific fragment stage). Shader sources themselves live with the
/// backend; the framework only names them.

/// Descriptor for creating a full-screen program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramDesc {
    /// Debug name (e.g., "postfx::bloom_bright")
    pub name: &'static str,
    /// Backend lookup key of the fragment stage (e.g., "postfx/bloom_bright.frag")
    pub fragment_shader: &'static str,
    /// Size in bytes of the push constant block read by the fragment stage
    pub push_constant_size: u32,
}

/// Program resource trait
///
/// Implemented by backend-specific program types.
pub trait Program: Send + Sync {
    /// Debug name given at creation
    fn name(&self) -> &str;
}
