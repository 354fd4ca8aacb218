use crate::device::GlApi;

use super::{ShaderError, ShaderStage};

/// One compiled (or failed) shader stage.
///
/// The GL name is released on drop. A failed compile still yields a valid
/// object so the caller decides whether to continue.
pub struct ShaderObject<'gl, G: GlApi> {
    gl: &'gl G,
    raw: G::Shader,
    stage: ShaderStage,
    compiled: bool,
    log: String,
}

impl<'gl, G: GlApi> ShaderObject<'gl, G> {
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Compile status reported by the driver.
    pub fn is_compiled(&self) -> bool {
        self.compiled
    }

    /// Driver diagnostic text. May be empty on success.
    pub fn log(&self) -> &str {
        &self.log
    }

    pub fn raw(&self) -> G::Shader {
        self.raw
    }
}

impl<G: GlApi> Drop for ShaderObject<'_, G> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.raw);
    }
}

/// Compiles `source` as a `stage` shader.
///
/// Errors only if the driver cannot allocate a shader name. Compile failures
/// are logged at error level and reflected in [`ShaderObject::is_compiled`].
pub fn compile<'gl, G: GlApi>(
    gl: &'gl G,
    stage: ShaderStage,
    source: &str,
) -> Result<ShaderObject<'gl, G>, ShaderError> {
    let raw = gl.create_shader(stage).map_err(|message| ShaderError::Create {
        what: "shader",
        message,
    })?;

    gl.shader_source(raw, source);
    gl.compile_shader(raw);

    let compiled = gl.shader_compile_status(raw);
    let log = gl.shader_info_log(raw);
    report(&format!("{stage} shader compilation"), compiled, &log);

    Ok(ShaderObject {
        gl,
        raw,
        stage,
        compiled,
        log,
    })
}

/// Logs a compile/link outcome: info on success, error on failure.
pub(super) fn report(what: &str, ok: bool, log: &str) {
    let log = log.trim_end();
    match (ok, log.is_empty()) {
        (true, true) => log::info!("{what} succeeded"),
        (true, false) => log::info!("{what} succeeded: {log}"),
        (false, true) => log::error!("{what} failed (driver gave no log)"),
        (false, false) => log::error!("{what} failed: {log}"),
    }
}
