use crate::device::GlApi;

use super::object::report;
use super::{compile, ShaderError, ShaderObject, ShaderSources, ShaderStage};

/// What [`build`] does when a stage fails to compile or the program fails to
/// link.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ShaderPolicy {
    /// Any failure is returned as a [`ShaderError`].
    #[default]
    Strict,
    /// Failures are logged; the (unusable) program is returned anyway.
    Lenient,
}

/// A linked (or failed) vertex + fragment program.
///
/// The GL name is released on drop.
pub struct ShaderProgram<'gl, G: GlApi> {
    gl: &'gl G,
    raw: G::Program,
    linked: bool,
    log: String,
}

impl<'gl, G: GlApi> ShaderProgram<'gl, G> {
    /// Link status reported by the driver.
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    pub fn log(&self) -> &str {
        &self.log
    }

    pub fn raw(&self) -> G::Program {
        self.raw
    }

    /// Makes this the active program.
    pub fn bind(&self) {
        self.gl.use_program(Some(self.raw));
    }
}

impl<G: GlApi> Drop for ShaderProgram<'_, G> {
    fn drop(&mut self) {
        log::debug!("releasing shader program {:?}", self.raw);
        self.gl.delete_program(self.raw);
    }
}

/// Links `vertex` and `fragment` into a new program.
///
/// Both shader objects are consumed: they are detached and released before
/// this returns, whether or not the link succeeded. Link failures are logged
/// and reflected in [`ShaderProgram::is_linked`].
pub fn link<'gl, G: GlApi>(
    gl: &'gl G,
    vertex: ShaderObject<'gl, G>,
    fragment: ShaderObject<'gl, G>,
) -> Result<ShaderProgram<'gl, G>, ShaderError> {
    expect_stage(&vertex, ShaderStage::Vertex)?;
    expect_stage(&fragment, ShaderStage::Fragment)?;

    let raw = gl.create_program().map_err(|message| ShaderError::Create {
        what: "program",
        message,
    })?;

    gl.attach_shader(raw, vertex.raw());
    gl.attach_shader(raw, fragment.raw());
    gl.link_program(raw);

    let linked = gl.program_link_status(raw);
    let log = gl.program_info_log(raw);
    report("shader program linking", linked, &log);

    gl.detach_shader(raw, vertex.raw());
    gl.detach_shader(raw, fragment.raw());
    drop(vertex);
    drop(fragment);

    Ok(ShaderProgram {
        gl,
        raw,
        linked,
        log,
    })
}

fn expect_stage<G: GlApi>(
    shader: &ShaderObject<'_, G>,
    expected: ShaderStage,
) -> Result<(), ShaderError> {
    if shader.stage() == expected {
        Ok(())
    } else {
        Err(ShaderError::StageMismatch {
            expected,
            found: shader.stage(),
        })
    }
}

/// Compiles both stages of `sources` and links them, applying `policy`.
///
/// Under [`ShaderPolicy::Strict`] the first failing step is returned as an
/// error and every object created so far is released.
pub fn build<'gl, G: GlApi>(
    gl: &'gl G,
    sources: &ShaderSources,
    policy: ShaderPolicy,
) -> Result<ShaderProgram<'gl, G>, ShaderError> {
    let vertex = compile(gl, ShaderStage::Vertex, sources.vertex)?;
    let fragment = compile(gl, ShaderStage::Fragment, sources.fragment)?;

    if policy == ShaderPolicy::Strict {
        for shader in [&vertex, &fragment] {
            if !shader.is_compiled() {
                return Err(ShaderError::Compile {
                    stage: shader.stage(),
                    log: shader.log().to_string(),
                });
            }
        }
    }

    let program = link(gl, vertex, fragment)?;

    if policy == ShaderPolicy::Strict && !program.is_linked() {
        return Err(ShaderError::Link {
            log: program.log().to_string(),
        });
    }

    Ok(program)
}
