/// Pass node contract and the context a node executes in.
///
/// The graph only ever holds `Box<dyn PassNode>`; concrete effect passes
/// live in the `passes` module.

use std::sync::Arc;
use crate::error::Result;
use crate::engine_bail;
use crate::graphics_device::{
    CommandList, GraphicsDevice, ProgramDesc, Rect2D, Texture, Viewport,
};
use crate::pool::SurfaceDescriptor;
use super::pass::{PassDescriptor, PassId};
use super::program_cache::ProgramCache;

// ===== PASS KIND =====

/// Kind of full-screen pass
///
/// Every kind shares one program across all of its instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PassKind {
    MotionBlur,
    BrightPass,
    Blur,
    Composite,
    LightStreak,
    LensFlare,
    Luminance,
    ToneMap,
    Fxaa,
}

impl PassKind {
    pub const ALL: [PassKind; 9] = [
        PassKind::MotionBlur,
        PassKind::BrightPass,
        PassKind::Blur,
        PassKind::Composite,
        PassKind::LightStreak,
        PassKind::LensFlare,
        PassKind::Luminance,
        PassKind::ToneMap,
        PassKind::Fxaa,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PassKind::MotionBlur => "motion_blur",
            PassKind::BrightPass => "bright_pass",
            PassKind::Blur => "blur",
            PassKind::Composite => "composite",
            PassKind::LightStreak => "light_streak",
            PassKind::LensFlare => "lens_flare",
            PassKind::Luminance => "luminance",
            PassKind::ToneMap => "tone_map",
            PassKind::Fxaa => "fxaa",
        }
    }
}

// ===== PASS NODE =====

/// One full-screen GPU operation with fixed input and output slots
///
/// Effect parameters are baked into the node when it is built. Nodes never
/// touch dependency counts or the surface pool; the execution context owns
/// both.
pub trait PassNode: Send {
    /// Kind of this pass (selects the shared program)
    fn kind(&self) -> PassKind;

    /// Read-only view of the pass wiring
    fn pass_descriptor(&self) -> &PassDescriptor;

    /// Descriptor of output `slot`, given the descriptors of the resolved inputs
    ///
    /// Must be pure: it is called before `process` to size pool requests.
    fn compute_output_descriptor(&self, slot: usize, inputs: &[SurfaceDescriptor]) -> SurfaceDescriptor;

    /// Record the pass's GPU work
    ///
    /// Inputs are resolved and outputs bound by the caller.
    fn process(&mut self, ctx: &mut PassContext<'_>) -> Result<()>;

    /// Id of this pass in the pass list
    fn pass_id(&self) -> PassId {
        self.pass_descriptor().pass_id()
    }

    /// Label used for GPU debug markers and logs
    fn label(&self) -> String {
        format!("{}{}", self.kind().name(), self.pass_id())
    }
}

// ===== PASS CONTEXT =====

/// Everything a pass needs while recording its work
pub struct PassContext<'a> {
    pass_id: PassId,
    inputs: &'a [Arc<dyn Texture>],
    outputs: &'a [Arc<dyn Texture>],
    commands: &'a mut dyn CommandList,
    programs: &'a mut ProgramCache,
    device: &'a mut dyn GraphicsDevice,
}

impl<'a> PassContext<'a> {
    pub fn new(
        pass_id: PassId,
        inputs: &'a [Arc<dyn Texture>],
        outputs: &'a [Arc<dyn Texture>],
        commands: &'a mut dyn CommandList,
        programs: &'a mut ProgramCache,
        device: &'a mut dyn GraphicsDevice,
    ) -> Self {
        Self { pass_id, inputs, outputs, commands, programs, device }
    }

    pub fn pass_id(&self) -> PassId {
        self.pass_id
    }

    /// Resolved inputs, in input slot order
    pub fn inputs(&self) -> &[Arc<dyn Texture>] {
        self.inputs
    }

    /// Bound outputs, in output slot order
    pub fn outputs(&self) -> &[Arc<dyn Texture>] {
        self.outputs
    }

    pub fn input(&self, slot: usize) -> Result<&Arc<dyn Texture>> {
        match self.inputs.get(slot) {
            Some(texture) => Ok(texture),
            None => engine_bail!("galaxy3d::postfx::PassContext",
                "Pass {} has no input {} ({} resolved)", self.pass_id, slot, self.inputs.len()),
        }
    }

    pub fn output(&self, slot: usize) -> Result<&Arc<dyn Texture>> {
        match self.outputs.get(slot) {
            Some(texture) => Ok(texture),
            None => engine_bail!("galaxy3d::postfx::PassContext",
                "Pass {} has no output {} ({} bound)", self.pass_id, slot, self.outputs.len()),
        }
    }

    /// Command list being recorded
    pub fn commands(&mut self) -> &mut dyn CommandList {
        &mut *self.commands
    }

    /// Area covered by the first output
    pub fn output_rect(&self) -> Rect2D {
        self.outputs
            .first()
            .map(|t| Rect2D::from_size(t.info().width, t.info().height))
            .unwrap_or(Rect2D::from_size(0, 0))
    }

    /// Record one full-screen triangle into every output
    ///
    /// Binds the kind's shared program (created on first use), then every
    /// resolved input followed by `extra_textures` in consecutive sampler
    /// slots, and pushes `constants` when non-empty.
    pub fn draw_fullscreen(
        &mut self,
        kind: PassKind,
        program: &ProgramDesc,
        constants: &[u8],
        extra_textures: &[&dyn Texture],
    ) -> Result<()> {
        debug_assert_eq!(
            constants.len(),
            program.push_constant_size as usize,
            "push constant size mismatch for {}",
            program.name
        );

        let program = self.programs.get_or_create(kind, program, &mut *self.device)?;
        let inputs = self.inputs;
        let outputs = self.outputs;
        let targets: Vec<&dyn Texture> = outputs.iter().map(|t| t.as_ref()).collect();
        let area = self.output_rect();
        let label = format!("{}{}", kind.name(), self.pass_id);

        self.commands.begin_pass(&label, &targets)?;
        self.commands.set_viewport(Viewport::full(area.width, area.height))?;
        self.commands.bind_program(&program)?;

        let mut slot = 0u32;
        for texture in inputs {
            self.commands.bind_texture(slot, texture.as_ref())?;
            slot += 1;
        }
        for texture in extra_textures {
            self.commands.bind_texture(slot, *texture)?;
            slot += 1;
        }
        if !constants.is_empty() {
            self.commands.push_constants(0, constants)?;
        }

        self.commands.draw(3, 0)?;
        self.commands.end_pass()
    }
}
