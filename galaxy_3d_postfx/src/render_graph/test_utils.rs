/// Test-only pass node used to exercise the graph machinery without the
/// concrete effect passes.

use crate::error::Result;
use crate::graphics_device::{ProgramDesc, TextureFormat};
use crate::pool::SurfaceDescriptor;
use super::pass::{ExternalInput, InputBinding, PassDescriptor, PassId};
use super::pass_arena::PassArena;
use super::pass_node::{PassContext, PassKind, PassNode};

pub const TEST_PROGRAM: ProgramDesc = ProgramDesc {
    name: "postfx::test",
    fragment_shader: "postfx/test.frag",
    push_constant_size: 0,
};

/// Full-screen pass copying its first input's descriptor
pub struct TestPass {
    descriptor: PassDescriptor,
    format: Option<TextureFormat>,
}

impl TestPass {
    pub fn new(id: PassId, inputs: &[InputBinding]) -> Self {
        Self::with_outputs(id, inputs, 1)
    }

    pub fn with_outputs(id: PassId, inputs: &[InputBinding], output_count: usize) -> Self {
        Self {
            descriptor: PassDescriptor::new(id, inputs, output_count),
            format: None,
        }
    }

    pub fn with_format(mut self, format: TextureFormat) -> Self {
        self.format = Some(format);
        self
    }
}

impl PassNode for TestPass {
    fn kind(&self) -> PassKind {
        PassKind::Composite
    }

    fn pass_descriptor(&self) -> &PassDescriptor {
        &self.descriptor
    }

    fn compute_output_descriptor(&self, _slot: usize, inputs: &[SurfaceDescriptor]) -> SurfaceDescriptor {
        let base = inputs
            .first()
            .copied()
            .unwrap_or_else(|| SurfaceDescriptor::new_2d(1, 1, TextureFormat::R16G16B16A16_SFLOAT));
        match self.format {
            Some(format) => base.with_format(format),
            None => base,
        }
    }

    fn process(&mut self, ctx: &mut PassContext<'_>) -> Result<()> {
        ctx.draw_fullscreen(PassKind::Composite, &TEST_PROGRAM, &[], &[])
    }
}

/// Scene color binding
pub fn scene() -> InputBinding {
    InputBinding::external(ExternalInput::SceneColor)
}

/// Output 0 of pass `index`
pub fn out(index: usize) -> InputBinding {
    InputBinding::output_of(PassId::from_index(index), 0)
}

/// Push a test pass with the given inputs at the end of `arena`
pub fn push(arena: &mut PassArena, inputs: &[InputBinding]) -> PassId {
    let id = arena.next_pass_id();
    arena.push(Box::new(TestPass::new(id, inputs)))
}

/// Diamond: 0 <- scene, 1 <- 0, 2 <- 0, 3 <- (1, 2)
pub fn diamond() -> PassArena {
    let mut arena = PassArena::new();
    push(&mut arena, &[scene()]);
    push(&mut arena, &[out(0)]);
    push(&mut arena, &[out(0)]);
    push(&mut arena, &[out(1), out(2)]);
    arena
}
