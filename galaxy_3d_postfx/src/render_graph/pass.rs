/// Pass wiring: identities, input bindings and pass descriptors.

use std::fmt;

/// Maximum number of inputs a pass can declare
pub const MAX_PASS_INPUTS: usize = 4;
/// Maximum number of outputs a pass can produce
pub const MAX_PASS_OUTPUTS: usize = 2;

// ===== PASS ID =====

/// Identity of a pass inside one graph
///
/// Ids are the pass's position in the ordered pass list. `EXTERNAL` is
/// reserved for bindings to the frame inputs.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PassId(u16);

impl PassId {
    /// Producer of the frame's external inputs
    pub const EXTERNAL: PassId = PassId(u16::MAX);

    /// Id of the pass at `index` in the pass list
    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < u16::MAX as usize, "pass index {} out of range", index);
        PassId(index as u16)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_external(self) -> bool {
        self == Self::EXTERNAL
    }
}

impl fmt::Debug for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_external() {
            write!(f, "PassId(EXTERNAL)")
        } else {
            write!(f, "PassId({})", self.0)
        }
    }
}

impl fmt::Display for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_external() {
            write!(f, "external")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

// ===== EXTERNAL INPUT =====

/// Frame inputs a pass can bind through `PassId::EXTERNAL`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExternalInput {
    SceneColor = 0,
    SceneDepth = 1,
}

impl ExternalInput {
    pub fn from_slot(slot: u8) -> Option<Self> {
        match slot {
            0 => Some(ExternalInput::SceneColor),
            1 => Some(ExternalInput::SceneDepth),
            _ => None,
        }
    }
}

// ===== INPUT BINDING =====

/// Binds one pass input to an output slot of an earlier pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputBinding {
    pub producer: PassId,
    pub output_slot: u8,
}

impl InputBinding {
    /// Binding to a frame input
    pub fn external(input: ExternalInput) -> Self {
        Self { producer: PassId::EXTERNAL, output_slot: input as u8 }
    }

    /// Binding to output `slot` of `producer`
    pub fn output_of(producer: PassId, slot: u8) -> Self {
        Self { producer, output_slot: slot }
    }

    pub fn is_external(&self) -> bool {
        self.producer.is_external()
    }
}

// ===== PASS DESCRIPTOR =====

/// Wiring of one pass: its inputs, output count and identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassDescriptor {
    inputs: [InputBinding; MAX_PASS_INPUTS],
    input_count: u8,
    output_count: u8,
    pass_id: PassId,
}

impl PassDescriptor {
    /// # Arguments
    ///
    /// * `pass_id` - Position the pass will occupy in the pass list
    /// * `inputs` - Input bindings in input slot order (at most `MAX_PASS_INPUTS`)
    /// * `output_count` - Number of outputs (1 to `MAX_PASS_OUTPUTS`)
    pub fn new(pass_id: PassId, inputs: &[InputBinding], output_count: usize) -> Self {
        debug_assert!(inputs.len() <= MAX_PASS_INPUTS, "too many inputs: {}", inputs.len());
        debug_assert!(
            (1..=MAX_PASS_OUTPUTS).contains(&output_count),
            "invalid output count: {}",
            output_count
        );

        let input_count = inputs.len().min(MAX_PASS_INPUTS);
        let mut bindings = [InputBinding::external(ExternalInput::SceneColor); MAX_PASS_INPUTS];
        bindings[..input_count].copy_from_slice(&inputs[..input_count]);

        Self {
            inputs: bindings,
            input_count: input_count as u8,
            output_count: output_count.clamp(1, MAX_PASS_OUTPUTS) as u8,
            pass_id,
        }
    }

    pub fn pass_id(&self) -> PassId {
        self.pass_id
    }

    /// Declared inputs, in input slot order
    pub fn inputs(&self) -> &[InputBinding] {
        &self.inputs[..self.input_count as usize]
    }

    pub fn input_count(&self) -> usize {
        self.input_count as usize
    }

    pub fn output_count(&self) -> usize {
        self.output_count as usize
    }

    /// Inputs produced by other passes
    pub fn internal_inputs(&self) -> impl Iterator<Item = &InputBinding> + '_ {
        self.inputs().iter().filter(|b| !b.is_external())
    }
}

#[cfg(test)]
#[path = "pass_tests.rs"]
mod tests;
