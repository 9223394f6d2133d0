/// Tests for pass wiring types

use super::*;

#[test]
fn test_pass_id_index_round_trip() {
    let id = PassId::from_index(3);
    assert_eq!(id.index(), 3);
    assert!(!id.is_external());
    assert!(PassId::EXTERNAL.is_external());
    assert_eq!(format!("{}", id), "#3");
    assert_eq!(format!("{:?}", PassId::EXTERNAL), "PassId(EXTERNAL)");
}

#[test]
fn test_external_bindings() {
    let color = InputBinding::external(ExternalInput::SceneColor);
    let depth = InputBinding::external(ExternalInput::SceneDepth);

    assert!(color.is_external());
    assert_eq!(color.output_slot, 0);
    assert_eq!(depth.output_slot, 1);
    assert_eq!(ExternalInput::from_slot(1), Some(ExternalInput::SceneDepth));
    assert_eq!(ExternalInput::from_slot(2), None);
}

#[test]
fn test_descriptor_keeps_declared_inputs_only() {
    let inputs = [
        InputBinding::external(ExternalInput::SceneColor),
        InputBinding::output_of(PassId::from_index(0), 0),
    ];
    let desc = PassDescriptor::new(PassId::from_index(1), &inputs, 1);

    assert_eq!(desc.pass_id(), PassId::from_index(1));
    assert_eq!(desc.inputs(), &inputs);
    assert_eq!(desc.input_count(), 2);
    assert_eq!(desc.output_count(), 1);

    let internal: Vec<_> = desc.internal_inputs().copied().collect();
    assert_eq!(internal, vec![InputBinding::output_of(PassId::from_index(0), 0)]);
}

#[test]
fn test_descriptor_without_inputs() {
    let desc = PassDescriptor::new(PassId::from_index(0), &[], 2);
    assert!(desc.inputs().is_empty());
    assert_eq!(desc.output_count(), 2);
}
