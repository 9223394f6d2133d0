/// Tests for PassArena

use super::*;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use crate::graphics_device::TextureFormat;
use crate::pool::SurfaceDescriptor;
use crate::render_graph::pass::InputBinding;
use crate::render_graph::test_utils::{diamond, out, push, scene, TestPass};

fn surface_desc() -> SurfaceDescriptor {
    SurfaceDescriptor::new_2d(64, 64, TextureFormat::R16G16B16A16_SFLOAT)
}

// ============================================================================
// Tests: Construction
// ============================================================================

#[test]
fn test_push_assigns_consecutive_ids() {
    let arena = diamond();
    assert_eq!(arena.len(), 4);
    let ids: Vec<_> = arena.ids().map(PassId::index).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
    assert_eq!(arena.terminal(), Some(PassId::from_index(3)));
    assert_eq!(arena.descriptor(PassId::from_index(3)).unwrap().input_count(), 2);
    assert_eq!(arena.kinds(), vec![PassKind::Composite; 4]);
    assert!(arena.contains_kind(PassKind::Composite));
    assert!(!arena.contains_kind(PassKind::Fxaa));
}

#[test]
fn test_empty_arena_has_no_terminal() {
    let arena = PassArena::new();
    assert!(arena.is_empty());
    assert_eq!(arena.terminal(), None);
    assert!(arena.node(PassId::from_index(0)).is_none());
}

// ============================================================================
// Tests: Outputs
// ============================================================================

#[test]
fn test_bind_and_release_outputs() {
    let mut device = MockGraphicsDevice::new();
    let mut pool = SurfacePool::new();
    let mut arena = diamond();
    let id = PassId::from_index(0);

    let surface = pool.find_free_element(&surface_desc(), &mut device).unwrap();
    arena.bind_output(id, 0, surface);
    assert!(arena.output(id, 0).is_some());
    assert_eq!(pool.loaned_count(), 1);

    assert_eq!(arena.release_resource(id, &mut pool), 1);
    assert!(arena.output(id, 0).is_none());
    assert_eq!(pool.idle_count(), 1);

    // Nothing left to release
    assert_eq!(arena.release_resource(id, &mut pool), 0);
}

#[test]
fn test_begin_frame_resets_state_and_reclaims_outputs() {
    let mut device = MockGraphicsDevice::new();
    let mut pool = SurfacePool::new();
    let mut arena = diamond();
    let id = PassId::from_index(1);

    let surface = pool.find_free_element(&surface_desc(), &mut device).unwrap();
    arena.bind_output(id, 0, surface);
    arena.mark_processed(id);
    assert!(arena.is_processed(id));

    arena.begin_frame(&mut pool);
    assert!(!arena.is_processed(id));
    assert!(arena.output(id, 0).is_none());
    assert_eq!(pool.loaned_count(), 0);
}

#[test]
fn test_clear_returns_outputs_and_bumps_generation() {
    let mut device = MockGraphicsDevice::new();
    let mut pool = SurfacePool::new();
    let mut arena = diamond();

    for index in 0..2 {
        let surface = pool.find_free_element(&surface_desc(), &mut device).unwrap();
        arena.bind_output(PassId::from_index(index), 0, surface);
    }

    let generation = arena.generation();
    arena.clear(&mut pool);
    assert!(arena.is_empty());
    assert_eq!(arena.generation(), generation + 1);
    assert_eq!(pool.idle_count(), 2);
    assert_eq!(pool.loaned_count(), 0);
}

// ============================================================================
// Tests: Wiring validation
// ============================================================================

#[test]
fn test_valid_wiring_passes() {
    assert!(diamond().validate_wiring().is_ok());
    assert!(PassArena::new().validate_wiring().is_ok());
}

#[test]
fn test_missing_output_slot_is_rejected() {
    let mut arena = PassArena::new();
    push(&mut arena, &[scene()]);
    push(&mut arena, &[InputBinding::output_of(PassId::from_index(0), 1)]);

    match arena.validate_wiring() {
        Err(Error::InvalidGraph(message)) => assert!(message.contains("output 1")),
        other => panic!("expected InvalidGraph, got {:?}", other),
    }
}

#[test]
fn test_second_output_slot_is_accepted() {
    let mut arena = PassArena::new();
    let id = arena.next_pass_id();
    arena.push(Box::new(TestPass::with_outputs(id, &[scene()], 2)));
    push(&mut arena, &[out(0), InputBinding::output_of(PassId::from_index(0), 1)]);

    assert!(arena.validate_wiring().is_ok());
}

#[test]
fn test_unknown_external_input_is_rejected() {
    let mut arena = PassArena::new();
    let bogus = InputBinding { producer: PassId::EXTERNAL, output_slot: 7 };
    push(&mut arena, &[bogus]);

    assert!(matches!(arena.validate_wiring(), Err(Error::InvalidGraph(_))));
}

#[test]
fn test_forward_reference_is_rejected() {
    let mut arena = PassArena::new();
    arena.push_unchecked(Box::new(TestPass::new(PassId::from_index(0), &[out(1)])));
    arena.push_unchecked(Box::new(TestPass::new(PassId::from_index(1), &[scene()])));

    match arena.validate_wiring() {
        Err(Error::InvalidGraph(message)) => {
            assert!(message.contains("reads pass #1 which does not run earlier"), "{}", message)
        }
        other => panic!("expected InvalidGraph, got {:?}", other),
    }
}

#[test]
fn test_self_reference_is_rejected() {
    let mut arena = PassArena::new();
    push(&mut arena, &[scene()]);
    arena.push_unchecked(Box::new(TestPass::new(PassId::from_index(1), &[out(1)])));

    match arena.validate_wiring() {
        Err(Error::InvalidGraph(message)) => assert!(message.contains("does not run earlier")),
        other => panic!("expected InvalidGraph, got {:?}", other),
    }
}

#[test]
fn test_misplaced_node_is_rejected() {
    let mut arena = PassArena::new();
    arena.push_unchecked(Box::new(TestPass::new(PassId::from_index(3), &[scene()])));

    match arena.validate_wiring() {
        Err(Error::InvalidGraph(message)) => assert!(message.contains("sits at position 0")),
        other => panic!("expected InvalidGraph, got {:?}", other),
    }
}
