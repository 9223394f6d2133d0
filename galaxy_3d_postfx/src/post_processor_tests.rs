/// Tests for PostProcessor

use super::*;
use crate::error::Error;
use crate::graphics_device::mock_graphics_device::{mock_texture, MockCommandList, MockGraphicsDevice};
use crate::graphics_device::{texture_address, TextureFormat};
use crate::render_graph::PassId;

struct Fixture {
    post: PostProcessor,
    programs_created: Arc<Mutex<Vec<String>>>,
    textures_created: Arc<Mutex<Vec<String>>>,
    wait_idle_calls: Arc<Mutex<u32>>,
    scene_color: Arc<dyn Texture>,
    scene_depth: Arc<dyn Texture>,
    destination: Arc<dyn Texture>,
}

impl Fixture {
    fn new() -> Self {
        let device = MockGraphicsDevice::new();
        let programs_created = Arc::clone(&device.created_programs);
        let textures_created = Arc::clone(&device.created_textures);
        let wait_idle_calls = Arc::clone(&device.wait_idle_calls);
        let device: Arc<Mutex<dyn GraphicsDevice>> = Arc::new(Mutex::new(device));
        Self {
            post: PostProcessor::new(device, PostProcessConfig::default()),
            programs_created,
            textures_created,
            wait_idle_calls,
            scene_color: mock_texture(640, 360, TextureFormat::R16G16B16A16_SFLOAT),
            scene_depth: mock_texture(640, 360, TextureFormat::D32_FLOAT),
            destination: mock_texture(640, 360, TextureFormat::R8G8B8A8_UNORM),
        }
    }

    fn frame_input(&self) -> FrameInput {
        FrameInput::new(Arc::clone(&self.scene_color), Arc::clone(&self.destination))
            .with_depth(Arc::clone(&self.scene_depth))
    }

    fn render(&mut self) -> (FramePlan, MockCommandList) {
        let frame = self.frame_input();
        let mut commands = MockCommandList::new();
        let plan = self.post.render(&frame, &mut commands).unwrap();
        (plan, commands)
    }

    fn textures_created(&self) -> usize {
        self.textures_created.lock().unwrap().len()
    }

    fn wait_idle_calls(&self) -> u32 {
        *self.wait_idle_calls.lock().unwrap()
    }
}

// ============================================================================
// Tests: Frames
// ============================================================================

#[test]
fn test_no_effects_copies_scene_to_destination() {
    let mut fx = Fixture::new();
    let (plan, commands) = fx.render();

    assert_eq!(plan, FramePlan::Idle);
    assert_eq!(
        commands.blits(),
        vec![(texture_address(fx.scene_color.as_ref()), texture_address(fx.destination.as_ref()))]
    );
    assert_eq!(commands.draw_count(), 0);
    assert_eq!(fx.post.last_report(), ExecutionReport::default());
    assert_eq!(fx.textures_created(), 0);
}

#[test]
fn test_bloom_is_clamped_and_reused() {
    let mut fx = Fixture::new();

    fx.post.add_bloom(0.1, 1.0, 2.0);
    let (plan, commands) = fx.render();
    assert_eq!(plan, FramePlan::Rebuild);
    assert_eq!(fx.post.orchestrator().current().bloom().unwrap().threshold(), 0.25);
    assert_eq!(commands.pass_labels(), vec!["bright_pass#0", "blur#1", "composite#2"]);
    assert_eq!(fx.post.active_effects(), ActiveEffects::BLOOM);
    let created = fx.textures_created();

    fx.post.add_bloom(0.1, 1.0, 2.0);
    let (plan, commands) = fx.render();
    assert_eq!(plan, FramePlan::Reuse);
    assert_eq!(fx.post.rebuild_count(), 1);
    assert_eq!(commands.draw_count(), 3);
    // Second frame is served from the pool
    assert_eq!(fx.textures_created(), created);
    assert_eq!(fx.post.pool().loaned_count(), 0);

    let blits = commands.blits();
    assert_eq!(blits.len(), 1);
    assert_ne!(blits[0].0, texture_address(fx.scene_color.as_ref()));
    assert_eq!(blits[0].1, texture_address(fx.destination.as_ref()));
}

#[test]
fn test_adding_fxaa_rebuilds_with_fxaa_last() {
    let mut fx = Fixture::new();
    fx.post.add_bloom(0.5, 1.0, 2.0);
    fx.render();

    fx.post.add_bloom(0.5, 1.0, 2.0);
    fx.post.add_fxaa(3);
    let (plan, commands) = fx.render();

    assert_eq!(plan, FramePlan::Rebuild);
    assert_eq!(fx.wait_idle_calls(), 1);
    let arena = fx.post.orchestrator().arena();
    let terminal = arena.terminal().unwrap();
    assert_eq!(arena.node(terminal).unwrap().kind(), PassKind::Fxaa);
    assert!(arena.contains_kind(PassKind::Composite));
    assert_eq!(commands.pass_labels().last().map(String::as_str), Some("fxaa#3"));
    assert_eq!(fx.post.last_report().passes_executed, 4);
}

#[test]
fn test_auto_exposure_toggle_rebuilds_and_retires_luminance() {
    let mut fx = Fixture::new();
    for frame in 0..4 {
        let auto_expose = frame % 2 == 0;
        fx.post.add_hdr(auto_expose, 1.0, 2.2);
        let (plan, _) = fx.render();

        assert_eq!(plan, FramePlan::Rebuild);
        assert_eq!(fx.post.orchestrator().arena().contains_kind(PassKind::Luminance), auto_expose);
        assert_eq!(fx.post.programs().contains(PassKind::Luminance), auto_expose);
        assert!(fx.post.programs().contains(PassKind::ToneMap));
    }
    assert_eq!(fx.post.rebuild_count(), 4);
    // Luminance program created on frames 0 and 2 only
    let created = fx.programs_created.lock().unwrap().clone();
    assert_eq!(created.iter().filter(|name| name.as_str() == "postfx::luminance").count(), 2);
}

#[test]
fn test_dropping_every_effect_goes_back_to_copy() {
    let mut fx = Fixture::new();
    fx.post.add_fxaa(2);
    fx.render();

    let (plan, commands) = fx.render();
    assert_eq!(plan, FramePlan::Rebuild);
    assert_eq!(commands.draw_count(), 0);
    assert_eq!(commands.blits()[0].0, texture_address(fx.scene_color.as_ref()));
    assert!(fx.post.programs().is_empty());

    assert_eq!(fx.render().0, FramePlan::Idle);
}

#[test]
fn test_lens_flare_compares_by_texture_identity() {
    let mut fx = Fixture::new();
    let flare = mock_texture(64, 64, TextureFormat::R8G8B8A8_UNORM);
    let other = mock_texture(64, 64, TextureFormat::R8G8B8A8_UNORM);

    fx.post.add_lens_flare(Arc::clone(&flare));
    assert_eq!(fx.render().0, FramePlan::Rebuild);
    fx.post.add_lens_flare(Arc::clone(&flare));
    assert_eq!(fx.render().0, FramePlan::Reuse);
    fx.post.add_lens_flare(other);
    assert_eq!(fx.render().0, FramePlan::Rebuild);
}

#[test]
fn test_duplicate_registration_is_ignored() {
    let mut fx = Fixture::new();
    assert!(fx.post.add_fxaa(3));
    assert!(!fx.post.add_fxaa(3));
    assert!(fx.post.add_fxaa(4));
    fx.render();
    assert_eq!(fx.post.orchestrator().current().len(), 2);
    assert_eq!(fx.post.orchestrator().arena().len(), 1);
}

#[test]
fn test_render_traced_ends_with_terminal_release() {
    let mut fx = Fixture::new();
    fx.post.add_bloom(0.5, 1.0, 2.0);

    let frame = fx.frame_input();
    let mut commands = MockCommandList::new();
    let mut trace = Vec::new();
    fx.post.render_traced(&frame, &mut commands, &mut trace).unwrap();

    let composite = PassId::from_index(2);
    assert_eq!(
        &trace[trace.len() - 2..],
        &[ExecutionEvent::Finalized(composite), ExecutionEvent::Released(composite)]
    );
}

// ============================================================================
// Tests: Errors
// ============================================================================

#[test]
fn test_motion_blur_without_depth_fails_then_recovers() {
    let mut fx = Fixture::new();
    let frame = FrameInput::new(Arc::clone(&fx.scene_color), Arc::clone(&fx.destination));

    fx.post.add_static_motion_blur(Mat4::IDENTITY, Mat4::IDENTITY);
    let mut commands = MockCommandList::new();
    let result = fx.post.render(&frame, &mut commands);
    assert!(matches!(result, Err(Error::InvalidResource(_))));

    fx.post.add_static_motion_blur(Mat4::IDENTITY, Mat4::IDENTITY);
    let (plan, commands) = fx.render();
    assert_eq!(plan, FramePlan::Reuse);
    assert_eq!(commands.pass_labels(), vec!["motion_blur#0"]);
    assert_eq!(fx.post.pool().loaned_count(), 0);
}

#[test]
fn test_poisoned_device_lock_discards_requests() {
    let device: Arc<Mutex<dyn GraphicsDevice>> = Arc::new(Mutex::new(MockGraphicsDevice::new()));
    let mut post = PostProcessor::new(Arc::clone(&device), PostProcessConfig::default());

    let poisoner = Arc::clone(&device);
    let _ = std::thread::spawn(move || {
        let _guard = poisoner.lock().unwrap();
        panic!("poison the device lock");
    })
    .join();

    let scene = mock_texture(64, 64, TextureFormat::R16G16B16A16_SFLOAT);
    let frame = FrameInput::new(Arc::clone(&scene), scene);
    post.add_bloom(0.5, 1.0, 2.0);
    let mut commands = MockCommandList::new();
    assert!(matches!(post.render(&frame, &mut commands), Err(Error::BackendError(_))));
    assert!(post.orchestrator().pending().is_empty());
    assert!(commands.commands.is_empty());
}

#[test]
fn test_render_after_shutdown_discards_requests() {
    let mut fx = Fixture::new();
    fx.post.shutdown();
    fx.post.add_fxaa(3);

    let frame = fx.frame_input();
    let mut commands = MockCommandList::new();
    assert!(fx.post.render(&frame, &mut commands).is_err());
    assert!(fx.post.orchestrator().pending().is_empty());
}

// ============================================================================
// Tests: Shutdown
// ============================================================================

#[test]
fn test_shutdown_releases_everything_and_is_idempotent() {
    let mut fx = Fixture::new();
    fx.post.add_bloom(0.5, 1.0, 2.0);
    fx.post.add_hdr(true, 1.0, 2.2);
    fx.render();
    assert!(fx.post.pool().total_count() > 0);

    fx.post.shutdown();
    assert!(fx.post.is_shut_down());
    assert_eq!(fx.post.pool().total_count(), 0);
    assert!(fx.post.programs().is_empty());
    assert!(fx.post.orchestrator().arena().is_empty());

    fx.post.shutdown();
    assert!(fx.post.is_shut_down());

    let frame = fx.frame_input();
    let mut commands = MockCommandList::new();
    assert!(fx.post.render(&frame, &mut commands).is_err());
    assert!(commands.commands.is_empty());
}

#[test]
fn test_shutdown_without_any_frame() {
    let mut fx = Fixture::new();
    fx.post.shutdown();
    assert!(fx.post.is_shut_down());
    assert_eq!(fx.wait_idle_calls(), 1);
}
