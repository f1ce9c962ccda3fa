use egui::{pos2, Key, Rect};
use std::time::{Duration, Instant};
use video_overlay::overlay::DOUBLE_CLICK_WINDOW;
use video_overlay::{
    ControlAction, ControllerSignal, InputEvent, OverlayConfig, OverlayPlayer, PlayerError,
    ScriptedElement, ScriptedHandle,
};

const SECOND: Duration = Duration::from_secs(1);

fn bounds() -> Rect {
    Rect::from_min_max(pos2(0.0, 0.0), pos2(800.0, 500.0))
}

fn player(duration: f64) -> (OverlayPlayer<ScriptedElement>, ScriptedHandle) {
    let element = ScriptedElement::new(duration);
    let handle = element.handle();
    let mut player = OverlayPlayer::new(OverlayConfig::default());
    player.attach(element);
    player.set_bounds(bounds());
    (player, handle)
}

/// Start playback and move the pointer away so only the timer keeps controls up
fn playing_with_pointer_outside(start: Instant) -> (OverlayPlayer<ScriptedElement>, ScriptedHandle) {
    let (mut player, handle) = player(600.0);
    player.apply(ControlAction::Play, start).unwrap();
    player
        .handle_input(InputEvent::PointerMoved(pos2(900.0, 900.0)), start)
        .unwrap();
    assert!(player.tick(start));
    assert!(player.controller().is_playing());
    (player, handle)
}

#[test]
fn controls_hide_after_idle_while_playing() {
    let start = Instant::now();
    let (mut player, _handle) = playing_with_pointer_outside(start);

    assert!(player.tick(start + 2 * SECOND));
    assert!(!player.tick(start + 3 * SECOND));
}

#[test]
fn activity_debounces_the_hide() {
    let start = Instant::now();
    let (mut player, _handle) = playing_with_pointer_outside(start);

    player
        .handle_input(InputEvent::PointerMoved(pos2(100.0, 100.0)), start + 2 * SECOND)
        .unwrap();
    player
        .handle_input(InputEvent::PointerMoved(pos2(900.0, 100.0)), start + 2 * SECOND)
        .unwrap();

    assert!(player.tick(start + 4 * SECOND));
    assert!(!player.tick(start + 5 * SECOND));
}

#[test]
fn paused_playback_keeps_controls() {
    let start = Instant::now();
    let (mut player, _handle) = playing_with_pointer_outside(start);

    player.apply(ControlAction::Pause, start).unwrap();

    assert!(player.tick(start + 10 * SECOND));
    assert!(!player.controller().is_playing());
}

#[test]
fn pointer_inside_keeps_controls() {
    let start = Instant::now();
    let (mut player, _handle) = playing_with_pointer_outside(start);

    player
        .handle_input(InputEvent::PointerMoved(pos2(400.0, 250.0)), start)
        .unwrap();

    assert!(player.tick(start + 10 * SECOND));
    assert!(player.is_pointer_inside());

    player.handle_input(InputEvent::PointerLeft, start + 10 * SECOND).unwrap();
    assert!(!player.is_pointer_inside());
}

#[test]
fn resizing_changes_the_hit_test() {
    let (mut player, _handle) = player(60.0);
    let start = Instant::now();

    player
        .handle_input(InputEvent::PointerMoved(pos2(1000.0, 100.0)), start)
        .unwrap();
    assert!(!player.is_pointer_inside());

    player.set_bounds(Rect::from_min_max(pos2(0.0, 0.0), pos2(1200.0, 700.0)));
    assert!(player.is_pointer_inside());
}

#[test]
fn shortcuts_drive_the_controller() {
    let start = Instant::now();
    let (mut player, handle) = player(100.0);

    player.handle_input(InputEvent::KeyPressed(Key::Space), start).unwrap();
    player.tick(start);
    assert!(player.controller().is_playing());

    player.handle_input(InputEvent::KeyPressed(Key::ArrowRight), start).unwrap();
    assert_eq!(handle.current_time(), 2.0);

    player.handle_input(InputEvent::KeyPressed(Key::ArrowLeft), start).unwrap();
    player.handle_input(InputEvent::KeyPressed(Key::ArrowLeft), start).unwrap();
    assert_eq!(handle.current_time(), 0.0);

    player.handle_input(InputEvent::KeyPressed(Key::M), start).unwrap();
    player.tick(start);
    assert!(player.controller().is_muted());

    player.handle_input(InputEvent::KeyPressed(Key::F), start).unwrap();
    player.tick(start);
    assert!(player.controller().is_fullscreen());
}

#[test]
fn denied_fullscreen_reaches_the_presentation_layer() {
    let start = Instant::now();
    let (mut player, handle) = player(100.0);
    handle.set_fullscreen_supported(false);

    let result = player.handle_input(InputEvent::KeyPressed(Key::F), start);

    assert!(matches!(result, Err(PlayerError::FullscreenDenied)));
    assert_eq!(
        player.controller_mut().take_signal(),
        Some(ControllerSignal::FullscreenDenied)
    );
}

#[test]
fn position_follows_the_element() {
    let start = Instant::now();
    let (mut player, handle) = player(3700.0);
    player.apply(ControlAction::Play, start).unwrap();

    handle.advance(Duration::from_secs(65));
    player.tick(start);
    assert_eq!(player.controller().formatted_current_time(), "1:05");

    player.apply(ControlAction::Seek(100.0), start).unwrap();
    player.apply(ControlAction::SkipBackward(39.0), start).unwrap();
    player.tick(start);
    assert_eq!(player.controller().formatted_current_time(), "1:1:01");
    assert_eq!(player.controller().formatted_duration(), "1:1:40");
}

#[test]
fn playback_rate_from_menu() {
    let start = Instant::now();
    let (mut player, handle) = player(100.0);

    player.apply(ControlAction::SetPlaybackRate(1.75), start).unwrap();
    player.tick(start);

    assert_eq!(player.controller().playback_rate(), 1.75);
    assert_eq!(handle.playback_rate(), 1.75);
}

#[test]
fn players_are_independent() {
    let start = Instant::now();
    let (mut left, left_handle) = player(100.0);
    let (mut right, right_handle) = player(100.0);
    right.set_bounds(Rect::from_min_max(pos2(800.0, 0.0), pos2(1600.0, 500.0)));

    left.handle_input(InputEvent::KeyPressed(Key::Space), start).unwrap();
    left.tick(start);
    right.tick(start);

    assert!(left.controller().is_playing());
    assert!(!right.controller().is_playing());
    assert!(left_handle.is_running());
    assert!(!right_handle.is_running());

    let pointer = InputEvent::PointerMoved(pos2(1000.0, 100.0));
    left.handle_input(pointer, start).unwrap();
    right.handle_input(pointer, start).unwrap();
    assert!(!left.is_pointer_inside());
    assert!(right.is_pointer_inside());
}

#[test]
fn detach_cancels_pending_hide() {
    let start = Instant::now();
    let (mut player, _handle) = playing_with_pointer_outside(start);
    player.apply(ControlAction::SkipForward(1.0), start).unwrap();
    assert!(player.visibility().is_pending());

    let element = player.detach();

    assert!(element.is_some());
    assert!(!player.visibility().is_pending());
    assert!(!player.controller().is_attached());
}

#[test]
fn config_values_reach_the_player() {
    let start = Instant::now();
    let config = OverlayConfig {
        hide_delay_ms: 1000,
        key_skip_seconds: 5.0,
        initial_volume: 30.0,
        ..Default::default()
    };
    let element = ScriptedElement::new(100.0);
    let handle = element.handle();
    let mut player = OverlayPlayer::new(config);
    player.attach(element);
    player.set_bounds(bounds());

    assert!((handle.volume() - 0.3).abs() < 1e-6);

    player.handle_input(InputEvent::KeyPressed(Key::ArrowRight), start).unwrap();
    assert_eq!(handle.current_time(), 5.0);

    player.apply(ControlAction::Play, start).unwrap();
    assert!(player.tick(start + Duration::from_millis(900)));
    assert!(!player.tick(start + Duration::from_millis(1000)));
}

#[test]
fn surface_click_toggles_after_double_click_window() {
    let start = Instant::now();
    let (mut player, handle) = player(100.0);

    player.surface_clicked(start);
    player.tick(start + Duration::from_millis(100));
    assert!(!player.controller().is_playing());
    assert!(player.pending_click_remaining(start + Duration::from_millis(100)).is_some());

    player.tick(start + DOUBLE_CLICK_WINDOW);
    assert!(player.controller().is_playing());
    assert!(handle.is_running());
    assert_eq!(player.pending_click_remaining(start + DOUBLE_CLICK_WINDOW), None);
}

#[test]
fn double_click_toggles_fullscreen_without_changing_playback() {
    let start = Instant::now();
    let (mut player, handle) = player(100.0);

    // egui reports the first click of a double click as a click too
    player.surface_clicked(start);
    player.tick(start + Duration::from_millis(50));
    player
        .surface_double_clicked(start + Duration::from_millis(150))
        .unwrap();
    player.tick(start + 2 * DOUBLE_CLICK_WINDOW);

    assert!(player.controller().is_fullscreen());
    assert!(!player.controller().is_playing());
    assert!(!handle.is_running());
}
