use egui::{Align2, Color32, Event, FontId, Rect, Response, Sense, Ui, Vec2};
use std::time::Instant;
use tracing::debug;

use super::controls::PlayerControls;
use crate::controller::ControlAction;
use crate::input::InputEvent;
use crate::overlay::OverlayPlayer;
use crate::player::MediaElement;

/// Height of the controls overlay at the bottom of the player
const CONTROLS_HEIGHT: f32 = 64.0;

/// Player surface with the auto-hiding controls drawn on top.
pub struct PlayerView;

impl PlayerView {
    /// Draw one player filling the available space. Input is taken from
    /// this frame's events and routed only to this player.
    pub fn show<M: MediaElement>(ui: &mut Ui, player: &mut OverlayPlayer<M>, title: &str) -> Response {
        let now = Instant::now();
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        player.set_bounds(rect);

        if response.clicked() {
            response.request_focus();
        }

        // Pointer first, so shortcuts see the updated hit-test
        let (pointer_events, keys) = ui.input(|i| {
            let mut pointer_events = Vec::new();
            let mut keys = Vec::new();
            for event in &i.events {
                match event {
                    Event::PointerMoved(pos) => pointer_events.push(InputEvent::PointerMoved(*pos)),
                    Event::PointerGone => pointer_events.push(InputEvent::PointerLeft),
                    Event::Key {
                        key, pressed: true, ..
                    } => keys.push(*key),
                    _ => {}
                }
            }
            (pointer_events, keys)
        });

        for event in pointer_events {
            dispatch(player, event, now);
        }
        if response.has_focus() || player.is_pointer_inside() {
            for key in keys {
                dispatch(player, InputEvent::KeyPressed(key), now);
            }
        }

        if response.double_clicked() {
            if let Err(e) = player.surface_double_clicked(now) {
                debug!("Double click failed: {}", e);
            }
        } else if response.clicked() {
            player.surface_clicked(now);
        }

        let visible = player.tick(now);
        paint_surface(ui, rect, player, title);

        let fade = player.config().fade_seconds;
        let opacity = ui
            .ctx()
            .animate_bool_with_time(response.id.with("controls_fade"), visible, fade);

        if opacity > 0.0 {
            let controls_rect = Rect::from_min_size(
                rect.left_bottom() - Vec2::new(0.0, CONTROLS_HEIGHT),
                Vec2::new(rect.width(), CONTROLS_HEIGHT),
            );

            let actions = ui
                .allocate_ui_at_rect(controls_rect.shrink2(Vec2::new(16.0, 4.0)), |ui| {
                    ui.set_opacity(opacity);
                    ui.painter().rect_filled(
                        controls_rect,
                        0.0,
                        Color32::from_rgba_unmultiplied(0, 0, 0, 160),
                    );
                    // Clicks on the bar must not reach the surface
                    let _ = ui.interact(controls_rect, response.id.with("controls_bar"), Sense::click());
                    PlayerControls::show(ui, player.controller(), player.config())
                })
                .inner;

            for action in actions {
                apply(player, action, now);
            }
        }

        if player.controller().is_playing() {
            ui.ctx().request_repaint();
        } else {
            let wake = [player.visibility().remaining(now), player.pending_click_remaining(now)]
                .into_iter()
                .flatten()
                .min();
            if let Some(remaining) = wake {
                ui.ctx().request_repaint_after(remaining);
            }
        }

        response
    }
}

fn dispatch<M: MediaElement>(player: &mut OverlayPlayer<M>, event: InputEvent, now: Instant) {
    if let Err(e) = player.handle_input(event, now) {
        debug!("Input {:?} failed: {}", event, e);
    }
}

fn apply<M: MediaElement>(player: &mut OverlayPlayer<M>, action: ControlAction, now: Instant) {
    if let Err(e) = player.apply(action, now) {
        debug!("Action {:?} failed: {}", action, e);
    }
}

fn paint_surface<M: MediaElement>(ui: &Ui, rect: Rect, player: &OverlayPlayer<M>, title: &str) {
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, Color32::BLACK);

    let controller = player.controller();
    let glyph = if controller.is_playing() { "⏸" } else { "▶" };
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        glyph,
        FontId::proportional(48.0),
        Color32::from_white_alpha(180),
    );
    painter.text(
        rect.left_top() + Vec2::new(16.0, 16.0),
        Align2::LEFT_TOP,
        title,
        FontId::proportional(16.0),
        Color32::from_white_alpha(200),
    );
    if controller.playback_rate() != 1.0 {
        painter.text(
            rect.right_top() + Vec2::new(-16.0, 16.0),
            Align2::RIGHT_TOP,
            format!("{}x", controller.playback_rate()),
            FontId::proportional(14.0),
            Color32::from_white_alpha(200),
        );
    }
}
