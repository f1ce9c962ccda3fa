use crate::config::OverlayConfig;
use crate::controller::{ControlAction, PlaybackController};
use crate::player::MediaElement;
use egui::{Align, Layout, Slider, Ui};

pub struct PlayerControls;

impl PlayerControls {
    /// Draw the controls bar, returns the actions the user triggered
    pub fn show<M: MediaElement>(
        ui: &mut Ui,
        controller: &PlaybackController<M>,
        config: &OverlayConfig,
    ) -> Vec<ControlAction> {
        let mut actions = Vec::new();

        // Seek bar, 0-100 scale
        let mut position = controller.seek_percentage();
        let bar_width = ui.available_width();
        ui.spacing_mut().slider_width = bar_width;
        if ui
            .add(
                Slider::new(&mut position, 0.0..=100.0)
                    .show_value(false)
                    .trailing_fill(true),
            )
            .changed()
        {
            actions.push(ControlAction::Seek(position));
        }

        ui.horizontal(|ui| {
            // Play/Pause button
            let play_pause_text = if controller.is_playing() { "⏸" } else { "▶" };
            if ui.button(play_pause_text).clicked() {
                actions.push(ControlAction::TogglePlayPause);
            }

            ui.label(format!(
                "{} / {}",
                controller.formatted_current_time(),
                controller.formatted_duration()
            ));

            ui.separator();

            // Volume control
            let mute_text = if controller.is_muted() { "🔇" } else { "🔊" };
            if ui.button(mute_text).clicked() {
                actions.push(ControlAction::ToggleMute);
            }

            let mut volume = controller.volume();
            ui.spacing_mut().slider_width = 80.0;
            if ui
                .add(Slider::new(&mut volume, 0.0..=100.0).show_value(false))
                .changed()
            {
                actions.push(ControlAction::SetVolume(volume));
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let fullscreen_text = if controller.is_fullscreen() { "🗗" } else { "⛶" };
                if ui
                    .button(fullscreen_text)
                    .on_hover_text("Toggle fullscreen (f, double-click video)")
                    .clicked()
                {
                    actions.push(ControlAction::ToggleFullscreen);
                }

                ui.menu_button("⚙", |ui| {
                    ui.menu_button("Playback Speed", |ui| {
                        for &rate in &config.playback_rates {
                            let selected = (controller.playback_rate() - rate).abs() < f32::EPSILON;
                            if ui.selectable_label(selected, format!("{}x", rate)).clicked() {
                                actions.push(ControlAction::SetPlaybackRate(rate));
                                ui.close_menu();
                            }
                        }
                    });
                });

                let skip = config.button_skip_seconds;
                if ui.button(format!("⏩ +{}s", skip)).clicked() {
                    actions.push(ControlAction::SkipForward(skip));
                }
                if ui.button(format!("-{}s ⏪", skip)).clicked() {
                    actions.push(ControlAction::SkipBackward(skip));
                }
            });
        });

        actions
    }
}
