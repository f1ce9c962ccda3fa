use egui::{CentralPanel, Color32, TopBottomPanel};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{error, info};
use video_overlay::{
    ControllerSignal, MediaElement, OverlayConfig, OverlayPlayer, PlayerView, ScriptedElement,
    SinkElement,
};

/// How long transient notices stay on screen
const NOTICE_DURATION: Duration = Duration::from_secs(3);

/// Containers rodio decodes with its default features
const MEDIA_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "ogg"];

pub struct OverlayApp {
    player: OverlayPlayer<Box<dyn MediaElement>>,
    config: OverlayConfig,
    title: String,
    error_message: Option<String>,
    notice: Option<(String, Instant)>,
}

impl OverlayApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: OverlayConfig,
        media: Option<PathBuf>,
        demo_seconds: Option<f64>,
    ) -> Self {
        let mut app = Self {
            player: OverlayPlayer::new(config.clone()),
            config,
            title: String::new(),
            error_message: None,
            notice: None,
        };

        if let Some(path) = media {
            app.load_file(&path, &cc.egui_ctx);
        } else if let Some(seconds) = demo_seconds {
            app.load_demo(seconds);
        }

        app
    }

    fn open_file(&mut self, ctx: &egui::Context) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Media", MEDIA_EXTENSIONS)
            .pick_file()
        {
            self.load_file(&path, ctx);
        }
    }

    fn load_file(&mut self, path: &Path, ctx: &egui::Context) {
        self.error_message = None;
        match SinkElement::open(path, ctx.clone()) {
            Ok(element) => {
                let element = element.with_looping(self.config.loop_playback);
                self.attach(Box::new(element), display_name(path));
            }
            Err(e) => {
                error!("Failed to open {:?}: {}", path, e);
                self.error_message = Some(format!("Failed to open media: {}", e));
            }
        }
    }

    fn load_demo(&mut self, seconds: f64) {
        self.error_message = None;
        let element = ScriptedElement::new(seconds).with_looping(self.config.loop_playback);
        self.attach(Box::new(element), format!("Demo clip ({}s)", seconds));
    }

    fn attach(&mut self, element: Box<dyn MediaElement>, title: String) {
        self.player.detach();
        info!("Playing {}", title);
        self.player.attach(element);
        self.title = title;
    }

    fn handle_signals(&mut self) {
        while let Some(signal) = self.player.controller_mut().take_signal() {
            match signal {
                ControllerSignal::FullscreenDenied => {
                    self.notice = Some(("Fullscreen is not available".to_owned(), Instant::now()));
                }
            }
        }
        if let Some((_, shown_at)) = &self.notice {
            if shown_at.elapsed() >= NOTICE_DURATION {
                self.notice = None;
            }
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl eframe::App for OverlayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Menu bar
        if !self.player.controller().is_fullscreen() {
            TopBottomPanel::top("menu_bar").show(ctx, |ui| {
                egui::menu::bar(ui, |ui| {
                    ui.menu_button("File", |ui| {
                        if ui.button("Open...").clicked() {
                            ui.close_menu();
                            self.open_file(ctx);
                        }
                        if ui.button("Demo clip").clicked() {
                            ui.close_menu();
                            self.load_demo(90.0);
                        }
                        if ui.button("Quit").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
            });
        }

        if let Some((notice, _)) = &self.notice {
            TopBottomPanel::bottom("notice").show(ctx, |ui| {
                ui.colored_label(Color32::YELLOW, notice.as_str());
            });
            ctx.request_repaint_after(NOTICE_DURATION);
        }

        CentralPanel::default().show(ctx, |ui| {
            if self.player.controller().is_attached() {
                PlayerView::show(ui, &mut self.player, &self.title);
            } else {
                // No media loaded - show drop zone / open button
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(ui.available_height() / 3.0);

                        if let Some(ref err) = self.error_message {
                            ui.colored_label(Color32::RED, err);
                            ui.add_space(20.0);
                        }

                        ui.heading("No media loaded");
                        ui.add_space(10.0);

                        if ui.button("Open Media File...").clicked() {
                            self.open_file(ctx);
                        }
                        if ui.button("Play Demo Clip").clicked() {
                            self.load_demo(90.0);
                        }

                        ui.add_space(10.0);
                        ui.label("Or drag and drop a media file");
                    });
                });
            }
        });

        self.handle_signals();

        // Handle file drops
        let dropped = ctx.input(|i| i.raw.dropped_files.first().and_then(|f| f.path.clone()));
        if let Some(path) = dropped {
            self.load_file(&path, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialog_offers_only_decodable_containers() {
        for unsupported in ["mp4", "m4a", "mkv", "webm"] {
            assert!(!MEDIA_EXTENSIONS.contains(&unsupported), "{unsupported}");
        }
    }

    #[test]
    fn display_name_uses_file_name() {
        assert_eq!(display_name(Path::new("/clips/intro.ogg")), "intro.ogg");
    }
}
