pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod input;
pub mod overlay;
pub mod player;
pub mod ui;
pub mod visibility;

pub use config::OverlayConfig;
pub use controller::{ControlAction, ControllerSignal, PlaybackController, PlaybackState, PlaybackStatus};
pub use error::{PlayerError, Result};
pub use input::{InputEvent, KeyBindings};
pub use overlay::OverlayPlayer;
pub use player::{MediaElement, MediaEvent, ScriptedElement, ScriptedHandle, SinkElement};
pub use ui::{PlayerControls, PlayerView};
pub use visibility::VisibilityTimer;
