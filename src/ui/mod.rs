pub mod controls;
pub mod view;

pub use controls::PlayerControls;
pub use view::PlayerView;
