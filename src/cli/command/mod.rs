pub mod areas;
pub mod forecasts;
pub mod show;
pub mod view;

pub use areas::areas;
pub use forecasts::{forecasts, sync};
pub use show::{show, weekly};
pub use view::view;
