pub mod app;
pub mod calc;
pub mod normalize;
pub mod portfolio;
pub mod refresh;
pub mod report;
pub mod ui;
pub mod utils;

pub use app::App;
pub use portfolio::Portfolio;
pub use refresh::RefreshPolicy;
