pub mod app;
pub mod cache;
pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod report;
pub mod source;
pub mod state;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use source::daily_source;
pub use state::AppState;
