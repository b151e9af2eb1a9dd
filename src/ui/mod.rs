//! Frame driver: [`Ui`], its config, command queue, timers, and windows.

pub mod commands;
pub mod config;
pub mod driver;
pub mod timer;
pub mod window;

pub use commands::Commands;
pub use config::UiConfig;
pub use driver::Ui;
pub use timer::TimerHandle;
pub use window::{Window, WindowId};
