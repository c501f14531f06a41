pub mod app_services;
pub mod commands;
pub mod controller;
pub mod error_mapping;
pub mod events;
pub mod view;

pub use app_services::AppServices;
pub use commands::Command;
pub use controller::AppController;
pub use error_mapping::IntoAppError;
pub use events::{ClickEvent, Element, ElementRole, HistoryRow, Propagation};
pub use view::{TerminalView, View};
