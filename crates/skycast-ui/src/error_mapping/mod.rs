//! Maps service errors to skycast_core::AppError for consistent user-facing messages.
//! Each service has its own module to keep mappings small and readable.

use skycast_core::AppError;

mod history;
mod weather;

/// Conversion into the application error hierarchy.
///
/// A local trait rather than `From`, since both sides of each mapping live in
/// other crates.
pub trait IntoAppError {
    fn into_app_error(self) -> AppError;
}
