//! Maps domain errors to breeze_core::AppError for consistent user-facing messages.
//! Each domain has its own module to keep mappings small and readable.

mod auth;
mod weather;
