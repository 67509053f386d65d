//! Application shell: screen state, session, and the async plumbing that
//! connects the weather and account crates to a single UI thread.

pub mod app;
pub mod app_services;
pub mod banner;
pub mod drawer;
pub mod error_mapping;
pub mod navigation;
pub mod services;

pub use app::{AppSnapshot, BannerView, DrawerView, WeatherApp, WeatherView};
pub use app_services::{weather_units, AppServices};
pub use banner::WelcomeBanner;
pub use drawer::Drawer;
pub use navigation::{NavEvent, Screen};
