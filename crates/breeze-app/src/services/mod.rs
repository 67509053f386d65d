pub mod auth_service;
pub mod weather_service;

pub use auth_service::{request_submit as request_auth_submit, AuthServiceMessage};
pub use weather_service::{request_fetch as request_weather_fetch, WeatherServiceMessage};
