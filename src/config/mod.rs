mod app_config;

pub use app_config::{AppConfig, CacheConfig, FanOutConfig, LogFormat, LoggingConfig};
