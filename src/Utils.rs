//! different utility modules used throughout the project
/// terminal logging setup (simplelog)
pub mod logger;
/// engine settings read from TOML
pub mod settings;
