// surtax-core/src/infrastructure/config/mod.rs

pub mod project;

pub use project::{ProjectConfig, find_main_config, load_project_config};
