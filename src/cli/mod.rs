pub mod holdings;
pub mod portfolio;
pub mod setup;
pub mod ui;
pub mod validate;
