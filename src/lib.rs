pub mod app;
pub mod directory;
