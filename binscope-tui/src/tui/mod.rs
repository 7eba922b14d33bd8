pub mod app;
pub mod console;
pub mod events;
pub mod theme;
pub mod ui;
