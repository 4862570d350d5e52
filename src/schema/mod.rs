pub mod command;
pub mod story;
pub mod theme;
