pub mod catalog;
pub mod game;
pub mod history;
pub mod session;
pub mod template;
pub mod words;
