pub mod command;
pub mod extract;
pub mod list;
pub mod progress;
