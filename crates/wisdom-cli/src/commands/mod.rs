pub mod content;
pub mod journal;
pub mod journey;
pub mod settings;
pub mod watch;

mod render;
