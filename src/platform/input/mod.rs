// Keyboard input for the session: quit, and continue/finish at milestones

pub mod terminal;

pub use terminal::{spawn_key_reader, spawn_stdin_keys};
