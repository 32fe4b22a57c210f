pub mod angle;
pub mod config;
pub mod debounce;
pub mod milestone;
pub mod overlay;
pub mod rep_counter;
pub mod session_manager;

// Frame loop tying capture, detection, counting and display together
pub mod frame_driver;
