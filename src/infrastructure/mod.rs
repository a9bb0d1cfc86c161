pub mod config;
pub mod playback;
pub mod repositories;
pub mod speech;
pub mod system;
