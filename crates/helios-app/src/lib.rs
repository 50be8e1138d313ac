//! Helios application framework: platform directories, the frame loop and
//! the headless session driver.

pub mod game_loop;
pub mod platform;
pub mod session;
