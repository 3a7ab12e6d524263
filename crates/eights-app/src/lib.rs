pub mod config;
pub mod console;
pub mod driver;
pub mod logging;
pub mod simulate;
