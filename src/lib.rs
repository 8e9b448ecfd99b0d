pub mod config;
pub mod filewatcher;
pub mod js;
