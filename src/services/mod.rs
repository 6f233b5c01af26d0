pub mod cli_runner;
pub mod cli_store;
pub mod loader;
pub mod memory_store;
pub mod store;
