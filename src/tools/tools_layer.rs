#[path = "tool_catalog.rs"]
pub mod tool_catalog;

#[path = "dispatcher.rs"]
pub mod dispatcher;

#[path = "stdio_host.rs"]
pub mod stdio_host;
