// Adapters layer: concrete log targets and the HTTP transport.

pub mod file_sink;
pub mod http;
pub mod memory_sink;
