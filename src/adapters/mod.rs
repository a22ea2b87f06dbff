// Adapters layer: concrete implementations for external systems (http, report sinks).

pub mod http;
pub mod sink;
