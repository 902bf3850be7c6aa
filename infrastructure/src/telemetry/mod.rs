//! Telemetry sinks

mod jsonl;

pub use jsonl::JsonlTelemetrySink;
