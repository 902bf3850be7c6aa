//! Ports: interfaces the application layer depends on.
//!
//! Implementations (adapters) live in the infrastructure and presentation
//! layers and are injected at wiring time; the orchestrator never knows
//! which backend is on the other side.

pub mod model_client;
pub mod progress;
pub mod prompts;
pub mod telemetry;
