//! Debate protocol entities and signal extraction
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`signals`] | Control-tag extraction from free-form model output |
//! | [`turn`] | Per-turn record: speaker, content, timing, agreement flag |
//! | [`result`] | Terminal status set and the owned per-debate result |

pub mod result;
pub mod signals;
pub mod turn;

pub use result::{DebateResult, DebateStatus};
pub use signals::{extract_agreement, extract_final_answer};
pub use turn::{Speaker, Turn, approx_tokens};
