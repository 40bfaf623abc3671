//! HTTP API handlers for duet-gm

pub mod health;
pub mod memory;
pub mod prompts;
pub mod quiz;
pub mod truth_or_dare;

pub use health::health_routes;
pub use memory::memory_routes;
pub use prompts::prompt_routes;
pub use quiz::quiz_routes;
pub use truth_or_dare::truth_or_dare_routes;
