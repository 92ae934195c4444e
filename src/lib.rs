//! bloco-planner core engine
//!
//! Same-day, three-stop route suggestions for street-festival blocks.

pub mod traits;
pub mod engine;
pub mod block;
pub mod distance;
pub mod dataset;
pub mod worker;
pub mod suggest;
