//! Platform abstraction layer
//!
//! The simulation core is platform-free; these seams are what an embedder
//! supplies:
//! - Time: a [`Clock`] yielding per-frame elapsed deltas
//! - Storage: a key-value [`Storage`] capability for the best-level record

pub mod storage;
pub mod time;

pub use storage::{BestLevel, JsonFileStorage, MemoryStorage, Storage};
pub use time::{Clock, ManualClock, SystemClock};
