//! # thicket_core - Thicket Core
//!
//! Foundational primitives shared by every Thicket crate:
//! - **Handles**: generational indices so entities can be removed mid-tick
//!   without invalidating references to their neighbours
//! - **Randomness**: a replaceable random source, seeded for replays and tests
//! - **Errors**: the small set of failures that can cross a crate boundary

pub mod error;
pub mod handle;
pub mod random;

pub use error::*;
pub use handle::*;
pub use random::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{CoreError, Result};
    pub use crate::handle::{Handle, HandleAllocator, HandleMap};
    pub use crate::random::{RandomSource, SeededRandom};
}
