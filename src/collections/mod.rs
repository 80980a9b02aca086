//! Generic container utilities
//!
//! - [`RingBuffer`] - fixed-capacity circular history with
//!   overwrite-on-overflow semantics.
//! - [`StructuralDict`] - key-value store keyed by the structural (deep)
//!   equality of the key rather than instance identity.

pub use dict::StructuralDict;
pub use ring::RingBuffer;

mod dict;
mod ring;
