//! Capability traits and their implementations for std / faer types.

pub mod traits;
pub mod wrappers;

pub use traits::{HostScalar, Indexing, InnerProduct, KrylovVector, MatVec};
