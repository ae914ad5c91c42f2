//! Helper utilities for feeding decoders in tests.

pub mod chunking;
pub mod drive;
pub mod strategies;
