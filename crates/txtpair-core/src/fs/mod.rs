//! File system primitives for txtpair.
//!
//! [`ops`] holds the single-file copy, move, link and delete operations used
//! by the host and by companion mirroring.

pub mod ops;
