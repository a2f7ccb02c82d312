// Copyright 2025 Irreducible Inc.

//! Block hash functions and extendable-output functions behind one reusable [`Hasher`]
//! interface.
//!
//! Every algorithm is a [`BlockCompressor`] driven by the shared [`BlockHasher`] engine, or an
//! [`ExtendableCompressor`] driven by [`XofHasher`]. Hashers are long-lived: a computation ends
//! with [`Hasher::transform_final`], which leaves the instance ready for the next one.

pub mod blake2;
pub mod block;
pub mod factory;
pub mod gost3411;
pub mod hasher;
pub mod haval;
mod padding;
pub mod sha0;
pub mod sha2;
pub mod sha3;
pub mod tiger;
mod variant;
pub mod writer;
pub mod xof;

pub use block::{BlockCompressor, BlockHasher};
pub use hasher::*;
pub use writer::HashWriter;
pub use xof::{ExtendableCompressor, XofHasher, XofState};
