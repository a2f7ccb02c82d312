// Copyright 2025 Irreducible Inc.

pub mod bytes;
pub mod env;
pub mod error_utils;
pub mod tracing;
