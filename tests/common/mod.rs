//! Common test utilities for scatterfield.
//!
//! This module provides shared float assertions and deterministic point-set generators.

#![allow(dead_code)]

pub mod assertions;
pub mod test_data;
