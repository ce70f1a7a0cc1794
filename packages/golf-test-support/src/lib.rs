//! Shared test utilities for the golf workspace.
//!
//! Integration tests install logging through [`logging::init`], usually from a
//! `#[ctor::ctor]` hook in `tests/common/mod.rs`.

pub mod logging;
