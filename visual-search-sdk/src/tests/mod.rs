//! Unit tests for the Visual Search SDK
//!
//! This module contains tests for various components of the SDK.

pub mod support;

pub mod error_tests;
pub mod integration_tests;
