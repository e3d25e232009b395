//! Core domain primitives shared by every module

pub mod error;
pub mod model;
pub mod validation;
