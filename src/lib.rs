//! shotfx - screenshot effects
//!
//! Edge-preserving Scale2x upscaling and drop-shadow text annotations for
//! screenshots. Pixel access and the Scale2x filter live in the
//! `fast-bitmap` crate; this crate adds text rendering through resvg, the
//! effect chain, configuration and the CLI.
//! This library exposes modules for integration testing.

pub mod effects;
pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
