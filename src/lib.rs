//! Library entry point.
//!
//! A fixed-step 2D arena simulation: units chase, collide, trade damage and die; the
//! player clears levels by reaching their exit. Drawing, audio and asset decoding go
//! through host-side backend traits, so the whole simulation runs headless.
//!
//! Integration tests in `tests/` are compiled as separate crates and use this API.

pub mod common;
pub mod game;
pub mod plugins;
