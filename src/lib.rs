//! Flavy - ffmpeg capability inspection tool
//!
//! This library crate exposes the binary's configuration layer for integration testing.

pub mod config;
