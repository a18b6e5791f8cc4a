// THEORY:
// This file is the main entry point for the `crimson_vision` library crate.
// It follows the standard Rust convention of using `lib.rs` to define the public
// API that will be exposed to external consumers (camera front-ends, demo
// runners, test harnesses).
//
// The primary goal is to export the `ScannerPipeline` and its associated data
// structures (`ScannerConfig`, `FrameReport`, etc.) as the clean, high-level
// interface for the entire detection engine. The per-stage building blocks
// (`core_modules`) are available for advanced use, but the expected entry
// point for almost every consumer is the pipeline facade, optionally driven
// by a `ScannerSession` over a `FrameSource`.

pub mod asset_cache;
pub mod camera;
pub mod core_modules;
pub mod export;
pub mod pipeline;
pub mod session;
