// SimHist - lib.rs
//
// Library entry point, exposing every module for integration testing and
// for use from other tools. The CLI lives in `main.rs`.

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;
