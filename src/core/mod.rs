// SimHist - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: ui, platform, app. Discovery is the one module that
// reads directory metadata (via walkdir); nothing here reads file contents.

pub mod collection;
pub mod discovery;
pub mod export;
pub mod extract;
pub mod histogram;
pub mod model;
