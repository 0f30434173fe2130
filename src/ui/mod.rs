// SimHist - ui/mod.rs
//
// Presentation layer: renders core results for the terminal.
// Dependencies: core.

pub mod chart;
