//! Scope computation: image statistics used by the automatic heuristics.

pub mod histogram;

pub use histogram::HistogramData;
