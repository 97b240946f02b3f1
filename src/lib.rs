//! Cover-fit background layout: scale an image until it fills a viewport,
//! bias it with an offset, and track image swaps with fade-in and cleanup.
//!
//! Pure geometry plus a host-driven state machine. No DOM, no timers,
//! `no_std` compatible.
//!
//! # Modules
//!
//! - [`cover`]: Cover-fit geometry: scale, offset bias, validation
//! - [`stretch`]: Caller-owned lifecycle state: settings merging, image ids, fade/retire
//! - `query`: `key=value` option strings (feature `query`)
//! - `svg`: Diagram of a computed layout (feature `svg`)

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod cover;
pub mod stretch;

#[cfg(feature = "query")]
pub mod query;
#[cfg(feature = "svg")]
pub mod svg;

// Re-exports: core types from cover module
pub use cover::{
    Axis, CoverError, CoverFit, Dimension, NaturalSize, Offset, RenderLayout, Size, ViewportSize,
    compute_layout,
};
pub use stretch::{
    FadeSpeed, ImageId, LoadOutcome, StretchError, StretchOptions, StretchSettings, Stretcher,
    Target,
};
