// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Tests assert on known-good fixtures
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Multi-source camera shake synthesis.
//!
//! Quake blends any number of concurrently playing shake sources into a
//! single positional offset per query point. Each source owns a temporal
//! envelope (fade-in, sustain, fade-out, optional looping), a per-axis
//! scale and a noise seed; its contribution falls off with the squared
//! distance to the query point.
//!
//! # Key entry points
//!
//! - [`shake::ShakeRegistry`] - owns sources, ticks them, samples the sum
//! - [`shake::ShakeParams`] - construction options with terse defaults
//! - [`shake::ShakeSource`] - the per-source envelope and noise state
//! - [`options::ShakeOptions`] - TOML-backed registry settings and presets
//!
//! # Frame loop
//!
//! The host calls [`shake::ShakeRegistry::tick`] once per simulation step,
//! then any number of [`shake::ShakeRegistry::sample_at`] queries. Applying
//! the offset to a camera transform is left to the host.

pub mod error;
pub mod options;
pub mod shake;
