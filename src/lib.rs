// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Documentation
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
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

//! GPU-accelerated 3D visualization of the Polymerase Chain Reaction.
//!
//! Pcrviz renders the three-phase PCR cycle (denaturation, annealing,
//! extension) as a looping animation over a fixed stage of procedurally
//! generated meshes: a DNA double helix, its two separated strands, two
//! primers, two polymerase enzymes, a free-nucleotide pool, and billboard
//! text labels.
//!
//! # Key entry points
//!
//! - [`engine::PcrRenderEngine`] - the rendering engine and frame driver
//! - [`animation::CycleState`] - pure elapsed-time → (cycle, step, progress)
//!   resolution
//! - [`stage::Stage`] - the registry of positionable, visibility-toggleable
//!   stage objects
//! - [`options::Options`] - runtime configuration (display, lighting,
//!   camera, colors)
//!
//! # Architecture
//!
//! All animation state lives in a single [`animation::AnimationClock`].
//! Every frame the engine ticks the clock, resolves the current
//! [`animation::CycleState`], and dispatches one step choreography that
//! imperatively sets visibility, position, and label state on the stage.
//! The renderer then rebuilds per-object instance buffers and draws a
//! single lit forward pass plus an alpha-blended billboard label pass.

pub mod animation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod stage;
pub mod ui;
pub mod util;
