//! # Smartfloor-Grid
//!
//! Pressure grid reconstruction for the smartfloor sensor array.
//!
//! The floor is four capacitive boards, each 4x8 tiles, laid left to right
//! into a 16x8 grid. Every board samples its 48 sensors on an independent
//! clock and emits raw log rows of `(board id, timestamp, readings)`.
//!
//! ## Pipeline stages
//!
//! 1. **Assembly**: map each row's readings through the fixed sensor layout
//!    into per-board spatial arrays ([`board::BoardRecording`]).
//! 2. **Alignment**: intersect board time ranges and interpolate every tile
//!    onto one uniform axis ([`resample`]).
//! 3. **Denoising**: subtract the captured noise baseline and mask tiles
//!    far from the per-frame pressure peak ([`denoise::Denoiser`]).
//!
//! The product is a [`recording::FloorRecording`] owning the aligned and
//! denoised [`grid::PressureGrid`] that gait analysis consumes.

pub mod board;
pub mod denoise;
pub mod grid;
pub mod layout;
pub mod recording;
pub mod resample;

pub use board::*;
pub use denoise::*;
pub use grid::*;
pub use layout::*;
pub use recording::*;
pub use resample::*;
