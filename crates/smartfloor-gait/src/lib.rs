//! # Smartfloor-Gait
//!
//! Gait event detection and cycle similarity for smartfloor recordings.
//!
//! Consumes the denoised pressure grid of a
//! [`smartfloor_grid::FloorRecording`] and derives, in order:
//!
//! 1. **Center of pressure**: weighted centroid and total load per frame
//!    ([`cop`]).
//! 2. **Kinematics**: COP velocity, acceleration, and jerk by finite
//!    differencing with smoothing ([`cop::derivative`]).
//! 3. **Events**: quasi-static anchors and weight shifts from local extrema
//!    of the speed series ([`events`]).
//! 4. **Footsteps**: validated anchors labeled left/right by the turning
//!    sign of consecutive step vectors ([`classify`]).
//! 5. **Cycles**: lead-foot footstep triplets re-expressed in walking-line
//!    (mediolateral/anteroposterior) coordinates ([`cycles`]).
//! 6. **Features**: phase-resampled, cycle-normalized motion vectors with
//!    exact nearest-neighbor search over batches ([`features`], [`batch`]).
//!
//! [`analysis::GaitAnalysis`] ties the stages together with per-recording
//! memoization.
//!
//! ## Example
//!
//! ```ignore
//! use smartfloor_gait::{GaitAnalysis, GaitConfig, GaitCycleBatch};
//!
//! let analysis = GaitAnalysis::new(recording, GaitConfig::new(5.0));
//! for step in analysis.footsteps() {
//!     println!("{:?} foot at ({:.1}, {:.1})", step.foot, step.position.x, step.position.y);
//! }
//!
//! let references = GaitCycleBatch::from_analyses(&reference_analyses);
//! let neighbors = references.nearest(&analysis.cycles()[0], 5)?;
//! ```

pub mod analysis;
pub mod batch;
pub mod classify;
pub mod cop;
pub mod cycles;
pub mod events;
pub mod features;

pub use analysis::*;
pub use batch::*;
pub use classify::*;
pub use cop::*;
pub use cycles::*;
pub use events::*;
pub use features::*;
