//! Reference collision world.
//!
//! Static geometry backed by parry3d shapes, filtered by [`LayerMask`].
//!
//! # Key Types
//!
//! - [`CollisionWorld`]: the static geometry and every query against it
//! - [`TraceResult`]: output of sweeping a shape along a segment
//! - [`TraceShape`]: shape used for sweeps and overlap tests
//! - [`SlideSettings`]: tuning for sweep-and-slide resolution
//!
//! Sweeps sample the path every half radius (at least 2 cm) and refine the
//! first blocked interval by bisection. Geometry thicker than the sample
//! spacing is never skipped. Sweeps long enough to hit the sample cap
//! (512) space their samples wider and can miss thinner geometry.

mod layers;
mod slide;
mod trace;
mod world;

pub use layers::LayerMask;
pub use slide::{clip_displacement, slide_move, step_slide_move, SlideResult, SlideSettings};
pub use trace::{SphereHit, TraceResult, TraceShape};
pub use world::{CollisionWorld, CONTACT_SKIN};
