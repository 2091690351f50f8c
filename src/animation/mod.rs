//! Metric Animation
//!
//! Time-based linear interpolation of the numbers shown in metric elements.
//!
//! ## Architecture
//!
//! - **FrameClock**: yields one instant per animation frame
//! - **AnimationState**: start/end values and timing for one animation
//! - **Animator**: spawns one frame loop per `animate` call
//!
//! Two animations on the same element race by default, last write per
//! frame wins. [`AnimationMode::Supersede`] stops the older one instead.

mod animator;
mod clock;

pub use animator::{
    parse_display_value, AnimationConfig, AnimationHandle, AnimationMode, AnimationOutcome,
    AnimationState, Animator,
};
pub use clock::{FrameClock, TickerClock};
