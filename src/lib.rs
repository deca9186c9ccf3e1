//! # Bonemix
//!
//! Per-bone key-frame sampling and two-clip crossfade blending for skeletal
//! animation.
//!
//! This umbrella crate re-exports the member crates:
//!
//! - [`animation`]: sequences, binders, blenders and the skeleton animator
//! - [`errors`] and [`interner`] from the core crate
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bonemix::prelude::*;
//!
//! let walk = Arc::new(AnimationSequence::from_desc(loader_output)?);
//!
//! let mut animator = SkeletonAnimator::new(["hip", "knee", "foot"]);
//! let walk = animator.add_clip(walk);
//! animator.play(walk, &PlaybackSettings::crossfade(0.25))?;
//!
//! // Once per frame
//! let local_pose: &[Mat4] = animator.update(dt)?;
//! ```

pub use bonemix_animation as animation;
pub use bonemix_core::{errors, interner};
pub use glam;

pub use bonemix_animation::{
    AnimationBinder, AnimationBlender, AnimationSequence, AnimationSequenceDesc, ClipKey,
    KeyFrame, KeyFrameIndex, KeyFrameSequence, KeyFrameSequenceDesc, PlayMode,
    PlaybackSettings, SkeletonAnimator,
};
pub use bonemix_core::{BonemixError, Result};

pub mod prelude {
    pub use crate::{
        AnimationBinder, AnimationBlender, AnimationSequence, AnimationSequenceDesc,
        BonemixError, ClipKey, KeyFrame, KeyFrameSequence, KeyFrameSequenceDesc, PlayMode,
        PlaybackSettings, SkeletonAnimator,
    };
    pub use glam::{Mat4, Quat, Vec3};
}
