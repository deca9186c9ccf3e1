//! Bonemix Animation
//!
//! Skeletal key-frame playback with two-clip crossfading.
//!
//! # Data flow
//!
//! ```text
//! loader ──► AnimationSequenceDesc ──► AnimationSequence (shared, immutable)
//!                                             │ one KeyFrameSequence per bone
//!                                             ▼
//!            SkeletonAnimator ──► AnimationBlender (per bone)
//!                                   ├─ AnimationBinder (outgoing clip)
//!                                   └─ AnimationBinder (incoming clip)
//!                                             │ every frame
//!                                             ▼
//!                                      local pose (Mat4)
//! ```
//!
//! Clip data is read-only after loading and is shared through `Arc`; all
//! mutable playback state lives in binders and blenders, each of which is
//! owned by exactly one bone.

pub mod animator;
pub mod binder;
pub mod blender;
pub mod clip;
pub mod desc;
pub mod mode;
pub mod sequence;
pub mod settings;
pub mod values;

pub use animator::{ClipKey, SkeletonAnimator};
pub use binder::AnimationBinder;
pub use blender::AnimationBlender;
pub use clip::AnimationSequence;
pub use desc::{AnimationSequenceDesc, KeyFrameSequenceDesc};
pub use mode::PlayMode;
pub use sequence::{KeyFrameIndex, KeyFrameSequence};
pub use settings::PlaybackSettings;
pub use values::{Interpolatable, KeyFrame};
