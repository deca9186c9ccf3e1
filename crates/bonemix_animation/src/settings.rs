//! Playback Settings
//!
//! Per-play configuration consumed by
//! [`SkeletonAnimator::play`](crate::SkeletonAnimator::play).
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use bonemix_animation::{PlaybackSettings, PlayMode};
//!
//! // Default: instant cut, normal speed, looping
//! let settings = PlaybackSettings::default();
//!
//! // Quarter-second crossfade into a one-shot clip at half speed
//! let settings = PlaybackSettings {
//!     blend_time: 0.25,
//!     time_scale: 0.5,
//!     mode: PlayMode::Once,
//!     ..Default::default()
//! };
//!
//! animator.play(attack, &settings)?;
//! ```

use crate::mode::PlayMode;

/// How a clip should start playing on a skeleton.
///
/// | Field        | Description                                        | Default  |
/// |--------------|----------------------------------------------------|----------|
/// | `start_time` | Local time the clip starts at (seconds)            | `0.0`    |
/// | `blend_time` | Crossfade length; `0.0` is an instant cut          | `0.0`    |
/// | `time_scale` | Playback speed; `0.0` freezes on the neutral pose  | `1.0`    |
/// | `mode`       | End-of-clip behaviour                              | `Repeat` |
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlaybackSettings {
    /// Local time the clip starts at, also the initial blend clock.
    pub start_time: f32,

    /// Crossfade duration in seconds.
    ///
    /// Must be `>= 0`; negative or NaN values are a caller error.
    pub blend_time: f32,

    /// Multiplier applied to every frame delta.
    pub time_scale: f32,

    pub mode: PlayMode,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            blend_time: 0.0,
            time_scale: 1.0,
            mode: PlayMode::Repeat,
        }
    }
}

impl PlaybackSettings {
    /// Looping playback that crossfades in over `blend_time` seconds.
    #[inline]
    #[must_use]
    pub fn crossfade(blend_time: f32) -> Self {
        Self {
            blend_time,
            ..Self::default()
        }
    }

    /// Instant cut into a clip that holds its final pose.
    #[inline]
    #[must_use]
    pub fn once() -> Self {
        Self {
            mode: PlayMode::Once,
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_start_time(mut self, start_time: f32) -> Self {
        self.start_time = start_time;
        self
    }

    /// Returns `true` when this play request replaces the pose immediately.
    #[inline]
    #[must_use]
    pub fn is_cut(&self) -> bool {
        self.blend_time == 0.0
    }
}
