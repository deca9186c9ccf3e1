use std::sync::Arc;

use bonemix_core::{BonemixError, Result};
use glam::Mat4;

use crate::mode::PlayMode;
use crate::sequence::KeyFrameSequence;
use crate::values::KeyFrame;

/// Playback cursor over one shared [`KeyFrameSequence`].
///
/// Owns only the mutable state of a playback: local time, speed and mode.
#[derive(Debug, Clone)]
pub struct AnimationBinder {
    sequence: Option<Arc<KeyFrameSequence>>,
    local_time: f32,
    time_scale: f32,
    mode: PlayMode,
}

impl Default for AnimationBinder {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationBinder {
    /// An unbound binder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sequence: None,
            local_time: 0.0,
            time_scale: 1.0,
            mode: PlayMode::Repeat,
        }
    }

    /// Starts (or restarts) playback of `sequence`.
    pub fn bind(
        &mut self,
        sequence: Arc<KeyFrameSequence>,
        start_time: f32,
        time_scale: f32,
        mode: PlayMode,
    ) {
        self.sequence = Some(sequence);
        self.local_time = start_time;
        self.time_scale = time_scale;
        self.mode = mode;
    }

    /// Drops the bound sequence and returns to the initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Copies the full playback state into `target`, reusing its allocation.
    pub fn copy_to(&self, target: &mut AnimationBinder) {
        target.clone_from(self);
    }

    #[inline]
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.sequence.is_some()
    }

    #[inline]
    #[must_use]
    pub fn sequence(&self) -> Option<&Arc<KeyFrameSequence>> {
        self.sequence.as_ref()
    }

    #[must_use]
    pub fn bone_name(&self) -> Option<&'static str> {
        self.sequence.as_ref().map(|s| s.bone_name())
    }

    /// Length of the bound sequence, `0` when unbound.
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.sequence.as_ref().map_or(0.0, |s| s.duration())
    }

    #[inline]
    #[must_use]
    pub fn local_time(&self) -> f32 {
        self.local_time
    }

    #[inline]
    #[must_use]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// `0` freezes playback; sampling then yields the neutral pose.
    #[inline]
    pub fn set_time_scale(&mut self, time_scale: f32) {
        self.time_scale = time_scale;
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    /// `true` once a `Once` playback has reached the end. Never true for `Repeat`.
    #[must_use]
    pub fn is_play_done(&self) -> bool {
        match self.mode {
            PlayMode::Once => self.is_bound() && self.local_time >= self.duration(),
            PlayMode::Repeat => false,
        }
    }

    /// Advances local time by `dt * time_scale` and samples the sequence.
    ///
    /// A zero time scale leaves local time untouched and returns
    /// [`KeyFrame::NEUTRAL`], which callers use to switch a bone off.
    pub fn key_frame(&mut self, dt: f32) -> Result<KeyFrame> {
        let Some(sequence) = self.sequence.as_ref() else {
            return Err(BonemixError::InvalidState("sequence not set".to_string()));
        };

        if self.time_scale == 0.0 {
            return Ok(KeyFrame::NEUTRAL);
        }

        self.local_time =
            sequence.normalize_time(self.local_time + dt * self.time_scale, self.mode);

        Ok(sequence.sample_key_frame(self.local_time, self.mode))
    }

    pub fn key_frame_matrix(&mut self, dt: f32) -> Result<Mat4> {
        self.key_frame(dt).map(|key| key.to_matrix())
    }
}
