use std::sync::Arc;

use bonemix_core::Result;
use glam::Mat4;

use crate::binder::AnimationBinder;
use crate::mode::PlayMode;
use crate::sequence::KeyFrameSequence;
use crate::values::KeyFrame;

/// Crossfades between at most two playbacks of one bone.
///
/// The first binder is the clip fading out (or the only clip), the second
/// is the clip fading in. When the blend clock passes `blend_time` the second
/// binder is promoted into the first slot.
#[derive(Debug, Clone, Default)]
pub struct AnimationBlender {
    name: String,
    first: AnimationBinder,
    second: AnimationBinder,
    bind_count: usize,
    blend_time: f32,
    elapsed_time: f32,
}

impl AnimationBlender {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of active binders: 0, 1 or 2.
    #[inline]
    #[must_use]
    pub fn bind_count(&self) -> usize {
        self.bind_count
    }

    #[inline]
    #[must_use]
    pub fn blend_time(&self) -> f32 {
        self.blend_time
    }

    #[inline]
    #[must_use]
    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    #[inline]
    #[must_use]
    pub fn first_binder(&self) -> &AnimationBinder {
        &self.first
    }

    #[inline]
    #[must_use]
    pub fn second_binder(&self) -> &AnimationBinder {
        &self.second
    }

    #[inline]
    #[must_use]
    pub fn is_blending(&self) -> bool {
        self.bind_count == 2
    }

    /// Current weight of the incoming clip, `1.0` outside a blend.
    #[must_use]
    pub fn blend_weight(&self) -> f32 {
        if self.is_blending() && self.blend_time > 0.0 {
            (self.elapsed_time / self.blend_time).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Whether the most recently bound clip has finished a `Once` playback.
    #[must_use]
    pub fn is_play_done(&self) -> bool {
        match self.bind_count {
            0 => false,
            1 => self.first.is_play_done(),
            _ => self.second.is_play_done(),
        }
    }

    /// Binds a new clip to this bone.
    ///
    /// A zero `blend_time` cuts to the clip immediately. Otherwise the clip
    /// fades in over `blend_time` seconds, the blend clock restarting at
    /// `start_time`; if a blend is already running, its outgoing clip is
    /// dropped first so the newly displaced clip is the one fading out.
    ///
    /// `blend_time` must not be negative or NaN.
    pub fn add_key_frame_sequence(
        &mut self,
        sequence: Arc<KeyFrameSequence>,
        start_time: f32,
        blend_time: f32,
        time_scale: f32,
        mode: PlayMode,
    ) {
        debug_assert!(blend_time >= 0.0, "blend time must be non-negative, got {blend_time}");

        if blend_time == 0.0 {
            self.clear_all_binder();
            self.first.bind(sequence, start_time, time_scale, mode);
            self.bind_count = 1;
            log::debug!("Blender '{}': cut to '{}'", self.name, self.bone_label());
            return;
        }

        self.blend_time = blend_time;
        self.elapsed_time = start_time;

        if self.bind_count == 2 {
            self.shift_binder();
        }

        let slot = if self.bind_count == 0 {
            &mut self.first
        } else {
            &mut self.second
        };
        slot.bind(sequence, start_time, time_scale, mode);
        self.bind_count += 1;

        log::debug!(
            "Blender '{}': blending in over {blend_time}s ({} bound)",
            self.name,
            self.bind_count
        );
    }

    /// Advances every active binder by `dt` and returns the resulting pose.
    ///
    /// Without a bound clip the rest pose ([`KeyFrame::NEUTRAL`]) is returned.
    pub fn key_frame(&mut self, dt: f32) -> Result<KeyFrame> {
        self.elapsed_time += dt;

        match self.bind_count {
            0 => Ok(KeyFrame::NEUTRAL),
            1 => self.first.key_frame(dt),
            _ => {
                let t = self.elapsed_time / self.blend_time;

                if t > 1.0 {
                    // Blend finished: only the incoming clip is sampled this frame.
                    let key = self.second.key_frame(dt)?;
                    self.shift_binder();
                    log::debug!("Blender '{}': blend complete", self.name);
                    return Ok(key);
                }

                let from = self.first.key_frame(dt)?;
                let to = self.second.key_frame(dt)?;
                log::trace!("Blender '{}': weight {t:.3}", self.name);

                Ok(KeyFrame::blend(&from, &to, t))
            }
        }
    }

    pub fn key_frame_matrix(&mut self, dt: f32) -> Result<Mat4> {
        self.key_frame(dt).map(|key| key.to_matrix())
    }

    /// Unbinds both slots.
    pub fn clear_all_binder(&mut self) {
        self.first.reset();
        self.second.reset();
        self.bind_count = 0;
    }

    fn shift_binder(&mut self) {
        self.first.reset();
        self.second.copy_to(&mut self.first);
        self.second.reset();
        self.bind_count -= 1;
    }

    fn bone_label(&self) -> &str {
        match self.first.bone_name() {
            Some(bone) => bone,
            None => &self.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::desc::KeyFrameSequenceDesc;

    fn slide(bone: &str, to: Vec3) -> Arc<KeyFrameSequence> {
        Arc::new(
            KeyFrameSequence::from_desc(KeyFrameSequenceDesc {
                bone_name: bone.to_string(),
                key_count: 2,
                duration: 1.0,
                key_interval: 1.0,
                translations: vec![Vec3::ZERO, to],
                ..Default::default()
            })
            .unwrap(),
        )
    }

    #[test]
    fn third_clip_evicts_oldest() {
        let mut blender = AnimationBlender::new("spine");
        blender.add_key_frame_sequence(slide("spine", Vec3::X), 0.0, 0.0, 1.0, PlayMode::Repeat);
        blender.add_key_frame_sequence(slide("spine", Vec3::Y), 0.0, 0.5, 1.0, PlayMode::Repeat);
        assert_eq!(blender.bind_count(), 2);

        let incoming = slide("spine", Vec3::Z);
        blender.add_key_frame_sequence(Arc::clone(&incoming), 0.0, 0.5, 1.0, PlayMode::Repeat);

        assert_eq!(blender.bind_count(), 2);
        let first = blender.first_binder().sequence().unwrap();
        let second = blender.second_binder().sequence().unwrap();
        assert_eq!(first.sample_key_frame(1.0, PlayMode::Once).translation, Some(Vec3::Y));
        assert!(Arc::ptr_eq(second, &incoming));
    }

    #[test]
    fn empty_blender_advances_clock() {
        let mut blender = AnimationBlender::new("root");
        assert_eq!(blender.key_frame_matrix(0.25).unwrap(), Mat4::IDENTITY);
        assert!((blender.elapsed_time() - 0.25).abs() < 1e-6);
        assert!(!blender.is_play_done());
    }
}
