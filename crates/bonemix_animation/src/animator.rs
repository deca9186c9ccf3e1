use std::sync::Arc;

use bonemix_core::interner::Symbol;
use bonemix_core::{BonemixError, Result};
use glam::Mat4;
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};

use crate::blender::AnimationBlender;
use crate::clip::AnimationSequence;
use crate::settings::PlaybackSettings;

new_key_type! {
    /// Handle to a clip registered with a [`SkeletonAnimator`].
    pub struct ClipKey;
}

/// Drives one [`AnimationBlender`] per bone of a skeleton.
///
/// Produces local (parent-relative) bone poses; composing them down the
/// hierarchy is left to the caller.
#[derive(Debug, Clone, Default)]
pub struct SkeletonAnimator {
    bones: Vec<Symbol>,
    bone_lookup: FxHashMap<Symbol, usize>,
    blenders: Vec<AnimationBlender>,
    pose: Vec<Mat4>,
    clips: SlotMap<ClipKey, Arc<AnimationSequence>>,
    current: Option<ClipKey>,
}

impl SkeletonAnimator {
    /// Creates an animator for the given bones, all at rest pose.
    ///
    /// Bone order is kept: `pose()[i]` belongs to the `i`-th name.
    #[must_use]
    pub fn new<I, S>(bone_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut animator = Self::default();
        for name in bone_names {
            let name = name.as_ref();
            let symbol = Symbol::new(name);
            animator
                .bone_lookup
                .entry(symbol)
                .or_insert(animator.bones.len());
            animator.bones.push(symbol);
            animator.blenders.push(AnimationBlender::new(name));
            animator.pose.push(Mat4::IDENTITY);
        }
        animator
    }

    #[inline]
    #[must_use]
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    #[must_use]
    pub fn bone_index(&self, bone_name: &str) -> Option<usize> {
        let symbol = Symbol::lookup(bone_name)?;
        self.bone_lookup.get(&symbol).copied()
    }

    #[must_use]
    pub fn blender(&self, bone_name: &str) -> Option<&AnimationBlender> {
        self.bone_index(bone_name).map(|index| &self.blenders[index])
    }

    pub fn add_clip(&mut self, clip: Arc<AnimationSequence>) -> ClipKey {
        self.clips.insert(clip)
    }

    /// Unregisters a clip. Bones already playing it keep their tracks alive.
    pub fn remove_clip(&mut self, key: ClipKey) -> Option<Arc<AnimationSequence>> {
        if self.current == Some(key) {
            self.current = None;
        }
        self.clips.remove(key)
    }

    #[must_use]
    pub fn clip(&self, key: ClipKey) -> Option<&Arc<AnimationSequence>> {
        self.clips.get(key)
    }

    #[inline]
    #[must_use]
    pub fn current_clip(&self) -> Option<ClipKey> {
        self.current
    }

    /// Starts a registered clip on every bone it animates.
    ///
    /// Bones the clip has no track for keep whatever they were playing.
    /// Returns the number of bones the clip was bound to.
    pub fn play(&mut self, key: ClipKey, settings: &PlaybackSettings) -> Result<usize> {
        let clip = self.clips.get(key).ok_or(BonemixError::ClipNotFound)?;

        let mut bound = 0;
        for (bone, blender) in self.bones.iter().zip(&mut self.blenders) {
            let Some(sequence) = clip.find_symbol(*bone) else {
                log::debug!("Clip '{}' has no track for bone '{bone}'", clip.name());
                continue;
            };

            blender.add_key_frame_sequence(
                Arc::clone(sequence),
                settings.start_time,
                settings.blend_time,
                settings.time_scale,
                settings.mode,
            );
            bound += 1;
        }

        if bound == 0 {
            log::warn!("Clip '{}' animates none of the skeleton's bones", clip.name());
        }

        self.current = Some(key);
        Ok(bound)
    }

    /// Starts a clip on a single bone.
    pub fn play_on_bone(
        &mut self,
        key: ClipKey,
        bone_name: &str,
        settings: &PlaybackSettings,
    ) -> Result<()> {
        let clip = self.clips.get(key).ok_or(BonemixError::ClipNotFound)?;
        let index = self
            .bone_index(bone_name)
            .ok_or_else(|| BonemixError::BoneNotFound(bone_name.to_string()))?;
        let sequence = clip
            .find_symbol(self.bones[index])
            .ok_or_else(|| BonemixError::BoneNotFound(bone_name.to_string()))?;

        self.blenders[index].add_key_frame_sequence(
            Arc::clone(sequence),
            settings.start_time,
            settings.blend_time,
            settings.time_scale,
            settings.mode,
        );
        Ok(())
    }

    /// Advances every bone by `dt` seconds and returns the local poses.
    pub fn update(&mut self, dt: f32) -> Result<&[Mat4]> {
        for (blender, slot) in self.blenders.iter_mut().zip(&mut self.pose) {
            *slot = blender.key_frame_matrix(dt)?;
        }
        Ok(&self.pose)
    }

    /// Poses computed by the last [`update`](Self::update).
    #[inline]
    #[must_use]
    pub fn pose(&self) -> &[Mat4] {
        &self.pose
    }

    /// `true` when every animated bone has finished a `Once` playback.
    #[must_use]
    pub fn is_play_done(&self) -> bool {
        let mut animated = self.blenders.iter().filter(|b| b.bind_count() > 0).peekable();
        animated.peek().is_some() && animated.all(AnimationBlender::is_play_done)
    }

    #[must_use]
    pub fn is_blending(&self) -> bool {
        self.blenders.iter().any(AnimationBlender::is_blending)
    }

    /// Returns every bone to its rest pose.
    pub fn stop(&mut self) {
        for blender in &mut self.blenders {
            blender.clear_all_binder();
        }
        self.pose.fill(Mat4::IDENTITY);
        self.current = None;
    }
}
