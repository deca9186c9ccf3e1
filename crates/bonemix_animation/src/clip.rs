use std::collections::hash_map::Entry;
use std::sync::Arc;

use bonemix_core::interner::Symbol;
use bonemix_core::{BonemixError, Result};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::desc::AnimationSequenceDesc;
use crate::sequence::KeyFrameSequence;

/// A named clip: one [`KeyFrameSequence`] per animated bone.
///
/// Tracks are reference counted so binders can hold on to them after the
/// clip itself is dropped.
#[derive(Debug, Clone)]
pub struct AnimationSequence {
    name: String,
    duration: f32,
    sequences: Vec<Arc<KeyFrameSequence>>,
    lookup: FxHashMap<Symbol, usize>,
}

impl AnimationSequence {
    /// Builds a clip whose duration is its longest track.
    ///
    /// If two tracks animate the same bone, lookups by name find the first.
    #[must_use]
    pub fn new(name: impl Into<String>, sequences: Vec<KeyFrameSequence>) -> Self {
        let name = name.into();
        let duration = sequences
            .iter()
            .map(KeyFrameSequence::duration)
            .fold(0.0_f32, f32::max);

        let mut lookup = FxHashMap::default();
        for (index, sequence) in sequences.iter().enumerate() {
            match lookup.entry(sequence.bone()) {
                Entry::Vacant(slot) => {
                    slot.insert(index);
                }
                Entry::Occupied(_) => log::warn!(
                    "Sequence '{name}' animates bone '{}' more than once; keeping the first track",
                    sequence.bone()
                ),
            }
        }

        Self {
            name,
            duration,
            sequences: sequences.into_iter().map(Arc::new).collect(),
            lookup,
        }
    }

    /// Builds a clip with an explicit duration, which must cover every track.
    pub fn with_duration(
        name: impl Into<String>,
        duration: f32,
        sequences: Vec<KeyFrameSequence>,
    ) -> Result<Self> {
        let mut clip = Self::new(name, sequences);
        if duration < clip.duration || duration.is_nan() {
            return Err(BonemixError::DurationTooShort {
                sequence: clip.name,
                duration,
                required: clip.duration,
            });
        }
        clip.duration = duration;
        Ok(clip)
    }

    /// Validates loader output; every track must be valid and bone names unique.
    pub fn from_desc(desc: AnimationSequenceDesc) -> Result<Self> {
        let AnimationSequenceDesc {
            name,
            duration,
            sequences,
        } = desc;

        let mut seen = FxHashSet::default();
        let mut tracks = Vec::with_capacity(sequences.len());
        for sequence in sequences {
            let track = KeyFrameSequence::from_desc(sequence)?;
            if !seen.insert(track.bone()) {
                return Err(BonemixError::InconsistentKeyData {
                    bone: track.bone().to_string(),
                    reason: format!("bone animated twice in sequence '{name}'"),
                });
            }
            tracks.push(track);
        }

        match duration {
            Some(duration) => Self::with_duration(name, duration, tracks),
            None => Ok(Self::new(name, tracks)),
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arc<KeyFrameSequence>> {
        self.sequences.get(index)
    }

    /// Position of the track animating `bone_name`.
    #[must_use]
    pub fn index_of(&self, bone_name: &str) -> Option<usize> {
        // A name that was never interned cannot be animated by any clip.
        let symbol = Symbol::lookup(bone_name)?;
        self.lookup.get(&symbol).copied()
    }

    #[must_use]
    pub fn find(&self, bone_name: &str) -> Option<&Arc<KeyFrameSequence>> {
        self.index_of(bone_name).map(|index| &self.sequences[index])
    }

    #[must_use]
    pub fn find_symbol(&self, bone: Symbol) -> Option<&Arc<KeyFrameSequence>> {
        self.lookup.get(&bone).map(|&index| &self.sequences[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<KeyFrameSequence>> {
        self.sequences.iter()
    }
}

impl TryFrom<AnimationSequenceDesc> for AnimationSequence {
    type Error = BonemixError;

    fn try_from(desc: AnimationSequenceDesc) -> Result<Self> {
        Self::from_desc(desc)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::desc::KeyFrameSequenceDesc;

    fn track(bone: &str, duration: f32) -> KeyFrameSequence {
        KeyFrameSequence::from_desc(KeyFrameSequenceDesc {
            bone_name: bone.to_string(),
            key_count: 2,
            duration,
            key_interval: duration,
            translations: vec![Vec3::ZERO, Vec3::X],
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn duration_is_longest_track() {
        let clip = AnimationSequence::new("walk", vec![track("hip", 1.5), track("knee", 3.0)]);
        assert_eq!(clip.duration(), 3.0);
        assert_eq!(clip.len(), 2);
        assert_eq!(clip.index_of("knee"), Some(1));
        assert_eq!(clip.find("hip").map(|s| s.bone_name()), Some("hip"));
        assert!(clip.find("not_a_bone_in_any_clip").is_none());
    }

    #[test]
    fn explicit_duration_must_cover_tracks() {
        let err = AnimationSequence::with_duration("walk", 1.0, vec![track("hip", 2.0)]).unwrap_err();
        assert!(matches!(err, BonemixError::DurationTooShort { .. }));

        let clip = AnimationSequence::with_duration("walk", 4.0, vec![track("hip", 2.0)]).unwrap();
        assert_eq!(clip.duration(), 4.0);
    }

    #[test]
    fn duplicate_bone_names_the_bone() {
        let hip = KeyFrameSequenceDesc {
            bone_name: "hip".to_string(),
            key_count: 1,
            translations: vec![Vec3::ZERO],
            ..Default::default()
        };
        let err = AnimationSequence::from_desc(AnimationSequenceDesc {
            name: "walk".to_string(),
            duration: None,
            sequences: vec![hip.clone(), hip],
        })
        .unwrap_err();

        assert!(matches!(&err, BonemixError::InconsistentKeyData { bone, .. } if bone == "hip"));
    }

    #[test]
    fn empty_clip() {
        let clip = AnimationSequence::new("empty", Vec::new());
        assert!(clip.is_empty());
        assert_eq!(clip.duration(), 0.0);
    }
}
