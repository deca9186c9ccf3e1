//! Clip descriptors
//!
//! Plain data filled in by an asset loader. The engine never reads files
//! itself; a loader parses whatever format the host uses into these structs
//! and hands them to [`KeyFrameSequence::from_desc`] /
//! [`AnimationSequence::from_desc`], which validate the key invariants.
//!
//! [`KeyFrameSequence::from_desc`]: crate::KeyFrameSequence::from_desc
//! [`AnimationSequence::from_desc`]: crate::AnimationSequence::from_desc

use glam::{Quat, Vec3};

/// Raw key data for one bone.
///
/// An empty channel vector means the channel is not animated. An empty
/// `times` vector means keys are spaced evenly by `key_interval`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KeyFrameSequenceDesc {
    pub bone_name: String,
    pub key_count: usize,
    /// Seconds.
    pub duration: f32,
    /// Spacing between keys when `times` is empty.
    pub key_interval: f32,

    pub translations: Vec<Vec3>,
    pub rotations: Vec<Quat>,
    pub scales: Vec<Vec3>,
    /// Explicit per-key timestamps, non-decreasing.
    pub times: Vec<f32>,

    // A fixed channel always reads key 0 and may store a single value.
    pub fixed_translation: bool,
    pub fixed_rotation: bool,
    pub fixed_scale: bool,
}

/// Raw data for a whole clip.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnimationSequenceDesc {
    pub name: String,
    /// Explicit clip length; `None` derives it from the longest track.
    pub duration: Option<f32>,
    pub sequences: Vec<KeyFrameSequenceDesc>,
}
