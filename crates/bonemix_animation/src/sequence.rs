use bonemix_core::interner::Symbol;
use bonemix_core::{BonemixError, Result};
use glam::{Mat4, Quat, Vec3};

use crate::desc::KeyFrameSequenceDesc;
use crate::mode::PlayMode;
use crate::values::{Interpolatable, KeyFrame};

/// Pair of keys to interpolate between and the weight towards the second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyFrameIndex {
    pub first: usize,
    pub second: usize,
    pub t: f32,
}

/// One bone's key track: translation, rotation and scale channels sharing a
/// single timeline.
///
/// Immutable once built; playback state lives in
/// [`AnimationBinder`](crate::AnimationBinder), so one sequence can be shared
/// by any number of binders.
#[derive(Debug, Clone)]
pub struct KeyFrameSequence {
    bone: Symbol,
    key_count: usize,
    duration: f32,
    key_interval: f32,

    translations: Vec<Vec3>,
    rotations: Vec<Quat>,
    scales: Vec<Vec3>,
    times: Vec<f32>,

    fixed_translation: bool,
    fixed_rotation: bool,
    fixed_scale: bool,
}

impl KeyFrameSequence {
    /// Validates loader output and builds the sequence.
    ///
    /// Every present channel must hold `key_count` values (or exactly one
    /// when the channel is fixed), explicit times must match `key_count` and
    /// never decrease.
    pub fn from_desc(desc: KeyFrameSequenceDesc) -> Result<Self> {
        let KeyFrameSequenceDesc {
            bone_name,
            key_count,
            duration,
            key_interval,
            translations,
            rotations,
            scales,
            times,
            fixed_translation,
            fixed_rotation,
            fixed_scale,
        } = desc;

        let inconsistent = |reason: String| BonemixError::InconsistentKeyData {
            bone: bone_name.clone(),
            reason,
        };

        if key_count == 0 {
            return Err(inconsistent("sequence has no keys".to_string()));
        }
        if !duration.is_finite() || duration < 0.0 {
            return Err(inconsistent(format!("invalid duration {duration}")));
        }
        if !key_interval.is_finite() || key_interval < 0.0 {
            return Err(inconsistent(format!("invalid key interval {key_interval}")));
        }

        check_channel("translation", translations.len(), key_count, fixed_translation)
            .map_err(&inconsistent)?;
        check_channel("rotation", rotations.len(), key_count, fixed_rotation)
            .map_err(&inconsistent)?;
        check_channel("scale", scales.len(), key_count, fixed_scale).map_err(&inconsistent)?;

        if !times.is_empty() {
            if times.len() != key_count {
                return Err(inconsistent(format!(
                    "{} key times for {key_count} keys",
                    times.len()
                )));
            }
            if let Some(index) = times.windows(2).position(|w| w[1] < w[0]) {
                return Err(BonemixError::NonMonotonicTime {
                    bone: bone_name,
                    index: index + 1,
                });
            }
        }

        Ok(Self {
            bone: Symbol::new(&bone_name),
            key_count,
            duration,
            key_interval,
            translations,
            rotations,
            scales,
            times,
            fixed_translation,
            fixed_rotation,
            fixed_scale,
        })
    }

    #[inline]
    #[must_use]
    pub fn bone(&self) -> Symbol {
        self.bone
    }

    #[inline]
    #[must_use]
    pub fn bone_name(&self) -> &'static str {
        self.bone.as_str()
    }

    #[inline]
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.key_count
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    #[must_use]
    pub fn key_interval(&self) -> f32 {
        self.key_interval
    }

    #[inline]
    #[must_use]
    pub fn has_translation(&self) -> bool {
        !self.translations.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn has_rotation(&self) -> bool {
        !self.rotations.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn has_scale(&self) -> bool {
        !self.scales.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn has_time(&self) -> bool {
        !self.times.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn is_fixed_translation(&self) -> bool {
        self.fixed_translation
    }

    #[inline]
    #[must_use]
    pub fn is_fixed_rotation(&self) -> bool {
        self.fixed_rotation
    }

    #[inline]
    #[must_use]
    pub fn is_fixed_scale(&self) -> bool {
        self.fixed_scale
    }

    #[inline]
    #[must_use]
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    /// The raw pose stored at `index`, no interpolation.
    pub fn key_frame(&self, index: usize) -> Result<KeyFrame> {
        self.check_index(index)?;
        Ok(self.interpolate_unchecked(index, index, 0.0))
    }

    /// Matrix form of [`key_frame`](Self::key_frame).
    pub fn matrix(&self, index: usize) -> Result<Mat4> {
        self.key_frame(index).map(|key| key.to_matrix())
    }

    /// Interpolates between two explicit keys.
    ///
    /// Translation and scale are lerped, rotation is slerped. Fixed channels
    /// ignore both `second` and `t` and read key 0.
    pub fn interpolate_key_frame(&self, first: usize, second: usize, t: f32) -> Result<KeyFrame> {
        self.check_index(first)?;
        self.check_index(second)?;
        Ok(self.interpolate_unchecked(first, second, t))
    }

    pub fn interpolate_matrix(&self, first: usize, second: usize, t: f32) -> Result<Mat4> {
        self.interpolate_key_frame(first, second, t)
            .map(|key| key.to_matrix())
    }

    /// Samples the sequence at `local_time` under `mode`.
    #[must_use]
    pub fn sample_key_frame(&self, local_time: f32, mode: PlayMode) -> KeyFrame {
        let KeyFrameIndex { first, second, t } = self.calculate_key_frame_index(local_time, mode);
        self.interpolate_unchecked(first, second, t)
    }

    #[must_use]
    pub fn sample_matrix(&self, local_time: f32, mode: PlayMode) -> Mat4 {
        self.sample_key_frame(local_time, mode).to_matrix()
    }

    /// Brings a raw local time into the playable range.
    ///
    /// `Once` clamps to `[0, duration]`, `Repeat` wraps into `[0, duration)`.
    /// A sequence without length always plays at time zero.
    #[must_use]
    pub fn normalize_time(&self, local_time: f32, mode: PlayMode) -> f32 {
        if self.duration <= 0.0 || local_time.is_nan() {
            return 0.0;
        }

        match mode {
            PlayMode::Once => local_time.clamp(0.0, self.duration),
            PlayMode::Repeat => {
                let wrapped = local_time.rem_euclid(self.duration);
                // rem_euclid can round up to the divisor for tiny negative inputs.
                if wrapped >= self.duration { 0.0 } else { wrapped }
            }
        }
    }

    /// Resolves a local time to the two keys around it.
    ///
    /// On the last key both indices collapse onto it with `t = 1`, so the
    /// pose never extrapolates past the final key.
    #[must_use]
    pub fn calculate_key_frame_index(&self, local_time: f32, mode: PlayMode) -> KeyFrameIndex {
        let time = self.normalize_time(local_time, mode);
        let last = self.key_count - 1;

        // Index and weight both come from one division so they agree on key boundaries.
        let position = if !self.has_time() && self.key_interval > 0.0 {
            time / self.key_interval
        } else {
            0.0
        };

        let first = if self.has_time() {
            self.key_frame_index(time)
        } else {
            (position.floor() as usize).min(last)
        };

        // Once holds the final pose, Repeat lets the tail run back into the head.
        let second = match mode {
            PlayMode::Once => (first + 1).min(last),
            PlayMode::Repeat => {
                if first == last {
                    0
                } else {
                    first + 1
                }
            }
        };

        if first == last {
            return KeyFrameIndex {
                first: last,
                second: last,
                t: 1.0,
            };
        }

        let t = if self.has_time() {
            let t0 = self.times[first];
            let dt = self.times[second] - t0;
            if dt > 1e-6 {
                ((time - t0) / dt).clamp(0.0, 1.0)
            } else {
                0.0
            }
        } else {
            position - position.floor()
        };

        KeyFrameIndex { first, second, t }
    }

    /// Binary search over the explicit key times.
    ///
    /// Returns the last key whose timestamp is `<= local_time`: `0` before the
    /// first key, the final index at or past the last key. Sequences with fewer
    /// than two timestamps always answer `0`.
    #[must_use]
    pub fn key_frame_index(&self, local_time: f32) -> usize {
        if self.times.len() <= 1 {
            return 0;
        }

        // partition_point returns the first key strictly after local_time
        let next = self.times.partition_point(|&t| t <= local_time);
        next.saturating_sub(1)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.key_count {
            Ok(())
        } else {
            Err(BonemixError::KeyIndexOutOfRange {
                index,
                key_count: self.key_count,
            })
        }
    }

    fn interpolate_unchecked(&self, first: usize, second: usize, t: f32) -> KeyFrame {
        KeyFrame {
            translation: interpolate_channel(&self.translations, self.fixed_translation, first, second, t),
            rotation: interpolate_channel(&self.rotations, self.fixed_rotation, first, second, t),
            scale: interpolate_channel(&self.scales, self.fixed_scale, first, second, t),
        }
    }
}

impl TryFrom<KeyFrameSequenceDesc> for KeyFrameSequence {
    type Error = BonemixError;

    fn try_from(desc: KeyFrameSequenceDesc) -> Result<Self> {
        Self::from_desc(desc)
    }
}

fn interpolate_channel<T: Interpolatable>(
    values: &[T],
    fixed: bool,
    first: usize,
    second: usize,
    t: f32,
) -> Option<T> {
    if values.is_empty() {
        return None;
    }
    if fixed {
        return Some(values[0]);
    }
    if first == second {
        return Some(values[first]);
    }
    Some(T::interpolate_linear(values[first], values[second], t))
}

fn check_channel(
    name: &str,
    len: usize,
    key_count: usize,
    fixed: bool,
) -> std::result::Result<(), String> {
    if len == 0 || len == key_count || (fixed && len == 1) {
        Ok(())
    } else {
        Err(format!("{len} {name} keys for {key_count} keys"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(times: Vec<f32>) -> KeyFrameSequence {
        let key_count = times.len();
        let duration = times.last().copied().unwrap_or(0.0);
        KeyFrameSequence::from_desc(KeyFrameSequenceDesc {
            bone_name: "timed".to_string(),
            key_count,
            duration,
            translations: (0..key_count).map(|i| Vec3::splat(i as f32)).collect(),
            times,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn rejects_empty_sequence() {
        let err = KeyFrameSequence::from_desc(KeyFrameSequenceDesc {
            bone_name: "empty".to_string(),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, BonemixError::InconsistentKeyData { .. }));
    }

    #[test]
    fn rejects_channel_length_mismatch() {
        let err = KeyFrameSequence::from_desc(KeyFrameSequenceDesc {
            bone_name: "arm".to_string(),
            key_count: 3,
            duration: 1.0,
            key_interval: 0.5,
            rotations: vec![Quat::IDENTITY; 2],
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, BonemixError::InconsistentKeyData { ref bone, .. } if bone == "arm"));
    }

    #[test]
    fn fixed_channel_may_store_one_value() {
        let seq = KeyFrameSequence::from_desc(KeyFrameSequenceDesc {
            bone_name: "hand".to_string(),
            key_count: 3,
            duration: 1.0,
            key_interval: 0.5,
            scales: vec![Vec3::splat(2.0)],
            fixed_scale: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(seq.key_frame(2).unwrap().scale, Some(Vec3::splat(2.0)));
    }

    #[test]
    fn rejects_decreasing_times() {
        let err = KeyFrameSequence::from_desc(KeyFrameSequenceDesc {
            bone_name: "leg".to_string(),
            key_count: 3,
            duration: 1.0,
            times: vec![0.0, 0.6, 0.4],
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(
            err,
            BonemixError::NonMonotonicTime {
                bone: "leg".to_string(),
                index: 2
            }
        );
    }

    #[test]
    fn key_frame_index_search() {
        let seq = timed(vec![0.0, 0.5, 1.25, 2.0]);
        assert_eq!(seq.key_frame_index(-1.0), 0);
        assert_eq!(seq.key_frame_index(0.0), 0);
        assert_eq!(seq.key_frame_index(0.49), 0);
        assert_eq!(seq.key_frame_index(0.5), 1);
        assert_eq!(seq.key_frame_index(1.25), 2);
        assert_eq!(seq.key_frame_index(1.9), 2);
        assert_eq!(seq.key_frame_index(2.0), 3);
        assert_eq!(seq.key_frame_index(9.0), 3);
    }

    #[test]
    fn key_frame_index_single_key() {
        let seq = timed(vec![0.3]);
        assert_eq!(seq.key_frame_index(0.0), 0);
        assert_eq!(seq.key_frame_index(5.0), 0);
    }

    #[test]
    fn last_key_collapses() {
        let seq = timed(vec![0.0, 1.0, 2.0]);
        let idx = seq.calculate_key_frame_index(2.0, PlayMode::Once);
        assert_eq!(
            idx,
            KeyFrameIndex {
                first: 2,
                second: 2,
                t: 1.0
            }
        );
    }

    #[test]
    fn timed_fraction() {
        let seq = timed(vec![0.0, 0.5, 1.5, 2.0]);
        let idx = seq.calculate_key_frame_index(1.0, PlayMode::Once);
        assert_eq!((idx.first, idx.second), (1, 2));
        assert!((idx.t - 0.5).abs() < 1e-6);
    }

    #[test]
    fn checked_index_access() {
        let seq = timed(vec![0.0, 1.0]);
        assert_eq!(
            seq.matrix(2),
            Err(BonemixError::KeyIndexOutOfRange {
                index: 2,
                key_count: 2
            })
        );
        assert!(seq.interpolate_key_frame(0, 5, 0.5).is_err());
    }

    #[test]
    fn repeat_wraps_negative_time() {
        let seq = timed(vec![0.0, 1.0, 2.0]);
        let t = seq.normalize_time(-0.5, PlayMode::Repeat);
        assert!((t - 1.5).abs() < 1e-6);
    }
}
