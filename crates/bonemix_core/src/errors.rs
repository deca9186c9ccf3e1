//! Error Types
//!
//! This module defines the error types used throughout the engine.
//!
//! # Overview
//!
//! The main error type [`BonemixError`] covers all failure modes including:
//! - Sampling a playback slot that has no sequence bound
//! - Raw play-mode values the engine does not recognise
//! - Checked key-frame access outside a sequence
//! - Clip data that violates the key/channel/time invariants
//! - Skeleton-level clip and bone lookups
//!
//! # Usage
//!
//! All fallible APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, BonemixError>`.
//!
//! ```rust,ignore
//! use bonemix_core::errors::{BonemixError, Result};
//!
//! fn sample_pose() -> Result<()> {
//!     // Operations that may fail return Result
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the Bonemix engine.
///
/// Sampling errors are fatal to the calling frame: there is no partial pose.
/// The host decides how to react (for example by holding the rest pose).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BonemixError {
    // ========================================================================
    // Playback Errors
    // ========================================================================
    /// An operation was issued against an object in the wrong state,
    /// e.g. sampling a binder before any sequence was bound.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A raw value reached a closed set it is not part of (e.g. play mode).
    #[error("Not supported: {0}")]
    NotSupported(String),

    // ========================================================================
    // Key Data Errors
    // ========================================================================
    /// Checked key access outside `0..key_count`.
    #[error("Key index out of range: {index} (key count: {key_count})")]
    KeyIndexOutOfRange {
        /// The invalid index
        index: usize,
        /// Number of keys in the sequence
        key_count: usize,
    },

    /// Channel arrays, flags and key count disagree.
    #[error("Inconsistent key data for bone '{bone}': {reason}")]
    InconsistentKeyData {
        /// Bone the sequence animates
        bone: String,
        /// What did not line up
        reason: String,
    },

    /// Explicit key timestamps must be non-decreasing.
    #[error("Key times for bone '{bone}' decrease at index {index}")]
    NonMonotonicTime {
        /// Bone the sequence animates
        bone: String,
        /// First index whose timestamp is lower than its predecessor
        index: usize,
    },

    /// An explicitly supplied clip duration is shorter than one of its tracks.
    #[error("Sequence '{sequence}' duration {duration} is shorter than its longest track ({required})")]
    DurationTooShort {
        /// Clip name
        sequence: String,
        /// The supplied duration
        duration: f32,
        /// The longest member duration
        required: f32,
    },

    // ========================================================================
    // Skeleton Errors
    // ========================================================================
    /// A clip handle does not refer to a registered clip.
    #[error("Animation clip not found")]
    ClipNotFound,

    /// The skeleton has no bone with this name.
    #[error("Bone not found: {0}")]
    BoneNotFound(String),
}

/// Alias for `Result<T, BonemixError>`.
pub type Result<T> = std::result::Result<T, BonemixError>;
