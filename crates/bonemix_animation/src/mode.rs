use bonemix_core::{BonemixError, Result};

/// How local time behaves once it reaches the end of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayMode {
    /// Play to the end and hold the final pose.
    Once,
    /// Wrap back to the start; the last key interpolates towards the first.
    #[default]
    Repeat,
}

impl PlayMode {
    /// Converts the raw value stored by asset pipelines (`0` = once, `1` = repeat).
    pub fn from_raw(raw: u32) -> Result<Self> {
        match raw {
            0 => Ok(Self::Once),
            1 => Ok(Self::Repeat),
            other => Err(BonemixError::NotSupported(format!("play mode {other}"))),
        }
    }
}

impl TryFrom<u32> for PlayMode {
    type Error = BonemixError;

    fn try_from(raw: u32) -> Result<Self> {
        Self::from_raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_values() {
        assert_eq!(PlayMode::try_from(0), Ok(PlayMode::Once));
        assert_eq!(PlayMode::try_from(1), Ok(PlayMode::Repeat));
        assert!(matches!(
            PlayMode::try_from(7),
            Err(BonemixError::NotSupported(_))
        ));
    }
}
