//! Descriptor and settings deserialization (requires the `serde` feature).

use glam::Vec3;

use bonemix::animation::{AnimationSequence, AnimationSequenceDesc, PlayMode, PlaybackSettings};

const CLIP_JSON: &str = r#"{
    "name": "wave",
    "sequences": [
        {
            "bone_name": "forearm",
            "key_count": 3,
            "duration": 1.0,
            "translations": [[0.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 4.0, 0.0]],
            "rotations": [[0.0, 0.0, 0.0, 1.0]],
            "fixed_rotation": true,
            "times": [0.0, 0.25, 1.0]
        }
    ]
}"#;

#[test]
fn clip_desc_from_json() -> anyhow::Result<()> {
    let desc: AnimationSequenceDesc = serde_json::from_str(CLIP_JSON)?;
    assert_eq!(desc.duration, None);

    let clip = AnimationSequence::from_desc(desc)?;
    assert_eq!(clip.duration(), 1.0);

    let forearm = clip.find("forearm").expect("forearm track");
    assert!(forearm.has_time());
    assert!(forearm.is_fixed_rotation());

    let key = forearm.sample_key_frame(0.625, PlayMode::Once);
    assert!(key.translation.unwrap().abs_diff_eq(Vec3::new(0.0, 3.0, 0.0), 1e-5));
    assert_eq!(key.scale, None);
    Ok(())
}

#[test]
fn invalid_clip_desc_is_rejected() -> anyhow::Result<()> {
    let desc: AnimationSequenceDesc = serde_json::from_str(
        r#"{ "name": "broken", "sequences": [ { "bone_name": "a", "key_count": 2, "translations": [[0, 0, 0]] } ] }"#,
    )?;
    assert!(AnimationSequence::from_desc(desc).is_err());
    Ok(())
}

#[test]
fn playback_settings_fill_defaults() -> anyhow::Result<()> {
    let settings: PlaybackSettings = serde_json::from_str(r#"{ "blend_time": 0.2, "mode": "Once" }"#)?;
    assert_eq!(
        settings,
        PlaybackSettings {
            blend_time: 0.2,
            mode: PlayMode::Once,
            ..Default::default()
        }
    );
    Ok(())
}
