//! Crossfade demo
//!
//! Builds an "idle" and a "walk" clip in code, plays idle, then crossfades
//! into walk and logs the root bone while the blend runs.
//!
//! ```text
//! RUST_LOG=info cargo run -p crossfade
//! RUST_LOG=bonemix_animation=trace,info cargo run -p crossfade
//! ```

use std::f32::consts::TAU;
use std::sync::Arc;

use bonemix::prelude::*;

const BONES: [&str; 3] = ["root", "spine", "head"];
const FRAME_DT: f32 = 1.0 / 30.0;

fn idle_clip() -> anyhow::Result<AnimationSequence> {
    // Slow breathing on the spine, everything else static.
    let sequences = vec![
        KeyFrameSequenceDesc {
            bone_name: "root".to_string(),
            key_count: 1,
            translations: vec![Vec3::ZERO],
            ..Default::default()
        },
        KeyFrameSequenceDesc {
            bone_name: "spine".to_string(),
            key_count: 3,
            duration: 2.0,
            key_interval: 1.0,
            scales: vec![Vec3::ONE, Vec3::new(1.0, 1.04, 1.0), Vec3::ONE],
            ..Default::default()
        },
    ];

    Ok(AnimationSequence::from_desc(AnimationSequenceDesc {
        name: "idle".to_string(),
        duration: None,
        sequences,
    })?)
}

fn walk_clip() -> anyhow::Result<AnimationSequence> {
    const KEYS: usize = 9;
    let interval = 1.0 / (KEYS - 1) as f32;

    let root = KeyFrameSequenceDesc {
        bone_name: "root".to_string(),
        key_count: KEYS,
        duration: 1.0,
        key_interval: interval,
        translations: (0..KEYS)
            .map(|i| {
                let phase = i as f32 * interval * TAU;
                Vec3::new(0.0, 0.05 * (2.0 * phase).sin().abs(), i as f32 * interval)
            })
            .collect(),
        ..Default::default()
    };

    let head = KeyFrameSequenceDesc {
        bone_name: "head".to_string(),
        key_count: KEYS,
        duration: 1.0,
        times: (0..KEYS).map(|i| i as f32 * interval).collect(),
        rotations: (0..KEYS)
            .map(|i| Quat::from_rotation_y(0.1 * (i as f32 * interval * TAU).sin()))
            .collect(),
        ..Default::default()
    };

    Ok(AnimationSequence::from_desc(AnimationSequenceDesc {
        name: "walk".to_string(),
        duration: None,
        sequences: vec![root, head],
    })?)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut animator = SkeletonAnimator::new(BONES);
    let idle = animator.add_clip(Arc::new(idle_clip()?));
    let walk = animator.add_clip(Arc::new(walk_clip()?));

    animator.play(idle, &PlaybackSettings::default())?;
    for _ in 0..10 {
        animator.update(FRAME_DT)?;
    }

    let bound = animator.play(walk, &PlaybackSettings::crossfade(0.25))?;
    log::info!("Crossfading into walk on {bound} bones");

    for frame in 0..30 {
        let blending = animator.is_blending();
        let weight = animator
            .blender("root")
            .map_or(1.0, AnimationBlender::blend_weight);
        let pose = animator.update(FRAME_DT)?;

        let (_, rotation, translation) = pose[0].to_scale_rotation_translation();
        log::info!(
            "frame {frame:2}: root = ({:.3}, {:.3}, {:.3}) rot = {:.3} blending = {blending} weight = {weight:.2}",
            translation.x,
            translation.y,
            translation.z,
            rotation.w,
        );
    }

    Ok(())
}
