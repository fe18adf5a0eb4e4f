//! satmark draws animated satellite markers for 3D globes.
//!
//! A marker's look is rasterized once into a sprite atlas and then played back by walking the
//! atlas over real time:
//!
//! - Describe the animation with an [`AnimationConfig`] (or [`SatelliteOpts`])
//! - Rasterize it with an [`AtlasGenerator`] into a [`SpriteAtlas`]
//! - Pick the visible cell for a playback time with a [`FrameAnimator`]
//! - Attach everything to a host scene with a [`Satellite`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animator;
pub(crate) mod atlas;
pub(crate) mod marker;

pub use crate::foundation::color::Color;
pub use crate::foundation::core::{
    CellRect, FrameIndex, Point, Rect, Rgba8Premul, TextureWindow, Vec3,
};
pub use crate::foundation::error::{SatmarkError, SatmarkResult};

pub use crate::animator::{FrameAnimator, texture_window};
pub use crate::atlas::choreography::{
    ArcSector, CORE_RADIUS, FramePose, PulseWedge, SHIELD_RADIUS, ShieldPhase, STROKE_WIDTH,
    core_radius, frame_pose, pulses, shield_phase, shield_sector,
};
pub use crate::atlas::config::{
    AnimationConfig, AtlasLayout, CORE_ANCHOR_X, DEFAULT_FRAME_DURATION_MS, DerivedTiming,
    MAX_ATLAS_BYTES,
};
pub use crate::atlas::generator::{AtlasGenerator, check_config, generate_atlas};
pub use crate::atlas::sprite::{AtlasFingerprint, FrameRGBA, SpriteAtlas};
pub use crate::marker::hooks::RemovalHooks;
pub use crate::marker::opts::{AppearanceChange, SatelliteOpts, SatelliteOptsPatch};
pub use crate::marker::satellite::{AtlasSource, Satellite};
pub use crate::marker::scene::{
    BillboardPose, GlobeProjection, MarkerMesh, MarkerTexture, SceneHost, SphereProjection,
    TEXTURE_CHANGED, TEXTURE_OWN, TEXTURE_SHARED, Tilt,
};
