//! Seams to the 3D scene the marker lives in.
//!
//! The crate never owns a scene graph. Hosts implement [`SceneHost`] and, if they use a
//! different globe, [`GlobeProjection`].

use std::f64::consts::{FRAC_PI_2, PI};
use std::sync::Arc;

use crate::atlas::sprite::SpriteAtlas;
use crate::foundation::core::{TextureWindow, Vec3};

/// Globe radius used by [`SphereProjection::default`].
pub const DEFAULT_GLOBE_RADIUS: f64 = 500.0;
/// Side of the marker plane at `size = 1`.
pub const MARKER_PLANE_SIDE: f64 = 150.0;

/// Texture name of a marker that generated its own atlas.
pub const TEXTURE_OWN: &str = "satellite";
/// Texture name of a marker that wraps a shared atlas.
pub const TEXTURE_SHARED: &str = "satellite-c";
/// Texture name after an appearance change.
pub const TEXTURE_CHANGED: &str = "satellite-z";

/// Converts geographic coordinates into scene space.
pub trait GlobeProjection {
    /// Surface point for `lat`/`lon` in degrees.
    fn project(&self, lat: f64, lon: f64) -> Vec3;
}

/// Sphere centered at the origin with +Y through the north pole.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereProjection {
    /// Sphere radius in scene units.
    pub radius: f64,
}

impl Default for SphereProjection {
    fn default() -> Self {
        Self {
            radius: DEFAULT_GLOBE_RADIUS,
        }
    }
}

impl GlobeProjection for SphereProjection {
    fn project(&self, lat: f64, lon: f64) -> Vec3 {
        let phi = (90.0 - lat) * PI / 180.0;
        let theta = (180.0 - lon) * PI / 180.0;
        Vec3::new(
            self.radius * phi.sin() * theta.cos(),
            self.radius * phi.cos(),
            self.radius * phi.sin() * theta.sin(),
        )
    }
}

/// Texture bound to a marker mesh.
#[derive(Clone, Debug)]
pub struct MarkerTexture {
    /// Texture name, see [`TEXTURE_OWN`] and friends.
    pub name: &'static str,
    /// Atlas pixels.
    pub atlas: Arc<SpriteAtlas>,
}

/// Everything a host needs to build the marker's mesh.
#[derive(Clone, Debug)]
pub struct MarkerMesh {
    /// Side of the square plane.
    pub side: f64,
    /// Initial position.
    pub position: Vec3,
    /// Initial Euler rotation in radians.
    pub rotation: Vec3,
    /// Whether the material takes part in depth testing. Always `false`.
    pub depth_test: bool,
    /// Whether the material is alpha blended. Always `true`.
    pub transparent: bool,
    /// Bound texture.
    pub texture: MarkerTexture,
    /// Visible part of the texture; `None` shows the whole atlas.
    pub window: Option<TextureWindow>,
}

impl MarkerMesh {
    pub(crate) fn new(
        lat: f64,
        lon: f64,
        size: f64,
        position: Vec3,
        texture: MarkerTexture,
        window: Option<TextureWindow>,
    ) -> Self {
        Self {
            side: MARKER_PLANE_SIDE * size,
            position,
            rotation: Vec3::new(0.0, lon / 180.0 * PI, -(lat / 90.0) * FRAC_PI_2),
            depth_test: false,
            transparent: true,
            texture,
            window,
        }
    }
}

/// Camera-facing orientation with a latitude-dependent roll.
///
/// Hosts apply it as: look at `target`, then rotate about the local Z axis by `base_roll`, then
/// by `tilt_roll`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BillboardPose {
    /// Point the mesh faces.
    pub target: Vec3,
    /// Fixed quarter-turn roll.
    pub base_roll: f64,
    /// Camera-dependent roll.
    pub tilt_roll: f64,
}

impl BillboardPose {
    /// Total roll after facing the target.
    pub fn roll(&self) -> f64 {
        self.base_roll + self.tilt_roll
    }
}

/// Per-marker tilt constants, fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tilt {
    /// `π/2 · (1 - |lat/90|)`: no tilt at the poles.
    pub multiplier: f64,
    /// `-1` in the northern hemisphere, `1` otherwise.
    pub direction: f64,
    lon_rad: f64,
}

impl Tilt {
    /// Tilt for a marker at `lat`/`lon` degrees.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            multiplier: FRAC_PI_2 * (1.0 - (lat / 90.0).abs()),
            direction: if lat > 0.0 { -1.0 } else { 1.0 },
            lon_rad: lon / 180.0 * PI,
        }
    }

    /// Pose facing `camera_position` for a camera at `camera_angle` radians around the globe.
    pub fn pose(&self, camera_position: Vec3, camera_angle: f64) -> BillboardPose {
        BillboardPose {
            target: camera_position,
            base_roll: self.direction * FRAC_PI_2,
            tilt_roll: (camera_angle + self.lon_rad).sin() * self.multiplier * self.direction * -1.0,
        }
    }
}

/// Scene graph operations the marker needs.
pub trait SceneHost {
    /// Host-side handle of an inserted mesh.
    type Handle: Copy + std::fmt::Debug;

    /// Build and add a mesh.
    fn insert(&mut self, mesh: MarkerMesh) -> Self::Handle;
    /// Move a mesh.
    fn set_position(&mut self, handle: Self::Handle, position: Vec3);
    /// Rebind a mesh's texture.
    fn set_texture(&mut self, handle: Self::Handle, texture: MarkerTexture);
    /// Show a sub-region of the bound texture.
    fn set_texture_window(&mut self, handle: Self::Handle, window: TextureWindow);
    /// Orient a mesh.
    fn orient(&mut self, handle: Self::Handle, pose: BillboardPose);
    /// Detach a mesh.
    fn remove(&mut self, handle: Self::Handle);
}

#[cfg(test)]
#[path = "../../tests/unit/marker/scene.rs"]
mod tests;
