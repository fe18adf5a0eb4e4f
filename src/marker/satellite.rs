use std::sync::Arc;

use crate::animator::FrameAnimator;
use crate::atlas::generator::generate_atlas;
use crate::atlas::sprite::SpriteAtlas;
use crate::foundation::core::{FrameIndex, Vec3};
use crate::foundation::error::{SatmarkError, SatmarkResult};
use crate::marker::hooks::RemovalHooks;
use crate::marker::opts::{AppearanceChange, SatelliteOpts, SatelliteOptsPatch};
use crate::marker::scene::{
    GlobeProjection, MarkerMesh, MarkerTexture, SceneHost, TEXTURE_CHANGED, TEXTURE_OWN,
    TEXTURE_SHARED, Tilt,
};

/// Where a new marker's atlas comes from.
#[derive(Clone, Debug, Default)]
pub enum AtlasSource {
    /// Rasterize a fresh atlas from the marker's options.
    #[default]
    Generate,
    /// Reuse an atlas built elsewhere.
    Shared {
        /// The shared atlas.
        atlas: Arc<SpriteAtlas>,
        /// Drive the texture window from this marker's own animator. When `false` the texture
        /// is left as-is for the host to animate.
        animate: bool,
    },
}

/// An animated marker attached to a globe point.
///
/// Owns its atlas and animator; the scene owns the mesh, addressed through a handle.
pub struct Satellite<H: SceneHost> {
    lat: f64,
    lon: f64,
    altitude: f64,
    surface: Vec3,
    tilt: Tilt,
    opts: SatelliteOpts,
    atlas: Arc<SpriteAtlas>,
    animator: Option<FrameAnimator>,
    texture_name: &'static str,
    handle: H::Handle,
    on_remove: RemovalHooks,
}

impl<H: SceneHost> Satellite<H> {
    /// Build a marker and insert its mesh into `scene`.
    ///
    /// `opts` is applied over the defaults. Atlas generation errors surface before the scene is
    /// touched.
    #[tracing::instrument(skip(scene, projection, opts, source))]
    pub fn create(
        scene: &mut H,
        projection: &impl GlobeProjection,
        lat: f64,
        lon: f64,
        altitude: f64,
        opts: &SatelliteOptsPatch,
        source: AtlasSource,
    ) -> SatmarkResult<Self> {
        if !(lat.is_finite() && lon.is_finite() && altitude.is_finite()) {
            return Err(SatmarkError::invalid_argument(format!(
                "satellite coordinates must be finite: lat={lat} lon={lon} altitude={altitude}"
            )));
        }
        let opts = opts.resolve();
        if !(opts.size.is_finite() && opts.size > 0.0) {
            return Err(SatmarkError::invalid_argument(format!(
                "satellite size must be finite and > 0, got {}",
                opts.size
            )));
        }

        let (atlas, animator, texture_name) = match source {
            AtlasSource::Generate => {
                let atlas = Arc::new(generate_atlas(&opts.to_animation_config())?);
                let animator = FrameAnimator::for_atlas(&atlas)?;
                (atlas, Some(animator), TEXTURE_OWN)
            }
            AtlasSource::Shared {
                atlas,
                animate: true,
            } => {
                let animator = FrameAnimator::for_atlas(&atlas)?;
                (atlas, Some(animator), TEXTURE_SHARED)
            }
            AtlasSource::Shared {
                atlas,
                animate: false,
            } => (atlas, None, TEXTURE_SHARED),
        };

        let surface = projection.project(lat, lon);
        let mesh = MarkerMesh::new(
            lat,
            lon,
            opts.size,
            surface.scale(altitude),
            MarkerTexture {
                name: texture_name,
                atlas: Arc::clone(&atlas),
            },
            animator.as_ref().map(FrameAnimator::texture_window),
        );
        let handle = scene.insert(mesh);
        tracing::debug!(?handle, texture = texture_name, "inserted satellite mesh");

        Ok(Self {
            lat,
            lon,
            altitude,
            surface,
            tilt: Tilt::new(lat, lon),
            opts,
            atlas,
            animator,
            texture_name,
            handle,
            on_remove: RemovalHooks::new(),
        })
    }

    /// Move the marker to a new altitude above the same globe point.
    pub fn change_altitude(&mut self, scene: &mut H, altitude: f64) -> SatmarkResult<()> {
        if !altitude.is_finite() {
            return Err(SatmarkError::invalid_argument(format!(
                "altitude must be finite, got {altitude}"
            )));
        }
        self.altitude = altitude;
        scene.set_position(self.handle, self.position());
        Ok(())
    }

    /// Regenerate the atlas with new appearance options.
    ///
    /// The new atlas and animator are built before anything is swapped; on error the marker keeps
    /// its current appearance.
    pub fn change_appearance(
        &mut self,
        scene: &mut H,
        change: AppearanceChange,
    ) -> SatmarkResult<()> {
        let opts = SatelliteOptsPatch::from(change).apply(&self.opts);
        let atlas = Arc::new(generate_atlas(&opts.to_animation_config())?);
        let mut animator = FrameAnimator::for_atlas(&atlas)?;
        if let Some(prev) = &self.animator {
            animator.advance(prev.elapsed_ms())?;
        }
        tracing::debug!(
            num_waves = opts.num_waves,
            loop_start = atlas.timing().loop_start_frame,
            "regenerated satellite atlas"
        );

        scene.set_texture(
            self.handle,
            MarkerTexture {
                name: TEXTURE_CHANGED,
                atlas: Arc::clone(&atlas),
            },
        );
        scene.set_texture_window(self.handle, animator.texture_window());

        self.opts = opts;
        self.atlas = atlas;
        self.animator = Some(animator);
        self.texture_name = TEXTURE_CHANGED;
        Ok(())
    }

    /// Face the camera and advance the animation to `render_time_ms`.
    ///
    /// Returns the visible frame, or `None` for a static shared atlas.
    pub fn tick(
        &mut self,
        scene: &mut H,
        camera_position: Vec3,
        camera_angle: f64,
        render_time_ms: f64,
    ) -> SatmarkResult<Option<FrameIndex>> {
        scene.orient(self.handle, self.tilt.pose(camera_position, camera_angle));

        let Some(animator) = self.animator.as_mut() else {
            return Ok(None);
        };
        let prev = animator.current_frame();
        let frame = animator.advance(render_time_ms)?;
        if frame != prev {
            scene.set_texture_window(self.handle, animator.texture_window());
        }
        Ok(Some(frame))
    }

    /// Register a callback to run when the marker is removed.
    pub fn on_remove(&mut self, hook: impl FnOnce() + 'static) {
        self.on_remove.push(hook);
    }

    /// Detach the mesh and run removal callbacks in registration order.
    pub fn remove(self, scene: &mut H) {
        scene.remove(self.handle);
        tracing::debug!(handle = ?self.handle, hooks = self.on_remove.len(), "removed satellite");
        self.on_remove.run();
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Altitude multiplier applied to the surface point.
    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    /// Current scene position.
    pub fn position(&self) -> Vec3 {
        self.surface.scale(self.altitude)
    }

    /// Resolved appearance options.
    pub fn opts(&self) -> &SatelliteOpts {
        &self.opts
    }

    /// The bound atlas.
    pub fn atlas(&self) -> &Arc<SpriteAtlas> {
        &self.atlas
    }

    /// The marker's own animator, if it drives its texture.
    pub fn animator(&self) -> Option<&FrameAnimator> {
        self.animator.as_ref()
    }

    /// Name of the bound texture.
    pub fn texture_name(&self) -> &'static str {
        self.texture_name
    }

    /// Host handle of the mesh.
    pub fn handle(&self) -> H::Handle {
        self.handle
    }

    /// Tilt constants for billboarding.
    pub fn tilt(&self) -> Tilt {
        self.tilt
    }
}

impl<H: SceneHost> std::fmt::Display for Satellite<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}_{}", self.lat, self.lon, self.altitude)
    }
}

impl<H: SceneHost> std::fmt::Debug for Satellite<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Satellite")
            .field("lat", &self.lat)
            .field("lon", &self.lon)
            .field("altitude", &self.altitude)
            .field("texture_name", &self.texture_name)
            .field("handle", &self.handle)
            .field("on_remove", &self.on_remove)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/marker/satellite.rs"]
mod tests;
