use std::f64::consts::TAU;

use kurbo::{Cap, Circle, Join, Point, Shape, Stroke, StrokeOpts};

use crate::atlas::choreography::{
    ArcSector, CORE_RADIUS, FramePose, PulseWedge, STROKE_WIDTH, frame_pose,
};
use crate::atlas::config::{AnimationConfig, AtlasLayout, CORE_ANCHOR_X, DerivedTiming};
use crate::atlas::sprite::SpriteAtlas;
use crate::foundation::color::Color;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::SatmarkResult;

const PATH_TOLERANCE: f64 = 0.05;

/// Rasterizes the satellite choreography into a [`SpriteAtlas`].
///
/// Holds a reusable `vello_cpu` context so regenerating an atlas of the same size does not
/// reallocate. Output depends only on the configuration.
pub struct AtlasGenerator {
    ctx: Option<vello_cpu::RenderContext>,
    stroke: Stroke,
}

impl Default for AtlasGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl AtlasGenerator {
    /// Create a generator with no cached surface.
    pub fn new() -> Self {
        Self {
            ctx: None,
            // Canvas defaults: butt caps, miter joins.
            stroke: Stroke::new(STROKE_WIDTH)
                .with_caps(Cap::Butt)
                .with_join(Join::Miter),
        }
    }

    /// Validate `config` and draw every frame of the atlas.
    ///
    /// Fails with a config error before any drawing happens; no partial atlas is returned.
    #[tracing::instrument(skip(self, config), fields(num_waves = config.num_waves))]
    pub fn generate(&mut self, config: &AnimationConfig) -> SatmarkResult<SpriteAtlas> {
        let layout = config.layout()?;
        let timing = config.timing()?;
        tracing::debug!(
            cols = layout.cols,
            rows = layout.rows,
            wave_start = timing.wave_start_frame,
            wave_interval = timing.wave_interval,
            swirl_done = timing.swirl_done_frame,
            loop_start = timing.loop_start_frame,
            "derived atlas timing"
        );

        // Surface limits were checked by `AtlasLayout::new`.
        let width = layout.width() as u16;
        let height = layout.height() as u16;
        let palette = Palette::from(config);

        let data = self.with_ctx_mut(width, height, |this, ctx| {
            for i in 0..layout.total_frames {
                let frame = FrameIndex(i);
                let pose = frame_pose(frame, &timing);
                let anchor = core_anchor(&layout, frame);
                this.draw_frame(ctx, &pose, anchor, &palette);
            }
            ctx.flush();
            let mut pixmap = vello_cpu::Pixmap::new(width, height);
            ctx.render_to_pixmap(&mut pixmap);
            Ok(pixmap.data_as_u8_slice().to_vec())
        })?;

        SpriteAtlas::from_premul_bytes(layout, timing, data)
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&Self, &mut vello_cpu::RenderContext) -> SatmarkResult<R>,
    ) -> SatmarkResult<R> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx);
        self.ctx = Some(ctx);
        out
    }

    fn draw_frame(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        pose: &FramePose,
        anchor: Point,
        palette: &Palette,
    ) {
        for sector in &pose.shield {
            self.stroke_arc(ctx, anchor, pose.shield_radius, *sector, palette.shield);
        }

        for PulseWedge { radius, alpha, .. } in &pose.pulses {
            let color = palette.wave.with_alpha_mul(*alpha);
            self.stroke_arc(ctx, anchor, *radius, PulseWedge::sector(), color);
        }

        fill_disc(ctx, anchor, CORE_RADIUS, Color::BLACK);
        self.stroke_arc(
            ctx,
            anchor,
            pose.core_radius,
            ArcSector {
                start: 0.0,
                end: TAU,
            },
            palette.core,
        );
    }

    fn stroke_arc(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        center: Point,
        radius: f64,
        sector: ArcSector,
        color: Color,
    ) {
        let sweep = sector.sweep();
        if radius <= 0.0 || sweep <= 0.0 || color.a <= 0.0 {
            return;
        }
        let outline = if sweep >= TAU {
            kurbo::stroke(
                Circle::new(center, radius).path_elements(PATH_TOLERANCE),
                &self.stroke,
                &StrokeOpts::default(),
                PATH_TOLERANCE,
            )
        } else {
            let arc = kurbo::Arc::new(center, (radius, radius), sector.start, sweep, 0.0);
            kurbo::stroke(
                arc.path_elements(PATH_TOLERANCE),
                &self.stroke,
                &StrokeOpts::default(),
                PATH_TOLERANCE,
            )
        };
        ctx.set_paint(color.to_paint());
        ctx.fill_path(&bezpath_to_cpu(&outline));
    }
}

/// Generate an atlas with a fresh [`AtlasGenerator`].
pub fn generate_atlas(config: &AnimationConfig) -> SatmarkResult<SpriteAtlas> {
    AtlasGenerator::new().generate(config)
}

/// Validate `config` without drawing anything.
pub fn check_config(config: &AnimationConfig) -> SatmarkResult<(AtlasLayout, DerivedTiming)> {
    Ok((config.layout()?, config.timing()?))
}

struct Palette {
    wave: Color,
    core: Color,
    shield: Color,
}

impl From<&AnimationConfig> for Palette {
    fn from(c: &AnimationConfig) -> Self {
        Self {
            wave: c.wave_color,
            core: c.core_color,
            shield: c.shield_color,
        }
    }
}

/// Center of the satellite body inside `frame`'s cell.
pub(crate) fn core_anchor(layout: &AtlasLayout, frame: FrameIndex) -> Point {
    let (col, row) = layout.cell_coords(frame).unwrap_or((0, 0));
    Point::new(
        f64::from(col * layout.frame_pixels) + CORE_ANCHOR_X,
        f64::from(row * layout.frame_pixels + layout.frame_pixels / 2),
    )
}

fn fill_disc(ctx: &mut vello_cpu::RenderContext, center: Point, radius: f64, color: Color) {
    let disc = Circle::new(center, radius).to_path(PATH_TOLERANCE);
    ctx.set_paint(color.to_paint());
    ctx.fill_path(&bezpath_to_cpu(&disc));
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/atlas/generator.rs"]
mod tests;
