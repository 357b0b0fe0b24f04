use kurbo::Shape as _;

use crate::{
    annotation::controller::AnnotationFrame,
    foundation::core::{Affine, BezPath, Point, Rect, Rgba8},
    foundation::error::{CoachMarksError, CoachMarksResult},
    indicator::controller::IndicatorFrame,
    overlay::frame::OverlayFrame,
    render::{FrameRGBA, RenderSettings},
};

// Captions are drawn as bars; glyph shaping belongs to the host.
const TEXT_BAR_COLOR: Rgba8 = Rgba8::new(60, 60, 67, 255);
const TEXT_BAR_FILL: f64 = 0.45;

/// Reference rasterizer for [`OverlayFrame`]s.
pub struct CpuRenderer {
    width: u16,
    height: u16,
    settings: RenderSettings,
    pixmap: vello_cpu::Pixmap,
}

impl CpuRenderer {
    /// Renderer producing `width` x `height` pixel frames.
    pub fn new(width: u32, height: u32, settings: RenderSettings) -> CoachMarksResult<Self> {
        let width: u16 = width
            .try_into()
            .map_err(|_| CoachMarksError::render("surface width exceeds u16"))?;
        let height: u16 = height
            .try_into()
            .map_err(|_| CoachMarksError::render("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(CoachMarksError::render("surface must be non-empty"));
        }
        Ok(Self {
            width,
            height,
            settings,
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    /// Rasterize `frame`, scaling its bounds onto the surface.
    pub fn render(&mut self, frame: &OverlayFrame) -> CoachMarksResult<FrameRGBA> {
        clear_pixmap(&mut self.pixmap, [0, 0, 0, 0]);

        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        if let Some([r, g, b, a]) = self.settings.clear_rgba {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }

        if !frame.is_blank() {
            let view = self.view_transform(frame.bounds)?;
            let alpha = frame.alpha as f32;
            if alpha < 1.0 {
                ctx.push_opacity_layer(alpha);
            }

            if let Some(mask) = &frame.mask {
                fill(&mut ctx, view, mask.path(), frame.color);
            }
            for indicator in &frame.indicators {
                draw_indicator(&mut ctx, view, indicator);
            }
            for annotation in &frame.annotations {
                draw_annotation(&mut ctx, view, annotation);
            }

            if alpha < 1.0 {
                ctx.pop_layer();
            }
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);

        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn view_transform(&self, bounds: Rect) -> CoachMarksResult<Affine> {
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Err(CoachMarksError::render("frame bounds must have positive area"));
        }
        let sx = f64::from(self.width) / bounds.width();
        let sy = f64::from(self.height) / bounds.height();
        Ok(Affine::scale_non_uniform(sx, sy) * Affine::translate(-bounds.origin().to_vec2()))
    }
}

fn draw_indicator(ctx: &mut vello_cpu::RenderContext, view: Affine, ind: &IndicatorFrame) {
    if ind.alpha <= 0.0 {
        return;
    }
    let disc = kurbo::Ellipse::from_rect(ind.rect).to_path(0.1);
    fill(
        ctx,
        view * ind.transform,
        &disc,
        Rgba8::WHITE.with_opacity(ind.alpha * 0.9),
    );
}

fn draw_annotation(ctx: &mut vello_cpu::RenderContext, view: Affine, ann: &AnnotationFrame) {
    if ann.alpha <= 0.0 {
        return;
    }
    let layout = &ann.layout;
    let white = Rgba8::WHITE.with_opacity(ann.alpha);
    fill(ctx, view, &layout.body_path(), white);
    fill(ctx, view, &layout.arrow_path(), white);

    let bar_color = TEXT_BAR_COLOR.with_opacity(ann.alpha);
    let bar_height = layout.line_height * TEXT_BAR_FILL;
    for (i, line) in layout.lines.iter().enumerate() {
        let top = layout.text_origin.y
            + layout.line_height * i as f64
            + (layout.line_height - bar_height) / 2.0;
        let bar = Rect::from_origin_size(
            Point::new(layout.text_origin.x, top),
            (line.width, bar_height),
        );
        fill(ctx, view, &bar.to_path(0.1), bar_color);
    }
}

fn fill(ctx: &mut vello_cpu::RenderContext, transform: Affine, path: &BezPath, color: Rgba8) {
    ctx.set_transform(affine_to_cpu(transform));
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
    ctx.fill_path(&bezpath_to_cpu(path));
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
