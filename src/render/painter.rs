use kurbo::Shape;

use crate::foundation::core::{BezPath, Canvas, Point, Rect, Rgba8Premul};
use crate::foundation::error::ChartResult;
use crate::render::surface::PixelBuffer;
use crate::render::text::{LabelEngine, LabelLayout, first_baseline, label_width};

const CIRCLE_TOLERANCE: f64 = 0.05;

/// Immediate-mode drawing onto one CPU surface.
///
/// Lines are filled shapes: axis-aligned lines become 1 px rectangles
/// centered on the given coordinate, other lines become quads.
pub(crate) struct Painter {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
    labels: Option<LabelEngine>,
}

impl Painter {
    pub(crate) fn new(canvas: Canvas) -> ChartResult<Self> {
        let (width, height) = canvas.to_u16()?;
        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(Self {
            ctx,
            width,
            height,
            labels: None,
        })
    }

    fn set_color(&mut self, color: Rgba8Premul) {
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
    }

    pub(crate) fn fill_rect(&mut self, rect: Rect, color: Rgba8Premul) {
        let rect = rect.abs();
        if rect.area() <= 0.0 {
            return;
        }
        self.set_color(color);
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    pub(crate) fn hline(&mut self, x0: f64, x1: f64, y: f64, color: Rgba8Premul) {
        self.fill_rect(Rect::new(x0, y - 0.5, x1, y + 0.5), color);
    }

    pub(crate) fn vline(&mut self, x: f64, y0: f64, y1: f64, color: Rgba8Premul) {
        self.fill_rect(Rect::new(x - 0.5, y0, x + 0.5, y1), color);
    }

    /// Butt-capped line of `width` from `from` to `to`.
    pub(crate) fn line(&mut self, from: Point, to: Point, width: f64, color: Rgba8Premul) {
        let dir = to - from;
        let len = dir.hypot();
        if len <= 0.0 || width <= 0.0 {
            return;
        }
        let normal = dir.turn_90() * (width / 2.0 / len);
        self.polygon(
            &[from + normal, to + normal, to - normal, from - normal],
            color,
        );
    }

    pub(crate) fn circle(&mut self, center: Point, radius: f64, color: Rgba8Premul) {
        if radius <= 0.0 {
            return;
        }
        let path = kurbo::Circle::new(center, radius).to_path(CIRCLE_TOLERANCE);
        self.fill_path(&path, color);
    }

    pub(crate) fn polygon(&mut self, points: &[Point], color: Rgba8Premul) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut path = BezPath::new();
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        path.close_path();
        self.fill_path(&path, color);
    }

    pub(crate) fn fill_path(&mut self, path: &BezPath, color: Rgba8Premul) {
        self.set_color(color);
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    /// Label text with its left edge at `origin.x` and baseline at `origin.y`.
    pub(crate) fn text(
        &mut self,
        text: &str,
        origin: Point,
        color: Rgba8Premul,
    ) -> ChartResult<()> {
        let layout = self.labels()?.layout(text, color);
        self.draw_label(&layout, origin);
        Ok(())
    }

    /// Like [`Painter::text`] but with the right edge at `origin.x`.
    pub(crate) fn text_right(
        &mut self,
        text: &str,
        origin: Point,
        color: Rgba8Premul,
    ) -> ChartResult<()> {
        let layout = self.labels()?.layout(text, color);
        let left = origin.x - label_width(&layout);
        self.draw_label(&layout, Point::new(left, origin.y));
        Ok(())
    }

    fn labels(&mut self) -> ChartResult<&mut LabelEngine> {
        let engine = match self.labels.take() {
            Some(engine) => engine,
            None => LabelEngine::new()?,
        };
        Ok(self.labels.insert(engine))
    }

    fn draw_label(&mut self, layout: &LabelLayout, origin: Point) {
        let Self { ctx, labels, .. } = self;
        let Some(engine) = labels.as_ref() else {
            return;
        };
        let top = origin.y - first_baseline(layout);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, top)));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(engine.font())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    pub(crate) fn finish(mut self) -> PixelBuffer {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        PixelBuffer::from_pixmap(&pixmap)
    }
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
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
#[path = "../../tests/unit/render/painter.rs"]
mod tests;
