// File: crates/area-chart-skia/src/lib.rs
// Summary: Paints an area-chart Scene onto a Skia CPU raster surface and encodes PNG / RGBA output.

mod text;

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use area_chart::{Color, Point, RenderCommand, Scene, Stroke};
use skia_safe as skia;
use tracing::debug;

pub use text::TextShaper;

/// Raster renderer for chart scenes.
pub struct SkiaRenderer {
    /// Fill behind the scene; the scene's own background is transparent.
    pub background: Color,
    text: TextShaper,
}

impl Default for SkiaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SkiaRenderer {
    pub fn new() -> Self {
        Self { background: Color::WHITE, text: TextShaper::new() }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Encode the scene as PNG bytes.
    pub fn render_to_png_bytes(&self, scene: &Scene) -> Result<Vec<u8>> {
        let mut surface = self.paint(scene)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render the scene to a PNG file, creating parent directories as needed.
    pub fn render_to_png(&self, scene: &Scene, output_png_path: impl AsRef<Path>) -> Result<()> {
        let path = output_png_path.as_ref();
        let bytes = self.render_to_png_bytes(scene)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir {}", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
        debug!(path = %path.display(), "png written");
        Ok(())
    }

    /// Unpremultiplied RGBA8 pixels: `(pixels, width, height, row_bytes)`.
    pub fn render_to_rgba8(&self, scene: &Scene) -> Result<(Vec<u8>, i32, i32, usize)> {
        let mut surface = self.paint(scene)?;
        let (w, h) = (surface.width(), surface.height());
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let row_bytes = w as usize * 4;
        let mut pixels = vec![0u8; row_bytes * h as usize];
        if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
            return Err(anyhow!("read pixels failed"));
        }
        Ok((pixels, w, h, row_bytes))
    }

    fn paint(&self, scene: &Scene) -> Result<skia::Surface> {
        let (w, h) = (scene.width.ceil() as i32, scene.height.ceil() as i32);
        let mut surface = skia::surfaces::raster_n32_premul((w.max(1), h.max(1)))
            .ok_or_else(|| anyhow!("failed to create raster surface"))?;
        let canvas = surface.canvas();
        canvas.clear(to_skia(self.background));
        for command in scene.commands() {
            self.draw(canvas, command);
        }
        Ok(surface)
    }

    fn draw(&self, canvas: &skia::Canvas, command: &RenderCommand) {
        match command {
            RenderCommand::PushTranslate { dx, dy } => {
                canvas.save();
                canvas.translate((*dx as f32, *dy as f32));
            }
            RenderCommand::PushClip(rect) => {
                canvas.save();
                canvas.clip_rect(to_rect(rect), skia::ClipOp::Intersect, true);
            }
            RenderCommand::PopTranslate | RenderCommand::PopClip => {
                canvas.restore();
            }
            RenderCommand::Rect { rect, fill, stroke } => {
                if fill.a > 0 {
                    canvas.draw_rect(to_rect(rect), &fill_paint(*fill));
                }
                if let Some(stroke) = stroke {
                    canvas.draw_rect(to_rect(rect), &stroke_paint(stroke));
                }
            }
            RenderCommand::Line { from, to, stroke } => {
                canvas.draw_line(to_point(*from), to_point(*to), &stroke_paint(stroke));
            }
            RenderCommand::Polyline { points, stroke } => {
                if let Some(path) = polyline(points) {
                    let mut paint = stroke_paint(stroke);
                    paint.set_stroke_join(skia::paint::Join::Round);
                    canvas.draw_path(&path, &paint);
                }
            }
            RenderCommand::Area { points, baseline, fill } => {
                let (Some(first), Some(last)) = (points.first(), points.last()) else { return };
                let mut path = skia::Path::new();
                path.move_to((first.x as f32, *baseline as f32));
                for p in points {
                    path.line_to(to_point(*p));
                }
                path.line_to((last.x as f32, *baseline as f32));
                path.close();
                canvas.draw_path(&path, &fill_paint(*fill));
            }
            RenderCommand::Circle { center, radius, fill, stroke } => {
                canvas.draw_circle(to_point(*center), *radius as f32, &fill_paint(*fill));
                if let Some(stroke) = stroke {
                    canvas.draw_circle(to_point(*center), *radius as f32, &stroke_paint(stroke));
                }
            }
            RenderCommand::Text { position, text, size, color, anchor } => {
                self.text.draw(
                    canvas,
                    text,
                    (position.x as f32, position.y as f32),
                    *size,
                    to_skia(*color),
                    *anchor,
                );
            }
        }
    }
}

// ---- helpers ----------------------------------------------------------------

fn to_skia(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn to_point(p: Point) -> skia::Point {
    skia::Point::new(p.x as f32, p.y as f32)
}

fn to_rect(r: &area_chart::Rect) -> skia::Rect {
    skia::Rect::from_xywh(r.x as f32, r.y as f32, r.width.max(0.0) as f32, r.height.max(0.0) as f32)
}

fn polyline(points: &[Point]) -> Option<skia::Path> {
    let (first, rest) = points.split_first()?;
    let mut path = skia::Path::new();
    path.move_to(to_point(*first));
    for p in rest {
        path.line_to(to_point(*p));
    }
    Some(path)
}

fn fill_paint(color: Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(to_skia(color));
    paint
}

fn stroke_paint(stroke: &Stroke) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(stroke.width);
    paint.set_color(to_skia(stroke.color));
    if let Some((on, off)) = stroke.dash {
        paint.set_path_effect(skia::PathEffect::dash(&[on, off], 0.0));
    }
    paint
}
