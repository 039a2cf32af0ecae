// File: crates/area-chart-core/src/svg.rs
// Summary: Serialize a Scene to a standalone SVG document.

use std::path::Path;

use crate::error::Result;
use crate::geometry::Point;
use crate::scene::{Color, RenderCommand, Scene, Stroke, TextAnchor};

/// Render `scene` as SVG markup. Translations become nested `<g>` groups, clips become `<clipPath>`s.
pub fn to_svg(scene: &Scene) -> String {
    let mut defs = String::new();
    let mut body = String::new();
    let mut clip_id = 0usize;
    let mut depth = 1usize;

    for command in scene.commands() {
        let indent = "  ".repeat(depth);
        let element = match command {
            RenderCommand::PushTranslate { dx, dy } => {
                depth += 1;
                format!("<g transform=\"translate({} {})\">", num(*dx), num(*dy))
            }
            RenderCommand::PushClip(rect) => {
                clip_id += 1;
                depth += 1;
                defs.push_str(&format!(
                    "    <clipPath id=\"clip{clip_id}\"><rect{}/></clipPath>\n",
                    rect_attrs(rect.x, rect.y, rect.width, rect.height),
                ));
                format!("<g clip-path=\"url(#clip{clip_id})\">")
            }
            RenderCommand::PopTranslate | RenderCommand::PopClip => {
                depth = depth.saturating_sub(1).max(1);
                body.push_str(&format!("{}</g>\n", "  ".repeat(depth)));
                continue;
            }
            RenderCommand::Rect { rect, fill, stroke } => format!(
                "<rect{}{}{}/>",
                rect_attrs(rect.x, rect.y, rect.width, rect.height),
                fill_attrs(*fill),
                stroke.map(stroke_attrs).unwrap_or_default(),
            ),
            RenderCommand::Line { from, to, stroke } => format!(
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{}/>",
                num(from.x),
                num(from.y),
                num(to.x),
                num(to.y),
                stroke_attrs(*stroke),
            ),
            RenderCommand::Polyline { points, stroke } => format!(
                "<polyline points=\"{}\" fill=\"none\" stroke-linejoin=\"round\"{}/>",
                point_list(points),
                stroke_attrs(*stroke),
            ),
            RenderCommand::Area { points, baseline, fill } => {
                let (Some(first), Some(last)) = (points.first(), points.last()) else { continue };
                format!(
                    "<path d=\"M{} {} L{} L{} {} Z\"{}/>",
                    num(first.x),
                    num(*baseline),
                    point_list(points).replace(' ', " L"),
                    num(last.x),
                    num(*baseline),
                    fill_attrs(*fill),
                )
            }
            RenderCommand::Circle { center, radius, fill, stroke } => format!(
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{}{}/>",
                num(center.x),
                num(center.y),
                num(*radius),
                fill_attrs(*fill),
                stroke.map(stroke_attrs).unwrap_or_default(),
            ),
            RenderCommand::Text { position, text, size, color, anchor } => {
                let anchor = match anchor {
                    TextAnchor::Start => "start",
                    TextAnchor::Middle => "middle",
                    TextAnchor::End => "end",
                };
                format!(
                    "<text x=\"{}\" y=\"{}\" font-size=\"{}\" font-family=\"sans-serif\" text-anchor=\"{anchor}\"{}>{}</text>",
                    num(position.x),
                    num(position.y),
                    size,
                    fill_attrs(*color),
                    escape(text),
                )
            }
        };
        body.push_str(&indent);
        body.push_str(&element);
        body.push('\n');
    }

    let mut out = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = num(scene.width),
        h = num(scene.height),
    );
    if !defs.is_empty() {
        out.push_str(&format!("  <defs>\n{defs}  </defs>\n"));
    }
    out.push_str(&body);
    out.push_str("</svg>\n");
    out
}

pub fn write_svg(scene: &Scene, path: impl AsRef<Path>) -> Result<()> {
    std::fs::write(path, to_svg(scene))?;
    Ok(())
}

/// Compact number: at most two decimals, no trailing zeros.
fn num(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn rect_attrs(x: f64, y: f64, width: f64, height: f64) -> String {
    format!(
        " x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
        num(x),
        num(y),
        num(width.max(0.0)),
        num(height.max(0.0)),
    )
}

fn point_list(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", num(p.x), num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn fill_attrs(color: Color) -> String {
    if color.a == 0 {
        return " fill=\"none\"".to_string();
    }
    if color.a == 255 {
        return format!(" fill=\"{}\"", color.to_hex_rgb());
    }
    format!(" fill=\"{}\" fill-opacity=\"{:.3}\"", color.to_hex_rgb(), color.opacity())
}

fn stroke_attrs(stroke: Stroke) -> String {
    let mut out = format!(" stroke=\"{}\" stroke-width=\"{}\"", stroke.color.to_hex_rgb(), stroke.width);
    if stroke.color.a != 255 {
        out.push_str(&format!(" stroke-opacity=\"{:.3}\"", stroke.color.opacity()));
    }
    if let Some((on, off)) = stroke.dash {
        out.push_str(&format!(" stroke-dasharray=\"{on} {off}\""));
    }
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
