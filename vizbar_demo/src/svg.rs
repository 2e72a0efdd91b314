// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An SVG document as a drawing surface.

use std::fmt::Write as _;

use kurbo::Size;
use peniko::Brush;
use vizbar_core::{
    Group, MarkPayload, RectPayload, RulePayload, Surface, TextAnchor, TextBaseline, TextPayload,
};

/// Accumulates committed groups as SVG `<g>` elements.
#[derive(Debug, Default)]
pub(crate) struct SvgSurface {
    size: Size,
    body: String,
}

impl SvgSurface {
    pub(crate) fn to_svg_string(&self) -> String {
        let (w, h) = (self.size.width, self.size.height);
        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" class="visual-svg-container" "#);
        let _ = writeln!(out, r#"viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#);
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self) {
        self.body.clear();
    }

    fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    fn draw_group(&mut self, group: &Group) {
        let out = &mut self.body;
        let _ = write!(
            out,
            r#"<g class="{}" transform="translate({},{})""#,
            group.class, group.offset.x, group.offset.y
        );
        let style = &group.style;
        if let Some(fill) = &style.fill {
            write_paint_attr(out, "fill", fill);
        }
        if let Some(stroke) = &style.stroke {
            write_paint_attr(out, "stroke", stroke);
        }
        if let Some(w) = style.stroke_width {
            let _ = write!(out, r#" stroke-width="{w}""#);
        }
        if let Some(text) = &style.text {
            let _ = write!(
                out,
                r#" font-size="{}" font-family="{}""#,
                text.font_size,
                escape_xml(text.font_family.as_css_family())
            );
        }
        out.push_str(">\n");

        for mark in group.marks_in_paint_order() {
            match &mark.payload {
                MarkPayload::Rect(r) => write_rect(out, r),
                MarkPayload::Rule(r) => write_rule(out, r),
                MarkPayload::Text(t) => write_text(out, t, style.text_fill.as_ref()),
            }
        }
        out.push_str("</g>\n");
    }
}

fn write_rect(out: &mut String, r: &RectPayload) {
    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
        r.rect.x0,
        r.rect.y0,
        r.rect.width(),
        r.rect.height(),
    );
    out.push_str("/>\n");
}

fn write_rule(out: &mut String, r: &RulePayload) {
    let _ = write!(
        out,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
        r.line.p0.x, r.line.p0.y, r.line.p1.x, r.line.p1.y
    );
    if let Some(stroke) = &r.stroke {
        write_paint_attr(out, "stroke", stroke);
    }
    if let Some(w) = r.stroke_width {
        let _ = write!(out, r#" stroke-width="{w}""#);
    }
    if !r.dash.is_empty() {
        let dash: Vec<String> = r.dash.iter().map(f64::to_string).collect();
        let _ = write!(out, r#" stroke-dasharray="{}""#, dash.join(" "));
    }
    out.push_str("/>\n");
}

fn write_text(out: &mut String, t: &TextPayload, text_fill: Option<&Brush>) {
    let baseline = match t.baseline {
        TextBaseline::Middle => "middle",
        TextBaseline::Alphabetic => "alphabetic",
        TextBaseline::Hanging => "hanging",
        TextBaseline::Ideographic => "ideographic",
    };
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" dominant-baseline="{}""#,
        t.pos.x, t.pos.y, baseline
    );
    out.push_str(match t.anchor {
        TextAnchor::Start => r#" text-anchor="start""#,
        TextAnchor::Middle => r#" text-anchor="middle""#,
        TextAnchor::End => r#" text-anchor="end""#,
    });
    // Group stroke and fill target rules and rects; text names its own paint.
    out.push_str(r#" stroke="none""#);
    if let Some(fill) = text_fill {
        write_paint_attr(out, "fill", fill);
    }
    out.push('>');
    out.push_str(&escape_xml(&t.text));
    out.push_str("</text>\n");
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, fill_opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

#[cfg(test)]
mod tests {
    use kurbo::{Line, Rect};
    use peniko::color::palette::css;
    use vizbar_core::{GroupStyle, Mark, MarkId, Scene, TextStyle};

    use super::*;

    #[test]
    fn groups_become_translated_g_elements() {
        let mut scene = Scene::new(Size::new(200.0, 100.0));
        let mut bars = Group::new("data-bars", (75.0, 10.0))
            .with_style(GroupStyle::default().with_fill(css::RED));
        bars.push(
            Mark::builder(MarkId(1))
                .rect(Rect::new(5.0, 20.0, 15.0, 90.0))
                .build(),
        );
        scene.push_group(bars);

        let mut svg = SvgSurface::default();
        scene.commit(&mut svg);
        let s = svg.to_svg_string();
        assert!(s.contains(r#"viewBox="0 0 200 100""#));
        assert!(s.contains(
            r##"<g class="data-bars" transform="translate(75,10)" fill="#ff0000">"##
        ));
        assert!(s.contains(r#"<rect x="5" y="20" width="10" height="70"/>"#));
    }

    #[test]
    fn dashed_rules_and_escaped_labels() {
        let mut scene = Scene::new(Size::new(100.0, 100.0));
        let mut g = Group::new("axis", (0.0, 0.0))
            .with_style(GroupStyle::default().with_text(TextStyle::new(12.0), css::BLACK));
        g.push(
            Mark::builder(MarkId(1))
                .rule(Line::new((0.0, 5.0), (90.0, 5.0)))
                .stroke(css::BLACK)
                .stroke_width(2.0)
                .dash([8.0, 4.0])
                .build(),
        );
        g.push(
            Mark::builder(MarkId(2))
                .text((1.0, 2.0), "R&D")
                .anchor(TextAnchor::Middle)
                .build(),
        );
        scene.push_group(g);

        let mut svg = SvgSurface::default();
        scene.commit(&mut svg);
        let s = svg.to_svg_string();
        assert!(s.contains(r#"stroke-dasharray="8 4""#));
        assert!(s.contains(r#"font-size="12" font-family="sans-serif""#));
        assert!(s.contains(r##"stroke="none" fill="#000000">R&amp;D</text>"##));
    }

    #[test]
    fn labels_do_not_inherit_the_axis_stroke() {
        let mut scene = Scene::new(Size::new(100.0, 100.0));
        let mut g = Group::new("y-axis", (75.0, 10.0)).with_style(
            GroupStyle::default()
                .with_stroke(css::BLACK, 1.0)
                .with_text(TextStyle::new(12.0), css::GRAY),
        );
        g.push(
            Mark::builder(MarkId(1))
                .rule(Line::new((-6.0, 40.0), (0.0, 40.0)))
                .build(),
        );
        g.push(Mark::builder(MarkId(2)).text((-9.0, 40.0), "20").build());
        scene.push_group(g);

        let mut svg = SvgSurface::default();
        scene.commit(&mut svg);
        let s = svg.to_svg_string();
        assert!(s.contains(r##"stroke="#000000" stroke-width="1""##));
        assert!(s.contains(r#"<line x1="-6" y1="40" x2="0" y2="40"/>"#));
        let label = s
            .lines()
            .find(|l| l.starts_with("<text"))
            .expect("label element");
        assert!(label.contains(r#"stroke="none""#));
        assert!(label.ends_with(">20</text>"));
    }

    #[test]
    fn clear_drops_previous_content() {
        let mut svg = SvgSurface::default();
        let mut scene = Scene::new(Size::new(10.0, 10.0));
        scene.push_group(Group::new("a", (0.0, 0.0)));
        scene.commit(&mut svg);
        svg.clear();
        assert!(!svg.to_svg_string().contains("<g"));
    }
}
