use eframe::egui::{
    Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2, vec2,
};

use crate::board::{Blend, DrawCommand, DrawList, Node, Segment};
use crate::util::{initials, stable_hue};

const BACKGROUND: Color32 = Color32::from_rgb(73, 83, 94);
const GRID_STEP: f32 = 64.0;
const PORTRAIT_PALETTE: [Color32; 6] = [
    Color32::from_rgb(196, 92, 84),
    Color32::from_rgb(214, 168, 72),
    Color32::from_rgb(118, 176, 96),
    Color32::from_rgb(72, 160, 176),
    Color32::from_rgb(96, 118, 204),
    Color32::from_rgb(170, 102, 188),
];

fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

/// Premultiplied color with zero alpha, which egui's blending turns into
/// plain addition onto the framebuffer.
fn additive(color: Color32) -> Color32 {
    Color32::from_rgba_premultiplied(color.r(), color.g(), color.b(), 0)
}

fn portrait_color(name: &str) -> Color32 {
    let hue = stable_hue(name) * PORTRAIT_PALETTE.len() as f32;
    let index = (hue as usize).min(PORTRAIT_PALETTE.len() - 1);
    let next = (index + 1) % PORTRAIT_PALETTE.len();
    blend_color(PORTRAIT_PALETTE[index], PORTRAIT_PALETTE[next], hue.fract())
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, BACKGROUND);

    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(95, 107, 120, 60));
    let mut x = rect.left() + GRID_STEP;
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += GRID_STEP;
    }

    let mut y = rect.top() + GRID_STEP;
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += GRID_STEP;
    }
}

fn paint_arrow(painter: &Painter, segment: Segment, thickness: f32, head_size: f32, color: Color32) {
    let length = segment.length();
    if length <= f32::EPSILON {
        return;
    }

    let direction = (segment.end - segment.start) / length;
    let normal = vec2(-direction.y, direction.x);
    let head = head_size.min(length);
    let base = segment.end - direction * head;

    painter.line_segment([segment.start, base], Stroke::new(thickness, color));
    painter.add(Shape::convex_polygon(
        vec![
            segment.end,
            base + normal * (head * 0.5),
            base - normal * (head * 0.5),
        ],
        color,
        Stroke::NONE,
    ));
}

fn paint_portrait(painter: &Painter, rect: Rect, node: Option<&Node>, tint: Option<Color32>) {
    let name = node.map_or("", |node| node.name.as_str());
    let rounding = rect.width() * 0.08;
    painter.rect_filled(rect, rounding, portrait_color(name));
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        initials(name),
        FontId::proportional((rect.height() * 0.38).max(8.0)),
        Color32::from_white_alpha(220),
    );

    if let Some(tint) = tint {
        painter.rect_filled(rect, rounding, tint);
    }
}

pub(super) fn paint_draw_list(painter: &Painter, offset: Vec2, list: &DrawList, nodes: &[Node]) {
    let shift = |segment: &Segment| Segment::new(segment.start + offset, segment.end + offset);

    for command in list.iter() {
        match command {
            DrawCommand::CircleOutline {
                center,
                radius,
                thickness,
                color,
            } => {
                painter.circle_stroke(*center + offset, *radius, Stroke::new(*thickness, *color));
            }
            DrawCommand::FilledRect { rect, color, blend } => {
                let color = match blend {
                    Blend::Normal => *color,
                    Blend::Additive => additive(*color),
                };
                painter.rect_filled(rect.translate(offset), 0.0, color);
            }
            DrawCommand::Arrow {
                segment,
                thickness,
                head_size,
                color,
            } => paint_arrow(painter, shift(segment), *thickness, *head_size, *color),
            DrawCommand::Line {
                segment,
                thickness,
                color,
            } => {
                let segment = shift(segment);
                painter.line_segment([segment.start, segment.end], Stroke::new(*thickness, *color));
            }
            DrawCommand::Portrait { node, rect, tint } => {
                paint_portrait(painter, rect.translate(offset), nodes.get(*node), *tint);
            }
            DrawCommand::Text {
                text,
                position,
                align,
                size,
                color,
            } => {
                painter.text(
                    *position + offset,
                    *align,
                    text,
                    FontId::proportional(*size),
                    *color,
                );
            }
        }
    }
}
