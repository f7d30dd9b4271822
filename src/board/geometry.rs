use eframe::egui::{Pos2, Rect, Vec2, pos2, vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Pos2,
    pub end: Pos2,
}

impl Segment {
    pub fn new(start: Pos2, end: Pos2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    pub fn intersects(&self, other: &Segment) -> bool {
        fn cross(o: Pos2, a: Pos2, b: Pos2) -> f32 {
            let oa = a - o;
            let ob = b - o;
            (oa.x * ob.y) - (oa.y * ob.x)
        }

        let (a1, a2) = (self.start, self.end);
        let (b1, b2) = (other.start, other.end);

        if a1.x.max(a2.x) < b1.x.min(b2.x)
            || b1.x.max(b2.x) < a1.x.min(a2.x)
            || a1.y.max(a2.y) < b1.y.min(b2.y)
            || b1.y.max(b2.y) < a1.y.min(a2.y)
        {
            return false;
        }

        let c1 = cross(a1, a2, b1);
        let c2 = cross(a1, a2, b2);
        let c3 = cross(b1, b2, a1);
        let c4 = cross(b1, b2, a2);

        (c1 <= 0.0 && c2 >= 0.0 || c1 >= 0.0 && c2 <= 0.0)
            && (c3 <= 0.0 && c4 >= 0.0 || c3 >= 0.0 && c4 <= 0.0)
    }
}

// Corners drop all velocity, edges only the perpendicular component.
pub fn fix_position_velocity(position: Pos2, velocity: Vec2, rect: Rect) -> (Pos2, Vec2) {
    if rect.contains(position) {
        return (position, velocity);
    }

    let clamp_x = if position.x < rect.min.x {
        Some(rect.min.x)
    } else if position.x > rect.max.x {
        Some(rect.max.x)
    } else {
        None
    };
    let clamp_y = if position.y < rect.min.y {
        Some(rect.min.y)
    } else if position.y > rect.max.y {
        Some(rect.max.y)
    } else {
        None
    };

    match (clamp_x, clamp_y) {
        (Some(x), Some(y)) => (pos2(x, y), Vec2::ZERO),
        (None, Some(y)) => (pos2(position.x, y), vec2(velocity.x, 0.0)),
        (Some(x), None) => (pos2(x, position.y), vec2(0.0, velocity.y)),
        // NaN coordinates land here; sanitization deals with them.
        (None, None) => (position, velocity),
    }
}

pub fn fix_rect_position(rect: Rect, scope: Rect) -> Pos2 {
    if scope.contains_rect(rect) {
        return rect.min;
    }

    let correction = |corner: Pos2| fix_position_velocity(corner, Vec2::ZERO, scope).0 - corner;

    for corner in [rect.left_bottom(), rect.right_top()] {
        let moved = rect.translate(correction(corner));
        if scope.contains_rect(moved) {
            return moved.min;
        }
    }

    rect.translate(correction(rect.right_bottom())).min
}

pub fn cutoff_segment(start: Pos2, end: Pos2, trim_start: f32, trim_end: f32) -> Option<Segment> {
    let delta = end - start;
    let trim = trim_start + trim_end;
    if delta.length_sq() < trim * trim {
        return None;
    }

    let length = delta.length();
    if length <= f32::EPSILON {
        return Some(Segment::new(start, end));
    }

    let direction = delta / length;
    Some(Segment::new(
        start + direction * trim_start,
        end - direction * trim_end,
    ))
}
