use std::f32::consts::TAU;

use eframe::egui::{Pos2, Rect, vec2};

use crate::util::stable_pair;

pub fn initial_positions(names: &[String], viewport: Rect) -> Vec<Pos2> {
    let n = names.len();
    if n == 0 {
        return Vec::new();
    }

    let center = viewport.center();
    if n == 1 {
        return vec![center];
    }

    let base_radius = viewport.size().min_elem() * 0.35;
    let jitter_scale = base_radius * 0.15;
    names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let angle = (index as f32 / n as f32) * TAU;
            let (jx, jy) = stable_pair(name);
            let radial = vec2(angle.cos(), angle.sin()) * base_radius;
            let jitter = vec2(jx, jy) * jitter_scale;
            viewport.clamp(center + radial + jitter)
        })
        .collect()
}
