use std::f32::consts::TAU;

use eframe::egui::{Pos2, Rect, Vec2, pos2, vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::adjacency::Adjacency;
use super::geometry::fix_position_velocity;
use super::node::Node;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub natural_length: f32,
    pub repulsion: f32,
    pub spring: f32,
    pub center_pull: f32,
    pub time_step: f32,
    pub sub_steps: usize,
    pub resistance: f32,
    pub min_separation: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            natural_length: 300.0,
            repulsion: 0.2,
            spring: 0.175,
            center_pull: 0.5,
            time_step: 0.005,
            sub_steps: 10,
            resistance: 0.995,
            min_separation: 1.0,
        }
    }
}

pub(super) fn step_physics(
    nodes: &mut [Node],
    adjacency: &Adjacency,
    viewport: Rect,
    config: &LayoutConfig,
    forces: &mut Vec<Vec2>,
) {
    let node_count = nodes.len();
    let center = viewport.center();
    let natural_length = config.natural_length.max(1.0);
    let natural_length_sq = natural_length * natural_length;
    let min_separation = config.min_separation.max(f32::EPSILON);
    let min_separation_sq = min_separation * min_separation;
    let dt = config.time_step;

    for _ in 0..config.sub_steps.max(1) {
        forces.clear();
        forces.resize(node_count, Vec2::ZERO);

        for (me, force) in forces.iter_mut().enumerate() {
            if !nodes[me].auto_layout {
                continue;
            }

            let position = nodes[me].position;
            let to_center = center - position;
            *force += config.center_pull * to_center.length() * to_center / natural_length;

            for (other, other_node) in nodes.iter().enumerate() {
                if me == other {
                    continue;
                }

                let mut relative = other_node.position - position;
                let mut distance_sq = relative.length_sq();
                if distance_sq < min_separation_sq {
                    relative = separation_fallback(me, other, relative) * min_separation;
                    distance_sq = min_separation_sq;
                }

                *force -= config.repulsion * natural_length_sq * relative / distance_sq;

                if adjacency.is_linked(me, other) {
                    *force += config.spring * distance_sq.sqrt() * relative / natural_length;
                }
            }
        }

        for (node, force) in nodes.iter_mut().zip(forces.iter()) {
            if !node.auto_layout {
                node.velocity = Vec2::ZERO;
                continue;
            }

            let (position, velocity) = fix_position_velocity(
                node.position + node.velocity * dt,
                node.velocity + *force * dt,
                node.scope(viewport),
            );
            node.position = position;
            node.velocity = velocity * config.resistance;
        }
    }
}

fn separation_fallback(me: usize, other: usize, relative: Vec2) -> Vec2 {
    if relative.length_sq() > 1e-12 {
        return relative.normalized();
    }

    let (low, high) = (me.min(other), me.max(other));
    let angle = ((low as f32) * 0.618_034 + (high as f32) * 0.414_214) * TAU;
    let direction = vec2(angle.cos(), angle.sin());
    if me < other { direction } else { -direction }
}

pub(super) fn respawn_non_finite<R: Rng + ?Sized>(
    nodes: &mut [Node],
    viewport: Rect,
    rng: &mut R,
) -> usize {
    let mut respawned = 0;
    for (index, node) in nodes.iter_mut().enumerate() {
        if node.is_finite() {
            continue;
        }

        let scope = node.scope(viewport);
        let candidate = random_point(rng, scope);
        node.position = fix_position_velocity(candidate, Vec2::ZERO, scope).0;
        node.velocity = Vec2::ZERO;
        respawned += 1;
        warn!(index, name = %node.name, "respawned node with non-finite physics state");
    }
    respawned
}

fn random_point<R: Rng + ?Sized>(rng: &mut R, rect: Rect) -> Pos2 {
    let center = rect.center();
    let x = if rect.min.x < rect.max.x {
        rng.random_range(rect.min.x..=rect.max.x)
    } else {
        center.x
    };
    let y = if rect.min.y < rect.max.y {
        rng.random_range(rect.min.y..=rect.max.y)
    } else {
        center.y
    };
    pos2(x, y)
}
