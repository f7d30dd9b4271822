use eframe::egui::{Align2, Color32, Pos2, Rect, vec2};

use super::adjacency::{Adjacency, EdgeMarker};
use super::geometry::{Segment, cutoff_segment};
use super::gesture::InteractionMode;
use super::node::Node;

const RING_THICKNESS: f32 = 5.0;
const LINK_THICKNESS: f32 = 3.0;
const LINK_HEAD: f32 = 20.0;
const PREVIEW_HEAD: f32 = 15.0;
const NAME_SIZE: f32 = 14.0;
const GLYPH_SIZE: f32 = 32.0;
const DEAD_TINT: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 180);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blend {
    Normal,
    Additive,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    CircleOutline {
        center: Pos2,
        radius: f32,
        thickness: f32,
        color: Color32,
    },
    FilledRect {
        rect: Rect,
        color: Color32,
        blend: Blend,
    },
    Arrow {
        segment: Segment,
        thickness: f32,
        head_size: f32,
        color: Color32,
    },
    Line {
        segment: Segment,
        thickness: f32,
        color: Color32,
    },
    Portrait {
        node: usize,
        rect: Rect,
        tint: Option<Color32>,
    },
    Text {
        text: String,
        position: Pos2,
        align: Align2,
        size: f32,
        color: Color32,
    },
}

#[derive(Clone, Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

fn marker_color(marker: EdgeMarker) -> Color32 {
    match marker {
        EdgeMarker::Black => Color32::BLACK,
        EdgeMarker::White | EdgeMarker::None => Color32::WHITE,
    }
}

pub(super) fn build(
    nodes: &[Node],
    adjacency: &Adjacency,
    mode: &InteractionMode,
    pointer: Pos2,
) -> DrawList {
    let mut list = DrawList::default();

    for (index, node) in nodes.iter().enumerate() {
        push_node(&mut list, index, node);
    }

    for (from, to, marker) in adjacency.edges() {
        let (Some(source), Some(target)) = (nodes.get(from), nodes.get(to)) else {
            continue;
        };
        if let Some(segment) = cutoff_segment(
            source.position,
            target.position,
            source.radius(),
            target.radius(),
        ) {
            list.push(DrawCommand::Arrow {
                segment,
                thickness: LINK_THICKNESS,
                head_size: LINK_HEAD,
                color: marker_color(marker),
            });
        }
    }

    match mode {
        InteractionMode::DrawingLink { from } => {
            if let Some(source) = nodes.get(*from)
                && !source.contains(pointer)
                && let Some(segment) =
                    cutoff_segment(source.position, pointer, source.radius(), 0.0)
            {
                list.push(DrawCommand::Arrow {
                    segment,
                    thickness: LINK_THICKNESS,
                    head_size: PREVIEW_HEAD,
                    color: Color32::from_rgba_unmultiplied(255, 255, 255, 128),
                });
            }
        }
        InteractionMode::MenuOpen(menu) => {
            if let Some(node) = nodes.get(menu.node()) {
                menu.draw(node, pointer, &mut list);
            }
        }
        InteractionMode::ErasingLink { anchor } => {
            list.push(DrawCommand::Line {
                segment: Segment::new(*anchor, pointer),
                thickness: LINK_THICKNESS,
                color: Color32::from_rgba_unmultiplied(255, 0, 0, 128),
            });
        }
        InteractionMode::Idle | InteractionMode::Moving { .. } => {}
    }

    list
}

fn push_node(list: &mut DrawList, index: usize, node: &Node) {
    list.push(DrawCommand::CircleOutline {
        center: node.position,
        radius: node.radius(),
        thickness: RING_THICKNESS,
        color: node.role.ring_color(),
    });

    let portrait = node.portrait_rect();
    list.push(DrawCommand::Portrait {
        node: index,
        rect: portrait,
        tint: node.life.is_dead().then_some(DEAD_TINT),
    });

    if let Some(glyph) = node.life.glyph() {
        list.push(DrawCommand::Text {
            text: glyph.to_owned(),
            position: portrait.right_bottom(),
            align: Align2::RIGHT_BOTTOM,
            size: GLYPH_SIZE,
            color: Color32::RED,
        });
    }

    list.push(DrawCommand::Text {
        text: node.name.clone(),
        position: portrait.min + vec2(1.0, 2.0),
        align: Align2::LEFT_TOP,
        size: NAME_SIZE,
        color: Color32::BLACK,
    });
    list.push(DrawCommand::Text {
        text: node.name.clone(),
        position: portrait.min,
        align: Align2::LEFT_TOP,
        size: NAME_SIZE,
        color: if node.highlighted {
            Color32::RED
        } else {
            Color32::WHITE
        },
    });
}
