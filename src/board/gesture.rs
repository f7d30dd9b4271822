use eframe::egui::{Pos2, Rect, Vec2};

use super::adjacency::{Adjacency, EdgeMarker};
use super::geometry::{Segment, cutoff_segment, fix_position_velocity};
use super::input::InputSnapshot;
use super::menu::{ContextMenu, MenuButton};
use super::node::Node;

/// The pointer gesture in progress. Leaving any variant goes straight back to
/// `Idle`, so no state from a finished gesture can leak into the next one.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum InteractionMode {
    #[default]
    Idle,
    DrawingLink {
        from: usize,
    },
    Moving {
        index: usize,
    },
    ErasingLink {
        anchor: Pos2,
    },
    MenuOpen(ContextMenu),
}

impl InteractionMode {
    #[cfg(test)]
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionMode::Idle)
    }

    pub fn label(&self) -> &'static str {
        match self {
            InteractionMode::Idle => "idle",
            InteractionMode::DrawingLink { .. } => "drawing link",
            InteractionMode::Moving { .. } => "moving",
            InteractionMode::ErasingLink { .. } => "erasing",
            InteractionMode::MenuOpen(_) => "menu",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    MoveStarted { index: usize },
    MoveFinished { index: usize },
    LinkStarted { from: usize },
    LinkSet { from: usize, to: usize, marker: EdgeMarker },
    LinkAbandoned { from: usize },
    EraseStarted { anchor: Pos2 },
    LinksErased { pairs: usize },
    MenuOpened { index: usize },
    MenuButtonPressed { index: usize, button: MenuButton },
    MenuClosed { index: usize },
}

impl GestureEvent {
    pub fn describe(&self, nodes: &[Node]) -> String {
        let name = move |index: usize| nodes.get(index).map_or("?", |node| node.name.as_str());
        match *self {
            GestureEvent::MoveStarted { index } => format!("moving {}", name(index)),
            GestureEvent::MoveFinished { index } => format!("moved {}", name(index)),
            GestureEvent::LinkStarted { from } => format!("result from {}", name(from)),
            GestureEvent::LinkSet { from, to, marker } => {
                format!("{} → {}: {}", name(from), name(to), marker.label())
            }
            GestureEvent::LinkAbandoned { from } => format!("no target for {}", name(from)),
            GestureEvent::EraseStarted { anchor } => {
                format!("erasing from ({:.0}, {:.0})", anchor.x, anchor.y)
            }
            GestureEvent::LinksErased { pairs } => format!("erased {pairs} link(s)"),
            GestureEvent::MenuOpened { index } => format!("menu for {}", name(index)),
            GestureEvent::MenuButtonPressed { index, button } => {
                format!("{}: {}", name(index), button.describe())
            }
            GestureEvent::MenuClosed { index } => format!("closed menu for {}", name(index)),
        }
    }
}

pub(super) fn update(
    mode: &mut InteractionMode,
    nodes: &mut [Node],
    adjacency: &mut Adjacency,
    viewport: Rect,
    input: &InputSnapshot,
) -> Option<GestureEvent> {
    let mut transition = None;
    let mut event = None;

    match mode {
        InteractionMode::Idle => {
            if let Some((next, started)) = begin_gesture(nodes, input) {
                transition = Some(next);
                event = Some(started);
            }
        }
        InteractionMode::Moving { index } => {
            let index = *index;
            if input.secondary.held
                && let Some(node) = nodes.get_mut(index)
            {
                let scope = node.scope(viewport);
                node.position = fix_position_velocity(input.pointer, Vec2::ZERO, scope).0;
            }
            if input.secondary.released || !input.secondary.held {
                transition = Some(InteractionMode::Idle);
                event = Some(GestureEvent::MoveFinished { index });
            }
        }
        InteractionMode::DrawingLink { from } => {
            let from = *from;
            if input.primary.released || !input.primary.held {
                let (next, finished) = finish_link(from, nodes, adjacency, viewport, input);
                transition = Some(next);
                event = Some(finished);
            }
        }
        InteractionMode::MenuOpen(menu) => {
            let menu = *menu;
            if let Some(button) = menu.update(nodes, input) {
                event = Some(GestureEvent::MenuButtonPressed {
                    index: menu.node(),
                    button,
                });
            }
            if input.primary.pressed && !menu.rect().contains(input.pointer) {
                transition = Some(InteractionMode::Idle);
                event = Some(GestureEvent::MenuClosed { index: menu.node() });
            }
        }
        InteractionMode::ErasingLink { anchor } => {
            if !input.primary.held {
                let eraser = Segment::new(*anchor, input.pointer);
                let pairs = erase_links(nodes, adjacency, &eraser);
                transition = Some(InteractionMode::Idle);
                event = Some(GestureEvent::LinksErased { pairs });
            }
        }
    }

    if let Some(next) = transition {
        *mode = next;
    }
    event
}

fn hit_node(nodes: &[Node], point: Pos2) -> Option<usize> {
    nodes.iter().rposition(|node| node.contains(point))
}

// Link targets are picked lowest index first.
fn release_target(nodes: &[Node], point: Pos2) -> Option<usize> {
    nodes.iter().position(|node| node.contains(point))
}

fn begin_gesture(
    nodes: &[Node],
    input: &InputSnapshot,
) -> Option<(InteractionMode, GestureEvent)> {
    if !input.primary.pressed && !input.secondary.pressed {
        return None;
    }

    if let Some(index) = hit_node(nodes, input.pointer) {
        if input.secondary.pressed {
            return Some((
                InteractionMode::Moving { index },
                GestureEvent::MoveStarted { index },
            ));
        }
        return Some((
            InteractionMode::DrawingLink { from: index },
            GestureEvent::LinkStarted { from: index },
        ));
    }

    input.primary.pressed.then(|| {
        (
            InteractionMode::ErasingLink {
                anchor: input.pointer,
            },
            GestureEvent::EraseStarted {
                anchor: input.pointer,
            },
        )
    })
}

fn finish_link(
    from: usize,
    nodes: &[Node],
    adjacency: &mut Adjacency,
    viewport: Rect,
    input: &InputSnapshot,
) -> (InteractionMode, GestureEvent) {
    match release_target(nodes, input.pointer) {
        Some(index) if index == from => (
            InteractionMode::MenuOpen(ContextMenu::open(from, input.pointer, viewport)),
            GestureEvent::MenuOpened { index: from },
        ),
        Some(to) => {
            let marker = if input.modifier_held {
                EdgeMarker::Black
            } else {
                EdgeMarker::White
            };
            adjacency.set(from, to, marker);
            (
                InteractionMode::Idle,
                GestureEvent::LinkSet { from, to, marker },
            )
        }
        None => (InteractionMode::Idle, GestureEvent::LinkAbandoned { from }),
    }
}

/// Segment an eraser stroke has to cross to remove the link between two nodes.
/// Falls back to the center line when the nodes overlap and no arrow is drawn.
fn erasable_segment(nodes: &[Node], from: usize, to: usize) -> Option<Segment> {
    let (source, target) = (nodes.get(from)?, nodes.get(to)?);
    cutoff_segment(
        source.position,
        target.position,
        source.radius(),
        target.radius(),
    )
    .or_else(|| Some(Segment::new(source.position, target.position)))
}

fn erase_links(nodes: &[Node], adjacency: &mut Adjacency, eraser: &Segment) -> usize {
    let mut crossed = adjacency
        .edges()
        .filter(|&(from, to, _)| {
            erasable_segment(nodes, from, to).is_some_and(|segment| segment.intersects(eraser))
        })
        .map(|(from, to, _)| (from.min(to), from.max(to)))
        .collect::<Vec<_>>();
    crossed.sort_unstable();
    crossed.dedup();

    for &(a, b) in &crossed {
        adjacency.clear_pair(a, b);
    }
    crossed.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::input::ButtonState;
    use eframe::egui::pos2;

    fn viewport() -> Rect {
        Rect::from_min_max(pos2(0.0, 0.0), pos2(1280.0, 720.0))
    }

    fn trio() -> Vec<Node> {
        vec![
            Node::new("A", pos2(100.0, 100.0), 30.0),
            Node::new("B", pos2(500.0, 100.0), 30.0),
            Node::new("C", pos2(300.0, 400.0), 30.0),
        ]
    }

    fn frame(
        mode: &mut InteractionMode,
        nodes: &mut [Node],
        adjacency: &mut Adjacency,
        input: InputSnapshot,
    ) -> Option<GestureEvent> {
        update(mode, nodes, adjacency, viewport(), &input)
    }

    #[test]
    fn right_press_on_node_starts_move() {
        let mut nodes = trio();
        let mut adjacency = Adjacency::new(3);
        let mut mode = InteractionMode::Idle;
        let event = frame(
            &mut mode,
            &mut nodes,
            &mut adjacency,
            InputSnapshot::at(pos2(505.0, 95.0)).with_secondary(ButtonState::press()),
        );
        assert_eq!(event, Some(GestureEvent::MoveStarted { index: 1 }));
        assert_eq!(mode, InteractionMode::Moving { index: 1 });
    }

    #[test]
    fn overlapping_nodes_pick_the_topmost() {
        let mut nodes = vec![
            Node::new("Under", pos2(200.0, 200.0), 40.0),
            Node::new("Over", pos2(220.0, 200.0), 40.0),
        ];
        let mut adjacency = Adjacency::new(2);
        let mut mode = InteractionMode::Idle;
        frame(
            &mut mode,
            &mut nodes,
            &mut adjacency,
            InputSnapshot::at(pos2(210.0, 200.0)).with_primary(ButtonState::press()),
        );
        assert_eq!(mode, InteractionMode::DrawingLink { from: 1 });
    }

    #[test]
    fn release_over_overlap_links_to_lowest_index() {
        let mut nodes = vec![
            Node::new("Under", pos2(200.0, 200.0), 40.0),
            Node::new("Over", pos2(220.0, 200.0), 40.0),
        ];
        let mut adjacency = Adjacency::new(2);
        let mut mode = InteractionMode::DrawingLink { from: 1 };
        let event = frame(
            &mut mode,
            &mut nodes,
            &mut adjacency,
            InputSnapshot::at(pos2(205.0, 200.0)).with_primary(ButtonState::release()),
        );
        assert_eq!(
            event,
            Some(GestureEvent::LinkSet {
                from: 1,
                to: 0,
                marker: EdgeMarker::White
            })
        );
        assert_eq!(adjacency.get(1, 0), EdgeMarker::White);
        assert!(mode.is_idle());
    }

    #[test]
    fn events_describe_with_character_names() {
        let nodes = trio();
        let set = GestureEvent::LinkSet {
            from: 0,
            to: 2,
            marker: EdgeMarker::Black,
        };
        assert_eq!(set.describe(&nodes), "A → C: black");
        let pressed = GestureEvent::MenuButtonPressed {
            index: 1,
            button: MenuButton::Claim(crate::board::node::Role::Hunter),
        };
        assert_eq!(pressed.describe(&nodes), "B: Hunter");
        assert_eq!(
            GestureEvent::LinksErased { pairs: 2 }.describe(&nodes),
            "erased 2 link(s)"
        );
        assert_eq!(GestureEvent::MenuOpened { index: 9 }.describe(&nodes), "menu for ?");
    }

    #[test]
    fn moving_follows_pointer_inside_scope_then_releases() {
        let mut nodes = trio();
        let mut adjacency = Adjacency::new(3);
        let mut mode = InteractionMode::Moving { index: 2 };
        nodes[2].velocity = Vec2::new(3.0, 4.0);

        frame(
            &mut mode,
            &mut nodes,
            &mut adjacency,
            InputSnapshot::at(pos2(-50.0, 360.0)).with_secondary(ButtonState::hold()),
        );
        assert_eq!(nodes[2].position, pos2(30.0, 360.0));
        assert_eq!(nodes[2].velocity, Vec2::new(3.0, 4.0));

        let event = frame(
            &mut mode,
            &mut nodes,
            &mut adjacency,
            InputSnapshot::at(pos2(600.0, 360.0)).with_secondary(ButtonState::release()),
        );
        assert_eq!(event, Some(GestureEvent::MoveFinished { index: 2 }));
        assert!(mode.is_idle());
        assert_eq!(nodes[2].position, pos2(30.0, 360.0));
    }

    #[test]
    fn erase_clears_both_directions() {
        let mut nodes = trio();
        let mut adjacency = Adjacency::new(3);
        adjacency.set(0, 1, EdgeMarker::White);
        adjacency.set(1, 0, EdgeMarker::Black);
        adjacency.set(0, 2, EdgeMarker::White);
        let mut mode = InteractionMode::ErasingLink {
            anchor: pos2(300.0, 20.0),
        };

        let event = frame(
            &mut mode,
            &mut nodes,
            &mut adjacency,
            InputSnapshot::at(pos2(300.0, 180.0)).with_primary(ButtonState::release()),
        );

        assert_eq!(event, Some(GestureEvent::LinksErased { pairs: 1 }));
        assert_eq!(adjacency.get(0, 1), EdgeMarker::None);
        assert_eq!(adjacency.get(1, 0), EdgeMarker::None);
        assert_eq!(adjacency.get(0, 2), EdgeMarker::White);
        assert!(mode.is_idle());
    }

    #[test]
    fn erasing_stays_open_while_held() {
        let mut nodes = trio();
        let mut adjacency = Adjacency::new(3);
        adjacency.set(0, 1, EdgeMarker::White);
        let mut mode = InteractionMode::ErasingLink {
            anchor: pos2(300.0, 20.0),
        };
        frame(
            &mut mode,
            &mut nodes,
            &mut adjacency,
            InputSnapshot::at(pos2(300.0, 180.0)).with_primary(ButtonState::hold()),
        );
        assert!(matches!(mode, InteractionMode::ErasingLink { .. }));
        assert_eq!(adjacency.get(0, 1), EdgeMarker::White);
    }

    #[test]
    fn overlapping_nodes_remain_erasable() {
        let mut nodes = vec![
            Node::new("A", pos2(200.0, 200.0), 40.0),
            Node::new("B", pos2(250.0, 200.0), 40.0),
        ];
        let mut adjacency = Adjacency::new(2);
        adjacency.set(1, 0, EdgeMarker::Black);
        let mut mode = InteractionMode::ErasingLink {
            anchor: pos2(225.0, 100.0),
        };
        frame(
            &mut mode,
            &mut nodes,
            &mut adjacency,
            InputSnapshot::at(pos2(225.0, 300.0)),
        );
        assert_eq!(adjacency.edge_count(), 0);
    }

    #[test]
    fn menu_closes_on_press_outside() {
        let mut nodes = trio();
        let mut adjacency = Adjacency::new(3);
        let menu = ContextMenu::open(0, pos2(600.0, 100.0), viewport());
        let mut mode = InteractionMode::MenuOpen(menu);

        frame(
            &mut mode,
            &mut nodes,
            &mut adjacency,
            InputSnapshot::at(pos2(700.0, 200.0)).with_primary(ButtonState::press()),
        );
        assert_eq!(mode, InteractionMode::MenuOpen(menu));

        let event = frame(
            &mut mode,
            &mut nodes,
            &mut adjacency,
            InputSnapshot::at(pos2(20.0, 700.0)).with_primary(ButtonState::press()),
        );
        assert_eq!(event, Some(GestureEvent::MenuClosed { index: 0 }));
        assert!(mode.is_idle());
    }
}
