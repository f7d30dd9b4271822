mod adjacency;
mod draw;
mod geometry;
mod gesture;
mod input;
mod menu;
mod node;
mod physics;

use eframe::egui::{Rect, Vec2};
use rand::rngs::SmallRng;
use tracing::{debug, info};

pub use adjacency::{Adjacency, EdgeMarker};
pub use draw::{Blend, DrawCommand, DrawList};
pub use geometry::Segment;
pub use gesture::{GestureEvent, InteractionMode};
pub use input::{ButtonState, InputSnapshot};
pub use node::{LifeState, Node, Role};
pub use physics::LayoutConfig;

use geometry::fix_position_velocity;
use physics::{respawn_non_finite, step_physics};

const PHYSICS_RATE_HZ: f32 = 60.0;
const MAX_PHYSICS_PASSES: u32 = 4;

pub struct Board {
    nodes: Vec<Node>,
    adjacency: Adjacency,
    mode: InteractionMode,
    last_event: Option<GestureEvent>,
    viewport: Rect,
    layout: LayoutConfig,
    continue_simulation: bool,
    physics_budget: f32,
    forces: Vec<Vec2>,
    rng: SmallRng,
}

impl Board {
    pub fn new(layout: LayoutConfig, viewport: Rect, rng: SmallRng) -> Self {
        Self {
            nodes: Vec::new(),
            adjacency: Adjacency::new(0),
            mode: InteractionMode::Idle,
            last_event: None,
            viewport,
            layout,
            continue_simulation: true,
            physics_budget: 0.0,
            forces: Vec::new(),
            rng,
        }
    }

    pub fn initialize(&mut self, nodes: Vec<Node>) {
        self.adjacency = Adjacency::new(nodes.len());
        self.nodes = nodes;
        self.contain_nodes();
        self.mode = InteractionMode::Idle;
        self.last_event = None;
        self.continue_simulation = true;
        self.physics_budget = 0.0;
        self.forces.clear();
        info!(nodes = self.nodes.len(), "board session initialized");
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    pub fn mode(&self) -> &InteractionMode {
        &self.mode
    }

    pub fn last_event(&self) -> Option<&GestureEvent> {
        self.last_event.as_ref()
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: LayoutConfig) {
        self.layout = layout;
    }

    pub fn is_simulating(&self) -> bool {
        self.continue_simulation
    }

    pub fn set_simulating(&mut self, running: bool) {
        if self.continue_simulation != running {
            info!(running, "layout simulation toggled");
        }
        self.continue_simulation = running;
        self.physics_budget = 0.0;
    }

    pub fn toggle_simulation(&mut self) {
        self.set_simulating(!self.continue_simulation);
    }

    pub fn set_highlighted(&mut self, index: usize, highlighted: bool) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.highlighted = highlighted;
        }
    }

    /// Resizes the area nodes live in, pulling every node (pinned ones too)
    /// back inside its new scope.
    pub fn set_viewport(&mut self, viewport: Rect) {
        if viewport == self.viewport {
            return;
        }

        self.viewport = viewport;
        self.contain_nodes();
    }

    fn contain_nodes(&mut self) {
        for node in &mut self.nodes {
            let (position, velocity) =
                fix_position_velocity(node.position, node.velocity, node.scope(self.viewport));
            node.position = position;
            node.velocity = velocity;
        }
    }

    pub fn tick(&mut self, input: &InputSnapshot, dt: f32) -> DrawList {
        debug_assert_eq!(self.adjacency.len(), self.nodes.len());
        respawn_non_finite(&mut self.nodes, self.viewport, &mut self.rng);

        if let Some(event) = gesture::update(
            &mut self.mode,
            &mut self.nodes,
            &mut self.adjacency,
            self.viewport,
            input,
        ) {
            debug!(?event, mode = self.mode.label(), "gesture");
            self.last_event = Some(event);
        }

        if input.toggle_simulation {
            self.toggle_simulation();
        }

        if self.continue_simulation {
            for pass in 0..self.physics_passes(dt) {
                if pass > 0 {
                    respawn_non_finite(&mut self.nodes, self.viewport, &mut self.rng);
                }
                step_physics(
                    &mut self.nodes,
                    &self.adjacency,
                    self.viewport,
                    &self.layout,
                    &mut self.forces,
                );
            }
        }

        draw::build(&self.nodes, &self.adjacency, &self.mode, input.pointer)
    }

    fn physics_passes(&mut self, dt: f32) -> u32 {
        let period = 1.0 / PHYSICS_RATE_HZ;
        self.physics_budget = (self.physics_budget + dt.max(0.0))
            .min(period * MAX_PHYSICS_PASSES as f32);

        let mut passes = 0;
        while passes < MAX_PHYSICS_PASSES && self.physics_budget + 1e-6 >= period {
            self.physics_budget -= period;
            passes += 1;
        }
        passes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{Pos2, pos2};
    use proptest::prelude::*;
    use rand::SeedableRng;

    const FRAME: f32 = 1.0 / 60.0;

    fn viewport() -> Rect {
        Rect::from_min_max(pos2(0.0, 0.0), pos2(1280.0, 720.0))
    }

    fn board_with(nodes: Vec<Node>) -> Board {
        let mut board = Board::new(
            LayoutConfig::default(),
            viewport(),
            SmallRng::seed_from_u64(3),
        );
        board.initialize(nodes);
        board
    }

    fn paused_board() -> Board {
        let mut board = board_with(vec![
            Node::new("A", pos2(200.0, 200.0), 30.0),
            Node::new("B", pos2(700.0, 200.0), 30.0),
            Node::new("C", pos2(1250.0, 690.0), 30.0),
        ]);
        board.set_simulating(false);
        board
    }

    fn drag(board: &mut Board, from: Pos2, to: Pos2, modifier: bool) {
        board.tick(
            &InputSnapshot::at(from).with_primary(ButtonState::press()),
            FRAME,
        );
        board.tick(
            &InputSnapshot::at(to).with_primary(ButtonState::hold()),
            FRAME,
        );
        let mut release = InputSnapshot::at(to).with_primary(ButtonState::release());
        if modifier {
            release = release.with_modifier();
        }
        board.tick(&release, FRAME);
    }

    fn click(board: &mut Board, at: Pos2) {
        drag(board, at, at, false);
    }

    fn open_menu(board: &mut Board, index: usize) -> menu::ContextMenu {
        let at = board.nodes()[index].position;
        click(board, at);
        match board.mode() {
            InteractionMode::MenuOpen(menu) => *menu,
            other => panic!("expected open menu, got {other:?}"),
        }
    }

    fn button_center(menu: &menu::ContextMenu, button: menu::MenuButton) -> Pos2 {
        menu.button_rect(button).expect("button exists").center()
    }

    #[test]
    fn drag_to_empty_space_changes_nothing() {
        let mut board = paused_board();
        drag(&mut board, pos2(200.0, 200.0), pos2(450.0, 500.0), false);
        assert_eq!(board.adjacency().edge_count(), 0);
        assert!(board.mode().is_idle());
    }

    #[test]
    fn drag_between_nodes_sets_marker() {
        let mut board = paused_board();
        drag(&mut board, pos2(200.0, 200.0), pos2(700.0, 210.0), false);
        assert_eq!(board.adjacency().get(0, 1), EdgeMarker::White);
        assert_eq!(board.adjacency().get(1, 0), EdgeMarker::None);

        drag(&mut board, pos2(205.0, 195.0), pos2(690.0, 200.0), true);
        assert_eq!(board.adjacency().get(0, 1), EdgeMarker::Black);
        assert!(board.mode().is_idle());
        assert_eq!(
            board.last_event(),
            Some(&GestureEvent::LinkSet {
                from: 0,
                to: 1,
                marker: EdgeMarker::Black
            })
        );
    }

    #[test]
    fn drag_back_onto_source_opens_clamped_menu() {
        let mut board = paused_board();
        let corner = pos2(1265.0, 705.0);
        drag(&mut board, pos2(1250.0, 690.0), corner, false);

        let InteractionMode::MenuOpen(menu) = *board.mode() else {
            panic!("menu should be open");
        };
        assert_eq!(menu.node(), 2);
        assert!(viewport().contains_rect(menu.rect()));
        assert_eq!(menu.rect().max, pos2(1280.0, 720.0));
        assert_eq!(board.adjacency().edge_count(), 0);
    }

    #[test]
    fn menu_claims_toggle_and_stay_exclusive() {
        let mut board = paused_board();
        let menu = open_menu(&mut board, 0);
        let medium = button_center(&menu, menu::MenuButton::Claim(Role::Medium));
        let seer = button_center(&menu, menu::MenuButton::Claim(Role::Seer));

        click(&mut board, medium);
        assert_eq!(board.nodes()[0].role, Role::Medium);
        click(&mut board, medium);
        assert_eq!(board.nodes()[0].role, Role::None);
        click(&mut board, seer);
        assert_eq!(board.nodes()[0].role, Role::Seer);
        assert!(board.nodes()[1..].iter().all(|node| node.role == Role::None));
        assert!(matches!(board.mode(), InteractionMode::MenuOpen(_)));
    }

    #[test]
    fn pin_from_menu_freezes_node() {
        let mut board = paused_board();
        let menu = open_menu(&mut board, 1);
        click(
            &mut board,
            button_center(&menu, menu::MenuButton::AutoLayout),
        );
        assert!(!board.nodes()[1].auto_layout);

        click(&mut board, pos2(20.0, 700.0));
        assert!(board.mode().is_idle());

        board.set_simulating(true);
        let before = board.nodes()[1].position;
        for _ in 0..30 {
            board.tick(&InputSnapshot::at(pos2(5.0, 5.0)), FRAME);
            assert_eq!(board.nodes()[1].position, before);
            assert_eq!(board.nodes()[1].velocity, Vec2::ZERO);
        }
        assert_ne!(board.nodes()[0].position, pos2(200.0, 200.0));
    }

    #[test]
    fn space_toggle_freezes_layout() {
        let mut board = board_with(vec![
            Node::new("A", pos2(300.0, 300.0), 30.0),
            Node::new("B", pos2(320.0, 300.0), 30.0),
        ]);
        let toggle = InputSnapshot {
            toggle_simulation: true,
            ..InputSnapshot::at(pos2(5.0, 5.0))
        };
        board.tick(&toggle, FRAME);
        assert!(!board.is_simulating());

        let frozen = board
            .nodes()
            .iter()
            .map(|node| node.position)
            .collect::<Vec<_>>();
        for _ in 0..10 {
            board.tick(&InputSnapshot::at(pos2(5.0, 5.0)), FRAME);
        }
        let after = board
            .nodes()
            .iter()
            .map(|node| node.position)
            .collect::<Vec<_>>();
        assert_eq!(frozen, after);
    }

    #[test]
    fn right_drag_moves_node_even_while_paused() {
        let mut board = paused_board();
        board.tick(
            &InputSnapshot::at(pos2(700.0, 200.0)).with_secondary(ButtonState::press()),
            FRAME,
        );
        board.tick(
            &InputSnapshot::at(pos2(640.0, 500.0)).with_secondary(ButtonState::hold()),
            FRAME,
        );
        board.tick(
            &InputSnapshot::at(pos2(640.0, 500.0)).with_secondary(ButtonState::release()),
            FRAME,
        );
        assert_eq!(board.nodes()[1].position, pos2(640.0, 500.0));
        assert!(board.mode().is_idle());
    }

    #[test]
    fn corrupted_node_is_respawned_before_physics() {
        let mut board = board_with(vec![
            Node::new("A", pos2(300.0, 300.0), 30.0),
            Node::new("B", pos2(900.0, 300.0), 30.0),
        ]);
        board.nodes[1].position = pos2(f32::NAN, f32::INFINITY);
        board.tick(&InputSnapshot::at(pos2(5.0, 5.0)), FRAME);
        for node in board.nodes() {
            assert!(node.is_finite());
            assert!(node.scope(viewport()).contains(node.position));
        }
    }

    #[test]
    fn physics_passes_follow_elapsed_time() {
        let mut board = board_with(Vec::new());
        assert_eq!(board.physics_passes(FRAME), 1);
        assert_eq!(board.physics_passes(FRAME * 0.5), 0);
        assert_eq!(board.physics_passes(FRAME * 0.5), 1);
        assert_eq!(board.physics_passes(1.0), MAX_PHYSICS_PASSES);
    }

    #[test]
    fn shrinking_viewport_pulls_nodes_inside() {
        let mut board = paused_board();
        board.set_viewport(Rect::from_min_max(pos2(0.0, 0.0), pos2(800.0, 600.0)));
        let node = &board.nodes()[2];
        assert_eq!(node.position, pos2(770.0, 570.0));
    }

    #[derive(Clone, Debug)]
    struct Step {
        x: f32,
        y: f32,
        primary: u8,
        secondary: u8,
        modifier: bool,
    }

    fn button(code: u8) -> ButtonState {
        match code {
            0 => ButtonState::default(),
            1 => ButtonState::press(),
            2 => ButtonState::hold(),
            _ => ButtonState::release(),
        }
    }

    fn step_strategy() -> impl Strategy<Value = Step> {
        (0.0f32..1280.0, 0.0f32..720.0, 0u8..4, 0u8..4, any::<bool>()).prop_map(
            |(x, y, primary, secondary, modifier)| Step {
                x,
                y,
                primary,
                secondary,
                modifier,
            },
        )
    }

    proptest! {
        #[test]
        fn random_gestures_keep_invariants(steps in prop::collection::vec(step_strategy(), 1..80)) {
            let mut board = board_with(vec![
                Node::new("A", pos2(200.0, 200.0), 60.0),
                Node::new("B", pos2(500.0, 250.0), 60.0),
                Node::new("C", pos2(800.0, 400.0), 60.0),
                Node::new("D", pos2(400.0, 550.0), 60.0),
            ]);

            for step in steps {
                let mut input = InputSnapshot::at(pos2(step.x, step.y))
                    .with_primary(button(step.primary))
                    .with_secondary(button(step.secondary));
                input.modifier_held = step.modifier;
                board.tick(&input, FRAME);

                for index in 0..board.nodes().len() {
                    prop_assert_eq!(board.adjacency().get(index, index), EdgeMarker::None);
                }
                for node in board.nodes() {
                    prop_assert!(node.is_finite());
                    prop_assert!(node.scope(viewport()).contains(node.position));
                }
            }
        }

        #[test]
        fn erasing_a_link_clears_both_directions(forward in 0u8..3, backward in 0u8..3) {
            let marker = |code: u8| match code {
                0 => EdgeMarker::None,
                1 => EdgeMarker::White,
                _ => EdgeMarker::Black,
            };
            let mut board = paused_board();
            board.adjacency.set(0, 1, marker(forward));
            board.adjacency.set(1, 0, marker(backward));

            drag(&mut board, pos2(450.0, 100.0), pos2(450.0, 300.0), false);

            prop_assert_eq!(board.adjacency().get(0, 1), EdgeMarker::None);
            prop_assert_eq!(board.adjacency().get(1, 0), EdgeMarker::None);
        }
    }
}
