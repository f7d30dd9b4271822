use eframe::egui::{Context, Pos2, Rect};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::info;

use crate::board::{Board, Node};
use crate::config::{RosterEntry, Settings};
use crate::layout::initial_positions;

mod canvas;
mod paint;
mod search;
mod ui;

use ui::fps::FrameStats;

pub struct BoardApp {
    roster: Vec<RosterEntry>,
    settings: Settings,
    me: Option<String>,
    board: Board,
    search: String,
    session_pending: bool,
    show_fps_bar: bool,
    frame_stats: FrameStats,
    last_pointer: Pos2,
}

impl BoardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        roster: Vec<RosterEntry>,
        settings: Settings,
        me: Option<String>,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let board = Board::new(settings.layout, Rect::NOTHING, rng);

        Self {
            roster,
            settings,
            me,
            board,
            search: String::new(),
            session_pending: true,
            show_fps_bar: true,
            frame_stats: FrameStats::default(),
            last_pointer: Pos2::ZERO,
        }
    }

    fn start_session(&mut self, viewport: Rect) {
        let names = self
            .roster
            .iter()
            .map(|entry| entry.name.clone())
            .collect::<Vec<_>>();
        let nodes = self
            .roster
            .iter()
            .zip(initial_positions(&names, viewport))
            .map(|(entry, position)| {
                Node::from_portrait(entry.name.clone(), position, entry.portrait_size)
            })
            .collect::<Vec<_>>();

        self.board.set_viewport(viewport);
        self.board.initialize(nodes);
        self.session_pending = false;
        info!(characters = self.roster.len(), "session started");
    }

    pub(in crate::app) fn restart_session(&mut self) {
        self.session_pending = true;
    }

    fn is_me(&self, name: &str) -> bool {
        self.me.as_deref() == Some(name)
    }

    fn apply_highlights(&mut self) {
        let names = self
            .board
            .nodes()
            .iter()
            .map(|node| node.name.as_str())
            .collect::<Vec<_>>();
        let matches = search::matching_names(&names, &self.search);
        let highlighted = names
            .iter()
            .zip(matches)
            .map(|(name, matched)| matched || self.is_me(name))
            .collect::<Vec<_>>();

        for (index, highlighted) in highlighted.into_iter().enumerate() {
            self.board.set_highlighted(index, highlighted);
        }
    }
}

impl eframe::App for BoardApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.frame_stats.record(ctx);
        self.show(ctx);
    }
}
