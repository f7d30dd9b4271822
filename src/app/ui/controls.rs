use std::ops::RangeInclusive;

use eframe::egui::{self, Ui};

use crate::board::{LayoutConfig, LifeState, Role};

use super::super::BoardApp;

const GESTURES: [(&str, &str); 7] = [
    ("Left drag node to node", "white result"),
    ("Alt + left drag node to node", "black result"),
    ("Left click a node", "open its menu"),
    ("Left click outside the menu", "close it"),
    ("Right drag a node", "move it"),
    ("Left drag across links", "erase them"),
    ("Space", "pause or resume the layout"),
];

fn layout_slider(
    ui: &mut Ui,
    value: &mut f32,
    range: RangeInclusive<f32>,
    text: &str,
    hover: &str,
) -> bool {
    ui.add(
        egui::Slider::new(value, range)
            .text(text)
            .clamping(egui::SliderClamping::Always),
    )
    .on_hover_text(hover)
    .changed()
}

impl BoardApp {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Board Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Search characters")
            .on_hover_text("Fuzzy-highlight matching names on the board.");
        ui.text_edit_singleline(&mut self.search);

        ui.separator();
        ui.checkbox(&mut self.show_fps_bar, "FPS Display")
            .on_hover_text("Show frame rate statistics in the top bar.");

        let mut running = self.board.is_simulating();
        if ui
            .checkbox(&mut running, "Live layout simulation")
            .changed()
        {
            self.board.set_simulating(running);
        }

        ui.collapsing("Layout tuning", |ui| self.draw_layout_tuning(ui));

        ui.separator();
        self.draw_claim_summary(ui);

        ui.separator();
        egui::CollapsingHeader::new("Gestures")
            .default_open(true)
            .show(ui, |ui| {
                egui::Grid::new("gesture_help")
                    .num_columns(2)
                    .striped(true)
                    .show(ui, |ui| {
                        for (gesture, effect) in GESTURES {
                            ui.label(gesture);
                            ui.label(effect);
                            ui.end_row();
                        }
                    });
            });
    }

    fn draw_layout_tuning(&mut self, ui: &mut Ui) {
        let mut layout = *self.board.layout();
        let mut changed = false;

        changed |= layout_slider(
            ui,
            &mut layout.natural_length,
            50.0..=600.0,
            "Link length",
            "Distance two linked characters settle at before repulsion.",
        );
        changed |= layout_slider(
            ui,
            &mut layout.repulsion,
            0.0..=1.0,
            "Repulsion",
            "How strongly every pair of characters pushes apart.",
        );
        changed |= layout_slider(
            ui,
            &mut layout.spring,
            0.0..=1.0,
            "Spring",
            "Pull along every result link.",
        );
        changed |= layout_slider(
            ui,
            &mut layout.center_pull,
            0.0..=2.0,
            "Center pull",
            "Pull of every character toward the middle of the board.",
        );
        changed |= layout_slider(
            ui,
            &mut layout.resistance,
            0.9..=1.0,
            "Resistance",
            "Velocity kept after each step; lower settles faster.",
        );

        let sub_steps_changed = ui
            .add(
                egui::Slider::new(&mut layout.sub_steps, 1..=40)
                    .text("Sub-steps")
                    .clamping(egui::SliderClamping::Always),
            )
            .on_hover_text("Integration steps per physics pass.")
            .changed();
        changed |= sub_steps_changed;

        if changed {
            self.board.set_layout(layout);
        }

        if ui
            .button("Reset layout")
            .on_hover_text("Back to the values the board started with.")
            .clicked()
        {
            self.board.set_layout(self.settings.layout);
        }

        if *self.board.layout() != LayoutConfig::default() {
            ui.small("Layout differs from the built-in defaults.");
        }
    }

    fn draw_claim_summary(&self, ui: &mut Ui) {
        ui.label(egui::RichText::new("Claims").strong());
        for role in Role::CLAIMS {
            let claimants = self
                .board
                .nodes()
                .iter()
                .filter(|node| node.role == role)
                .map(|node| node.name.as_str())
                .collect::<Vec<_>>();
            if claimants.is_empty() {
                ui.label(format!("{}: -", role.label()));
            } else {
                ui.label(format!("{}: {}", role.label(), claimants.join(", ")));
            }
        }

        let alive = self
            .board
            .nodes()
            .iter()
            .filter(|node| !node.life.is_dead())
            .count();
        ui.label(format!("Alive: {alive}"));
        for state in LifeState::DEATHS {
            let count = self
                .board
                .nodes()
                .iter()
                .filter(|node| node.life == state)
                .count();
            if count > 0 {
                ui.label(format!("{}: {count}", state.label()));
            }
        }
    }
}
