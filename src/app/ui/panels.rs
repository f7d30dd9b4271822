use eframe::egui::{self, Align, Context, Layout};

use super::super::BoardApp;

impl BoardApp {
    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("wolfboard");
                    ui.separator();
                    ui.label(format!("characters: {}", self.board.nodes().len()));
                    ui.label(format!("results: {}", self.board.adjacency().edge_count()));
                    ui.label(format!("gesture: {}", self.board.mode().label()));
                    if let Some(event) = self.board.last_event() {
                        ui.small(event.describe(self.board.nodes()));
                    }

                    let toggle_text = if self.board.is_simulating() {
                        "Pause layout"
                    } else {
                        "Resume layout"
                    };
                    if ui
                        .button(toggle_text)
                        .on_hover_text("Same as pressing Space over the board.")
                        .clicked()
                    {
                        self.board.toggle_simulation();
                    }
                    if ui
                        .button("Restart session")
                        .on_hover_text("Clear all results and claims and place everyone again.")
                        .clicked()
                    {
                        self.restart_session();
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if self.show_fps_bar
                            && let Some(fps_text) = self.frame_stats.summary()
                        {
                            ui.label(fps_text);
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_canvas(ui));
    }
}
