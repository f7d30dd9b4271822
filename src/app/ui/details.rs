use eframe::egui::{self, Color32, RichText, Ui};

use crate::board::EdgeMarker;

use super::super::BoardApp;

fn marker_text(marker: EdgeMarker, name: &str) -> RichText {
    let text = RichText::new(format!("{name} ({})", marker.label()));
    match marker {
        EdgeMarker::Black => text.color(Color32::from_gray(20)).background_color(Color32::from_gray(200)),
        EdgeMarker::White | EdgeMarker::None => text,
    }
}

impl BoardApp {
    pub(in crate::app) fn draw_details(&self, ui: &mut Ui) {
        ui.heading("Characters");
        ui.add_space(6.0);

        let nodes = self.board.nodes();
        if nodes.is_empty() {
            ui.label("No characters on the board.");
            return;
        }

        let adjacency = self.board.adjacency();
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (index, node) in nodes.iter().enumerate() {
                    let mut title = RichText::new(node.name.as_str()).color(node.role.ring_color());
                    if node.highlighted {
                        title = title.strong();
                    }
                    if node.life.is_dead() {
                        title = title.strikethrough();
                    }

                    egui::CollapsingHeader::new(title)
                        .id_salt(("character", index))
                        .show(ui, |ui| {
                            ui.label(format!("Claim: {}", node.role.label()));
                            ui.label(format!("Status: {}", node.life.label()));
                            ui.label(if node.auto_layout {
                                "Layout: automatic"
                            } else {
                                "Layout: pinned"
                            });

                            ui.add_space(4.0);
                            ui.label(RichText::new("Results given").strong());
                            let mut given = adjacency.outgoing(index).peekable();
                            if given.peek().is_none() {
                                ui.small("none");
                            }
                            for (target, marker) in given {
                                if let Some(other) = nodes.get(target) {
                                    ui.label(marker_text(marker, &other.name));
                                }
                            }

                            ui.label(RichText::new("Results received").strong());
                            let mut received = adjacency.incoming(index).peekable();
                            if received.peek().is_none() {
                                ui.small("none");
                            }
                            for (source, marker) in received {
                                if let Some(other) = nodes.get(source) {
                                    ui.label(marker_text(marker, &other.name));
                                }
                            }
                        });
                }
            });
    }
}
