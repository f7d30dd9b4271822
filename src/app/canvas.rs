use eframe::egui::{Key, PointerButton, Pos2, Rect, Response, Sense, Ui};

use crate::board::{ButtonState, InputSnapshot};

use super::BoardApp;
use super::paint::{draw_background, paint_draw_list};

const MAX_FRAME_SECS: f32 = 0.25;

fn button_state(ui: &Ui, button: PointerButton, press_allowed: bool) -> ButtonState {
    ui.input(|input| ButtonState {
        pressed: press_allowed && input.pointer.button_pressed(button),
        held: input.pointer.button_down(button),
        released: input.pointer.button_released(button),
    })
}

impl BoardApp {
    pub(in crate::app) fn draw_canvas(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let viewport = Rect::from_min_size(Pos2::ZERO, rect.size());

        if self.session_pending {
            self.start_session(viewport);
        } else {
            self.board.set_viewport(viewport);
        }

        let input = self.capture_input(ui, rect, &response);
        let dt = ui
            .ctx()
            .input(|input| input.stable_dt)
            .clamp(0.0, MAX_FRAME_SECS);

        self.apply_highlights();
        let draw_list = self.board.tick(&input, dt);

        let painter = ui.painter_at(rect);
        draw_background(&painter, rect);
        paint_draw_list(&painter, rect.min.to_vec2(), &draw_list, self.board.nodes());

        ui.ctx().request_repaint();
    }

    // Presses only count over the canvas; holds and releases always pass through.
    fn capture_input(&mut self, ui: &Ui, rect: Rect, response: &Response) -> InputSnapshot {
        if let Some(pointer) = ui.input(|input| input.pointer.latest_pos()) {
            self.last_pointer = pointer;
        }
        let over_canvas = response.hovered() && rect.contains(self.last_pointer);

        let keyboard_taken = ui.ctx().memory(|memory| memory.focused().is_some());
        let (modifier_held, space_pressed) =
            ui.input(|input| (input.modifiers.alt, input.key_pressed(Key::Space)));

        InputSnapshot {
            pointer: self.last_pointer - rect.min.to_vec2(),
            primary: button_state(ui, PointerButton::Primary, over_canvas),
            secondary: button_state(ui, PointerButton::Secondary, over_canvas),
            modifier_held,
            toggle_simulation: space_pressed && !keyboard_taken,
        }
    }
}
