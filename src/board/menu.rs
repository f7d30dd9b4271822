use eframe::egui::{Align2, Color32, Pos2, Rect, Vec2, pos2, vec2};

use super::draw::{Blend, DrawCommand, DrawList};
use super::geometry::fix_rect_position;
use super::input::InputSnapshot;
use super::node::{LifeState, Node, Role};

pub const MENU_SIZE: Vec2 = vec2(256.0, 384.0);

const PANEL_COLOR: Color32 = Color32::from_rgba_premultiplied(28, 32, 38, 240);
const BUTTON_COLOR: Color32 = Color32::from_rgb(50, 56, 64);
const LABEL_COLOR: Color32 = Color32::from_gray(230);
const BADGE_SIZE: f32 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuButton {
    Claim(Role),
    AutoLayout,
    Death(LifeState),
}

impl MenuButton {
    fn apply(self, node: &mut Node) {
        match self {
            MenuButton::Claim(role) => node.toggle_role(role),
            MenuButton::AutoLayout => node.toggle_auto_layout(),
            MenuButton::Death(state) => node.toggle_life(state),
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            MenuButton::Claim(role) => role.label(),
            MenuButton::AutoLayout => "toggle pin",
            MenuButton::Death(state) => state.label(),
        }
    }

    fn label(self, node: &Node) -> &'static str {
        match self {
            MenuButton::Claim(role) => role.label(),
            MenuButton::AutoLayout if node.auto_layout => "Auto layout",
            MenuButton::AutoLayout => "Pinned",
            MenuButton::Death(state) => state.label(),
        }
    }

    fn active_color(self, node: &Node) -> Option<Color32> {
        let color = match self {
            MenuButton::Claim(role) if node.role == role => role.ring_color(),
            MenuButton::AutoLayout if node.auto_layout => Color32::from_rgb(255, 128, 0),
            MenuButton::Death(state) if node.life == state => Color32::from_rgb(255, 0, 0),
            _ => return None,
        };
        Some(Color32::from_rgba_unmultiplied(
            color.r(),
            color.g(),
            color.b(),
            64,
        ))
    }
}

fn button_layout() -> [(MenuButton, Rect); 8] {
    let square = |x: f32, y: f32, side: f32| Rect::from_min_size(pos2(x, y), vec2(side, side));
    [
        (MenuButton::Claim(Role::Seer), square(3.0, 3.0, 122.0)),
        (MenuButton::Claim(Role::Medium), square(131.0, 3.0, 122.0)),
        (MenuButton::Claim(Role::Hunter), square(3.0, 131.0, 122.0)),
        (MenuButton::Claim(Role::Madman), square(131.0, 131.0, 122.0)),
        (MenuButton::AutoLayout, square(3.0, 259.0, 122.0)),
        (MenuButton::Death(LifeState::Hanged), square(130.0, 258.0, 60.0)),
        (MenuButton::Death(LifeState::Bitten), square(194.0, 258.0, 60.0)),
        (MenuButton::Death(LifeState::SuddenDeath), square(130.0, 322.0, 60.0)),
    ]
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContextMenu {
    node: usize,
    origin: Pos2,
}

impl ContextMenu {
    pub fn open(node: usize, anchor: Pos2, viewport: Rect) -> Self {
        Self {
            node,
            origin: fix_rect_position(Rect::from_min_size(anchor, MENU_SIZE), viewport),
        }
    }

    pub fn node(&self) -> usize {
        self.node
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.origin, MENU_SIZE)
    }

    pub fn buttons(&self) -> impl Iterator<Item = (MenuButton, Rect)> {
        let offset = self.origin.to_vec2();
        button_layout()
            .into_iter()
            .map(move |(button, rect)| (button, rect.translate(offset)))
    }

    #[cfg(test)]
    pub fn button_rect(&self, button: MenuButton) -> Option<Rect> {
        self.buttons()
            .find(|(candidate, _)| *candidate == button)
            .map(|(_, rect)| rect)
    }

    pub fn button_at(&self, point: Pos2) -> Option<MenuButton> {
        self.buttons()
            .find(|(_, rect)| rect.contains(point))
            .map(|(button, _)| button)
    }

    pub fn update(&self, nodes: &mut [Node], input: &InputSnapshot) -> Option<MenuButton> {
        if !input.primary.pressed {
            return None;
        }

        let button = self.button_at(input.pointer)?;
        let node = nodes.get_mut(self.node)?;
        button.apply(node);
        Some(button)
    }

    pub(super) fn draw(&self, node: &Node, pointer: Pos2, list: &mut DrawList) {
        list.push(DrawCommand::FilledRect {
            rect: self.rect(),
            color: PANEL_COLOR,
            blend: Blend::Normal,
        });

        for (button, rect) in self.buttons() {
            list.push(DrawCommand::FilledRect {
                rect,
                color: BUTTON_COLOR,
                blend: Blend::Normal,
            });
            list.push(DrawCommand::Text {
                text: button.label(node).to_owned(),
                position: rect.center(),
                align: Align2::CENTER_CENTER,
                size: if rect.width() > 100.0 { 17.0 } else { 11.0 },
                color: LABEL_COLOR,
            });
        }

        for (button, rect) in self.buttons() {
            if let Some(color) = button.active_color(node) {
                list.push(DrawCommand::FilledRect {
                    rect,
                    color,
                    blend: Blend::Additive,
                });
            }
        }

        if let Some(rect) = self
            .buttons()
            .find(|(_, rect)| rect.contains(pointer))
            .map(|(_, rect)| rect)
        {
            list.push(DrawCommand::FilledRect {
                rect,
                color: Color32::from_rgba_unmultiplied(255, 255, 255, 32),
                blend: Blend::Additive,
            });
        }

        list.push(DrawCommand::Portrait {
            node: self.node,
            rect: Rect::from_min_size(self.origin + vec2(224.0, 352.0), vec2(BADGE_SIZE, BADGE_SIZE)),
            tint: None,
        });
    }
}
