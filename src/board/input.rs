use eframe::egui::Pos2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub pressed: bool,
    pub held: bool,
    pub released: bool,
}

#[cfg(test)]
impl ButtonState {
    pub fn press() -> Self {
        Self {
            pressed: true,
            held: true,
            released: false,
        }
    }

    pub fn hold() -> Self {
        Self {
            pressed: false,
            held: true,
            released: false,
        }
    }

    pub fn release() -> Self {
        Self {
            pressed: false,
            held: false,
            released: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub pointer: Pos2,
    pub primary: ButtonState,
    pub secondary: ButtonState,
    pub modifier_held: bool,
    pub toggle_simulation: bool,
}

#[cfg(test)]
impl InputSnapshot {
    pub fn at(pointer: Pos2) -> Self {
        Self {
            pointer,
            ..Self::default()
        }
    }

    pub fn with_primary(mut self, state: ButtonState) -> Self {
        self.primary = state;
        self
    }

    pub fn with_secondary(mut self, state: ButtonState) -> Self {
        self.secondary = state;
        self
    }

    pub fn with_modifier(mut self) -> Self {
        self.modifier_held = true;
        self
    }
}
