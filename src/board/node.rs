use eframe::egui::{Color32, Pos2, Rect, Vec2, pos2, vec2};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    None,
    Seer,
    Medium,
    Hunter,
    Madman,
}

impl Role {
    pub const CLAIMS: [Role; 4] = [Role::Seer, Role::Medium, Role::Hunter, Role::Madman];

    pub fn label(self) -> &'static str {
        match self {
            Role::None => "No claim",
            Role::Seer => "Seer",
            Role::Medium => "Medium",
            Role::Hunter => "Hunter",
            Role::Madman => "Madman",
        }
    }

    pub fn ring_color(self) -> Color32 {
        match self {
            Role::None => Color32::from_rgb(128, 128, 128),
            Role::Seer => Color32::from_rgb(0, 170, 255),
            Role::Medium => Color32::from_rgb(255, 0, 255),
            Role::Hunter => Color32::from_rgb(128, 255, 0),
            Role::Madman => Color32::from_rgb(255, 128, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LifeState {
    #[default]
    Alive,
    Hanged,
    Bitten,
    SuddenDeath,
}

impl LifeState {
    pub const DEATHS: [LifeState; 3] = [
        LifeState::Hanged,
        LifeState::Bitten,
        LifeState::SuddenDeath,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LifeState::Alive => "Alive",
            LifeState::Hanged => "Hanged",
            LifeState::Bitten => "Bitten",
            LifeState::SuddenDeath => "Sudden death",
        }
    }

    pub fn glyph(self) -> Option<&'static str> {
        match self {
            LifeState::Alive => None,
            LifeState::Hanged => Some("H"),
            LifeState::Bitten => Some("B"),
            LifeState::SuddenDeath => Some("S"),
        }
    }

    pub fn is_dead(self) -> bool {
        self != LifeState::Alive
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub position: Pos2,
    pub velocity: Vec2,
    radius: f32,
    pub auto_layout: bool,
    pub role: Role,
    pub life: LifeState,
    pub highlighted: bool,
}

impl Node {
    pub fn new(name: impl Into<String>, position: Pos2, radius: f32) -> Self {
        Self {
            name: name.into(),
            position,
            velocity: Vec2::ZERO,
            radius: radius.max(1.0),
            auto_layout: true,
            role: Role::None,
            life: LifeState::Alive,
            highlighted: false,
        }
    }

    pub fn from_portrait(name: impl Into<String>, position: Pos2, portrait_size: f32) -> Self {
        Self::new(name, position, portrait_size * std::f32::consts::FRAC_1_SQRT_2)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn portrait_size(&self) -> f32 {
        self.radius * std::f32::consts::SQRT_2
    }

    pub fn portrait_rect(&self) -> Rect {
        let side = self.portrait_size();
        Rect::from_center_size(self.position, vec2(side, side))
    }

    /// Area the node center may occupy inside `viewport`. An axis narrower
    /// than the node collapses onto the viewport center.
    pub fn scope(&self, viewport: Rect) -> Rect {
        let shrunk = viewport.shrink(self.radius);
        let center = viewport.center();
        Rect::from_min_max(
            pos2(shrunk.min.x.min(center.x), shrunk.min.y.min(center.y)),
            pos2(shrunk.max.x.max(center.x), shrunk.max.y.max(center.y)),
        )
    }

    pub fn contains(&self, point: Pos2) -> bool {
        self.position.distance_sq(point) <= self.radius * self.radius
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    pub fn toggle_role(&mut self, role: Role) {
        self.role = if self.role == role { Role::None } else { role };
    }

    pub fn toggle_life(&mut self, state: LifeState) {
        self.life = if self.life == state {
            LifeState::Alive
        } else {
            state
        };
    }

    pub fn toggle_auto_layout(&mut self) {
        self.auto_layout = !self.auto_layout;
        if !self.auto_layout {
            self.velocity = Vec2::ZERO;
        }
    }
}
