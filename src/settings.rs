//! Configuration bag for the whole game.
//!
//! Static values (dimensions, colours, limits) never change after start-up.
//! Dynamic values (speeds, fleet direction, score multiplier) are reset at
//! the start of every game and scaled up on each level-up.

/// An RGB colour, kept independent of the terminal backend.
pub type Rgb = (u8, u8, u8);

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    // ── Screen ───────────────────────────────────────────────────────────────
    pub screen_width: i32,
    pub screen_height: i32,
    pub bg_color: Rgb,

    // ── Ship ─────────────────────────────────────────────────────────────────
    pub ship_width: i32,
    pub ship_height: i32,
    pub ship_limit: u32,

    // ── Bullets ──────────────────────────────────────────────────────────────
    pub bullet_width: i32,
    pub bullet_height: i32,
    pub bullet_color: Rgb,
    pub bullets_allowed: usize,

    // ── Aliens ───────────────────────────────────────────────────────────────
    pub alien_width: i32,
    pub alien_height: i32,
    pub fleet_drop_speed: i32,
    pub base_alien_points: u32,

    // ── Level-up scaling ─────────────────────────────────────────────────────
    /// How quickly the game speeds up.
    pub speedup_scale: f32,
    /// How quickly alien point values increase.
    pub score_scale: f32,

    // ── Dynamic (see `reset_dynamic`) ────────────────────────────────────────
    pub ship_speed: f32,
    pub bullet_speed: f32,
    pub alien_speed: f32,
    /// +1 moves the fleet right, -1 moves it left.
    pub fleet_direction: i32,
    pub score_multiplier: f32,
}

const BASE_SHIP_SPEED: f32 = 1.5;
const BASE_BULLET_SPEED: f32 = 2.5;
const BASE_ALIEN_SPEED: f32 = 1.0;

impl Default for Settings {
    fn default() -> Self {
        let mut settings = Settings {
            screen_width: 1200,
            screen_height: 800,
            bg_color: (230, 230, 230),

            ship_width: 60,
            ship_height: 48,
            ship_limit: 3,

            bullet_width: 3,
            bullet_height: 15,
            bullet_color: (60, 60, 60),
            bullets_allowed: 3,

            alien_width: 60,
            alien_height: 58,
            fleet_drop_speed: 10,
            base_alien_points: 50,

            speedup_scale: 1.1,
            score_scale: 1.5,

            ship_speed: 0.0,
            bullet_speed: 0.0,
            alien_speed: 0.0,
            fleet_direction: 1,
            score_multiplier: 1.0,
        };
        settings.reset_dynamic();
        settings
    }
}

impl Settings {
    /// Restore every setting that changes throughout a game.
    pub fn reset_dynamic(&mut self) {
        self.ship_speed = BASE_SHIP_SPEED;
        self.bullet_speed = BASE_BULLET_SPEED;
        self.alien_speed = BASE_ALIEN_SPEED;
        self.fleet_direction = 1;
        self.score_multiplier = 1.0;
    }

    /// Speed everything up and make each alien worth more.
    pub fn increase_speed(&mut self) {
        self.ship_speed *= self.speedup_scale;
        self.bullet_speed *= self.speedup_scale;
        self.alien_speed *= self.speedup_scale;
        self.score_multiplier *= self.score_scale;
    }

    /// Points awarded for a single alien at the current multiplier.
    /// Saturates at `u64::MAX` once the multiplier grows without bound.
    pub fn alien_points(&self) -> u64 {
        (self.base_alien_points as f64 * self.score_multiplier as f64).round() as u64
    }

    pub fn flip_fleet_direction(&mut self) {
        self.fleet_direction = -self.fleet_direction;
    }
}
