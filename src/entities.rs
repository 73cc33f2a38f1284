/// All game entity types and their per-frame movement rules.
///
/// Entities never hold a reference to the game; the settings they need are
/// passed in explicitly on every call.

use crate::settings::Settings;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Integer axis-aligned rectangle in world units, used for drawing and
/// collision.  `x`/`y` is the top-left corner; `y` grows downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn centerx(&self) -> i32 {
        self.x + self.width / 2
    }

    /// True when the two rectangles share interior area.  Rectangles that
    /// only touch along an edge do not collide.
    pub fn colliderect(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Half-open point test: the left/top edges are inside, right/bottom are not.
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }
}

// ── Mode & input ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Start / game-over screen: Play button shown, nothing moves.
    Inactive,
    Active,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
    Quit,
    /// Keyboard shortcut for the Play button.
    Play,
}

/// Discrete input event, already translated from whatever backend produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    /// Pointer click in world coordinates.
    Click { x: i32, y: i32 },
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    /// Sub-pixel horizontal position; `rect.x` follows it each update.
    pub x: f32,
    pub rect: Rect,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Ship {
    /// A new ship sitting at the bottom centre of the screen.
    pub fn new(settings: &Settings) -> Self {
        let mut ship = Ship {
            x: 0.0,
            rect: Rect::new(0, 0, settings.ship_width, settings.ship_height),
            moving_left: false,
            moving_right: false,
        };
        ship.center(settings);
        ship
    }

    /// Move the ship back to the bottom centre (used on respawn and new game).
    pub fn center(&mut self, settings: &Settings) {
        self.rect.x = (settings.screen_width - self.rect.width) / 2;
        self.rect.y = settings.screen_height - self.rect.height;
        self.x = self.rect.x as f32;
    }

    /// Apply the movement flags.  A step that would leave the screen is
    /// dropped entirely rather than clamped.
    pub fn update(&mut self, settings: &Settings) {
        let right_bound = (settings.screen_width - self.rect.width) as f32;
        if self.moving_right && self.x + settings.ship_speed <= right_bound {
            self.x += settings.ship_speed;
        }
        if self.moving_left && self.x - settings.ship_speed >= 0.0 {
            self.x -= settings.ship_speed;
        }
        self.rect.x = self.x as i32;
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    /// Sub-pixel vertical position; `rect.y` follows it each update.
    pub y: f32,
    pub rect: Rect,
}

impl Bullet {
    /// Spawn a bullet at the ship's mid-top.
    pub fn new(settings: &Settings, ship: &Ship) -> Self {
        let rect = Rect::new(
            ship.rect.centerx() - settings.bullet_width / 2,
            ship.rect.top(),
            settings.bullet_width,
            settings.bullet_height,
        );
        Bullet { y: rect.y as f32, rect }
    }

    pub fn update(&mut self, settings: &Settings) {
        self.y -= settings.bullet_speed;
        self.rect.y = self.y as i32;
    }

    /// The bullet has completely left the top of the screen.
    pub fn is_off_screen(&self) -> bool {
        self.rect.bottom() <= 0
    }
}

// ── Aliens ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    /// Sub-pixel horizontal position; `rect.x` follows it each update.
    pub x: f32,
    pub rect: Rect,
}

impl Alien {
    pub fn new(x: i32, y: i32, settings: &Settings) -> Self {
        Alien {
            x: x as f32,
            rect: Rect::new(x, y, settings.alien_width, settings.alien_height),
        }
    }

    /// True if the alien is touching either side of the screen.
    pub fn check_edges(&self, settings: &Settings) -> bool {
        self.rect.right() >= settings.screen_width || self.rect.left() <= 0
    }

    pub fn update(&mut self, settings: &Settings) {
        self.x += settings.alien_speed * settings.fleet_direction as f32;
        self.rect.x = self.x as i32;
    }

    pub fn drop_by(&mut self, distance: i32) {
        self.rect.y += distance;
    }
}
