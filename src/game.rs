/// The game loop controller.
///
/// `AlienInvasion` exclusively owns every piece of mutable state.  The
/// front-end feeds it `GameEvent`s, calls `update` once per frame and reads
/// the public fields back to draw.

use log::{debug, info};

use crate::compute::{
    aliens_reached_bottom, build_fleet, check_fleet_edges, remove_spent_bullets,
    resolve_bullet_hits, ship_collides,
};
use crate::entities::{Alien, Bullet, GameEvent, GameStatus, Key, Rect, Ship};
use crate::settings::Settings;
use crate::stats::{GameStats, Scoreboard};

/// Target frame rate of the outer loop.
pub const FRAME_RATE: u32 = 60;

/// Frames frozen after losing a ship (half a second).
pub const SHIP_HIT_PAUSE_FRAMES: u32 = FRAME_RATE / 2;

const PLAY_BUTTON_WIDTH: i32 = 200;
const PLAY_BUTTON_HEIGHT: i32 = 50;

/// What the outer loop should do after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Clone, Debug)]
pub struct AlienInvasion {
    pub settings: Settings,
    pub stats: GameStats,
    pub scoreboard: Scoreboard,
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub aliens: Vec<Alien>,
    pub play_button: Rect,
    pub status: GameStatus,
    /// Whether the front-end should show its pointer (hidden during play).
    pub pointer_visible: bool,
    /// Remaining frames of the post-hit freeze.
    pub pause_frames: u32,
}

impl AlienInvasion {
    pub fn new(settings: Settings) -> Self {
        let stats = GameStats::new(&settings);
        let scoreboard = Scoreboard::new(&stats);
        let ship = Ship::new(&settings);
        let aliens = build_fleet(&settings);
        let play_button = Rect::new(
            (settings.screen_width - PLAY_BUTTON_WIDTH) / 2,
            (settings.screen_height - PLAY_BUTTON_HEIGHT) / 2,
            PLAY_BUTTON_WIDTH,
            PLAY_BUTTON_HEIGHT,
        );
        AlienInvasion {
            settings,
            stats,
            scoreboard,
            ship,
            bullets: Vec::new(),
            aliens,
            play_button,
            status: GameStatus::Inactive,
            pointer_visible: true,
            pause_frames: 0,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.pause_frames > 0
    }

    // ── Input ────────────────────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: GameEvent) -> Flow {
        match event {
            GameEvent::Quit => return Flow::Quit,
            GameEvent::KeyDown(key) => match key {
                Key::Right => self.ship.moving_right = true,
                Key::Left => self.ship.moving_left = true,
                Key::Fire => self.fire_bullet(),
                Key::Quit => return Flow::Quit,
                Key::Play => {
                    if self.status == GameStatus::Inactive {
                        self.start_game();
                    }
                }
            },
            GameEvent::KeyUp(key) => match key {
                Key::Right => self.ship.moving_right = false,
                Key::Left => self.ship.moving_left = false,
                _ => {}
            },
            GameEvent::Click { x, y } => self.check_play_button(x, y),
        }
        Flow::Continue
    }

    fn check_play_button(&mut self, x: i32, y: i32) {
        if self.play_button.contains_point(x, y) && self.status == GameStatus::Inactive {
            self.start_game();
        }
    }

    /// Fire a new bullet if the game is running and the cap allows it.
    pub fn fire_bullet(&mut self) {
        if self.status != GameStatus::Active {
            return;
        }
        if self.bullets.len() >= self.settings.bullets_allowed {
            debug!("fire ignored: {} bullets already in flight", self.bullets.len());
            return;
        }
        self.bullets.push(Bullet::new(&self.settings, &self.ship));
    }

    // ── State transitions ────────────────────────────────────────────────────

    /// Inactive → Active: fresh settings, stats and fleet.
    pub fn start_game(&mut self) {
        self.settings.reset_dynamic();
        self.stats.reset();
        self.scoreboard.prep_all(&self.stats);
        self.status = GameStatus::Active;

        self.bullets.clear();
        self.aliens = build_fleet(&self.settings);
        self.ship.center(&self.settings);
        self.pause_frames = 0;
        self.pointer_visible = false;

        info!(
            "new game: {} ships, fleet of {}",
            self.stats.ships_left,
            self.aliens.len()
        );
    }

    /// Respond to the ship being hit by an alien or an alien landing.
    pub fn ship_hit(&mut self) {
        self.stats.ships_left = self.stats.ships_left.saturating_sub(1);
        self.scoreboard.prep_ships(&self.stats);

        if self.stats.ships_left > 0 {
            self.bullets.clear();
            self.aliens = build_fleet(&self.settings);
            self.ship.center(&self.settings);
            self.pause_frames = SHIP_HIT_PAUSE_FRAMES;
            info!("ship hit: {} ships left", self.stats.ships_left);
        } else {
            self.status = GameStatus::Inactive;
            self.pointer_visible = true;
            info!(
                "game over: score {}, level {}, high score {}",
                self.stats.score, self.stats.level, self.stats.high_score
            );
        }
    }

    // ── Per-frame update ─────────────────────────────────────────────────────

    /// Advance the simulation by one frame.  Does nothing while inactive;
    /// while paused it only counts the pause down.
    pub fn update(&mut self) {
        if self.status != GameStatus::Active {
            return;
        }
        if self.pause_frames > 0 {
            self.pause_frames -= 1;
            return;
        }

        self.ship.update(&self.settings);
        self.update_bullets();
        self.update_aliens();
    }

    fn update_bullets(&mut self) {
        for bullet in self.bullets.iter_mut() {
            bullet.update(&self.settings);
        }
        remove_spent_bullets(&mut self.bullets);

        self.check_bullet_alien_collisions();
    }

    fn check_bullet_alien_collisions(&mut self) {
        let groups = resolve_bullet_hits(&mut self.bullets, &mut self.aliens);
        if groups.is_empty() {
            return;
        }

        let points = self.settings.alien_points();
        for destroyed in groups {
            let gained = points.saturating_mul(destroyed as u64);
            self.stats.score = self.stats.score.saturating_add(gained);
        }
        self.scoreboard.prep_score(&self.stats);
        self.scoreboard.check_high_score(&mut self.stats);

        // Only a fleet emptied by gunfire levels up; an empty layout never does.
        if self.aliens.is_empty() {
            self.start_new_level();
        }
    }

    fn start_new_level(&mut self) {
        self.bullets.clear();
        self.aliens = build_fleet(&self.settings);
        self.settings.increase_speed();

        self.stats.level += 1;
        self.scoreboard.prep_level(&self.stats);
        info!(
            "level {} reached, {} points per alien",
            self.stats.level,
            self.settings.alien_points()
        );
    }

    fn update_aliens(&mut self) {
        check_fleet_edges(&mut self.aliens, &mut self.settings);
        for alien in self.aliens.iter_mut() {
            alien.update(&self.settings);
        }

        // One ship-hit per frame at most.
        if ship_collides(&self.ship, &self.aliens)
            || aliens_reached_bottom(&self.aliens, &self.settings)
        {
            self.ship_hit();
        }
    }
}
