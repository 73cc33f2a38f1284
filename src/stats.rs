/// Game statistics and their on-screen text.

use crate::settings::Settings;

/// Counters tracked during a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameStats {
    pub ships_left: u32,
    pub score: u64,
    pub level: u32,
    /// Survives `reset`; lives for the whole process.
    pub high_score: u64,
    ship_limit: u32,
}

impl GameStats {
    pub fn new(settings: &Settings) -> Self {
        let mut stats = GameStats {
            ships_left: 0,
            score: 0,
            level: 1,
            high_score: 0,
            ship_limit: settings.ship_limit,
        };
        stats.reset();
        stats
    }

    /// Reset everything that changes during a game.
    pub fn reset(&mut self) {
        self.ships_left = self.ship_limit;
        self.score = 0;
        self.level = 1;
    }
}

// ── Scoreboard ────────────────────────────────────────────────────────────────

/// Display representation of `GameStats`.  Each `prep_*` call rebuilds one
/// piece of text; the renderer only ever reads the prepared values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub score_text: String,
    pub high_score_text: String,
    pub level_text: String,
    pub ships: u32,
}

impl Scoreboard {
    pub fn new(stats: &GameStats) -> Self {
        let mut sb = Scoreboard::default();
        sb.prep_all(stats);
        sb
    }

    pub fn prep_all(&mut self, stats: &GameStats) {
        self.prep_score(stats);
        self.prep_high_score(stats);
        self.prep_level(stats);
        self.prep_ships(stats);
    }

    pub fn prep_score(&mut self, stats: &GameStats) {
        self.score_text = format_score(stats.score);
    }

    pub fn prep_high_score(&mut self, stats: &GameStats) {
        self.high_score_text = format_score(stats.high_score);
    }

    pub fn prep_level(&mut self, stats: &GameStats) {
        self.level_text = stats.level.to_string();
    }

    pub fn prep_ships(&mut self, stats: &GameStats) {
        self.ships = stats.ships_left;
    }

    /// Raise the high score if the current score beats it.
    pub fn check_high_score(&mut self, stats: &mut GameStats) {
        if stats.score > stats.high_score {
            stats.high_score = stats.score;
            self.prep_high_score(stats);
        }
    }
}

/// Round to the nearest ten and insert thousands separators: 1247 → "1,250".
pub fn format_score(score: u64) -> String {
    let rounded = score.saturating_add(5) / 10 * 10;
    let digits = rounded.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
