/// Pure game-logic helpers.
///
/// Nothing here touches stats or the scoreboard; the controller in
/// `game.rs` decides what each result means.  Functions that remove
/// entities work in two phases: first collect the indices to drop, then
/// rebuild the collection without them.

use crate::entities::{Alien, Bullet, Ship};
use crate::settings::Settings;

// ── Fleet layout ─────────────────────────────────────────────────────────────

/// Lay out a full grid of aliens.
///
/// Columns are spaced two alien widths apart starting one width in from the
/// left and stop before `screen_width - 2 * alien_width`.  Rows are spaced
/// two alien heights apart starting one height down and stop before
/// `screen_height - 3 * alien_height`, leaving room for the ship.
///
/// Degenerate dimensions give an empty fleet.
pub fn build_fleet(settings: &Settings) -> Vec<Alien> {
    let w = settings.alien_width;
    let h = settings.alien_height;
    if w <= 0 || h <= 0 {
        return Vec::new();
    }

    let mut aliens = Vec::new();
    let mut y = h;
    while y < settings.screen_height - 3 * h {
        let mut x = w;
        while x < settings.screen_width - 2 * w {
            aliens.push(Alien::new(x, y, settings));
            x += 2 * w;
        }
        y += 2 * h;
    }
    aliens
}

// ── Fleet movement ───────────────────────────────────────────────────────────

/// If any alien touches a screen edge, drop the whole fleet and reverse its
/// direction.  At most one flip happens per call.  Returns whether it flipped.
pub fn check_fleet_edges(aliens: &mut [Alien], settings: &mut Settings) -> bool {
    if !aliens.iter().any(|a| a.check_edges(settings)) {
        return false;
    }
    for alien in aliens.iter_mut() {
        alien.drop_by(settings.fleet_drop_speed);
    }
    settings.flip_fleet_direction();
    true
}

// ── Bullets ──────────────────────────────────────────────────────────────────

/// Drop bullets that have left the top of the screen.  Returns how many went.
pub fn remove_spent_bullets(bullets: &mut Vec<Bullet>) -> usize {
    let before = bullets.len();
    bullets.retain(|b| !b.is_off_screen());
    before - bullets.len()
}

// ── Collisions ───────────────────────────────────────────────────────────────

/// Destroy every bullet/alien pair that overlaps.
///
/// Bullets are processed in order; an alien already claimed by an earlier
/// bullet this frame cannot be hit again.  Returns, for every bullet that
/// hit something, the number of aliens it destroyed.
pub fn resolve_bullet_hits(bullets: &mut Vec<Bullet>, aliens: &mut Vec<Alien>) -> Vec<usize> {
    let mut dead_aliens = vec![false; aliens.len()];
    let mut spent_bullets = vec![false; bullets.len()];
    let mut groups = Vec::new();

    for (bi, bullet) in bullets.iter().enumerate() {
        let mut destroyed = 0;
        for (ai, alien) in aliens.iter().enumerate() {
            if !dead_aliens[ai] && bullet.rect.colliderect(&alien.rect) {
                dead_aliens[ai] = true;
                destroyed += 1;
            }
        }
        if destroyed > 0 {
            spent_bullets[bi] = true;
            groups.push(destroyed);
        }
    }

    if groups.is_empty() {
        return groups;
    }

    *bullets = std::mem::take(bullets)
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !spent_bullets[*i])
        .map(|(_, b)| b)
        .collect();
    *aliens = std::mem::take(aliens)
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !dead_aliens[*i])
        .map(|(_, a)| a)
        .collect();

    groups
}

pub fn ship_collides(ship: &Ship, aliens: &[Alien]) -> bool {
    aliens.iter().any(|a| ship.rect.colliderect(&a.rect))
}

/// True as soon as one alien's bottom reaches the bottom of the screen.
pub fn aliens_reached_bottom(aliens: &[Alien], settings: &Settings) -> bool {
    aliens
        .iter()
        .any(|a| a.rect.bottom() >= settings.screen_height)
}
