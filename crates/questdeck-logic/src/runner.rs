//! The endless-runner mini-game simulation.
//!
//! A fixed-timestep loop (20 ms per tick): gravity pulls the player down,
//! taps apply jump/double-jump/slam impulses, a single obstacle scrolls
//! left and respawns off the right edge for a point, and an axis-aligned
//! overlap test with a per-side inset ends the run. Speed ramps with score
//! and has no cap.
//!
//! The simulation owns no clock — the caller drives it by invoking
//! [`RunnerSim::step`] once per tick. Randomness (respawn jitter, cosmetic
//! skin) enters only through the caller-supplied `Rng`, so seeded runs are
//! fully deterministic.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::runner::{
    BASE_SPEED, COLLISION_INSET, DOUBLE_JUMP_VELOCITY, GRAVITY, JUMP_VELOCITY, OBSTACLE_SIZE,
    PLAYER_LEFT, PLAYER_SIZE, RESPAWN_JITTER, RESPAWN_MARGIN, SKIN_COUNT, SLAM_VELOCITY,
    SPEED_PER_POINT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunnerPhase {
    Idle,
    Playing,
    GameOver,
}

/// What one tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Ordinary tick: positions advanced.
    Advanced,
    /// The obstacle cycled off screen and one point was scored.
    Scored,
    /// The player hit the obstacle. Contains the final and best score.
    GameOver { score: u32, high_score: u32 },
}

/// Point-in-time view of the simulation, for the host's tick callback.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RunnerSnapshot {
    pub phase: RunnerPhase,
    pub player_height: f32,
    pub player_velocity: f32,
    pub obstacle_x: f32,
    pub speed: f32,
    pub score: u32,
    pub high_score: u32,
    pub tap_charge: u32,
    pub skin_index: usize,
}

/// One game session's state. `high_score` survives across sessions.
#[derive(Debug, Clone)]
pub struct RunnerSim {
    phase: RunnerPhase,
    field_width: f32,
    player_height: f32,
    player_velocity: f32,
    obstacle_x: f32,
    speed: f32,
    score: u32,
    high_score: u32,
    tap_charge: u32,
    skin_index: usize,
}

impl RunnerSim {
    pub fn new(field_width: f32) -> Self {
        Self {
            phase: RunnerPhase::Idle,
            field_width,
            player_height: 0.0,
            player_velocity: 0.0,
            obstacle_x: field_width,
            speed: BASE_SPEED,
            score: 0,
            high_score: 0,
            tap_charge: 0,
            skin_index: 0,
        }
    }

    pub fn phase(&self) -> RunnerPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn snapshot(&self) -> RunnerSnapshot {
        RunnerSnapshot {
            phase: self.phase,
            player_height: self.player_height,
            player_velocity: self.player_velocity,
            obstacle_x: self.obstacle_x,
            speed: self.speed,
            score: self.score,
            high_score: self.high_score,
            tap_charge: self.tap_charge,
            skin_index: self.skin_index,
        }
    }

    /// Seed the best score from a persisted value. Never lowers it.
    pub fn restore_high_score(&mut self, high_score: u32) {
        self.high_score = self.high_score.max(high_score);
    }

    /// Reset all session state, reroll the cosmetic skin, and enter
    /// `Playing`. The best score is kept.
    pub fn start(&mut self, rng: &mut impl Rng) {
        self.skin_index = rng.gen_range(0..SKIN_COUNT);
        self.score = 0;
        self.speed = BASE_SPEED;
        self.player_height = 0.0;
        self.player_velocity = 0.0;
        self.obstacle_x = self.field_width;
        self.tap_charge = 0;
        self.phase = RunnerPhase::Playing;
    }

    /// Apply a tap impulse. No-op unless playing.
    ///
    /// The tap charge counts taps since the player last touched the
    /// ground: the first is a jump, the second a weaker double jump, the
    /// third and beyond a downward slam.
    pub fn tap(&mut self) {
        if self.phase != RunnerPhase::Playing {
            return;
        }
        self.tap_charge += 1;
        self.player_velocity = match self.tap_charge {
            1 => JUMP_VELOCITY,
            2 => DOUBLE_JUMP_VELOCITY,
            _ => SLAM_VELOCITY,
        };
    }

    /// Advance the simulation by one fixed tick.
    ///
    /// Returns `None` when not playing. A `GameOver` result has already
    /// transitioned the phase and folded the score into the best score;
    /// further calls are no-ops until the next `start`.
    pub fn step(&mut self, rng: &mut impl Rng) -> Option<TickEvent> {
        if self.phase != RunnerPhase::Playing {
            return None;
        }

        // Gravity, then ground clamp. Grounding rearms the tap charge.
        self.player_velocity -= GRAVITY;
        self.player_height += self.player_velocity;
        if self.player_height <= 0.0 {
            self.player_height = 0.0;
            self.player_velocity = 0.0;
            self.tap_charge = 0;
        }

        // Obstacle scroll and respawn.
        let mut event = TickEvent::Advanced;
        self.obstacle_x -= self.speed;
        if self.obstacle_x < -OBSTACLE_SIZE {
            self.obstacle_x = self.field_width + rng.gen_range(0.0..RESPAWN_JITTER) + RESPAWN_MARGIN;
            self.score += 1;
            self.speed = BASE_SPEED + self.score as f32 * SPEED_PER_POINT;
            event = TickEvent::Scored;
        }

        if collides(self.player_height, self.obstacle_x) {
            self.phase = RunnerPhase::GameOver;
            if self.score > self.high_score {
                self.high_score = self.score;
            }
            return Some(TickEvent::GameOver {
                score: self.score,
                high_score: self.high_score,
            });
        }

        Some(event)
    }

    /// End the session. Idempotent: only the first call after `Playing`
    /// performs the transition and the high-score update; it returns the
    /// final `(score, high_score)` pair, later calls return `None`.
    pub fn stop(&mut self) -> Option<(u32, u32)> {
        if self.phase != RunnerPhase::Playing {
            return None;
        }
        self.phase = RunnerPhase::GameOver;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
        Some((self.score, self.high_score))
    }
}

/// Axis-aligned overlap test between player and obstacle, with a
/// `COLLISION_INSET` shrink on each side. The height term means a player
/// who has jumped clear of the obstacle's top does not collide.
pub fn collides(player_height: f32, obstacle_x: f32) -> bool {
    let player_right = PLAYER_LEFT + PLAYER_SIZE;
    let obstacle_right = obstacle_x + OBSTACLE_SIZE;
    player_right > obstacle_x + COLLISION_INSET
        && PLAYER_LEFT < obstacle_right - COLLISION_INSET
        && player_height < OBSTACLE_SIZE - COLLISION_INSET
}
