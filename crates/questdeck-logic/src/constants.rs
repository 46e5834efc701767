//! Tuning constants — gesture thresholds, runner physics, progression rates.
//!
//! Plain numeric constants with no runtime dependency. Both the engine
//! and the headless simtest use these.

pub mod gesture {
    /// Horizontal offsets below this many units do not count as an engaged
    /// drag for visual feedback. The offset itself is still tracked.
    pub const DRAG_DEADZONE: f32 = 5.0;
    /// Commit threshold as a fraction of card width. The comparison is
    /// strict — a release exactly at the threshold cancels.
    pub const COMMIT_RATIO: f32 = 0.25;
    /// Duration of the settle animation (fling-off or spring-back), in ms.
    /// The decision is delivered only once this much time has elapsed.
    pub const SETTLE_MS: f32 = 300.0;
}

pub mod runner {
    /// Fixed simulation tick in milliseconds (50 steps/sec).
    pub const TICK_MS: u64 = 20;
    /// Downward acceleration applied to the player every tick.
    pub const GRAVITY: f32 = 0.55;
    /// Upward impulse for the first tap since grounding.
    pub const JUMP_VELOCITY: f32 = 9.0;
    /// Reduced impulse for the second tap (double jump).
    pub const DOUBLE_JUMP_VELOCITY: f32 = 7.5;
    /// Forced downward impulse for the third and later taps (slam).
    pub const SLAM_VELOCITY: f32 = -12.0;
    /// Obstacle scroll speed at score 0.
    pub const BASE_SPEED: f32 = 4.5;
    /// Speed gained per point scored. The ramp has no cap.
    pub const SPEED_PER_POINT: f32 = 0.2;
    /// The player's fixed left edge within the playfield.
    pub const PLAYER_LEFT: f32 = 40.0;
    pub const PLAYER_SIZE: f32 = 28.0;
    pub const OBSTACLE_SIZE: f32 = 24.0;
    /// Per-side shrink applied before the overlap test, so grazing
    /// contact does not end the run.
    pub const COLLISION_INSET: f32 = 4.0;
    /// Playfield width used when the host does not supply one.
    pub const DEFAULT_FIELD_WIDTH: f32 = 360.0;
    /// Respawn position: `field_width + random(0..JITTER) + MARGIN`.
    pub const RESPAWN_JITTER: f32 = 150.0;
    pub const RESPAWN_MARGIN: f32 = 50.0;
    /// Number of cosmetic skins a new session can roll.
    pub const SKIN_COUNT: usize = 12;
}

pub mod progression {
    /// XP needed to advance one level.
    pub const XP_PER_LEVEL: u32 = 800;
}
