// Foosball configuration types
// Defaults are the arcade constants the game is tuned around

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub ai: AIConfig,
    #[serde(default)]
    pub rules: MatchRules,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyBindings {
    // Defense axis (goalie + defense rods)
    pub defense_up: String,
    pub defense_down: String,
    pub defense_kick: String,

    // Attack axis (midfield + attack rods)
    pub attack_up: String,
    pub attack_down: String,
    pub attack_kick: String,

    // Penalty shootout
    pub aim_left: String,
    pub aim_center: String,
    pub aim_right: String,
    pub power_soft: String,
    pub power_medium: String,
    pub power_strong: String,
    pub shoot: String,

    // Game controls
    pub quit: String,
    pub proceed: String,

    // Menu controls
    pub menu_up: String,
    pub menu_down: String,
    pub menu_select: String,
    pub menu_back: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            defense_up: "W".to_string(),
            defense_down: "S".to_string(),
            defense_kick: "D".to_string(),
            attack_up: "Up".to_string(),
            attack_down: "Down".to_string(),
            attack_kick: "Right".to_string(),
            aim_left: "A".to_string(),
            aim_center: "S".to_string(),
            aim_right: "D".to_string(),
            power_soft: "1".to_string(),
            power_medium: "2".to_string(),
            power_strong: "3".to_string(),
            shoot: "Space".to_string(),
            quit: "Q".to_string(),
            proceed: "Enter".to_string(),
            menu_up: "Up".to_string(),
            menu_down: "Down".to_string(),
            menu_select: "Enter".to_string(),
            menu_back: "Esc".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PhysicsConfig {
    // Field dimensions in virtual units
    pub field_width: f32,
    pub field_height: f32,
    pub goal_size: f32,

    pub ball_radius: f32,

    // Per-tick velocity multiplier (exponential decay)
    pub friction: f32,
    // Fraction of vertical speed kept on a wall bounce
    pub wall_bounce: f32,

    pub kick_force: f32,
    // Vertical speed gained per unit of normalised contact offset
    pub kick_lift: f32,
    // Radians per tick while a rod spins
    pub spin_speed: f32,
    pub shootout_spin_speed: f32,

    // Contact radius around a player slot
    pub player_reach: f32,
    // Half the drawn height of a player figure
    pub player_height: f32,
    // Fraction of speed kept when a passive figure blocks the ball
    pub block_damping: f32,

    // Fraction of the remaining distance a manually driven rod covers per tick
    pub manual_easing: f32,
    pub keeper_easing: f32,

    // Dead ball recovery
    pub stall_speed: f32,
    pub stall_ticks: u32,
    pub stall_nudge: f32,
    pub stall_lane_margin: f32,

    // Below this the shootout ball counts as stopped
    pub shootout_dead_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 500.0,
            goal_size: 140.0,
            ball_radius: 8.0,
            friction: 0.994,
            wall_bounce: 0.7,
            kick_force: 18.0,
            kick_lift: 8.0,
            spin_speed: 0.45,
            shootout_spin_speed: 0.4,
            player_reach: 22.0,
            player_height: 30.0,
            block_damping: 0.6,
            manual_easing: 0.5,
            keeper_easing: 0.4,
            stall_speed: 0.2,
            stall_ticks: 60,
            stall_nudge: 5.0,
            stall_lane_margin: 10.0,
            shootout_dead_speed: 0.1,
        }
    }
}

impl PhysicsConfig {
    /// Largest displacement a rod may be driven to from the centre line
    pub fn rod_travel(&self) -> f32 {
        self.field_height / 2.0 - self.player_height
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AIConfig {
    // Ticks of vertical velocity extrapolated when predicting the ball
    pub lookahead_ticks: f32,

    // Rod easing fraction before distance boosts
    pub move_speed: f32,
    pub near_distance: f32,
    pub near_boost: f32,
    pub close_distance: f32,
    pub close_boost: f32,

    // Extra horizontal reach in which a kick is considered
    pub kick_margin: f32,
    // Fraction of player height counted as aligned with the ball
    pub kick_alignment: f32,
    // Chance per qualifying tick of starting a kick
    pub kick_chance: f64,
}

impl Default for AIConfig {
    fn default() -> Self {
        Self {
            lookahead_ticks: 15.0,
            move_speed: 0.12,
            near_distance: 200.0,
            near_boost: 2.0,
            close_distance: 80.0,
            close_boost: 1.5,
            kick_margin: 25.0,
            kick_alignment: 0.8,
            kick_chance: 0.4,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchRules {
    // Balls served in an arcade match
    pub arcade_balls: u32,
    // Seconds on the clock for world cup and league matches
    pub match_seconds: u32,
    // Matches the player plays in a league season
    pub season_matches: u32,
    // Regulation kicks per side in a shootout
    pub regulation_penalties: usize,
    // Index of the world cup final (0 = qualifiers)
    pub final_round: u8,

    // Timed pauses, in physics ticks
    pub goal_pause_ticks: u32,
    pub celebration_ticks: u32,
    pub keeper_shuffle_ticks: u32,
    pub human_kick_delay_ticks: u32,
    pub ai_kick_delay_ticks: u32,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            arcade_balls: 10,
            match_seconds: 180,
            season_matches: 10,
            regulation_penalties: 5,
            final_round: 3,
            goal_pause_ticks: 120,
            celebration_ticks: 120,
            keeper_shuffle_ticks: 42,
            human_kick_delay_ticks: 12,
            ai_kick_delay_ticks: 84,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    // Physics ticks per second (also the frame rate)
    pub target_fps: u64,

    // Colors (RGB values 0-255)
    pub field_color: [u8; 3],
    pub line_color: [u8; 3],
    pub ball_color: [u8; 3],
    pub home_color: [u8; 3],
    pub away_color: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            field_color: [34, 197, 94],
            line_color: [220, 252, 231],
            ball_color: [255, 255, 255],
            home_color: [59, 130, 246],
            away_color: [239, 68, 68],
        }
    }
}
