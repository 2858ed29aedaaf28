/// Configuration for the puzzle engine, fixed at construction.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Vertical distance between discrete fragment rows.
    pub row_height: f32,
    /// Hit-test width of a stack column.
    pub column_width: f32,
    /// Round length in seconds.
    pub round_seconds: u32,
    /// Lives per session.
    pub max_lives: u32,
    /// Duration of the drag-release settle animation, seconds.
    pub settle_duration: f32,
    /// Timer values at or below this display as urgent.
    pub urgent_threshold: u32,
    /// Delay between consecutive star reveals on the win dialog, seconds.
    pub star_stagger: f32,
    /// Remote puzzle endpoint; the level query parameter is appended.
    pub endpoint: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 800.0,
            world_height: 1200.0,
            row_height: 120.0,
            column_width: 140.0,
            round_seconds: 60,
            max_lives: 3,
            settle_duration: 0.18,
            urgent_threshold: 10,
            star_stagger: 0.35,
            endpoint: "/api/puzzle".to_string(),
        }
    }
}
