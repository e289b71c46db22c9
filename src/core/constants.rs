// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 16;
pub const TICKS_PER_SECOND: f64 = 1000.0 / TICK_INTERVAL_MS as f64;
pub const MAX_TICKS_PER_FRAME: u32 = 5;
pub const INPUT_POLL_MS: u64 = 4;

// Play field (world units, y grows downward)
pub const FIELD_WIDTH: f64 = 288.0;
pub const FIELD_HEIGHT: f64 = 512.0;

// Bird
pub const BIRD_X: f64 = FIELD_WIDTH / 3.0;
pub const BIRD_START_Y: f64 = 256.0;
pub const BIRD_RADIUS: f64 = 12.0;

// Physics (units per second)
pub const GRAVITY: f64 = 900.0;
pub const FLAP_IMPULSE: f64 = -350.0;
pub const TERMINAL_VELOCITY: f64 = 600.0;
pub const SCROLL_SPEED: f64 = 120.0;

// Pipes
pub const PIPE_WIDTH: f64 = 52.0;
pub const PIPE_GAP_HEIGHT: f64 = 150.0;
pub const PIPE_GAP_MARGIN: f64 = 40.0;
pub const PIPE_SPAWN_DISTANCE: f64 = 170.0;

// Coins
pub const COIN_INTERVAL_SECONDS: f64 = 2.0;
pub const COIN_RADIUS: f64 = 10.0;
pub const COIN_VALUE: u64 = 5;
pub const SPECIAL_COIN_VALUE: u64 = 10;
pub const SPECIAL_COIN_CHANCE: f64 = 0.1;
pub const COIN_BOB_RANGE: f64 = 20.0;
pub const COIN_BOB_SPEED: f64 = 3.0;
pub const COINS_PER_POINT: u64 = 1;

// Save file
pub const SAVE_VERSION_MAGIC: u64 = 0x464C_4150_5059_0001; // "FLAPPY" v1
pub const DEFAULT_PROFILE: &str = "player";
pub const CONFIG_FILENAME: &str = "config.json";
pub const LOG_FILENAME: &str = "flappy.log";
