// Canvas (simulation units == canvas pixels, origin top-left)
pub const CANVAS_WIDTH: f32 = 700.0;
pub const CANVAS_HEIGHT: f32 = 500.0;
pub const NUCLEUS_X: f32 = CANVAS_WIDTH / 2.0;
pub const NUCLEUS_Y: f32 = CANVAS_HEIGHT / 2.0;
pub const NUCLEUS_RADIUS: f32 = 15.0; // render only
pub const DIFFUSE_RADIUS: f32 = 120.0; // render only

// Force model
pub const COULOMB_CONSTANT: f32 = 15.0; // tuned for strong close-range deflection
pub const MIN_FORCE_DISTANCE: f32 = 0.5;

// Alpha particle
pub const ALPHA_CHARGE: f32 = 2.0;
pub const ALPHA_MASS: f32 = 4.0;
pub const TRAJECTORY_CAPACITY: usize = 200;
pub const BOUNDS_MARGIN: f32 = 50.0;

// Beam
pub const ENTRY_X: f32 = -20.0;
pub const BEAM_WIDTH: f32 = 300.0;
pub const BASE_SPAWN_INTERVAL_MS: f64 = 400.0;
pub const SPAWN_RATE_SCALE_MS: f64 = 2.0; // per energy step
pub const BASE_SPEED: f32 = 2.0;
pub const SPEED_SCALE: f32 = 4.0; // added at energy 100

// Control ranges
pub const ENERGY_MIN: u32 = 0;
pub const ENERGY_MAX: u32 = 100;
pub const PROTONS_MIN: u32 = 20;
pub const PROTONS_MAX: u32 = 100;
pub const NEUTRONS_MIN: u32 = 20;
pub const NEUTRONS_MAX: u32 = 150;

// Initial parameters
pub const DEFAULT_PROTONS: u32 = 80;
pub const DEFAULT_NEUTRONS: u32 = 121;
pub const DEFAULT_ENERGY: u32 = 75;

// Visible nucleons per species
pub const MAX_VISIBLE_NUCLEONS: usize = 50;
