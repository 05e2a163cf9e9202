use bevy::prelude::*;

/// Physics timing
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
pub const MAX_SUBSTEPS: u32 = 3;
pub const SOLVER_ITERATIONS: usize = 3;

/// Gravity (world units per second squared; +Y up)
pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.82, 0.0);

/// Shared contact material applied to every collider
pub const DEFAULT_FRICTION: f32 = 0.75;
pub const DEFAULT_RESTITUTION: f32 = 0.75;
pub const ALLOW_SLEEP: bool = true;

/// Sphere defaults
pub const SPHERE_RADIUS: f32 = 1.0;
pub const SPHERE_MASS: f32 = 1.1;
pub const SPHERE_SPAWN: Vec3 = Vec3::new(0.0, 5.0, -STAIR_HEIGHT * 0.75);
pub const SPHERE_MASS_MIN: f32 = 0.5;
pub const SPHERE_MASS_MAX: f32 = 5.0;
pub const SPHERE_MASS_STEP: f64 = 0.001;

/// The launch impulse applied to a freshly spawned sphere
pub const LAUNCH_IMPULSE: Vec3 = Vec3::new(0.0, 0.0, 150.0);

/// Staircase: each step drops and advances by STAIR_HEIGHT
pub const STAIR_COUNT: u32 = 5;
pub const STAIR_WIDTH: f32 = 10.0;
pub const STAIR_HEIGHT: f32 = 2.5;
pub const STAIR_HALF_THICKNESS: f32 = 0.1;

/// Camera
pub const CAMERA_POSITION: Vec3 = Vec3::new(-25.0, 5.0, 15.0);
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;

/// Orbit controls
pub const ORBIT_SENSITIVITY: f32 = 0.005;
pub const ZOOM_SENSITIVITY: f32 = 0.9;
pub const ORBIT_DISTANCE_MIN: f32 = 2.0;
pub const ORBIT_DISTANCE_MAX: f32 = 80.0;
pub const ORBIT_PITCH_LIMIT: f32 = 1.54;

/// Fraction of remaining orbit offset still uncorrected after one second
pub const CAMERA_DAMPING_PER_SECOND: f32 = 0.005;

/// Viewport
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Lighting
pub const AMBIENT_BRIGHTNESS: f32 = 150.0;
pub const SUN_POSITION: Vec3 = Vec3::new(5.0, 5.0, 5.0);
pub const SUN_ILLUMINANCE: f32 = 4_000.0;
pub const SHADOW_MAP_SIZE: usize = 1024;
pub const SHADOW_MAX_DISTANCE: f32 = 15.0;
