// Shared layout and motion tuning constants for the scroll scene.

// Scene layout
pub const OBJECT_DISTANCE: f32 = 4.0; // vertical spacing between section meshes
pub const SECTION_MESH_X: [f32; 3] = [2.0, -2.0, 2.0]; // alternating horizontal offsets

// Particles
pub const PARTICLE_COUNT: usize = 200;
pub const PARTICLE_SPREAD: f32 = 10.0; // x/z extent of the point cloud
pub const PARTICLE_SIZE: f32 = 0.03;

// Camera
pub const CAMERA_FOV_DEGREES: f32 = 35.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_Z: f32 = 6.0;

// Parallax smoothing: rig += (target - rig) * DAMPING * dt * RATE_SCALE
pub const PARALLAX_DAMPING: f32 = 0.07;
pub const PARALLAX_RATE_SCALE: f32 = 50.0;

// Idle spin (radians per second)
pub const IDLE_SPIN_X: f32 = 0.1;
pub const IDLE_SPIN_Y: f32 = 0.12;

// Section-change rotation tween
pub const SECTION_TWEEN_DURATION_SEC: f32 = 1.5;
pub const SECTION_TWEEN_DELTA: [f32; 3] = [6.0, 3.0, 1.5];

// Output
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Material and light
pub const DEFAULT_MATERIAL_COLOR: &str = "#ffeded";
pub const LIGHT_DIRECTION: [f32; 3] = [1.0, 1.0, 0.0];
pub const LIGHT_INTENSITY: f32 = 3.0;
pub const DEFAULT_GRADIENT_URL: &str = "textures/gradients/3.png";
pub const DEFAULT_GRADIENT_STEPS: u32 = 3;
