/// Page wiring constants for the web front-end.
///
/// Element ids and attribute names are the contract with the landing page
/// markup; scene tuning lives in `scene_core::constants`.
// Mount points
pub const HERO_CANVAS_ID: &str = "webgl-canvas";
pub const VAULT_CONTAINER_ID: &str = "vault-3d";
pub const PHONE_CONTAINER_ID: &str = "iphone-3d";

// Embedded scenes wait for the hero to settle before mounting
pub const EMBED_DELAY_MS: i32 = 1000;

// JSON merged over the preset, read from the mount element
pub const SCENE_CONFIG_ATTR: &str = "data-scene-config";

// Backing store is CSS size × devicePixelRatio, capped so 3x phones don't
// allocate 9x the pixels
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

// Canvases created inside containers get this class for page styling
pub const EMBED_CANVAS_CLASS: &str = "scene-canvas";
