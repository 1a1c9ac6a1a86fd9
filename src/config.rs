//! Application-level configuration constants.

/// Draw order before any shuffle. Must have exactly as many entries as the
/// board has slots.
pub const INITIAL_PLAYERS: [&str; 4] = ["SilverSunrise", "RINS_RING", "Nagasaki", "yoxiyo"];

// Decorative assets layered around the board.
pub const BRACKET_IMAGE_SRC: &str = "./bracket_grid.png";
pub const BACKGROUND_VIDEO_SRC: &str = "./bracket_bg.mp4";
