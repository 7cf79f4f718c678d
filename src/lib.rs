//! Procedural app icon for SafeMyHack: a shield with a wifi signal and a
//! key, rendered at every size of a macOS `AppIcon.iconset`.

pub mod config;
pub mod error;
pub mod geometry;
pub mod icon;
pub mod iconset;
pub mod logger;

pub use config::IconsetConfig;
pub use error::IconError;
pub use icon::{IconLayout, encode_png, render_icon};
pub use iconset::{ICONSET_SIZES, write_iconset};
