use std::path::{Path, PathBuf};

/// Where and how the icon set is produced. There are no runtime inputs;
/// the binary always runs with [`IconsetConfig::default`].
#[derive(Debug, Clone)]
pub struct IconsetConfig {
    pub out_dir: PathBuf,
    /// Render all sizes on the rayon pool before writing them out.
    pub parallel: bool,
}

impl Default for IconsetConfig {
    fn default() -> Self {
        Self {
            out_dir: default_iconset_dir(),
            parallel: true,
        }
    }
}

impl IconsetConfig {
    pub fn with_out_dir(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            ..Self::default()
        }
    }
}

/// `Resources/AppIcon.iconset` next to the crate sources.
pub fn default_iconset_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("Resources")
        .join("AppIcon.iconset")
}
