use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use log::{debug, info};
use rayon::prelude::*;

use crate::config::IconsetConfig;
use crate::error::IconError;
use crate::icon::render_icon;
use crate::logger::log_error;

/// File names expected by `iconutil`, with their edge length in px.
pub const ICONSET_SIZES: [(&str, u32); 10] = [
    ("icon_16x16.png", 16),
    ("icon_16x16@2x.png", 32),
    ("icon_32x32.png", 32),
    ("icon_32x32@2x.png", 64),
    ("icon_128x128.png", 128),
    ("icon_128x128@2x.png", 256),
    ("icon_256x256.png", 256),
    ("icon_256x256@2x.png", 512),
    ("icon_512x512.png", 512),
    ("icon_512x512@2x.png", 1024),
];

fn save_icon(out_dir: &Path, name: &str, size: u32, img: &RgbaImage) -> Result<PathBuf, IconError> {
    let path = out_dir.join(name);
    if let Err(source) = img.save(&path) {
        log_error(&format!("saving {}", path.display()), &source);
        return Err(IconError::Write { path, source });
    }
    println!("✓ {} ({}x{})", name, size, size);
    debug!("wrote {}", path.display());
    Ok(path)
}

/// Renders every entry of [`ICONSET_SIZES`] and saves it under
/// `config.out_dir`, creating the directory if needed and replacing files
/// already there. Files are written in table order; the first failure
/// stops the batch and earlier files stay on disk.
pub fn write_iconset(config: &IconsetConfig) -> Result<Vec<PathBuf>, IconError> {
    let out_dir = config.out_dir.as_path();
    if let Err(source) = fs::create_dir_all(out_dir) {
        log_error(&format!("creating {}", out_dir.display()), &source);
        return Err(IconError::CreateDir {
            path: out_dir.to_path_buf(),
            source,
        });
    }

    let mut written = Vec::with_capacity(ICONSET_SIZES.len());
    if config.parallel {
        let icons = ICONSET_SIZES
            .par_iter()
            .map(|&(name, size)| render_icon(size).map(|img| (name, size, img)))
            .collect::<Result<Vec<_>, _>>()?;
        for (name, size, img) in &icons {
            written.push(save_icon(out_dir, name, *size, img)?);
        }
    } else {
        for &(name, size) in &ICONSET_SIZES {
            let img = render_icon(size)?;
            written.push(save_icon(out_dir, name, size, &img)?);
        }
    }

    println!("\n✅ All icons written to {}", out_dir.display());
    info!("iconset complete: {} files in {}", written.len(), out_dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "safemyhack-icons-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    // "icon_32x32@2x.png" -> (32, true)
    fn parse_name(name: &str) -> (u32, bool) {
        let stem = name.strip_prefix("icon_").unwrap().strip_suffix(".png").unwrap();
        let (dims, retina) = match stem.strip_suffix("@2x") {
            Some(d) => (d, true),
            None => (stem, false),
        };
        let (w, h) = dims.split_once('x').unwrap();
        assert_eq!(w, h);
        (w.parse().unwrap(), retina)
    }

    #[test]
    fn size_table_is_consistent() {
        let names: HashSet<_> = ICONSET_SIZES.iter().map(|(n, _)| *n).collect();
        assert_eq!(names.len(), 10);
        for (name, size) in ICONSET_SIZES {
            assert!(size > 0);
            let (base, retina) = parse_name(name);
            let expected = if retina { base * 2 } else { base };
            assert_eq!(size, expected, "{name}");
        }
        assert_eq!(ICONSET_SIZES.iter().map(|(_, s)| *s).min(), Some(16));
        assert_eq!(ICONSET_SIZES.iter().map(|(_, s)| *s).max(), Some(1024));
    }

    #[test]
    fn writes_every_size_and_overwrites_on_rerun() {
        let dir = scratch_dir("rerun");
        let mut config = IconsetConfig::with_out_dir(&dir);
        config.parallel = false;
        let first = write_iconset(&config).unwrap();

        config.parallel = true;
        let second = write_iconset(&config).unwrap();
        assert_eq!(first, second);

        let mut on_disk: Vec<_> = fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        on_disk.sort();
        let mut expected: Vec<_> = ICONSET_SIZES.iter().map(|(n, _)| n.to_string()).collect();
        expected.sort();
        assert_eq!(on_disk, expected);

        for (name, size) in ICONSET_SIZES {
            let dims = image::image_dimensions(dir.join(name)).unwrap();
            assert_eq!(dims, (size, size), "{name}");
        }
        let big = image::open(dir.join("icon_512x512@2x.png")).unwrap();
        assert_eq!(big.color(), image::ColorType::Rgba8);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn existing_directory_is_reused() {
        let dir = scratch_dir("existing");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("icon_16x16.png"), b"stale").unwrap();

        write_iconset(&IconsetConfig::with_out_dir(&dir)).unwrap();
        assert_eq!(image::image_dimensions(dir.join("icon_16x16.png")).unwrap(), (16, 16));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn unusable_destination_fails() {
        let dir = scratch_dir("blocked");
        fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("not-a-dir");
        fs::write(&blocker, b"").unwrap();

        let err = write_iconset(&IconsetConfig::with_out_dir(blocker.join("AppIcon.iconset")))
            .unwrap_err();
        assert!(matches!(err, IconError::CreateDir { .. }));

        fs::remove_dir_all(&dir).unwrap();
    }

    fn failed_write_keeps_earlier_files(parallel: bool) {
        let dir = scratch_dir(if parallel { "abort-par" } else { "abort-seq" });
        // a directory where the third icon should go makes its save fail
        fs::create_dir_all(dir.join("icon_32x32.png")).unwrap();

        let mut config = IconsetConfig::with_out_dir(&dir);
        config.parallel = parallel;
        let err = write_iconset(&config).unwrap_err();
        match err {
            IconError::Write { path, .. } => assert_eq!(path, dir.join("icon_32x32.png")),
            other => panic!("expected a write error, got {other:?}"),
        }

        for (name, _) in &ICONSET_SIZES[..2] {
            assert!(dir.join(name).is_file(), "{name} missing");
        }
        for (name, _) in &ICONSET_SIZES[3..] {
            assert!(!dir.join(name).exists(), "{name} written after the failure");
        }

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn failed_write_stops_sequential_batch() {
        failed_write_keeps_earlier_files(false);
    }

    #[test]
    fn failed_write_stops_parallel_batch() {
        failed_write_keeps_earlier_files(true);
    }
}
