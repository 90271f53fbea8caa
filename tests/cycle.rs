//! End-to-end cycles against a real image library on disk.
//!
//! Each test builds `<tmp>/saved` and `<tmp>/cached`, writes a settings JSON
//! file the way the frame host does, and drives the public API with the
//! pure-Rust backend.

use frame_cycle::config::{DeviceSettings, DisplayConfig, Orientation, load_config};
use frame_cycle::imaging::RustBackend;
use frame_cycle::loader::ImageSource;
use frame_cycle::naming::safe_id;
use frame_cycle::pipeline::{PipelineError, generate_image};
use frame_cycle::settings::Settings;
use frame_cycle::transform::FrameFit;
use image::{Rgb, RgbImage};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn library(images: &[(&str, u32, u32)]) -> (TempDir, Vec<String>) {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("saved")).unwrap();
    fs::create_dir_all(tmp.path().join("cached")).unwrap();
    let sources = images
        .iter()
        .map(|(name, w, h)| {
            let path = tmp.path().join("saved").join(name);
            RgbImage::from_fn(*w, *h, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 64]))
                .save(&path)
                .unwrap();
            path.to_string_lossy().into_owned()
        })
        .collect();
    (tmp, sources)
}

fn write_settings(dir: &Path, value: serde_json::Value) -> PathBuf {
    let path = dir.join("settings.json");
    fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
    path
}

// =========================================================================
// Full-resolution branch
// =========================================================================

#[test]
fn first_cycle_caches_and_second_cycle_reuses() {
    let (tmp, sources) = library(&[("dawn.png", 1600, 1000)]);
    let path = write_settings(
        tmp.path(),
        json!({ "imageFiles[]": sources, "randomize": "false", "padImage": "false" }),
    );
    let backend = RustBackend::new();
    let device = DeviceSettings::default();

    let mut settings = Settings::load(&path).unwrap();
    let first = generate_image(&backend, &mut settings, &device).unwrap();
    settings.save(&path).unwrap();

    assert_eq!(first.source, ImageSource::Raw);
    assert_eq!(first.fit, Some(FrameFit::Stretch));
    assert_eq!(first.bitmap.dimensions(), (800, 480));
    assert!(tmp.path().join("cached/dawn.png").exists());

    let mut settings = Settings::load(&path).unwrap();
    let second = generate_image(&backend, &mut settings, &device).unwrap();

    assert_eq!(second.source, ImageSource::Cache);
    assert_eq!(second.bitmap, first.bitmap);
}

#[test]
fn crop_record_is_applied_before_resize() {
    let (tmp, sources) = library(&[("wide.png", 400, 200)]);
    let id = safe_id(Some(sources[0].as_str()));
    assert_eq!(id, "wide_png");

    let mut settings = Settings::new();
    settings.set("imageFiles[]", json!(sources));
    settings.set(
        format!("crop_settings[{id}]"),
        r#"{"rotate": 0, "width": 100, "height": 60, "x": 0, "y": 0}"#,
    );
    let device = DeviceSettings {
        display: DisplayConfig {
            resolution: [50, 30],
            orientation: Orientation::Horizontal,
        },
    };

    let render = generate_image(&RustBackend::new(), &mut settings, &device).unwrap();

    assert_eq!(render.bitmap.dimensions(), (50, 30));
    // Top-left crop of the gradient stays dark in both channels.
    let Rgb([r, g, _]) = *render.bitmap.get_pixel(49, 29);
    assert!(r < 110 && g < 70, "pixel ({r}, {g}) is outside the crop");
    assert!(tmp.path().join("cached/wide.png").exists());
}

// =========================================================================
// Pad branch
// =========================================================================

#[test]
fn pad_mode_letterboxes_without_caching() {
    let (tmp, sources) = library(&[("tall.png", 300, 600)]);
    let mut settings = Settings::new();
    settings.set("imageFiles[]", json!(sources));
    settings.set("padImage", "true");
    settings.set("backgroundColor", "black");

    let render =
        generate_image(&RustBackend::new(), &mut settings, &DeviceSettings::default()).unwrap();

    assert_eq!(render.fit, Some(FrameFit::Pad));
    assert_eq!(render.bitmap.dimensions(), (300, 180));
    assert_eq!(*render.bitmap.get_pixel(0, 90), Rgb([0, 0, 0]));
    assert!(fs::read_dir(tmp.path().join("cached")).unwrap().next().is_none());
}

#[test]
fn vertical_panel_swaps_pad_ratio() {
    let (_tmp, sources) = library(&[("wide.png", 600, 300)]);
    let mut settings = Settings::new();
    settings.set("imageFiles[]", json!(sources));
    settings.set("padImage", "true");
    let device = DeviceSettings {
        display: DisplayConfig {
            resolution: [800, 480],
            orientation: Orientation::Vertical,
        },
    };

    let render = generate_image(&RustBackend::new(), &mut settings, &device).unwrap();

    assert_eq!(render.bitmap.dimensions(), (180, 300));
}

// =========================================================================
// Errors
// =========================================================================

#[test]
fn empty_list_leaves_settings_file_alone() {
    let tmp = TempDir::new().unwrap();
    let path = write_settings(tmp.path(), json!({ "imageFiles[]": [], "image_index": 3 }));
    let before = fs::read_to_string(&path).unwrap();

    let mut settings = Settings::load(&path).unwrap();
    let err =
        generate_image(&RustBackend::new(), &mut settings, &DeviceSettings::default()).unwrap_err();

    assert!(matches!(err, PipelineError::Input(_)));
    assert_eq!(settings.image_index(), 3);
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn broken_crop_record_does_not_stall_the_frame() {
    let (_tmp, sources) = library(&[("a.png", 160, 96), ("b.png", 160, 96)]);
    let mut settings = Settings::new();
    settings.set("imageFiles[]", json!(sources));
    settings.set("crop_settings[a_png]", "{broken");
    let backend = RustBackend::new();
    let device = DeviceSettings::default();

    let first = generate_image(&backend, &mut settings, &device);
    assert!(matches!(first, Err(PipelineError::CropSettings { .. })));
    assert_eq!(settings.image_index(), 1);

    let second = generate_image(&backend, &mut settings, &device).unwrap();
    assert_eq!(second.index, 1);
    assert_eq!(settings.image_index(), 0);
}

#[test]
fn unknown_background_color_still_advances() {
    let (_tmp, sources) = library(&[("a.png", 160, 96), ("b.png", 160, 96)]);
    let mut settings = Settings::new();
    settings.set("imageFiles[]", json!(sources));
    settings.set("backgroundColor", "blurple");

    let err =
        generate_image(&RustBackend::new(), &mut settings, &DeviceSettings::default()).unwrap_err();

    assert!(matches!(err, PipelineError::Color(_)));
    assert_eq!(settings.image_index(), 1);
}

#[test]
fn unreadable_source_reports_generic_message() {
    let (tmp, mut sources) = library(&[]);
    let broken = tmp.path().join("saved/broken.jpg");
    fs::write(&broken, b"not an image").unwrap();
    sources.push(broken.to_string_lossy().into_owned());
    let mut settings = Settings::new();
    settings.set("imageFiles[]", json!(sources));

    let err =
        generate_image(&RustBackend::new(), &mut settings, &DeviceSettings::default()).unwrap_err();

    assert_eq!(err.to_string(), "Failed to read image file");
}

// =========================================================================
// Device config
// =========================================================================

#[test]
fn device_toml_overrides_resolution() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("device.toml");
    fs::write(&path, "[display]\nresolution = [1024, 600]\n").unwrap();

    let device = load_config(&path).unwrap();

    assert_eq!(device.display.resolution, [1024, 600]);
    assert_eq!(device.display.orientation, Orientation::Horizontal);
}

#[test]
fn device_toml_rejects_unknown_keys() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("device.toml");
    fs::write(&path, "[display]\nbrightness = 3\n").unwrap();

    assert!(load_config(&path).is_err());
}
