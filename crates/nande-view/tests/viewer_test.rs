//! Viewer behavior through its event interface.

use std::path::PathBuf;

use image::{Rgb, RgbImage};
use nande_core::PointF;
use nande_view::{DisplayMode, DropVerdict, GridMode, InputEvent, Key, PointerButton, Viewer, PLACEHOLDER_TEXT};
use tempfile::TempDir;

fn write_png(dir: &TempDir, name: &str, w: u32, h: u32) -> PathBuf {
    let path = dir.path().join(name);
    let img = RgbImage::from_fn(w, h, |x, y| Rgb([x as u8, y as u8, 128]));
    img.save(&path).unwrap();
    path
}

#[test]
fn test_drop_loads_and_fits() {
    let dir = TempDir::new().unwrap();
    let path = write_png(&dir, "drop.png", 64, 32);
    let mut viewer = Viewer::new();
    viewer.handle_event(InputEvent::Resize { width: 128.0, height: 128.0 });
    viewer.handle_event(InputEvent::FilesDropped(vec![path.clone()]));

    assert_eq!(viewer.path(), Some(path.as_path()));
    assert_eq!(viewer.title(), path.display().to_string());
    assert_eq!(viewer.viewport().scale(), 2.0);
    let frame = viewer.frame();
    assert!(frame.placeholder.is_none());
    assert_eq!(frame.quads.len(), 1);
}

#[test]
fn test_drop_resets_mirror() {
    let dir = TempDir::new().unwrap();
    let a = write_png(&dir, "a.png", 8, 8);
    let b = write_png(&dir, "b.png", 8, 8);
    let mut viewer = Viewer::new();
    viewer.handle_event(InputEvent::FilesDropped(vec![a]));
    viewer.flip();
    viewer.flop();
    assert!(!viewer.mirror_state().is_identity());
    viewer.handle_event(InputEvent::FilesDropped(vec![b]));
    assert!(viewer.mirror_state().is_identity());
}

#[test]
fn test_new_image_starts_unmirrored() {
    let dir = TempDir::new().unwrap();
    let a = write_png(&dir, "a.png", 4, 4);
    let b = write_png(&dir, "b.png", 8, 8);
    for tiled in [false, true] {
        let mut viewer = Viewer::new();
        viewer.set_tile_edge(4);
        viewer.set_use_tiles(tiled);
        viewer.load(&a).unwrap();
        viewer.flip();
        viewer.load(&b).unwrap();
        assert!(viewer.mirror_state().is_identity());
        assert!(viewer.tiles().mirror_state().is_identity());
        let quads = viewer.quads();
        assert_eq!(quads.len(), if tiled { 4 } else { 1 });
        assert!(quads.iter().all(|q| !q.mirror_x && !q.mirror_y));
    }
}

#[test]
fn test_failed_drop_keeps_mirror() {
    let dir = TempDir::new().unwrap();
    let good = write_png(&dir, "good.png", 4, 4);
    let bad = dir.path().join("bad.png");
    std::fs::write(&bad, b"\x89PNG\r\n\x1a\ngarbage").unwrap();

    let mut viewer = Viewer::new();
    viewer.handle_event(InputEvent::FilesDropped(vec![good]));
    viewer.flop();
    viewer.handle_event(InputEvent::FilesDropped(vec![bad]));
    assert!(viewer.mirror_state().flop);
    assert!(viewer.quads()[0].mirror_x);
}

#[test]
fn test_rejected_drops() {
    let dir = TempDir::new().unwrap();
    let a = write_png(&dir, "a.png", 4, 4);
    let b = write_png(&dir, "b.png", 4, 4);
    let mut viewer = Viewer::new();
    assert_eq!(viewer.drop_verdict(&[a.clone(), b]), DropVerdict::Forbidden);
    assert_eq!(viewer.drop_verdict(&[PathBuf::from("notes.txt")]), DropVerdict::Forbidden);
    viewer.handle_event(InputEvent::FilesDropped(vec![PathBuf::from("notes.txt")]));
    assert!(viewer.surface().is_none());
    assert_eq!(viewer.frame().placeholder.unwrap().text, PLACEHOLDER_TEXT);
    assert_eq!(viewer.drop_verdict(&[a]), DropVerdict::Accept);
}

#[test]
fn test_load_keeps_previous_on_failure() {
    let dir = TempDir::new().unwrap();
    let good = write_png(&dir, "good.png", 4, 4);
    let bad = dir.path().join("bad.png");
    std::fs::write(&bad, b"\x89PNG\r\n\x1a\ngarbage").unwrap();

    let mut viewer = Viewer::new();
    viewer.load(&good).unwrap();
    assert!(viewer.load(&bad).is_err());
    assert!(viewer.last_error().is_some());
    assert_eq!(viewer.path(), Some(good.as_path()));
    assert!(viewer.surface().is_some());
}

#[test]
fn test_keyboard_modes() {
    let dir = TempDir::new().unwrap();
    let path = write_png(&dir, "k.png", 4, 4);
    let mut viewer = Viewer::new();
    viewer.load(&path).unwrap();
    let generation = viewer.generation();

    viewer.handle_event(InputEvent::Key { key: Key::L, shift: false });
    assert_eq!(viewer.display_mode(), DisplayMode::Luminance);
    assert!(viewer.generation() > generation);
    viewer.handle_event(InputEvent::Key { key: Key::I, shift: false });
    assert_eq!(viewer.display_mode(), DisplayMode::Inverted);
    viewer.handle_event(InputEvent::Key { key: Key::C, shift: false });
    assert_eq!(viewer.display_mode(), DisplayMode::Color);
}

#[test]
fn test_wheel_zoom_around_cursor() {
    let mut viewer = Viewer::new();
    viewer.handle_event(InputEvent::Resize { width: 400.0, height: 400.0 });
    let cursor = PointF::new(120.0, 80.0);
    let under = viewer.viewport().map_to_scene(cursor);
    viewer.handle_event(InputEvent::Wheel { delta: 120.0, pos: cursor });
    let after = viewer.viewport().map_to_view(under);
    assert!((after.x - cursor.x).abs() < 1e-9);
    assert!((after.y - cursor.y).abs() < 1e-9);
    assert!(viewer.viewport().scale() > 1.0);
}

#[test]
fn test_every_press_notifies() {
    let mut viewer = Viewer::new();
    for button in [PointerButton::Left, PointerButton::Middle] {
        viewer.handle_event(InputEvent::PointerPress {
            pos: PointF::new(1.0, 1.0),
            button,
        });
        viewer.handle_event(InputEvent::PointerRelease {
            pos: PointF::new(1.0, 1.0),
            button,
        });
    }
    assert_eq!(viewer.take_notifications().len(), 2);
}

#[test]
fn test_grid_under_image_in_view_space() {
    let mut viewer = Viewer::new();
    viewer.handle_event(InputEvent::Resize { width: 100.0, height: 100.0 });
    viewer.set_grid_mode(GridMode::Dots);
    viewer.set_grid_size(50);
    let frame = viewer.frame();
    assert!(!frame.grid.is_empty());
    assert!(frame.quads.is_empty());
}

#[test]
fn test_dots_bounded_after_deep_wheel_zoom_out() {
    let dir = TempDir::new().unwrap();
    let path = write_png(&dir, "small.png", 64, 64);
    let mut viewer = Viewer::new();
    viewer.handle_event(InputEvent::Resize { width: 1280.0, height: 720.0 });
    viewer.load(&path).unwrap();
    viewer.set_grid_mode(GridMode::Dots);
    let center = PointF::new(640.0, 360.0);
    for _ in 0..80 {
        viewer.handle_event(InputEvent::Wheel { delta: -120.0, pos: center });
    }
    assert!(viewer.viewport().scale() < 1e-3);
    let frame = viewer.frame();
    assert!(!frame.grid.is_empty());
    assert!(frame.grid.len() <= 321 * 181);
}

#[test]
fn test_fps_repaint_only_when_idle() {
    let mut viewer = Viewer::new();
    assert!(!viewer.tick_fps());
    viewer.frame();
    viewer.handle_event(InputEvent::PointerPress {
        pos: PointF::new(1.0, 1.0),
        button: PointerButton::Left,
    });
    assert!(!viewer.tick_fps());
    assert_eq!(viewer.framerate(), 1);
}
