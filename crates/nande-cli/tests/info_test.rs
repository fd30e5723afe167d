//! `nande info` end to end.

use std::process::Command;

use image::{Rgba, RgbaImage};
use tempfile::TempDir;

fn nande() -> Command {
    Command::new(env!("CARGO_BIN_EXE_nande"))
}

#[test]
fn test_info_prints_dimensions_and_tiles() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tiles.png");
    RgbaImage::from_pixel(600, 300, Rgba([1, 2, 3, 4])).save(&path).unwrap();

    let out = nande().arg("info").arg(&path).args(["--tile-edge", "256"]).output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Resolution: 600x300"), "{stdout}");
    assert!(stdout.contains("Channels:   4"), "{stdout}");
    assert!(stdout.contains("Bit depth:  8-bit"), "{stdout}");
    assert!(stdout.contains("Tiles:      6 (256px)"), "{stdout}");
}

#[test]
fn test_info_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let out = nande().arg("info").arg(dir.path().join("nope.png")).output().unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("nope.png"));
}
