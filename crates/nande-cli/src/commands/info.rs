//! Image info command.
//!
//! Prints dimensions, channels, bit depth and the tile count a viewer would
//! build for the given tile edge.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use nande_core::PixelBuffer;
use nande_io::Format;
use tracing::debug;

use crate::InfoArgs;

/// Runs the info command.
pub fn run(args: InfoArgs) -> Result<()> {
    for (i, path) in args.input.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let size = fs::metadata(path)
            .with_context(|| format!("Failed to stat: {}", path.display()))?
            .len();
        let format = Format::detect(path).unwrap_or(Format::Unknown);
        debug!(path = %path.display(), ?format, size, "reading image");
        let image = super::load_image(path)?;
        print!("{}", describe(path, &image, size, format, args.tile_edge));
    }
    Ok(())
}

/// Tiles covering `width x height` with the given maximum edge.
pub fn tile_count(width: u32, height: u32, edge: u32) -> u32 {
    let edge = edge.max(1);
    width.div_ceil(edge) * height.div_ceil(edge)
}

fn describe(path: &Path, image: &PixelBuffer, file_size: u64, format: Format, tile_edge: u32) -> String {
    let (w, h) = (image.width(), image.height());
    format!(
        "{}\n  Format:     {:?}\n  Resolution: {}x{}\n  Channels:   {}\n  Bit depth:  {}\n  File size:  {}\n  Tiles:      {} ({}px)\n",
        path.display(),
        format,
        w,
        h,
        image.channels(),
        image.depth(),
        super::format_size(file_size),
        tile_count(w, h, tile_edge),
        tile_edge.max(1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_count() {
        assert_eq!(tile_count(1100, 600, 512), 6);
        assert_eq!(tile_count(512, 512, 512), 1);
        assert_eq!(tile_count(1, 1, 0), 1);
    }

    #[test]
    fn test_describe() {
        let image = PixelBuffer::from_u8(1024, 768, 3, vec![0; 1024 * 768 * 3]).unwrap();
        let text = describe(Path::new("a.png"), &image, 2048, Format::Png, 512);
        assert!(text.starts_with("a.png\n"));
        assert!(text.contains("Resolution: 1024x768"));
        assert!(text.contains("Channels:   3"));
        assert!(text.contains("Tiles:      4 (512px)"));
        assert!(text.contains("2.00 KB"));
    }
}
