//! PNG preview of a rendered calendar

use std::path::Path;

use image::{DynamicImage, RgbaImage};
use log::debug;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{fontdb, Options, Tree};

use crate::error::{CalendarError, CalendarResult};

/// Resolution `usvg` assumes when converting physical units to pixels
const SVG_DPI: f32 = 96.0;

/// Rasterize an SVG document at `dpi` pixels per inch
pub fn rasterize(svg_content: &str, dpi: f32) -> CalendarResult<DynamicImage> {
    if dpi <= 0.0 {
        return Err(CalendarError::Raster(format!("dpi must be positive, got {}", dpi)));
    }

    let opt = Options::default();
    let mut fonts = fontdb::Database::new();
    fonts.load_system_fonts();
    let tree = Tree::from_str(svg_content, &opt, &fonts)
        .map_err(|e| CalendarError::Raster(format!("Failed to parse SVG: {}", e)))?;

    let scale = dpi / SVG_DPI;
    let size = tree.size();
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;
    debug!("Rasterizing {}x{} px at {} dpi", width, height, dpi);

    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        CalendarError::Raster(format!("Failed to create {}x{} pixmap", width, height))
    })?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    // Pixmap data is premultiplied
    let rgba_data: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let c = pixel.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    let img = RgbaImage::from_raw(width, height, rgba_data)
        .ok_or_else(|| CalendarError::Raster("Failed to create image from pixmap".to_string()))?;
    Ok(DynamicImage::ImageRgba8(img))
}

/// Rasterize `svg_content` and save it as PNG at `path`
pub fn save_png<P: AsRef<Path>>(svg_content: &str, dpi: f32, path: P) -> CalendarResult<()> {
    let img = rasterize(svg_content, dpi)?;
    img.save_with_format(path.as_ref(), image::ImageFormat::Png)?;
    debug!("PNG preview saved to {}", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10mm" height="5mm" viewBox="0 0 100 50"><rect x="0" y="0" width="100" height="50" style="fill:#ff0000"/></svg>"##;

    #[test]
    fn test_rasterize_scales_with_dpi() {
        let img = rasterize(SQUARE, 254.0).unwrap();
        // 10mm at 254 dpi is 100 px.
        let (w, h) = img.dimensions();
        assert!((99..=101).contains(&w), "{w}");
        assert!((49..=51).contains(&h), "{h}");
        assert_eq!(img.get_pixel(w / 2, h / 2).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(rasterize(SQUARE, 0.0), Err(CalendarError::Raster(_))));
        assert!(matches!(rasterize("not svg", 96.0), Err(CalendarError::Raster(_))));
    }
}
