//! SVG output surface built on the `svg` crate

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use base64::{engine::general_purpose, Engine as _};
use image::ImageFormat;
use log::{debug, warn};
use svg::node::element::{Element, Group, Image, Rectangle, Text};
use svg::node::Text as TextNode;
use svg::Document;

use crate::error::{CalendarError, CalendarResult};
use crate::surface::{DrawingSurface, ImageFit};
use crate::types::{Pos, Rect, Size, Transform};

/// Group still being filled
struct OpenGroup {
    style: String,
    transform: Transform,
    children: Vec<Element>,
}

/// SVG writer streaming one document into `W` on [`DrawingSurface::end`]
pub struct SvgWriter<W: Write> {
    out: W,
    page: Option<(Size, String, Rect)>,
    elements: Vec<Element>,
    groups: Vec<OpenGroup>,
    embed_images: bool,
}

impl<W: Write> SvgWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            page: None,
            elements: Vec::new(),
            groups: Vec::new(),
            embed_images: false,
        }
    }

    /// Inline referenced image files as base64 `data:` URIs
    pub fn with_embedded_images(mut self, embed: bool) -> Self {
        self.embed_images = embed;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn push(&mut self, element: Element) -> CalendarResult<()> {
        if self.page.is_none() {
            return Err(CalendarError::Surface("document not started".to_string()));
        }
        match self.groups.last_mut() {
            Some(group) => group.children.push(element),
            None => self.elements.push(element),
        }
        Ok(())
    }

    fn image_href(&self, href: &str) -> String {
        if !self.embed_images || href.starts_with("data:") {
            return href.to_string();
        }
        match fs::read(href) {
            Ok(data) => data_uri(&data),
            Err(e) => {
                warn!("Cannot embed image {}: {}; keeping a reference", href, e);
                href.to_string()
            }
        }
    }
}

impl SvgWriter<BufWriter<File>> {
    /// Writer creating (or truncating) the file at `path`
    pub fn create<P: AsRef<Path>>(path: P) -> CalendarResult<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

/// Encode image bytes as a `data:` URI, detecting the MIME type from content
pub fn data_uri(data: &[u8]) -> String {
    let mime = image::guess_format(data)
        .ok()
        .and_then(mime_for_format)
        .unwrap_or("application/octet-stream");
    let base64_data = general_purpose::STANDARD.encode(data);
    format!("data:{};base64,{}", mime, base64_data)
}

fn mime_for_format(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Png => Some("image/png"),
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::Gif => Some("image/gif"),
        ImageFormat::WebP => Some("image/webp"),
        ImageFormat::Bmp => Some("image/bmp"),
        ImageFormat::Tiff => Some("image/tiff"),
        _ => None,
    }
}

fn with_style<T: svg::Node>(mut node: T, style: &str) -> T {
    if !style.is_empty() {
        node.assign("style", style);
    }
    node
}

impl<W: Write> DrawingSurface for SvgWriter<W> {
    fn start(&mut self, page: Size, unit: &str, view_box: Rect) -> CalendarResult<()> {
        if self.page.is_some() {
            return Err(CalendarError::Surface("document already started".to_string()));
        }
        self.page = Some((page, unit.to_string(), view_box));
        Ok(())
    }

    fn end(&mut self) -> CalendarResult<()> {
        if !self.groups.is_empty() {
            return Err(CalendarError::Surface(format!(
                "{} group(s) left open",
                self.groups.len()
            )));
        }
        let (page, unit, view_box) = self
            .page
            .take()
            .ok_or_else(|| CalendarError::Surface("document not started".to_string()))?;

        let document = std::mem::take(&mut self.elements).into_iter().fold(
            Document::new()
                .set("width", format!("{}{}", page.width, unit))
                .set("height", format!("{}{}", page.height, unit))
                .set(
                    "viewBox",
                    format!(
                        "{} {} {} {}",
                        view_box.pos.x, view_box.pos.y, view_box.size.width, view_box.size.height
                    ),
                ),
            |doc, element| doc.add(element),
        );

        svg::write(&mut self.out, &document)?;
        self.out.flush()?;
        debug!("SVG document written ({}x{}{})", page.width, page.height, unit);
        Ok(())
    }

    fn rect(&mut self, pos: Pos, size: Size, style: &str) -> CalendarResult<()> {
        let rect = Rectangle::new()
            .set("x", pos.x)
            .set("y", pos.y)
            .set("width", size.width)
            .set("height", size.height);
        self.push(with_style(rect, style).into())
    }

    fn image(&mut self, pos: Pos, size: Size, href: &str, fit: ImageFit) -> CalendarResult<()> {
        let image = Image::new()
            .set("x", pos.x)
            .set("y", pos.y)
            .set("width", size.width)
            .set("height", size.height)
            .set("preserveAspectRatio", fit.preserve_aspect_ratio())
            .set("href", self.image_href(href));
        self.push(image.into())
    }

    fn group_start(&mut self, style: &str, transform: Transform) -> CalendarResult<()> {
        if self.page.is_none() {
            return Err(CalendarError::Surface("document not started".to_string()));
        }
        self.groups.push(OpenGroup {
            style: style.to_string(),
            transform,
            children: Vec::new(),
        });
        Ok(())
    }

    fn group_end(&mut self) -> CalendarResult<()> {
        let open = self
            .groups
            .pop()
            .ok_or_else(|| CalendarError::Surface("no open group".to_string()))?;
        let group = open.children.into_iter().fold(
            Group::new().set("transform", open.transform.to_string()),
            |group, child| group.add(child),
        );
        self.push(with_style(group, &open.style).into())
    }

    fn text(&mut self, x: i32, y: i32, text: &str, style: &str) -> CalendarResult<()> {
        let text_elem = Text::new()
            .set("x", x)
            .set("y", y)
            .add(TextNode::new(text));
        self.push(with_style(text_elem, style).into())
    }
}
