//! End-to-end path: pager output replayed onto an embedded-graphics target
//! through the `pageturn-embedded-graphics` executor.

mod common;

use core::convert::Infallible;

use common::fixtures::{cover_text, word_soup};
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use pageturn::{CoverArt, LayoutParams, Pager, PlainDocument, Rect, TagItem, TagStyle};
use pageturn_embedded_graphics::{PageSurface, SurfaceDiagnostics};

const DISPLAY: Rect = Rect::new(0, 0, 200, 120);
const SWEEP_LIMIT: usize = 64;

/// Minimal display double: remembers which pixels were lit.
struct PixelCaptureDisplay {
    size: Size,
    on_pixels: Vec<Point>,
}

impl PixelCaptureDisplay {
    fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            on_pixels: Vec::new(),
        }
    }
}

impl OriginDimensions for PixelCaptureDisplay {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for PixelCaptureDisplay {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if color == BinaryColor::On {
                self.on_pixels.push(point);
            }
        }
        Ok(())
    }
}

fn display() -> PixelCaptureDisplay {
    PixelCaptureDisplay::new(DISPLAY.width as u32, DISPLAY.height as u32)
}

fn ready_pager(text: &str, params: LayoutParams) -> Pager {
    let mut pager = Pager::new();
    pager.set_text(text);
    pager.bind_layout(params);
    pager.set_viewport(DISPLAY);
    pager
}

#[test]
fn pages_reach_the_display() {
    let doc = PlainDocument::new();
    let surface = PageSurface::default();
    let faces = surface.faces();
    let mut pager = ready_pager(&word_soup(12, 8), LayoutParams::wrapped());
    let mut display = display();

    let mut totals = SurfaceDiagnostics::default();
    let mut pages_drawn = 0usize;
    for _ in 0..SWEEP_LIMIT {
        let page = pager.render_page(&doc, &faces).expect("page");
        let diagnostics = surface
            .render_page_with_diagnostics(&page, &mut display)
            .expect("draw");
        totals.glyphs_drawn += diagnostics.glyphs_drawn;
        pages_drawn += 1;
        if pager.is_last_page() {
            break;
        }
        pager.page_down(&doc);
    }

    assert!(pager.is_last_page());
    assert!(pages_drawn >= 2);
    assert!(totals.glyphs_drawn > 0);
    assert!(!display.on_pixels.is_empty());
}

#[test]
fn cover_page_draws_a_frame() {
    let doc = PlainDocument::with_cover(CoverArt::new(64, 64));
    let surface = PageSurface::default();
    let faces = surface.faces();
    let mut pager = ready_pager(&cover_text(&word_soup(2, 6)), LayoutParams::wrapped());
    let mut display = display();

    let page = pager.render_page(&doc, &faces).expect("page");
    let diagnostics = surface
        .render_page_with_diagnostics(&page, &mut display)
        .expect("draw");

    assert!(pager.is_cover_page(&doc));
    assert_eq!(diagnostics.covers_drawn, 1);
    assert!(!display.on_pixels.is_empty());
}

#[test]
fn keyword_glyphs_draw_with_the_emphasis_face() {
    let doc = PlainDocument::new();
    let surface = PageSurface::default();
    let faces = surface.faces();
    let mut params = LayoutParams::wrapped();
    params
        .tags
        .push(TagItem::new("harbor", TagStyle::default()))
        .expect("tag slot");
    let mut pager = ready_pager(&word_soup(4, 8), params);
    let mut display = display();

    let page = pager.render_page(&doc, &faces).expect("page");
    let diagnostics = surface
        .render_page_with_diagnostics(&page, &mut display)
        .expect("draw");

    assert!(diagnostics.tagged_glyphs > 0);
    assert!(diagnostics.glyphs_drawn > diagnostics.tagged_glyphs);
}
