//! embedded-graphics executor for `pageturn` pages.
//!
//! [`MonoFaces`] supplies the pager's [`GlyphMetrics`] from a pair of
//! `MonoFont` faces, and [`PageSurface`] replays a [`RenderedPage`] command
//! stream onto any `DrawTarget<Color = BinaryColor>`. Using the same
//! [`MonoFaces`] for layout and drawing keeps break decisions and pixels in
//! agreement.

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

use embedded_graphics::{
    mono_font::{
        ascii::{FONT_6X13, FONT_6X13_BOLD},
        MonoFont, MonoTextStyle,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};
use pageturn::{CoverCommand, DrawCommand, GlyphCommand, GlyphMetrics, RenderedPage, TagId};

/// Base and emphasis mono faces used for measurement and drawing.
///
/// Every keyword tag draws with the emphasis face; hosts that want distinct
/// faces per tag implement [`GlyphMetrics`] themselves.
#[derive(Clone, Copy, Debug)]
pub struct MonoFaces {
    base: &'static MonoFont<'static>,
    emphasis: &'static MonoFont<'static>,
}

impl MonoFaces {
    pub const fn new(
        base: &'static MonoFont<'static>,
        emphasis: &'static MonoFont<'static>,
    ) -> Self {
        Self { base, emphasis }
    }

    fn face_for(&self, tag: Option<TagId>) -> &'static MonoFont<'static> {
        if tag.is_some() {
            self.emphasis
        } else {
            self.base
        }
    }
}

impl Default for MonoFaces {
    fn default() -> Self {
        Self::new(&FONT_6X13, &FONT_6X13_BOLD)
    }
}

impl GlyphMetrics for MonoFaces {
    fn char_width(&self, _ch: char, tag: Option<TagId>) -> i32 {
        let font = self.face_for(tag);
        (font.character_size.width + font.character_spacing) as i32
    }

    fn line_height(&self, tag: Option<TagId>) -> i32 {
        self.face_for(tag).character_size.height as i32
    }
}

/// Executor configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceConfig {
    /// Clear the target before drawing a page.
    pub clear_first: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self { clear_first: true }
    }
}

/// Draw counters reported per rendered page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceDiagnostics {
    pub glyphs_drawn: u64,
    pub tagged_glyphs: u64,
    pub covers_drawn: u64,
}

/// Draw-command executor for embedded-graphics targets.
#[derive(Clone, Copy, Debug, Default)]
pub struct PageSurface {
    cfg: SurfaceConfig,
    faces: MonoFaces,
}

impl PageSurface {
    pub const fn new(cfg: SurfaceConfig, faces: MonoFaces) -> Self {
        Self { cfg, faces }
    }

    /// Faces used for drawing; hand these to the pager as its metrics so
    /// breaks and pixels share one width model.
    pub fn faces(&self) -> MonoFaces {
        self.faces
    }

    /// Render a page to a draw target.
    pub fn render_page<D>(&self, page: &RenderedPage, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        self.render_page_with_diagnostics(page, display).map(|_| ())
    }

    /// Render a page and report draw counters.
    pub fn render_page_with_diagnostics<D>(
        &self,
        page: &RenderedPage,
        display: &mut D,
    ) -> Result<SurfaceDiagnostics, D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let mut diagnostics = SurfaceDiagnostics::default();
        if self.cfg.clear_first {
            display.clear(BinaryColor::Off)?;
        }
        for command in &page.commands {
            match command {
                DrawCommand::Glyph(glyph) => {
                    self.draw_glyph(display, glyph)?;
                    diagnostics.glyphs_drawn = diagnostics.glyphs_drawn.saturating_add(1);
                    if glyph.tag.is_some() {
                        diagnostics.tagged_glyphs = diagnostics.tagged_glyphs.saturating_add(1);
                    }
                }
                DrawCommand::Cover(cover) => {
                    draw_cover_frame(display, cover)?;
                    diagnostics.covers_drawn = diagnostics.covers_drawn.saturating_add(1);
                }
            }
        }
        Ok(diagnostics)
    }

    fn draw_glyph<D>(&self, display: &mut D, glyph: &GlyphCommand) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let style = MonoTextStyle::new(self.faces.face_for(glyph.tag), BinaryColor::On);
        let mut utf8 = [0u8; 4];
        Text::with_baseline(
            glyph.ch.encode_utf8(&mut utf8),
            Point::new(glyph.x, glyph.y),
            style,
            Baseline::Top,
        )
        .draw(display)?;
        Ok(())
    }
}

/// Placeholder cover frame: an outline with corner-to-corner diagonals.
/// Hosts with real cover bitmaps draw those at the same placement instead.
fn draw_cover_frame<D>(display: &mut D, cover: &CoverCommand) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    if cover.width == 0 || cover.height == 0 {
        log::warn!(
            "degenerate cover placement {}x{}; flooring to one pixel",
            cover.width,
            cover.height
        );
    }
    let size = Size::new(cover.width.max(1), cover.height.max(1));
    let origin = Point::new(cover.x, cover.y);
    let far = Point::new(
        cover.x + size.width as i32 - 1,
        cover.y + size.height as i32 - 1,
    );
    let stroke = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
    Rectangle::new(origin, size).into_styled(stroke).draw(display)?;
    Line::new(origin, far).into_styled(stroke).draw(display)?;
    Line::new(Point::new(origin.x, far.y), Point::new(far.x, origin.y))
        .into_styled(stroke)
        .draw(display)?;
    Ok(())
}
