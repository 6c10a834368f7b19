//! Paginated (PDF) renderer.
//!
//! Two passes over the composed layout. The layout pass walks the block tree
//! with a top-down cursor and produces positioned draw operations per page,
//! inserting page breaks between atomic blocks. The paint pass instantiates
//! the pages and draws, then adds the running footer, whose text needs the
//! total page count that only exists once the layout pass has finished.
//!
//! Coordinates in the layout pass are top-based points; the paint pass
//! converts to PDF's bottom-left origin.

use jiff::civil::Date;
use jiff::tz::TimeZone;
use printpdf::{BuiltinFont, Color, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb};
use time::OffsetDateTime;
use tracing::info;

use examforge_core::layout::{
    HeaderBlock, PaperLayout, QuestionBlock, QuestionBody, SectionBlock, WORDMARK_BRAND,
    WORDMARK_TAGLINE,
};

use crate::error::ExportError;
use crate::logo::LogoImage;
use crate::styles::PageStyles;

// A4 in points.
const PAGE_WIDTH: f64 = 595.276;
const PAGE_HEIGHT: f64 = 841.89;

/// Band reserved at the bottom of every page for the running footer.
const FOOTER_BAND: f64 = 30.0;

/// Label gutter to the left of question text.
const LABEL_GUTTER: f64 = 25.0;

/// Horizontal space kept free for the right-aligned marks annotation.
const MARKS_GUTTER: f64 = 45.0;

/// Square bounding box for an embedded logo.
const LOGO_BOX: f64 = 60.0;

const BLACK: (f64, f64, f64) = (0.0, 0.0, 0.0);
const FOOTER_GRAY: (f64, f64, f64) = (0.4, 0.4, 0.4);
const BRAND_MAROON: (f64, f64, f64) = (0.5, 0.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FontRole {
    Body,
    Bold,
    Brand,
}

#[derive(Debug)]
enum Op {
    Text {
        x: f64,
        baseline: f64,
        size: f64,
        role: FontRole,
        color: (f64, f64, f64),
        text: String,
    },
    Rule {
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
    },
    Logo {
        x: f64,
        top: f64,
        width: f64,
        height: f64,
    },
}

pub(crate) fn render(
    layout: &PaperLayout,
    styles: &PageStyles,
    logo: Option<&LogoImage>,
    today: Date,
) -> Result<Vec<u8>, ExportError> {
    let mut layouter = Layouter::new(styles);
    layouter.header(&layout.header, logo);
    for section in &layout.sections {
        layouter.section(section);
    }

    let pages = layouter.pages;
    let total = pages.len();

    let (doc, first_page, first_layer) = PdfDocument::new(
        layout.title.as_str(),
        mm(PAGE_WIDTH),
        mm(PAGE_HEIGHT),
        "content",
    );
    // The library would otherwise stamp a random id and the wall-clock time
    // into the metadata, and two renders of the same paper must be
    // byte-identical.
    let stamp = metadata_date(today);
    let doc = doc
        .with_identifier(format!("examforge-{}-{}", layout.title, today))
        .with_creation_date(stamp)
        .with_mod_date(stamp);
    let fonts = Fonts {
        body: builtin(&doc, BuiltinFont::TimesRoman)?,
        bold: builtin(&doc, BuiltinFont::TimesBold)?,
        // The decorative brand face; closest builtin stand-in.
        brand: builtin(&doc, BuiltinFont::HelveticaBold)?,
    };

    for (index, ops) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "content");
            doc.get_page(page).get_layer(layer)
        };

        for op in ops {
            paint(&layer, &fonts, logo, op);
        }
        paint_footer(
            &layer,
            &fonts,
            styles,
            &layout.footer.page_text(index + 1, total),
        );
    }

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    info!(pages = total, bytes = bytes.len(), "paginated render complete");
    Ok(bytes)
}

struct Fonts {
    body: IndirectFontRef,
    bold: IndirectFontRef,
    brand: IndirectFontRef,
}

/// Midnight UTC of the injected clock's date, for the document metadata.
fn metadata_date(today: Date) -> OffsetDateTime {
    let seconds = today
        .at(0, 0, 0, 0)
        .to_zoned(TimeZone::UTC)
        .map(|zoned| zoned.timestamp().as_second())
        .unwrap_or(0);
    OffsetDateTime::from_unix_timestamp(seconds).unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

fn builtin(
    doc: &printpdf::PdfDocumentReference,
    font: BuiltinFont,
) -> Result<IndirectFontRef, ExportError> {
    doc.add_builtin_font(font)
        .map_err(|e| ExportError::Pdf(e.to_string()))
}

// ---------------------------------------------------------------------------
// Layout pass
// ---------------------------------------------------------------------------

struct Layouter<'a> {
    styles: &'a PageStyles,
    pages: Vec<Vec<Op>>,
    /// Distance from the page top to the next block's top edge.
    cursor: f64,
}

impl<'a> Layouter<'a> {
    fn new(styles: &'a PageStyles) -> Self {
        Self {
            styles,
            pages: vec![Vec::new()],
            cursor: styles.margin_pt,
        }
    }

    fn left(&self) -> f64 {
        self.styles.margin_pt
    }

    fn content_width(&self) -> f64 {
        PAGE_WIDTH - 2.0 * self.styles.margin_pt
    }

    fn limit(&self) -> f64 {
        PAGE_HEIGHT - self.styles.margin_pt - FOOTER_BAND
    }

    fn remaining(&self) -> f64 {
        self.limit() - self.cursor
    }

    fn line_height(&self, size: usize) -> f64 {
        size as f64 * self.styles.line_height
    }

    fn start_page(&mut self) {
        self.pages.push(Vec::new());
        self.cursor = self.styles.margin_pt;
    }

    /// Break the page unless `height` still fits. A block taller than a whole
    /// page stays where it is rather than looping on empty pages.
    fn reserve(&mut self, height: f64) {
        if height > self.remaining() && self.cursor > self.styles.margin_pt {
            self.start_page();
        }
    }

    fn op(&mut self, op: Op) {
        // pages is never empty; a page exists from construction on.
        if let Some(page) = self.pages.last_mut() {
            page.push(op);
        }
    }

    fn place(&mut self, x: f64, baseline: f64, size: usize, role: FontRole, text: &str) {
        self.place_colored(x, baseline, size, role, BLACK, text);
    }

    fn place_colored(
        &mut self,
        x: f64,
        baseline: f64,
        size: usize,
        role: FontRole,
        color: (f64, f64, f64),
        text: &str,
    ) {
        if text.is_empty() {
            return;
        }
        self.op(Op::Text {
            x,
            baseline,
            size: size as f64,
            role,
            color,
            text: text.to_string(),
        });
    }

    fn rule(&mut self, from: (f64, f64), to: (f64, f64), width: f64) {
        self.op(Op::Rule { from, to, width });
    }

    fn centered(&mut self, center_x: f64, baseline: f64, size: usize, role: FontRole, text: &str) {
        let w = text_width(text, size, role != FontRole::Body);
        self.place(center_x - w / 2.0, baseline, size, role, text);
    }

    // -- header -------------------------------------------------------------

    fn header(&mut self, header: &HeaderBlock, logo: Option<&LogoImage>) {
        let styles = self.styles;
        let left = self.left();
        let cw = self.content_width();
        let col1_w = cw * 0.25;
        let col2_w = cw * 0.50;
        let pad = 6.0;

        let title_step = self.line_height(styles.title_size) + 4.0;
        let titles_h = title_step * 3.0;
        let meta_h = (self.line_height(styles.meta_size) + 5.0) * 3.0;
        let box_h = (titles_h.max(meta_h) + 2.0 * pad).max(70.0);

        self.reserve(box_h + 15.0);
        let top = self.cursor;

        // Box borders: outer rectangle plus the two column separators.
        let right = left + cw;
        let bottom = top + box_h;
        let sep1 = left + col1_w;
        let sep2 = left + col1_w + col2_w;
        for (from, to) in [
            ((left, top), (right, top)),
            ((left, bottom), (right, bottom)),
            ((left, top), (left, bottom)),
            ((right, top), (right, bottom)),
            ((sep1, top), (sep1, bottom)),
            ((sep2, top), (sep2, bottom)),
        ] {
            self.rule(from, to, 1.2);
        }

        self.logo_cell(logo, header, left, top, col1_w, box_h);

        // Column 2: three centered, underlined title lines.
        let center = sep1 + col2_w / 2.0;
        let mut y = top + (box_h - titles_h) / 2.0;
        for title in &header.titles {
            let baseline = y + styles.title_size as f64;
            self.centered(center, baseline, styles.title_size, FontRole::Bold, title);
            let w = text_width(title, styles.title_size, true);
            self.rule(
                (center - w / 2.0, baseline + 2.0),
                (center + w / 2.0, baseline + 2.0),
                0.8,
            );
            y += title_step;
        }

        // Column 3: label/value metadata rows, rule under the first two.
        let label_x = sep2 + pad;
        let value_right = right - pad;
        let row_step = (box_h - 2.0 * pad) / 3.0;
        let mut y = top + pad;
        for row in &header.meta {
            let baseline = y + styles.meta_size as f64;
            self.place(label_x, baseline, styles.meta_size, FontRole::Bold, &row.label);
            let w = text_width(&row.value, styles.meta_size, true);
            self.place(
                value_right - w,
                baseline,
                styles.meta_size,
                FontRole::Bold,
                &row.value,
            );
            if row.ruled {
                self.rule(
                    (label_x, baseline + 3.0),
                    (value_right, baseline + 3.0),
                    0.6,
                );
            }
            y += row_step;
        }

        self.cursor = bottom + 15.0;
    }

    fn logo_cell(
        &mut self,
        logo: Option<&LogoImage>,
        header: &HeaderBlock,
        left: f64,
        top: f64,
        col_w: f64,
        box_h: f64,
    ) {
        let center = left + col_w / 2.0;
        match logo.filter(|_| header.logo_url.is_some()) {
            Some(image) => {
                let bound = LOGO_BOX.min(box_h - 10.0);
                let (w, h) = image.fit_within(bound);
                self.op(Op::Logo {
                    x: center - w / 2.0,
                    top: top + (box_h - h) / 2.0,
                    width: w,
                    height: h,
                });
            }
            None => {
                let brand_baseline = top + box_h / 2.0 + 4.0;
                let w = text_width(WORDMARK_BRAND, 24, true);
                self.place_colored(
                    center - w / 2.0,
                    brand_baseline,
                    24,
                    FontRole::Brand,
                    BRAND_MAROON,
                    WORDMARK_BRAND,
                );
                self.centered(
                    center,
                    brand_baseline + 11.0,
                    8,
                    FontRole::Body,
                    WORDMARK_TAGLINE,
                );
            }
        }
    }

    // -- sections -----------------------------------------------------------

    fn section(&mut self, section: &SectionBlock) {
        let styles = self.styles;
        let banner_lh = self.line_height(styles.banner_size);
        let notes_h: f64 = section
            .notes
            .iter()
            .map(|note| {
                let size = self.note_size(note.emphasized);
                wrap_text(&note.text, size, note.emphasized, self.content_width()).len() as f64
                    * self.line_height(size)
            })
            .sum();

        // The banner and note lines stay together; a non-breakable section
        // additionally keeps its first question attached.
        let mut keep = 10.0 + 2.0 * banner_lh + 4.0 + notes_h + 6.0;
        if !section.breakable {
            if let Some(first) = section.questions.first() {
                keep += self.question_height(first);
            }
        }
        self.reserve(keep);

        self.cursor += 10.0;
        let center = self.left() + self.content_width() / 2.0;
        let banner_baseline = self.cursor + styles.banner_size as f64;
        self.centered(
            center,
            banner_baseline,
            styles.banner_size,
            FontRole::Bold,
            &section.banner,
        );
        let w = text_width(&section.banner, styles.banner_size, true);
        self.rule(
            (center - w / 2.0, banner_baseline + 2.0),
            (center + w / 2.0, banner_baseline + 2.0),
            0.8,
        );
        self.cursor += banner_lh;
        self.centered(
            center,
            self.cursor + styles.banner_size as f64,
            styles.banner_size,
            FontRole::Bold,
            &section.name,
        );
        self.cursor += banner_lh + 4.0;

        for note in &section.notes {
            let size = self.note_size(note.emphasized);
            let role = if note.emphasized {
                FontRole::Bold
            } else {
                FontRole::Body
            };
            for line in wrap_text(&note.text, size, note.emphasized, self.content_width()) {
                let baseline = self.cursor + size as f64;
                self.place(self.left(), baseline, size, role, &line);
                self.cursor += self.line_height(size);
            }
        }
        self.cursor += 6.0;

        for question in &section.questions {
            self.question(question);
        }
    }

    fn note_size(&self, emphasized: bool) -> usize {
        if emphasized {
            self.styles.note_size
        } else {
            self.styles.instruction_size
        }
    }

    fn question_height(&self, question: &QuestionBlock) -> f64 {
        let styles = self.styles;
        let body_lh = self.line_height(styles.body_size);
        let text_w = self.content_width() - LABEL_GUTTER - self.marks_gutter(question);
        let text_h = wrap_text(&question.text, styles.body_size, false, text_w).len() as f64
            * body_lh;

        let body_h = match &question.body {
            QuestionBody::Options { columns, items } => {
                let cell_w = self.option_cell_width(*columns);
                4.0 + items
                    .chunks(*columns)
                    .map(|row| self.option_row_height(row, cell_w))
                    .sum::<f64>()
            }
            _ => 0.0,
        };
        text_h + body_h + 8.0
    }

    fn marks_gutter(&self, question: &QuestionBlock) -> f64 {
        match question.body {
            QuestionBody::Marks(_) => MARKS_GUTTER,
            _ => 0.0,
        }
    }

    fn option_cell_width(&self, columns: usize) -> f64 {
        (self.content_width() - LABEL_GUTTER) / columns as f64
    }

    fn option_row_height(&self, row: &[String], cell_w: f64) -> f64 {
        let styles = self.styles;
        let lines = row
            .iter()
            .map(|item| wrap_text(item, styles.body_size, false, cell_w - 10.0).len())
            .max()
            .unwrap_or(1);
        lines as f64 * self.line_height(styles.body_size) + 2.0
    }

    fn question(&mut self, question: &QuestionBlock) {
        let styles = self.styles;
        let body_size = styles.body_size;
        let body_lh = self.line_height(body_size);
        self.reserve(self.question_height(question));

        let left = self.left();
        let text_x = left + LABEL_GUTTER;
        let text_w = self.content_width() - LABEL_GUTTER - self.marks_gutter(question);

        let first_baseline = self.cursor + body_size as f64;
        self.place(left, first_baseline, body_size, FontRole::Bold, &question.label);
        for line in wrap_text(&question.text, body_size, false, text_w) {
            let baseline = self.cursor + body_size as f64;
            self.place(text_x, baseline, body_size, FontRole::Body, &line);
            self.cursor += body_lh;
        }

        match &question.body {
            QuestionBody::Options { columns, items } => {
                self.cursor += 4.0;
                let cell_w = self.option_cell_width(*columns);
                for row in items.chunks(*columns) {
                    let row_h = self.option_row_height(row, cell_w);
                    for (col, item) in row.iter().enumerate() {
                        let x = text_x + col as f64 * cell_w;
                        for (line_no, line) in wrap_text(item, body_size, false, cell_w - 10.0)
                            .iter()
                            .enumerate()
                        {
                            let baseline =
                                self.cursor + body_size as f64 + line_no as f64 * body_lh;
                            self.place(x, baseline, body_size, FontRole::Body, line);
                        }
                    }
                    self.cursor += row_h;
                }
            }
            QuestionBody::Marks(marks) => {
                let annotation = format!("({marks})");
                let w = text_width(&annotation, styles.meta_size, true);
                self.place(
                    left + self.content_width() - w,
                    first_baseline,
                    styles.meta_size,
                    FontRole::Bold,
                    &annotation,
                );
            }
            QuestionBody::None => {}
        }

        self.cursor += 8.0;
    }
}

// ---------------------------------------------------------------------------
// Paint pass
// ---------------------------------------------------------------------------

fn paint(layer: &PdfLayerReference, fonts: &Fonts, logo: Option<&LogoImage>, op: &Op) {
    match op {
        Op::Text {
            x,
            baseline,
            size,
            role,
            color,
            text,
        } => {
            let font = match role {
                FontRole::Body => &fonts.body,
                FontRole::Bold => &fonts.bold,
                FontRole::Brand => &fonts.brand,
            };
            layer.set_fill_color(rgb(*color));
            layer.use_text(
                text.as_str(),
                *size as _,
                mm(*x),
                mm(PAGE_HEIGHT - baseline),
                font,
            );
            layer.set_fill_color(rgb(BLACK));
        }
        Op::Rule { from, to, width } => {
            layer.set_outline_thickness(*width as _);
            layer.set_outline_color(rgb(BLACK));
            layer.add_line(Line {
                points: vec![
                    (Point::new(mm(from.0), mm(PAGE_HEIGHT - from.1)), false),
                    (Point::new(mm(to.0), mm(PAGE_HEIGHT - to.1)), false),
                ],
                is_closed: false,
            });
        }
        Op::Logo {
            x,
            top,
            width,
            height,
        } => {
            let Some(logo) = logo else {
                return;
            };
            let image = printpdf::Image::from_dynamic_image(&logo.image);
            let native_w = logo.width() as f64;
            let native_h = logo.height() as f64;
            image.add_to_layer(
                layer.clone(),
                ImageTransform {
                    translate_x: Some(mm(*x)),
                    translate_y: Some(mm(PAGE_HEIGHT - top - height)),
                    // At 72 dpi one pixel is one point; scale into the box.
                    dpi: Some(72.0 as _),
                    scale_x: Some((width / native_w) as _),
                    scale_y: Some((height / native_h) as _),
                    ..ImageTransform::default()
                },
            );
        }
    }
}

fn paint_footer(layer: &PdfLayerReference, fonts: &Fonts, styles: &PageStyles, text: &str) {
    let left = styles.margin_pt;
    let right = PAGE_WIDTH - styles.margin_pt;

    layer.set_outline_thickness(0.5 as _);
    layer.set_outline_color(rgb(FOOTER_GRAY));
    layer.add_line(Line {
        points: vec![
            (Point::new(mm(left), mm(FOOTER_BAND)), false),
            (Point::new(mm(right), mm(FOOTER_BAND)), false),
        ],
        is_closed: false,
    });

    let w = text_width(text, styles.footer_size, false);
    layer.set_fill_color(rgb(FOOTER_GRAY));
    layer.use_text(
        text,
        styles.footer_size as f64 as _,
        mm(PAGE_WIDTH / 2.0 - w / 2.0),
        mm(FOOTER_BAND - styles.footer_size as f64 - 4.0),
        &fonts.body,
    );
    layer.set_fill_color(rgb(BLACK));
}

fn mm(pt: f64) -> Mm {
    Mm((pt * 25.4 / 72.0) as _)
}

fn rgb(color: (f64, f64, f64)) -> Color {
    Color::Rgb(Rgb::new(color.0 as _, color.1 as _, color.2 as _, None))
}

// ---------------------------------------------------------------------------
// Text measurement
// ---------------------------------------------------------------------------

/// Greedy word wrap against the measured width. A single word wider than the
/// limit gets its own line rather than being split.
fn wrap_text(text: &str, size: usize, bold: bool, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if current.is_empty() || text_width(&candidate, size, bold) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn text_width(text: &str, size: usize, bold: bool) -> f64 {
    let units: f64 = text.chars().map(|c| glyph_units(c, bold)).sum();
    units * size as f64 / 1000.0
}

/// Approximate Times glyph advance widths in 1/1000 em. Close enough for
/// wrapping, centering, and right-alignment of the built-in fonts; exact
/// metrics would require embedding the AFM tables.
fn glyph_units(c: char, bold: bool) -> f64 {
    let units = match c {
        ' ' => 250.0,
        'i' | 'l' | 'j' | 't' | 'f' | 'I' | '.' | ',' | ';' | ':' | '\'' | '!' | '|' => 300.0,
        'r' | 's' | '(' | ')' | '[' | ']' | '-' | '/' => 350.0,
        'm' | 'w' => 730.0,
        'M' | 'W' => 900.0,
        'A'..='Z' => 670.0,
        '0'..='9' => 500.0,
        _ => 490.0,
    };
    if bold { units * 1.06 } else { units }
}
