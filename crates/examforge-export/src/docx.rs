//! Structured (DOCX) renderer.
//!
//! Encodes the composed layout into OOXML building blocks: the header as a
//! bordered three-column table, option grids as borderless tables, and marks
//! annotations as right tab stops. Word owns pagination, so this renderer
//! never breaks pages or numbers them.

use std::io::Cursor;

use docx_rs::{
    AlignmentType, Docx, PageMargin, Paragraph, Pic, Run, RunFonts, Tab, Table, TableCell,
    TableRow, TabValueType, VAlignType, WidthType,
};
use tracing::info;

use examforge_core::layout::{
    HeaderBlock, PaperLayout, QuestionBlock, QuestionBody, SectionBlock, WORDMARK_BRAND,
    WORDMARK_COLOR, WORDMARK_TAGLINE,
};

use crate::error::ExportError;
use crate::logo::LogoImage;
use crate::styles::PageStyles;

// A4 page geometry in twips.
const PAGE_WIDTH_TWIPS: u32 = 11906;
const PAGE_HEIGHT_TWIPS: u32 = 16838;
const MARGIN_TWIPS: i32 = 720;
const CONTENT_WIDTH_TWIPS: usize = 10466;

/// Right tab stop for marks annotations, just inside the right margin.
const MARKS_TAB_POS: usize = 9000;

/// Logo bounding box in pixels; one pixel maps to 9525 EMU.
const LOGO_BOX_PX: f64 = 80.0;
const EMU_PER_PX: f64 = 9525.0;

pub(crate) fn render(
    layout: &PaperLayout,
    styles: &PageStyles,
    logo: Option<&LogoImage>,
) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new()
        .page_size(PAGE_WIDTH_TWIPS, PAGE_HEIGHT_TWIPS)
        .page_margin(
            PageMargin::new()
                .top(MARGIN_TWIPS)
                .bottom(MARGIN_TWIPS)
                .left(MARGIN_TWIPS)
                .right(MARGIN_TWIPS),
        );

    docx = docx.add_table(header_table(&layout.header, styles, logo));
    docx = docx.add_paragraph(Paragraph::new());

    for section in &layout.sections {
        docx = add_section(docx, section, styles);
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    let bytes = buf.into_inner();
    info!(bytes = bytes.len(), "structured render complete");
    Ok(bytes)
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

fn header_table(header: &HeaderBlock, styles: &PageStyles, logo: Option<&LogoImage>) -> Table {
    let side = CONTENT_WIDTH_TWIPS / 4;
    let middle = CONTENT_WIDTH_TWIPS / 2;

    let row = TableRow::new(vec![
        logo_cell(header, styles, logo).width(side, WidthType::Dxa),
        titles_cell(header, styles).width(middle, WidthType::Dxa),
        meta_cell(header, styles).width(side, WidthType::Dxa),
    ]);

    Table::new(vec![row])
        .set_grid(vec![side, middle, side])
        .width(CONTENT_WIDTH_TWIPS, WidthType::Dxa)
}

fn logo_cell(header: &HeaderBlock, styles: &PageStyles, logo: Option<&LogoImage>) -> TableCell {
    let cell = TableCell::new().vertical_align(VAlignType::Center);
    match logo.filter(|_| header.logo_url.is_some()) {
        Some(image) => {
            let (w, h) = image.fit_within(LOGO_BOX_PX);
            let pic = Pic::new(&image.bytes)
                .size((w * EMU_PER_PX) as u32, (h * EMU_PER_PX) as u32);
            cell.add_paragraph(
                Paragraph::new()
                    .align(AlignmentType::Center)
                    .add_run(Run::new().add_image(pic)),
            )
        }
        None => cell
            .add_paragraph(
                Paragraph::new().align(AlignmentType::Center).add_run(
                    Run::new()
                        .add_text(WORDMARK_BRAND)
                        .bold()
                        .size(48)
                        .color(WORDMARK_COLOR)
                        .fonts(RunFonts::new().ascii(&styles.brand_font)),
                ),
            )
            .add_paragraph(
                Paragraph::new().align(AlignmentType::Center).add_run(
                    Run::new()
                        .add_text(WORDMARK_TAGLINE)
                        .size(16)
                        .fonts(RunFonts::new().ascii(&styles.body_font)),
                ),
            ),
    }
}

fn titles_cell(header: &HeaderBlock, styles: &PageStyles) -> TableCell {
    let mut cell = TableCell::new().vertical_align(VAlignType::Center);
    for title in &header.titles {
        cell = cell.add_paragraph(
            Paragraph::new().align(AlignmentType::Center).add_run(
                body_run(title, styles.title_size, styles)
                    .bold()
                    .underline("single"),
            ),
        );
    }
    cell
}

fn meta_cell(header: &HeaderBlock, styles: &PageStyles) -> TableCell {
    let mut cell = TableCell::new().vertical_align(VAlignType::Center);
    for row in &header.meta {
        cell = cell.add_paragraph(
            Paragraph::new()
                .add_tab(Tab::new().val(TabValueType::Right).pos(2000))
                .add_run(body_run(&row.label, styles.meta_size, styles).bold())
                .add_run(Run::new().add_tab())
                .add_run(body_run(&row.value, styles.meta_size, styles).bold()),
        );
    }
    cell
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

fn add_section(mut docx: Docx, section: &SectionBlock, styles: &PageStyles) -> Docx {
    docx = docx
        .add_paragraph(
            Paragraph::new().align(AlignmentType::Center).add_run(
                body_run(&section.banner, styles.banner_size, styles)
                    .bold()
                    .underline("single"),
            ),
        )
        .add_paragraph(
            Paragraph::new()
                .align(AlignmentType::Center)
                .add_run(body_run(&section.name, styles.banner_size, styles).bold()),
        );

    for note in &section.notes {
        let size = if note.emphasized {
            styles.note_size
        } else {
            styles.instruction_size
        };
        let mut run = body_run(&note.text, size, styles);
        if note.emphasized {
            run = run.bold();
        }
        docx = docx.add_paragraph(Paragraph::new().add_run(run));
    }
    docx = docx.add_paragraph(Paragraph::new());

    for question in &section.questions {
        docx = add_question(docx, question, styles);
    }
    docx
}

fn add_question(mut docx: Docx, question: &QuestionBlock, styles: &PageStyles) -> Docx {
    let mut lead = Paragraph::new()
        .add_run(body_run(&question.label, styles.body_size, styles).bold())
        .add_run(body_run(" ", styles.body_size, styles))
        .add_run(body_run(&question.text, styles.body_size, styles));

    if let QuestionBody::Marks(marks) = &question.body {
        lead = lead
            .add_tab(Tab::new().val(TabValueType::Right).pos(MARKS_TAB_POS))
            .add_run(Run::new().add_tab())
            .add_run(body_run(&format!("({marks})"), styles.body_size, styles).bold());
    }
    docx = docx.add_paragraph(lead);

    if let QuestionBody::Options { columns, items } = &question.body {
        docx = docx.add_table(options_table(*columns, items, styles));
    }
    docx.add_paragraph(Paragraph::new())
}

fn options_table(columns: usize, items: &[String], styles: &PageStyles) -> Table {
    let cell_width = CONTENT_WIDTH_TWIPS / columns;
    let rows = items
        .chunks(columns)
        .map(|chunk| {
            let cells = chunk
                .iter()
                .map(|item| {
                    TableCell::new()
                        .width(cell_width, WidthType::Dxa)
                        .add_paragraph(
                            Paragraph::new().add_run(body_run(item, styles.body_size, styles)),
                        )
                })
                .collect();
            TableRow::new(cells)
        })
        .collect();

    Table::new(rows)
        .set_grid(vec![cell_width; columns])
        .width(CONTENT_WIDTH_TWIPS, WidthType::Dxa)
        .clear_all_border()
}

fn body_run(text: &str, size_pt: usize, styles: &PageStyles) -> Run {
    // OOXML sizes are half-points.
    Run::new()
        .add_text(text)
        .size(size_pt * 2)
        .fonts(RunFonts::new().ascii(&styles.body_font))
}
