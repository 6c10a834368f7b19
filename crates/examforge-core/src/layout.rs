//! The composed layout model.
//!
//! `compose` turns a [`PaperDraft`] into a backend-neutral tree of header,
//! banner, note, and question blocks. Both output encoders consume this tree
//! and nothing else, so the numbering conventions, option-grid columns, and
//! section rules cannot drift between the paginated and the structured
//! document.

use jiff::civil::Date;

use crate::clock::format_long_date;
use crate::models::draft::PaperDraft;
use crate::models::paper::defaults;
use crate::models::question::{Question, SectionId};
use crate::numbering::question_label;
use crate::options::column_count;
use crate::text::clean_option_label;

/// Decorative brand wordmark, rendered in the logo slot when no logo image is
/// available. Identical text in both encodings.
pub const WORDMARK_BRAND: &str = "Teach";
pub const WORDMARK_TAGLINE: &str = "TEACH EACH";
/// Brand maroon, as an RRGGBB hex string.
pub const WORDMARK_COLOR: &str = "800000";

/// Fully composed paper, ready for either encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct PaperLayout {
    /// Paper title (or the untitled fallback), used for document metadata and
    /// download filenames.
    pub title: String,
    pub header: HeaderBlock,
    pub sections: Vec<SectionBlock>,
    pub footer: FooterSpec,
}

/// The fixed 3-column header: logo slot, three centered underlined title
/// lines, three label/value metadata rows.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderBlock {
    /// Logo image reference; the encoders fall back to the wordmark when it is
    /// absent or cannot be fetched.
    pub logo_url: Option<String>,
    pub titles: [String; 3],
    pub meta: [MetaRow; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetaRow {
    pub label: String,
    pub value: String,
    /// Whether a rule is drawn under this row (first two rows only).
    pub ruled: bool,
}

/// Running footer content for the paginated encoding. The page count is only
/// known after full layout, so the text is generated per page at paint time.
#[derive(Debug, Clone, PartialEq)]
pub struct FooterSpec {
    pub subject_code: String,
}

impl FooterSpec {
    pub fn page_text(&self, page: usize, total: usize) -> String {
        format!("Page {page} of {total} — {}", self.subject_code)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionBlock {
    pub id: SectionId,
    /// Centered banner line, e.g. `SECTION 'A'`.
    pub banner: String,
    /// Section display name under the banner.
    pub name: String,
    pub notes: Vec<NoteLine>,
    /// Whether the section body may break across pages.
    pub breakable: bool,
    pub questions: Vec<QuestionBlock>,
}

/// Instruction or note line under a section banner. Purely descriptive text;
/// the embedded counts are regenerated each render and enforce nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteLine {
    pub text: String,
    pub emphasized: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionBlock {
    pub label: String,
    pub text: String,
    pub body: QuestionBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuestionBody {
    /// MCQ without options: nothing under the question text.
    None,
    /// Relabeled, cleaned options laid out on a grid.
    Options { columns: usize, items: Vec<String> },
    /// Right-aligned marks annotation, e.g. `(5)`.
    Marks(u32),
}

/// Compose the full paper layout. Pure: same draft and same `today` always
/// yield the same tree.
pub fn compose(draft: &PaperDraft, today: Date) -> PaperLayout {
    PaperLayout {
        title: draft.config.file_stem().to_string(),
        header: compose_header(draft, today),
        sections: compose_sections(draft),
        footer: FooterSpec {
            subject_code: draft.config.subject_code.clone(),
        },
    }
}

fn compose_header(draft: &PaperDraft, today: Date) -> HeaderBlock {
    let config = &draft.config;

    let date = if config.date.trim().is_empty() {
        format_long_date(today)
    } else {
        config.date.clone()
    };

    HeaderBlock {
        logo_url: config.logo_url().map(str::to_string),
        titles: [
            or_default(&config.assessment_type, defaults::ASSESSMENT_TYPE),
            or_default(&config.session, defaults::SESSION),
            or_default(&config.subject, defaults::SUBJECT),
        ],
        meta: [
            MetaRow {
                label: "Time:".to_string(),
                value: or_default(&config.duration, defaults::DURATION),
                ruled: true,
            },
            MetaRow {
                label: "Max. Marks:".to_string(),
                value: draft.effective_total_marks().to_string(),
                ruled: true,
            },
            MetaRow {
                label: "Date:".to_string(),
                value: date,
                ruled: false,
            },
        ],
    }
}

fn compose_sections(draft: &PaperDraft) -> Vec<SectionBlock> {
    let mut sections = Vec::with_capacity(3);

    // Section A always renders its banner and instruction lines, even when
    // empty; a valid paper is assumed to carry an MCQ part.
    sections.push(section_a(&draft.section_a));
    if !draft.section_b.is_empty() {
        sections.push(section_b(&draft.section_b));
    }
    if !draft.section_c.is_empty() {
        sections.push(section_c(&draft.section_c));
    }

    sections
}

fn section_a(questions: &[Question]) -> SectionBlock {
    SectionBlock {
        id: SectionId::A,
        banner: banner(SectionId::A),
        name: "MULTIPLE CHOICE QUESTIONS".to_string(),
        notes: vec![
            NoteLine {
                text: "Note: This section consists of 1 part. Answer all questions in this part, \
                       each question carries 1 mark."
                    .to_string(),
                emphasized: true,
            },
            NoteLine {
                text: "1. Choose the correct answer for each from the given options.".to_string(),
                emphasized: false,
            },
        ],
        breakable: false,
        questions: questions
            .iter()
            .enumerate()
            .map(|(i, q)| QuestionBlock {
                label: question_label(SectionId::A, i),
                text: q.question_text.clone(),
                body: options_body(&q.options),
            })
            .collect(),
    }
}

fn section_b(questions: &[Question]) -> SectionBlock {
    SectionBlock {
        id: SectionId::B,
        banner: banner(SectionId::B),
        name: "(Short Answer Questions)".to_string(),
        notes: vec![NoteLine {
            text: format!(
                "2. Answer any {} parts questions. All questions carry equal marks.",
                questions.len()
            ),
            emphasized: false,
        }],
        breakable: true,
        questions: marks_questions(SectionId::B, questions),
    }
}

fn section_c(questions: &[Question]) -> SectionBlock {
    SectionBlock {
        id: SectionId::C,
        banner: banner(SectionId::C),
        name: "(Descriptive Answer Questions)".to_string(),
        notes: vec![NoteLine {
            text: format!(
                "NOTE: Answer any {} of the following question. All question carry equal marks",
                questions.len()
            ),
            emphasized: true,
        }],
        breakable: true,
        questions: marks_questions(SectionId::C, questions),
    }
}

fn banner(section: SectionId) -> String {
    format!("SECTION '{}'", section.letter())
}

/// Sections B and C never render options, even when present in the data; the
/// question line carries the marks annotation instead.
fn marks_questions(section: SectionId, questions: &[Question]) -> Vec<QuestionBlock> {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| QuestionBlock {
            label: question_label(section, i),
            text: q.question_text.clone(),
            body: QuestionBody::Marks(q.marks),
        })
        .collect()
}

fn options_body(options: &[String]) -> QuestionBody {
    if options.is_empty() {
        return QuestionBody::None;
    }
    QuestionBody::Options {
        columns: column_count(options),
        items: options
            .iter()
            .enumerate()
            .map(|(j, opt)| {
                let letter = char::from_u32(97 + j as u32).unwrap_or('?');
                format!("{letter}) {}", clean_option_label(opt))
            })
            .collect(),
    }
}

fn or_default(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
