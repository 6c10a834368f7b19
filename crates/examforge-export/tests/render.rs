use std::io::{Cursor, Read};

use jiff::civil::{Date, date};

use examforge_core::clock::Clock;
use examforge_core::models::draft::PaperDraft;
use examforge_core::models::paper::PaperConfig;
use examforge_core::models::question::{Question, QuestionType};
use examforge_export::fetch::{FetchError, LogoFetcher};
use examforge_export::render::{
    ExportFormat, RenderOptions, render_paginated, render_paginated_with, render_structured,
    suggested_filename,
};

/// Smallest valid RGBA PNG, one transparent pixel.
const PNG_1X1: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// One black pixel in plain PBM, a format the DOCX writer's image decoder
/// does not read on its own.
const PNM_1X1: &[u8] = b"P1\n1 1\n1\n";

struct FixedClock;

impl Clock for FixedClock {
    fn today(&self) -> Date {
        date(2025, 9, 3)
    }
}

struct FailingFetcher;

impl LogoFetcher for FailingFetcher {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
        Err(FetchError::Status(404))
    }
}

struct StaticFetcher(&'static [u8]);

impl LogoFetcher for StaticFetcher {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
        Ok(self.0.to_vec())
    }
}

/// Fails the test if any fetch is attempted.
struct PanickingFetcher;

impl LogoFetcher for PanickingFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        panic!("unexpected logo fetch for {url}");
    }
}

fn config(title: &str) -> PaperConfig {
    PaperConfig {
        title: title.to_string(),
        subject: "Physics".to_string(),
        subject_code: "PHY-101".to_string(),
        class_name: "XI".to_string(),
        institution_name: "City College".to_string(),
        duration: "2 Hours".to_string(),
        ..PaperConfig::default()
    }
}

fn mcq(id: &str, text: &str, options: &[&str]) -> Question {
    Question {
        id: id.to_string(),
        question_text: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        marks: 1,
        question_type: QuestionType::Mcq,
    }
}

fn short(id: &str, text: &str, marks: u32) -> Question {
    Question {
        id: id.to_string(),
        question_text: text.to_string(),
        options: Vec::new(),
        marks,
        question_type: QuestionType::Short,
    }
}

fn long(id: &str, text: &str, marks: u32) -> Question {
    Question {
        id: id.to_string(),
        question_text: text.to_string(),
        options: Vec::new(),
        marks,
        question_type: QuestionType::Long,
    }
}

fn sample_draft() -> PaperDraft {
    PaperDraft::new(config("Mid Term"))
        .with_question(mcq("q1", "Unit of force?", &["Newton", "Joule", "Watt", "Pascal"]))
        .with_question(mcq("q2", "Speed of light is approximately?", &[
            "3 x 10^8 m/s",
            "3 x 10^6 m/s",
            "3 x 10^5 m/s",
            "3 x 10^7 m/s",
        ]))
        .with_question(short("q3", "State Newton's second law of motion.", 5))
        .with_question(long("q4", "Derive the equations of uniformly accelerated motion.", 10))
}

fn docx_archive(bytes: &[u8]) -> zip::ZipArchive<Cursor<Vec<u8>>> {
    zip::ZipArchive::new(Cursor::new(bytes.to_vec())).expect("docx parses as a zip archive")
}

fn document_xml(bytes: &[u8]) -> String {
    let mut archive = docx_archive(bytes);
    let mut part = archive
        .by_name("word/document.xml")
        .expect("document part exists");
    let mut xml = String::new();
    part.read_to_string(&mut xml).expect("document part is utf-8");
    xml
}

fn assert_in_order(haystack: &str, markers: &[&str]) {
    let mut from = 0;
    for marker in markers {
        match haystack[from..].find(marker) {
            Some(at) => from += at + marker.len(),
            None => panic!("expected {marker:?} after offset {from}"),
        }
    }
}

// -- paginated --------------------------------------------------------------

#[test]
fn paginated_output_is_a_pdf() {
    let bytes = render_paginated(&sample_draft(), &FixedClock).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn paginated_renders_an_empty_draft() {
    let draft = PaperDraft::new(PaperConfig::default());
    let bytes = render_paginated(&draft, &FixedClock).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn paginated_handles_many_questions_across_pages() {
    let mut draft = PaperDraft::new(config("Endurance"));
    for i in 0..40 {
        draft = draft.with_question(mcq(
            &format!("q{i}"),
            "Which of the following statements about conservation of energy holds in every isolated system?",
            &["Always true", "Never true", "Sometimes", "Undefined"],
        ));
    }
    for i in 0..20 {
        draft = draft.with_question(short(&format!("s{i}"), "Explain briefly.", 5));
    }
    let bytes = render_paginated(&draft, &FixedClock).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn paginated_ignores_undecodable_logo_bytes() {
    let mut config = config("Mid Term");
    config.logo_url = Some("https://example.org/logo.png".to_string());
    let draft = PaperDraft::new(config);
    let options = RenderOptions {
        logo: Some(vec![0xDE, 0xAD, 0xBE, 0xEF]),
        ..RenderOptions::default()
    };
    let bytes = render_paginated_with(&draft, &FixedClock, options).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn paginated_embeds_prefetched_logo() {
    let mut config = config("Mid Term");
    config.logo_url = Some("https://example.org/logo.png".to_string());
    let draft = PaperDraft::new(config);
    let options = RenderOptions {
        logo: Some(PNG_1X1.to_vec()),
        ..RenderOptions::default()
    };
    let bytes = render_paginated_with(&draft, &FixedClock, options).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn paginated_render_is_byte_identical_under_a_fixed_clock() {
    let draft = sample_draft();
    let first = render_paginated(&draft, &FixedClock).unwrap();
    let second = render_paginated(&draft, &FixedClock).unwrap();
    assert_eq!(first, second);
}

// -- structured -------------------------------------------------------------

#[tokio::test]
async fn structured_output_is_a_zip_package() {
    let bytes = render_structured(&sample_draft(), &PanickingFetcher, &FixedClock)
        .await
        .unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[tokio::test]
async fn structured_skips_fetch_without_logo_url() {
    // config() sets no logoUrl, so the fetcher must never run.
    let bytes = render_structured(&sample_draft(), &PanickingFetcher, &FixedClock)
        .await
        .unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[tokio::test]
async fn structured_fetch_failure_falls_back_to_wordmark() {
    let mut config = config("Mid Term");
    config.logo_url = Some("https://example.org/missing.png".to_string());
    let draft = PaperDraft::new(config);
    let bytes = render_structured(&draft, &FailingFetcher, &FixedClock)
        .await
        .unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[tokio::test]
async fn structured_embeds_fetched_logo() {
    let mut config = config("Mid Term");
    config.logo_url = Some("https://example.org/logo.png".to_string());
    let draft = PaperDraft::new(config);
    let bytes = render_structured(&draft, &StaticFetcher(PNG_1X1), &FixedClock)
        .await
        .unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[tokio::test]
async fn structured_reencodes_a_pnm_logo_instead_of_failing() {
    let mut config = config("Mid Term");
    config.logo_url = Some("https://example.org/logo.pbm".to_string());
    let draft = PaperDraft::new(config);
    let bytes = render_structured(&draft, &StaticFetcher(PNM_1X1), &FixedClock)
        .await
        .unwrap();

    let archive = docx_archive(&bytes);
    let mut names = archive.file_names();
    assert!(
        names.any(|name| name.starts_with("word/media/")),
        "logo image is embedded in the package"
    );
}

#[tokio::test]
async fn structured_document_keeps_section_and_label_order() {
    let bytes = render_structured(&sample_draft(), &PanickingFetcher, &FixedClock)
        .await
        .unwrap();
    let xml = document_xml(&bytes);
    assert_in_order(
        &xml,
        &[
            "MULTIPLE CHOICE QUESTIONS",
            "(i)",
            "Unit of force?",
            "(ii)",
            "Speed of light",
            "(Short Answer Questions)",
            "(i)",
            "State Newton",
            "(5)",
            "(Descriptive Answer Questions)",
            "Q.3",
            "Derive the equations",
            "(10)",
        ],
    );
}

#[tokio::test]
async fn structured_render_is_deterministic_under_a_fixed_clock() {
    let draft = sample_draft();
    let first = render_structured(&draft, &PanickingFetcher, &FixedClock)
        .await
        .unwrap();
    let second = render_structured(&draft, &PanickingFetcher, &FixedClock)
        .await
        .unwrap();
    assert_eq!(first, second);
}

// -- filenames --------------------------------------------------------------

#[test]
fn filename_derives_from_title_and_format() {
    let draft = PaperDraft::new(config("Mid Term"));
    assert_eq!(suggested_filename(&draft, ExportFormat::Pdf), "Mid Term.pdf");
    assert_eq!(suggested_filename(&draft, ExportFormat::Docx), "Mid Term.docx");
}

#[test]
fn filename_falls_back_when_untitled() {
    let draft = PaperDraft::new(PaperConfig::default());
    assert_eq!(
        suggested_filename(&draft, ExportFormat::Pdf),
        "exam-paper.pdf"
    );
}
