use serde::{Deserialize, Serialize};

/// Fixed institutional placeholder text, used whenever the corresponding
/// config field is empty.
pub mod defaults {
    pub const ASSESSMENT_TYPE: &str = "MODULAR ASSESSMENT – I";
    pub const SESSION: &str = "SEPTEMBER 2025";
    pub const SUBJECT: &str = "COMPUTER XI";
    pub const DURATION: &str = "1 Hour 30Minutes";
    pub const TOTAL_MARKS: u32 = 30;
    /// Download file stem when the paper has no title.
    pub const FILE_STEM: &str = "exam-paper";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperStatus {
    #[default]
    Draft,
    Submitted,
    Verified,
}

/// Paper-level attributes driving the header, footer, and download filename.
///
/// Missing fields are never an error: every renderer substitutes the fixed
/// institutional defaults instead, and the empty date falls back to the
/// render-time current date. Validation of required business fields is a
/// caller-side concern.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperConfig {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub subject_code: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub institution_name: String,
    /// Pre-computed total shown as "Max. Marks". `None` (or zero) falls back
    /// to the section-marks sum maintained by the draft, then to the fixed
    /// default of 30; the renderers never sum marks themselves.
    #[serde(default)]
    pub total_marks: Option<u32>,
    /// Free text, e.g. "1 Hour 30Minutes".
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub assessment_type: String,
    #[serde(default)]
    pub session: String,
    /// Free text, not parsed.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub status: PaperStatus,
}

impl PaperConfig {
    /// The logo reference, with empty strings treated as absent.
    pub fn logo_url(&self) -> Option<&str> {
        self.logo_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Download file stem: the title, or `exam-paper` when untitled.
    pub fn file_stem(&self) -> &str {
        let title = self.title.trim();
        if title.is_empty() {
            defaults::FILE_STEM
        } else {
            title
        }
    }
}
