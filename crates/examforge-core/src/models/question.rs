use serde::{Deserialize, Serialize};

/// The three fixed question categories of an exam paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Mcq,
    Short,
    Long,
}

impl QuestionType {
    /// The section a question of this type is placed in.
    pub fn section(self) -> SectionId {
        match self {
            QuestionType::Mcq => SectionId::A,
            QuestionType::Short => SectionId::B,
            QuestionType::Long => SectionId::C,
        }
    }
}

/// The three lettered paper sections, each with its own numbering and layout
/// rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionId {
    A,
    B,
    C,
}

impl SectionId {
    pub fn letter(self) -> char {
        match self {
            SectionId::A => 'A',
            SectionId::B => 'B',
            SectionId::C => 'C',
        }
    }
}

/// A question as supplied by the (out-of-scope) question repository.
///
/// The renderer trusts the section array it is handed; `question_type` routes
/// a question when building a draft but is not re-validated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Opaque repository identity. Used only to address a question inside a
    /// draft, never shown on the paper.
    pub id: String,
    pub question_text: String,
    /// Ordered option strings; empty for non-MCQ types.
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub marks: u32,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
}
