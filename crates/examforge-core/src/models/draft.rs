use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::paper::{PaperConfig, defaults};
use super::question::{Question, SectionId};

/// An immutable paper-in-progress: config plus the three ordered sections.
///
/// Order within each section is exactly the render and numbering order.
/// Mutation operations consume the draft and return a new one, so a draft
/// handed to a renderer can never change underneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperDraft {
    pub id: Uuid,
    pub config: PaperConfig,
    pub section_a: Vec<Question>,
    pub section_b: Vec<Question>,
    pub section_c: Vec<Question>,
}

impl PaperDraft {
    pub fn new(config: PaperConfig) -> Self {
        Self::load(config, Vec::new(), Vec::new(), Vec::new())
    }

    /// Assemble a draft from already-ordered section arrays, e.g. as fetched
    /// by the paper repository.
    pub fn load(
        config: PaperConfig,
        section_a: Vec<Question>,
        section_b: Vec<Question>,
        section_c: Vec<Question>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            section_a,
            section_b,
            section_c,
        }
    }

    /// Append a question to the section its type belongs to.
    pub fn with_question(mut self, question: Question) -> Self {
        match question.question_type.section() {
            SectionId::A => self.section_a.push(question),
            SectionId::B => self.section_b.push(question),
            SectionId::C => self.section_c.push(question),
        }
        self
    }

    /// Remove every question with the given id, in all sections.
    pub fn without_question(mut self, id: &str) -> Self {
        self.section_a.retain(|q| q.id != id);
        self.section_b.retain(|q| q.id != id);
        self.section_c.retain(|q| q.id != id);
        self
    }

    pub fn with_section_cleared(mut self, section: SectionId) -> Self {
        match section {
            SectionId::A => self.section_a.clear(),
            SectionId::B => self.section_b.clear(),
            SectionId::C => self.section_c.clear(),
        }
        self
    }

    pub fn section(&self, section: SectionId) -> &[Question] {
        match section {
            SectionId::A => &self.section_a,
            SectionId::B => &self.section_b,
            SectionId::C => &self.section_c,
        }
    }

    pub fn question_count(&self) -> usize {
        self.section_a.len() + self.section_b.len() + self.section_c.len()
    }

    /// Sum of `marks` across all three sections.
    pub fn computed_total_marks(&self) -> u32 {
        [&self.section_a, &self.section_b, &self.section_c]
            .into_iter()
            .flatten()
            .map(|q| q.marks)
            .sum()
    }

    /// Total shown as "Max. Marks": the explicit config override when set and
    /// non-zero, else the section sum, else the fixed default.
    pub fn effective_total_marks(&self) -> u32 {
        if let Some(total) = self.config.total_marks.filter(|t| *t > 0) {
            return total;
        }
        let computed = self.computed_total_marks();
        if computed > 0 {
            computed
        } else {
            defaults::TOTAL_MARKS
        }
    }
}
