use crate::models::question::SectionId;

/// Sections A and B are conventionally numbered 1 and 2 as whole parts, so the
/// paper-wide question sequence resumes at 3 for section C.
pub const SECTION_C_START: usize = 3;

const ROMAN_NUMERALS: [&str; 16] = [
    "i", "ii", "iii", "iv", "v", "vi", "vii", "viii", "ix", "x", "xi", "xii", "xiii", "xiv", "xv",
    "xvi",
];

/// Per-section question label for a 0-based position.
///
/// Sections A and B use parenthesized lower-case roman numerals; past the
/// lookup table the label degrades to the plain 1-based integer without
/// parentheses. Section C uses `Q.<n>` continuing the paper-wide sequence.
pub fn question_label(section: SectionId, index: usize) -> String {
    match section {
        SectionId::A | SectionId::B => match ROMAN_NUMERALS.get(index) {
            Some(numeral) => format!("({numeral})"),
            None => (index + 1).to_string(),
        },
        SectionId::C => format!("Q.{}", SECTION_C_START + index),
    }
}
