//! crates/oracle_core/src/request.rs
//!
//! The Reading Request Builder: turns user data and a reading kind into the
//! prompt text and the response schema sent to the generative service.

use crate::domain::{Mood, ReadingKind, UserData};
use crate::schema::SchemaDescriptor;

/// The oracle persona every generation runs under.
pub const ORACLE_SYSTEM_INSTRUCTION: &str = "You are a mystical, wise, and benevolent oracle.
You provide deep, insightful, and positive readings.
Your tone should be ethereal, empowering, and slightly poetic.
Avoid negative predictions; focus on growth and guidance.
Return the result in JSON format matching the requested schema.";

const ASTROLOGY_INSTRUCTIONS: &str = "Provide a Western Astrology reading.
Include the Sun sign, Moon sign, lucky color, lucky number, compatible signs, lucky gemstone, and a summary.";

const VEDIC_INSTRUCTIONS: &str = "Provide a Vedic Astrology reading.
Include the Lagna, Moon sign (Rashi), Ascendant, the current, past and future Dasha (simulate simplified periods),
lucky color, lucky number, compatible signs and lucky gemstone.
Identify potential Doshas (such as Manglik, Kaal Sarpa, Sade Sati). If none are significant, mention general minor ones or say 'None significant'.
Give each Dosha a description and a simple remedy.";

const NUMEROLOGY_INSTRUCTIONS: &str =
    "Provide a Numerology reading. Calculate the Life Path Number and the Destiny Number. Provide a reading summary.";

const CHINESE_INSTRUCTIONS: &str =
    "Provide a Chinese Astrology reading. Identify the Zodiac Animal and Element. Describe the outlook for the current year.";

/// A fully built prompt/schema pair for one reading.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingRequest {
    pub kind: ReadingKind,
    pub prompt: String,
    pub schema: SchemaDescriptor,
}

/// Builds the prompt and schema for `kind`. Does not validate `user`.
pub fn build(user: &UserData, kind: ReadingKind, extra_context: Option<&str>) -> ReadingRequest {
    let mut prompt = format!(
        "User Details:\n- Name: {}\n- Date of Birth: {}\n- Place of Birth: {}\n\n",
        user.name,
        user.dob_text(),
        user.birth_place
    );

    match kind {
        ReadingKind::Astrology => prompt.push_str(ASTROLOGY_INSTRUCTIONS),
        ReadingKind::Vedic => prompt.push_str(VEDIC_INSTRUCTIONS),
        ReadingKind::Tarot => {
            prompt.push_str("Perform a 3-card Tarot reading.\n");
            prompt.push_str(&format!(
                "User Question/Context: \"{}\"\n",
                extra_context.unwrap_or_default()
            ));
            prompt.push_str(
                "Simulate a 3-card spread. For each card provide its name, a visual description, \
                 and its meaning relevant to the question.\nProvide a final summary.",
            );
        }
        ReadingKind::Numerology => prompt.push_str(NUMEROLOGY_INSTRUCTIONS),
        ReadingKind::Chinese => prompt.push_str(CHINESE_INSTRUCTIONS),
    }

    ReadingRequest {
        kind,
        prompt,
        schema: SchemaDescriptor::for_kind(kind),
    }
}

/// The extra context a tarot reading is built with.
pub fn tarot_context(question: &str, mood: Mood) -> String {
    format!("Question: {}, Mood: {}", question, mood.label())
}
