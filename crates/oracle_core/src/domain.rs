//! crates/oracle_core/src/domain.rs
//!
//! Defines the pure, core data structures for the oracle: who is asking,
//! which kind of reading they asked for, and the typed readings that come back.
//! Field names serialize in camelCase to match the JSON the generative
//! service is asked to produce.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

//=========================================================================================
// User Data
//=========================================================================================

/// The details a user enters on the home screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub name: String,
    #[serde(default)]
    pub dob: Option<NaiveDate>,
    pub birth_place: String,
}

impl UserData {
    pub fn new(name: impl Into<String>, dob: NaiveDate, birth_place: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dob: Some(dob),
            birth_place: birth_place.into(),
        }
    }

    /// The completeness predicate gating tile selection: name and birthplace
    /// non-blank, date of birth present.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && self.dob.is_some() && !self.birth_place.trim().is_empty()
    }

    /// Date of birth as the `YYYY-MM-DD` text a date picker would produce,
    /// or an empty string while unset.
    pub fn dob_text(&self) -> String {
        self.dob
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

//=========================================================================================
// Reading Types
//=========================================================================================

/// Every tile on the home screen. `Shop` has no generated reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingType {
    Astrology,
    Vedic,
    Tarot,
    Numerology,
    Chinese,
    Shop,
}

impl ReadingType {
    /// Tiles in the order they appear on the home screen.
    pub const ALL: [ReadingType; 6] = [
        ReadingType::Astrology,
        ReadingType::Vedic,
        ReadingType::Tarot,
        ReadingType::Numerology,
        ReadingType::Chinese,
        ReadingType::Shop,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ReadingType::Astrology => "Western Astrology",
            ReadingType::Vedic => "Vedic Astrology",
            ReadingType::Tarot => "Tarot Reading",
            ReadingType::Numerology => "Numerology",
            ReadingType::Chinese => "Chinese Astrology",
            ReadingType::Shop => "Mystic Shop",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ReadingType::Astrology => "Western Birth Chart",
            ReadingType::Vedic => "Vedic Wisdom & Doshas",
            ReadingType::Tarot => "3-Card Reading",
            ReadingType::Numerology => "Life Path & Destiny",
            ReadingType::Chinese => "Zodiac Animals",
            ReadingType::Shop => "Remedies & Gems",
        }
    }

    /// The generative kind behind this tile, if any.
    pub fn kind(self) -> Option<ReadingKind> {
        match self {
            ReadingType::Astrology => Some(ReadingKind::Astrology),
            ReadingType::Vedic => Some(ReadingKind::Vedic),
            ReadingType::Tarot => Some(ReadingKind::Tarot),
            ReadingType::Numerology => Some(ReadingKind::Numerology),
            ReadingType::Chinese => Some(ReadingKind::Chinese),
            ReadingType::Shop => None,
        }
    }
}

/// The five reading types that are produced by the generative service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingKind {
    Astrology,
    Vedic,
    Tarot,
    Numerology,
    Chinese,
}

impl ReadingKind {
    pub const ALL: [ReadingKind; 5] = [
        ReadingKind::Astrology,
        ReadingKind::Vedic,
        ReadingKind::Tarot,
        ReadingKind::Numerology,
        ReadingKind::Chinese,
    ];

    pub fn reading_type(self) -> ReadingType {
        match self {
            ReadingKind::Astrology => ReadingType::Astrology,
            ReadingKind::Vedic => ReadingType::Vedic,
            ReadingKind::Tarot => ReadingType::Tarot,
            ReadingKind::Numerology => ReadingType::Numerology,
            ReadingKind::Chinese => ReadingType::Chinese,
        }
    }

    pub fn title(self) -> &'static str {
        self.reading_type().title()
    }
}

impl From<ReadingKind> for ReadingType {
    fn from(kind: ReadingKind) -> Self {
        kind.reading_type()
    }
}

//=========================================================================================
// Readings
//=========================================================================================
// Every field defaults when absent: the generative service may omit required
// fields, and views show a placeholder rather than rejecting the reading.

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AstrologyReading {
    pub sun_sign: String,
    pub moon_sign: String,
    pub lucky_color: String,
    pub lucky_number: String,
    pub compatible_signs: Vec<String>,
    pub lucky_gemstone: String,
    pub summary: String,
}

/// A Vedic "affliction" with its remedy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dosha {
    pub name: String,
    pub description: String,
    pub remedy: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VedicReading {
    pub lagna: String,
    pub moon_sign: String,
    pub ascendant: String,
    pub current_dasha: String,
    pub past_dasha: String,
    pub future_dasha: String,
    pub lucky_color: String,
    pub lucky_number: String,
    pub compatible_signs: Vec<String>,
    pub lucky_gemstone: String,
    pub doshas: Vec<Dosha>,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TarotCard {
    pub name: String,
    pub description: String,
    pub meaning: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TarotReading {
    pub cards: Vec<TarotCard>,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NumerologyReading {
    pub life_path_number: String,
    pub destiny_number: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChineseReading {
    pub zodiac_animal: String,
    pub element: String,
    pub year_outlook: String,
    pub summary: String,
}

/// A generated reading, one variant per [`ReadingKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReadingData {
    Astrology(AstrologyReading),
    Vedic(VedicReading),
    Tarot(TarotReading),
    Numerology(NumerologyReading),
    Chinese(ChineseReading),
}

impl ReadingData {
    pub fn kind(&self) -> ReadingKind {
        match self {
            ReadingData::Astrology(_) => ReadingKind::Astrology,
            ReadingData::Vedic(_) => ReadingKind::Vedic,
            ReadingData::Tarot(_) => ReadingKind::Tarot,
            ReadingData::Numerology(_) => ReadingKind::Numerology,
            ReadingData::Chinese(_) => ReadingKind::Chinese,
        }
    }

    pub fn summary(&self) -> &str {
        match self {
            ReadingData::Astrology(r) => &r.summary,
            ReadingData::Vedic(r) => &r.summary,
            ReadingData::Tarot(r) => &r.summary,
            ReadingData::Numerology(r) => &r.summary,
            ReadingData::Chinese(r) => &r.summary,
        }
    }

    /// Parses generator output as the variant for `kind`.
    pub fn from_json(kind: ReadingKind, text: &str) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            ReadingKind::Astrology => ReadingData::Astrology(serde_json::from_str(text)?),
            ReadingKind::Vedic => ReadingData::Vedic(serde_json::from_str(text)?),
            ReadingKind::Tarot => ReadingData::Tarot(serde_json::from_str(text)?),
            ReadingKind::Numerology => ReadingData::Numerology(serde_json::from_str(text)?),
            ReadingKind::Chinese => ReadingData::Chinese(serde_json::from_str(text)?),
        })
    }
}

//=========================================================================================
// Tarot Mood
//=========================================================================================

/// The mood a querent picks before the cards are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Excited,
    Happy,
    Neutral,
    Sad,
    Crying,
}

impl Mood {
    pub const ALL: [Mood; 5] = [Mood::Excited, Mood::Happy, Mood::Neutral, Mood::Sad, Mood::Crying];

    pub fn label(self) -> &'static str {
        match self {
            Mood::Excited => "🤩 Excited",
            Mood::Happy => "😊 Happy",
            Mood::Neutral => "😐 Neutral",
            Mood::Sad => "😔 Sad",
            Mood::Crying => "😭 Crying",
        }
    }
}
