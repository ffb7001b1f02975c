//! crates/oracle_core/src/render.rs
//!
//! Presentation helpers shared by every front-end: labelled detail rows with a
//! placeholder for values the oracle left out, and a markdown rendering used
//! by the reading modal and the clipboard.

use serde::Serialize;

use crate::domain::{ReadingData, ReadingKind};

/// Shown in place of any value the oracle did not supply.
pub const PLACEHOLDER: &str = "...";

pub const NO_DOSHAS: &str = "No major doshas detected.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

fn fill(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        value.to_string()
    }
}

fn row(label: &'static str, value: &str) -> DetailRow {
    DetailRow {
        label,
        value: fill(value),
    }
}

fn joined(values: &[String]) -> String {
    values.join(", ")
}

/// The title a reading view is headed with.
pub fn heading(kind: ReadingKind) -> &'static str {
    match kind {
        ReadingKind::Astrology => "Western Birth Chart",
        ReadingKind::Vedic => "Vedic Chart",
        ReadingKind::Tarot => "Your Guidance",
        ReadingKind::Numerology => "Numerological Blueprint",
        ReadingKind::Chinese => "Chinese Zodiac",
    }
}

fn summary_title(kind: ReadingKind) -> &'static str {
    match kind {
        ReadingKind::Astrology => "Planetary Insight",
        ReadingKind::Vedic => "Guidance",
        ReadingKind::Tarot => "Reading Summary",
        ReadingKind::Numerology => "The Numbers Speak",
        ReadingKind::Chinese => "Characteristics",
    }
}

pub fn detail_rows(reading: &ReadingData) -> Vec<DetailRow> {
    match reading {
        ReadingData::Astrology(r) => vec![
            row("Sun Sign", &r.sun_sign),
            row("Moon Sign", &r.moon_sign),
            row("Lucky Color", &r.lucky_color),
            row("Lucky Number", &r.lucky_number),
            row("Gemstone", &r.lucky_gemstone),
            row("Compatible With", &joined(&r.compatible_signs)),
        ],
        ReadingData::Vedic(r) => vec![
            row("Lagna (Ascendant)", &r.lagna),
            row("Moon Sign (Rashi)", &r.moon_sign),
            row("Nakshatra/Ascendant", &r.ascendant),
            row("Lucky Gemstone", &r.lucky_gemstone),
            row("Lucky Color", &r.lucky_color),
            row("Lucky Number", &r.lucky_number),
            row("Compatible With", &joined(&r.compatible_signs)),
            row("Past Dasha", &r.past_dasha),
            row("Current Dasha", &r.current_dasha),
            row("Future Dasha", &r.future_dasha),
        ],
        ReadingData::Tarot(r) => r
            .cards
            .iter()
            .map(|card| row("Card", &card.name))
            .collect(),
        ReadingData::Numerology(r) => vec![
            row("Life Path", &r.life_path_number),
            row("Destiny Number", &r.destiny_number),
        ],
        ReadingData::Chinese(r) => vec![
            row("Your Sign", &r.zodiac_animal),
            row("Element", &r.element),
        ],
    }
}

/// Renders a reading as markdown for the modal and clipboard.
pub fn to_markdown(reading: &ReadingData) -> String {
    let kind = reading.kind();
    let mut out = format!("## {}\n\n", heading(kind));

    match reading {
        ReadingData::Tarot(r) => {
            for (i, card) in r.cards.iter().enumerate() {
                out.push_str(&format!(
                    "### {}. {}\n*{}*\n\n{}\n\n",
                    i + 1,
                    fill(&card.name),
                    fill(&card.description),
                    fill(&card.meaning)
                ));
            }
        }
        _ => {
            for detail in detail_rows(reading) {
                out.push_str(&format!("- **{}:** {}\n", detail.label, detail.value));
            }
            out.push('\n');
        }
    }

    match reading {
        ReadingData::Vedic(r) => {
            out.push_str("### Dosha Analysis\n\n");
            if r.doshas.is_empty() {
                out.push_str(&format!("{}\n\n", NO_DOSHAS));
            }
            for dosha in &r.doshas {
                out.push_str(&format!(
                    "#### {}\n{}\n**Remedy:** {}\n\n",
                    fill(&dosha.name),
                    fill(&dosha.description),
                    fill(&dosha.remedy)
                ));
            }
        }
        ReadingData::Chinese(r) => {
            out.push_str(&format!("### Year Outlook\n\n{}\n\n", fill(&r.year_outlook)));
        }
        _ => {}
    }

    out.push_str(&format!(
        "### {}\n\n{}",
        summary_title(kind),
        fill(reading.summary())
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AstrologyReading, ChineseReading, Dosha, TarotCard, TarotReading, VedicReading,
    };

    fn leo() -> ReadingData {
        ReadingData::Astrology(AstrologyReading {
            sun_sign: "Leo".into(),
            moon_sign: "Pisces".into(),
            lucky_color: "Gold".into(),
            lucky_number: "7".into(),
            compatible_signs: vec!["Aries".into(), "Sagittarius".into()],
            lucky_gemstone: "Ruby".into(),
            summary: "Shine on.".into(),
        })
    }

    #[test]
    fn astrology_rows_join_compatible_signs() {
        let rows = detail_rows(&leo());
        assert_eq!(
            rows[0],
            DetailRow {
                label: "Sun Sign",
                value: "Leo".into(),
            }
        );
        assert_eq!(rows[5].value, "Aries, Sagittarius");
    }

    #[test]
    fn missing_values_show_the_placeholder() {
        let rows = detail_rows(&ReadingData::Chinese(ChineseReading {
            zodiac_animal: "Dragon".into(),
            ..Default::default()
        }));
        assert_eq!(rows[0].value, "Dragon");
        assert_eq!(rows[1].value, PLACEHOLDER);
    }

    #[test]
    fn markdown_has_heading_rows_and_summary() {
        let markdown = to_markdown(&leo());
        assert!(markdown.starts_with("## Western Birth Chart"));
        assert!(markdown.contains("- **Moon Sign:** Pisces"));
        assert!(markdown.ends_with("### Planetary Insight\n\nShine on."));
    }

    #[test]
    fn vedic_markdown_lists_doshas_or_says_none() {
        let mut vedic = VedicReading {
            summary: "Steady.".into(),
            ..Default::default()
        };
        assert!(to_markdown(&ReadingData::Vedic(vedic.clone())).contains(NO_DOSHAS));

        vedic.doshas.push(Dosha {
            name: "Manglik".into(),
            description: "Mars in the seventh house".into(),
            remedy: "Chant the Hanuman Chalisa".into(),
        });
        let markdown = to_markdown(&ReadingData::Vedic(vedic));
        assert!(!markdown.contains(NO_DOSHAS));
        assert!(markdown.contains("#### Manglik"));
        assert!(markdown.contains("**Remedy:** Chant the Hanuman Chalisa"));
    }

    #[test]
    fn tarot_markdown_numbers_cards_in_order() {
        let reading = ReadingData::Tarot(TarotReading {
            cards: vec![
                TarotCard {
                    name: "The Fool".into(),
                    description: "A cliff".into(),
                    meaning: "Leap".into(),
                },
                TarotCard {
                    name: "The Moon".into(),
                    description: "Two towers".into(),
                    meaning: "Dreams".into(),
                },
            ],
            summary: "Trust.".into(),
        });
        let markdown = to_markdown(&reading);
        let fool = markdown.find("### 1. The Fool").unwrap();
        let moon = markdown.find("### 2. The Moon").unwrap();
        assert!(fool < moon);
    }
}
