//! crates/oracle_core/src/schema.rs
//!
//! Structural descriptors for the JSON each reading kind must come back as.
//! They serialize to the response-schema dialect of the generative API
//! (`type`, `properties`, `items`, `required`, `propertyOrdering`).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::ReadingKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    Object,
    Array,
    String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDescriptor {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, SchemaDescriptor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub property_ordering: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaDescriptor>>,
}

impl SchemaDescriptor {
    pub fn string() -> Self {
        Self::leaf(SchemaType::String)
    }

    pub fn array(items: SchemaDescriptor) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::leaf(SchemaType::Array)
        }
    }

    /// An object whose fields are all required, kept in declaration order.
    pub fn object(fields: Vec<(&str, SchemaDescriptor)>) -> Self {
        let names: Vec<String> = fields.iter().map(|(name, _)| name.to_string()).collect();
        Self {
            properties: fields
                .into_iter()
                .map(|(name, schema)| (name.to_string(), schema))
                .collect(),
            property_ordering: names.clone(),
            required: names,
            ..Self::leaf(SchemaType::Object)
        }
    }

    fn leaf(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            properties: BTreeMap::new(),
            property_ordering: Vec::new(),
            required: Vec::new(),
            items: None,
        }
    }

    pub fn property(&self, name: &str) -> Option<&SchemaDescriptor> {
        self.properties.get(name)
    }

    /// The fixed output shape for a reading kind.
    pub fn for_kind(kind: ReadingKind) -> Self {
        let s = SchemaDescriptor::string;
        match kind {
            ReadingKind::Astrology => Self::object(vec![
                ("sunSign", s()),
                ("moonSign", s()),
                ("luckyColor", s()),
                ("luckyNumber", s()),
                ("compatibleSigns", Self::array(s())),
                ("luckyGemstone", s()),
                ("summary", s()),
            ]),
            ReadingKind::Vedic => Self::object(vec![
                ("lagna", s()),
                ("moonSign", s()),
                ("ascendant", s()),
                ("currentDasha", s()),
                ("pastDasha", s()),
                ("futureDasha", s()),
                ("luckyColor", s()),
                ("luckyNumber", s()),
                ("compatibleSigns", Self::array(s())),
                ("luckyGemstone", s()),
                (
                    "doshas",
                    Self::array(Self::object(vec![
                        ("name", s()),
                        ("description", s()),
                        ("remedy", s()),
                    ])),
                ),
                ("summary", s()),
            ]),
            ReadingKind::Tarot => Self::object(vec![
                (
                    "cards",
                    Self::array(Self::object(vec![
                        ("name", s()),
                        ("description", s()),
                        ("meaning", s()),
                    ])),
                ),
                ("summary", s()),
            ]),
            ReadingKind::Numerology => Self::object(vec![
                ("lifePathNumber", s()),
                ("destinyNumber", s()),
                ("summary", s()),
            ]),
            ReadingKind::Chinese => Self::object(vec![
                ("zodiacAnimal", s()),
                ("element", s()),
                ("yearOutlook", s()),
                ("summary", s()),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_kind_requires_all_top_level_fields_and_a_summary() {
        for kind in ReadingKind::ALL {
            let schema = SchemaDescriptor::for_kind(kind);
            assert_eq!(schema.schema_type, SchemaType::Object);
            assert_eq!(schema.required, schema.property_ordering);
            assert_eq!(schema.required.len(), schema.properties.len());
            assert_eq!(schema.property("summary"), Some(&SchemaDescriptor::string()));
        }
    }

    #[test]
    fn tarot_cards_are_an_unbounded_array_of_card_objects() {
        let schema = SchemaDescriptor::for_kind(ReadingKind::Tarot);
        let cards = schema.property("cards").unwrap();
        assert_eq!(cards.schema_type, SchemaType::Array);
        let card = cards.items.as_deref().unwrap();
        assert_eq!(card.required, vec!["name", "description", "meaning"]);
    }

    #[test]
    fn serializes_to_the_response_schema_dialect() {
        let value = serde_json::to_value(SchemaDescriptor::for_kind(ReadingKind::Numerology)).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "OBJECT",
                "properties": {
                    "destinyNumber": {"type": "STRING"},
                    "lifePathNumber": {"type": "STRING"},
                    "summary": {"type": "STRING"}
                },
                "propertyOrdering": ["lifePathNumber", "destinyNumber", "summary"],
                "required": ["lifePathNumber", "destinyNumber", "summary"]
            })
        );
    }

    #[test]
    fn vedic_doshas_carry_name_description_and_remedy() {
        let schema = SchemaDescriptor::for_kind(ReadingKind::Vedic);
        let dosha = schema.property("doshas").and_then(|d| d.items.as_deref()).unwrap();
        assert_eq!(dosha.required, vec!["name", "description", "remedy"]);
        assert_eq!(schema.required.len(), 12);
    }
}
