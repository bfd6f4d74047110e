//! Liturgy data types.
//!
//! These types mirror the JSON served by the liturgy service. Field names on
//! the wire are Portuguese; the Rust side uses English names.

use serde::{Deserialize, Deserializer, Serialize};

/// One unit of liturgical text: a reading, the psalm or the gospel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    /// Scripture citation, e.g. "Jo 1,1-18".
    #[serde(rename = "referencia", default)]
    pub reference: String,
    /// Heading. The psalm usually has none.
    #[serde(rename = "titulo", default)]
    pub title: String,
    /// Raw body with verse numbers embedded next to words.
    #[serde(rename = "texto")]
    pub text: String,
    /// Psalm response, when the service sends one.
    #[serde(rename = "refrao", default, skip_serializing_if = "Option::is_none")]
    pub refrain: Option<String>,
}

impl Passage {
    /// Whether this passage carries any text worth showing.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// The full set of passages plus metadata for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiturgyDocument {
    /// The service's own date label (dd/mm/yyyy).
    #[serde(rename = "data", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Name of the day's liturgy.
    #[serde(rename = "liturgia")]
    pub name: String,
    /// Liturgical color designation, as sent.
    #[serde(rename = "cor")]
    pub color: String,
    /// First reading.
    #[serde(rename = "primeiraLeitura")]
    pub first_reading: Passage,
    /// Second reading, only on some days.
    #[serde(
        rename = "segundaLeitura",
        default,
        deserialize_with = "optional_passage"
    )]
    pub second_reading: Option<Passage>,
    /// Responsorial psalm.
    #[serde(rename = "salmo")]
    pub psalm: Passage,
    /// Gospel.
    #[serde(rename = "evangelho")]
    pub gospel: Passage,
}

impl LiturgyDocument {
    /// The second reading, if the day has one with text.
    pub fn second_reading(&self) -> Option<&Passage> {
        self.second_reading.as_ref().filter(|p| p.has_text())
    }

    /// Look up a passage by kind.
    pub fn passage(&self, kind: PassageKind) -> Option<&Passage> {
        match kind {
            PassageKind::FirstReading => Some(&self.first_reading),
            PassageKind::SecondReading => self.second_reading(),
            PassageKind::Psalm => Some(&self.psalm),
            PassageKind::Gospel => Some(&self.gospel),
        }
    }

    /// Passages to display, in liturgical order. An absent second reading
    /// is left out entirely.
    pub fn passages(&self) -> Vec<(PassageKind, &Passage)> {
        PassageKind::all()
            .iter()
            .filter_map(|&kind| self.passage(kind).map(|p| (kind, p)))
            .collect()
    }

    /// Classified liturgical color.
    pub fn liturgical_color(&self) -> LiturgicalColor {
        LiturgicalColor::from_name(&self.color)
    }
}

/// Accepts a passage object; anything else (a "no second reading" string,
/// `null`, an object without text) counts as absent.
fn optional_passage<'de, D>(deserializer: D) -> Result<Option<Passage>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MaybePassage {
        Passage(Passage),
        Other(serde_json::Value),
    }

    Ok(match MaybePassage::deserialize(deserializer)? {
        MaybePassage::Passage(p) if p.has_text() => Some(p),
        MaybePassage::Passage(_) | MaybePassage::Other(_) => None,
    })
}

/// Which passage of the day a display unit shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassageKind {
    /// First reading.
    FirstReading,
    /// Second reading (Sundays and solemnities).
    SecondReading,
    /// Responsorial psalm.
    Psalm,
    /// Gospel.
    Gospel,
}

impl PassageKind {
    /// Returns all passage kinds in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::FirstReading, Self::SecondReading, Self::Psalm, Self::Gospel]
    }

    /// Tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstReading => "1ª Leitura",
            Self::SecondReading => "2ª Leitura",
            Self::Psalm => "Salmo",
            Self::Gospel => "Evangelho",
        }
    }

    /// Stable key for this passage.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::FirstReading => "firstReading",
            Self::SecondReading => "secondReading",
            Self::Psalm => "psalm",
            Self::Gospel => "gospel",
        }
    }
}

/// Liturgical colors used in the Roman rite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiturgicalColor {
    /// Verde.
    Green,
    /// Roxo.
    Purple,
    /// Branco.
    White,
    /// Vermelho.
    Red,
    /// Rosa / Róseo.
    Rose,
    /// Preto.
    Black,
    /// Anything the service invents.
    Other(String),
}

impl LiturgicalColor {
    /// Classify a Portuguese color name, ignoring case and surrounding space.
    pub fn from_name(name: &str) -> Self {
        let lower = name.trim().to_lowercase();
        match lower.as_str() {
            "verde" => Self::Green,
            "roxo" | "violeta" => Self::Purple,
            "branco" | "dourado" => Self::White,
            "vermelho" => Self::Red,
            "preto" => Self::Black,
            s if s.starts_with("ros") || s.starts_with("rós") => Self::Rose,
            _ => Self::Other(name.trim().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::liturgy::fixtures;

    #[test]
    fn parses_full_document() {
        let doc = fixtures::christmas();
        assert_eq!(doc.name, "Natal do Senhor - Missa do Dia");
        assert_eq!(doc.color, "Branco");
        assert_eq!(doc.date.as_deref(), Some("25/12/2024"));
        assert_eq!(doc.first_reading.reference, "Is 52,7-10");
        assert_eq!(doc.second_reading().map(|p| p.reference.as_str()), Some("Hb 1,1-6"));
        assert!(doc.psalm.title.is_empty());
        assert!(doc.psalm.refrain.is_some());
        assert_eq!(doc.gospel.reference, "Jo 1,1-18");
    }

    #[test]
    fn second_reading_string_means_absent() {
        let doc = fixtures::weekday();
        assert!(doc.second_reading.is_none());
        let kinds: Vec<_> = doc.passages().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![PassageKind::FirstReading, PassageKind::Psalm, PassageKind::Gospel]
        );
    }

    #[test]
    fn second_reading_missing_or_empty_means_absent() {
        let mut value: serde_json::Value = serde_json::from_str(fixtures::CHRISTMAS_JSON).unwrap();
        value["segundaLeitura"]["texto"] = serde_json::Value::String(String::new());
        let doc: LiturgyDocument = serde_json::from_value(value.clone()).unwrap();
        assert!(doc.second_reading().is_none());

        value.as_object_mut().unwrap().remove("segundaLeitura");
        let doc: LiturgyDocument = serde_json::from_value(value).unwrap();
        assert!(doc.passage(PassageKind::SecondReading).is_none());
        assert_eq!(doc.passages().len(), 3);
    }

    #[test]
    fn constructed_blank_second_reading_is_hidden() {
        let mut doc = fixtures::christmas();
        if let Some(p) = doc.second_reading.as_mut() {
            p.text = "   ".to_string();
        }
        assert!(doc.passages().iter().all(|(k, _)| *k != PassageKind::SecondReading));
    }

    #[test]
    fn missing_required_field_is_an_error() {
        let mut value: serde_json::Value = serde_json::from_str(fixtures::CHRISTMAS_JSON).unwrap();
        value.as_object_mut().unwrap().remove("evangelho");
        assert!(serde_json::from_value::<LiturgyDocument>(value).is_err());
    }

    #[test]
    fn classifies_colors() {
        assert_eq!(LiturgicalColor::from_name("Verde"), LiturgicalColor::Green);
        assert_eq!(LiturgicalColor::from_name(" ROXO "), LiturgicalColor::Purple);
        assert_eq!(LiturgicalColor::from_name("Róseo"), LiturgicalColor::Rose);
        assert_eq!(LiturgicalColor::from_name("branco"), LiturgicalColor::White);
        assert_eq!(
            LiturgicalColor::from_name("Azul"),
            LiturgicalColor::Other("Azul".to_string())
        );
    }

    #[test]
    fn passage_labels_in_order() {
        let labels: Vec<_> = PassageKind::all().iter().map(|k| k.label()).collect();
        assert_eq!(labels, vec!["1ª Leitura", "2ª Leitura", "Salmo", "Evangelho"]);
        assert_eq!(PassageKind::SecondReading.key(), "secondReading");
    }
}
