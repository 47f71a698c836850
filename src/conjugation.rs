//! The "werkwoordrijtje": present, past and perfect tense of a verb.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classes;
use crate::lexicon::{CONJUGATION_HEADER_KEYWORDS, PRONOUN_LABELS};
use crate::markup::{class_selector, stripped_text, tag_selector};

lazy_static! {
    static ref CONJUGATION_SPANS: Selector =
        Selector::parse(r#"span[id^="ww"]"#).unwrap();
    static ref TABLE: Selector = class_selector("table", classes::CONJUGATION_TABLE);
    static ref ROWS: Selector = tag_selector("tr");
    static ref CELLS: Selector = tag_selector("td");
}

/// Row keys of the conjugation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PronounSlot {
    Ik,
    DatIk,
    Jij,
    DatJij,
    U,
    DatU,
    HijZijHet,
    DatHijZijHet,
    Wij,
    DatWij,
    Jullie,
    DatJullie,
    Zij,
    DatZij,
}

impl PronounSlot {
    pub const ALL: [PronounSlot; 14] = [
        PronounSlot::Ik,
        PronounSlot::DatIk,
        PronounSlot::Jij,
        PronounSlot::DatJij,
        PronounSlot::U,
        PronounSlot::DatU,
        PronounSlot::HijZijHet,
        PronounSlot::DatHijZijHet,
        PronounSlot::Wij,
        PronounSlot::DatWij,
        PronounSlot::Jullie,
        PronounSlot::DatJullie,
        PronounSlot::Zij,
        PronounSlot::DatZij,
    ];

    /// The label used in the first column of the table.
    pub fn label(self) -> &'static str {
        match self {
            PronounSlot::Ik => "ik",
            PronounSlot::DatIk => "dat ik",
            PronounSlot::Jij => "jij",
            PronounSlot::DatJij => "dat jij",
            PronounSlot::U => "u",
            PronounSlot::DatU => "dat u",
            PronounSlot::HijZijHet => "hij/zij/het",
            PronounSlot::DatHijZijHet => "dat hij/zij/het",
            PronounSlot::Wij => "wij",
            PronounSlot::DatWij => "dat wij",
            PronounSlot::Jullie => "jullie",
            PronounSlot::DatJullie => "dat jullie",
            PronounSlot::Zij => "zij",
            PronounSlot::DatZij => "dat zij",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerfectTense {
    pub auxiliary: String,
    pub participle: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConjugationTable {
    pub present: BTreeMap<PronounSlot, String>,
    pub past: BTreeMap<PronounSlot, String>,
    pub perfect: Option<PerfectTense>,
}

impl ConjugationTable {
    pub fn is_empty(&self) -> bool {
        self.present.is_empty() && self.past.is_empty() && self.perfect.is_none()
    }
}

/// Locate and parse the hidden conjugation table of a verb article.
pub fn parse_conjugation_table(article: &Html) -> Option<ConjugationTable> {
    let span = article
        .select(&CONJUGATION_SPANS)
        .find(|span| span.value().attr("id").is_some_and(|id| id != "ww"))?;
    let table = span.select(&TABLE).next()?;
    let parsed = parse_table(table);
    if parsed.is_empty() {
        debug!("conjugation table present but empty");
        None
    } else {
        Some(parsed)
    }
}

fn is_header(first_cell: &str) -> bool {
    let lowered = first_cell.to_lowercase();
    first_cell.is_empty()
        || CONJUGATION_HEADER_KEYWORDS
            .iter()
            .any(|keyword| lowered.contains(keyword))
}

fn parse_table(table: ElementRef<'_>) -> ConjugationTable {
    let mut conjugation = ConjugationTable::default();
    let mut past_separator = false;

    for row in table.select(&ROWS) {
        let cells: Vec<ElementRef<'_>> = row.select(&CELLS).collect();
        if cells.len() == 1 && cells[0].value().attr("colspan").is_some() {
            past_separator = true;
        }
        if cells.len() < 2 {
            continue;
        }

        let texts: Vec<String> = cells.iter().map(|cell| stripped_text(*cell)).collect();
        if is_header(&texts[0]) {
            continue;
        }

        if past_separator {
            if texts[1].to_lowercase().contains("hulpwerkwoord") {
                continue;
            }
            if texts.len() >= 3 && texts[2].to_lowercase().contains("voltooid") {
                continue;
            }
            if texts.len() >= 3
                && !texts[1].is_empty()
                && !texts[2].is_empty()
                && conjugation.perfect.is_none()
            {
                conjugation.perfect = Some(PerfectTense {
                    auxiliary: texts[1].clone(),
                    participle: texts[2].clone(),
                });
            }
            continue;
        }

        let Some(slot) = PRONOUN_LABELS.get(texts[0].as_str()).copied() else {
            continue;
        };
        if !texts[1].is_empty() {
            conjugation.present.insert(slot, texts[1].clone());
        }
        if let Some(past) = texts.get(2).filter(|past| !past.is_empty()) {
            conjugation.past.insert(slot, past.clone());
        }
    }

    conjugation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse_fragment;

    fn table_html(rows: &str) -> String {
        format!(
            r#"<span id="ww123" style="display:none"><table class="Nt2FLti">{}</table></span>"#,
            rows
        )
    }

    const SAMPLE_ROWS: &str = concat!(
        "<tr><td></td><td>onvoltooid tegenwoordige tijd</td><td>onvoltooid verleden tijd</td></tr>",
        "<tr><td>ik</td><td>kijk aan</td><td>keek aan</td></tr>",
        "<tr><td>dat ik</td><td>aankijk</td><td>aankeek</td></tr>",
        "<tr><td>hij/zij/het</td><td>kijkt aan</td><td></td></tr>",
        "<tr><td>jullie allemaal</td><td>kijken aan</td><td>keken aan</td></tr>",
        "<tr><td colspan=\"4\"></td></tr>",
        "<tr><td>voltooide tijd</td><td>hulpwerkwoord</td><td>voltooid deelwoord</td></tr>",
        "<tr><td>ik</td><td>heb</td><td>aangekeken</td></tr>",
    );

    #[test]
    fn parses_present_past_and_perfect() {
        let html = parse_fragment(&table_html(SAMPLE_ROWS));
        let table = parse_conjugation_table(&html).unwrap();

        assert_eq!(table.present.get(&PronounSlot::Ik).map(String::as_str), Some("kijk aan"));
        assert_eq!(table.past.get(&PronounSlot::DatIk).map(String::as_str), Some("aankeek"));
        assert_eq!(
            table.present.get(&PronounSlot::HijZijHet).map(String::as_str),
            Some("kijkt aan")
        );
        // blank cell leaves the slot unset
        assert!(!table.past.contains_key(&PronounSlot::HijZijHet));
        // unknown label is skipped
        assert!(!table.present.contains_key(&PronounSlot::Jullie));
        assert_eq!(
            table.perfect,
            Some(PerfectTense {
                auxiliary: "heb".into(),
                participle: "aangekeken".into()
            })
        );
        assert!(table.present.values().chain(table.past.values()).all(|v| !v.is_empty()));
    }

    #[test]
    fn plain_ww_span_is_not_a_table_host() {
        let html = parse_fragment(&format!(
            r#"<span id="ww"><table class="Nt2FLti">{}</table></span>"#,
            SAMPLE_ROWS
        ));
        assert_eq!(parse_conjugation_table(&html), None);
    }

    #[test]
    fn empty_table_is_none() {
        let html = parse_fragment(&table_html("<tr><td>tijd</td><td>x</td></tr>"));
        assert_eq!(parse_conjugation_table(&html), None);
    }

    #[test]
    fn serializes_slots_as_snake_case() {
        let mut table = ConjugationTable::default();
        table.present.insert(PronounSlot::DatHijZijHet, "aankijkt".into());
        let json = serde_json::to_string(&table).unwrap();
        assert!(json.contains("\"dat_hij_zij_het\":\"aankijkt\""));
    }

    #[test]
    fn labels_are_unique() {
        let mut labels: Vec<&str> = PronounSlot::ALL.iter().map(|s| s.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 14);
    }
}
