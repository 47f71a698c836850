//! Label → value scanning for plural, diminutive and the other form fields,
//! plus the short verb-forms summary shown next to verb headwords.

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

use crate::classes;
use crate::lexicon::{form_field_for_label, FormField};
use crate::markup::{
    class_selector, descendant_elements, following_siblings, has_class, stripped_text, Child,
};

lazy_static! {
    static ref LABELS: Selector = class_selector("span", classes::LABEL);
    static ref VARIANT_BLOCK: Selector = class_selector("span", classes::VARIANT_BLOCK);
    static ref HEADWORD: Selector = class_selector("span", classes::HEADWORD);
    static ref VALUES: Selector = class_selector("span", classes::VALUE);
}

/// Value tokens that end a label's value list.
const VALUE_TERMINATORS: &[&str] = &["(", ")", ";"];
/// Value tokens that are skipped without ending the list.
const VALUE_SEPARATORS: &[&str] = &[",", ":"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MorphologicalForms {
    pub plural: Option<String>,
    pub diminutive: Option<String>,
    pub inflected_form: Option<String>,
    pub comparative: Option<String>,
    pub superlative: Option<String>,
    pub derivations: Option<String>,
    /// A second plural, handed to the first alternate headword by the assembler.
    pub surplus_plural: Option<String>,
}

impl MorphologicalForms {
    fn slot(&mut self, field: FormField) -> &mut Option<String> {
        match field {
            FormField::Plural => &mut self.plural,
            FormField::Diminutive => &mut self.diminutive,
            FormField::InflectedForm => &mut self.inflected_form,
            FormField::Comparative => &mut self.comparative,
            FormField::Superlative => &mut self.superlative,
            FormField::Derivations => &mut self.derivations,
        }
    }

    /// Fill a field once. Later plurals spill into `surplus_plural`; later
    /// values of other fields are dropped.
    fn fill(&mut self, field: FormField, value: String) {
        if self.slot(field).is_none() {
            *self.slot(field) = Some(value);
        } else if field == FormField::Plural && self.surplus_plural.is_none() {
            self.surplus_plural = Some(value);
        }
    }
}

/// Scan every label in the article. `seed_plural` is a plural already taken
/// from the variant block; it counts as the first plural value.
pub fn extract_forms(article: &Html, seed_plural: Option<String>) -> MorphologicalForms {
    let mut forms = MorphologicalForms {
        plural: seed_plural,
        ..Default::default()
    };

    for label in article.select(&LABELS) {
        let values = values_after(label);
        if values.is_empty() {
            continue;
        }
        let label_text: String = label.text().collect();
        if let Some(field) = form_field_for_label(&label_text) {
            forms.fill(field, values.join(", "));
        }
    }

    forms
}

/// Value spans that follow `label` up to the next label or a terminator.
fn values_after(label: ElementRef<'_>) -> Vec<String> {
    let mut values = Vec::new();
    for sibling in following_siblings(label) {
        let el = match sibling {
            Child::Element(el) => el,
            Child::Text(_) => continue,
        };
        if has_class(el, classes::LABEL) {
            break;
        }
        if !has_class(el, classes::VALUE) {
            continue;
        }
        let value = stripped_text(el);
        if VALUE_TERMINATORS.contains(&value.as_str()) {
            break;
        }
        if !value.is_empty() && !VALUE_SEPARATORS.contains(&value.as_str()) {
            values.push(value);
        }
    }
    values
}

/// Principal parts of a verb, e.g. `keek aan, heeft aangekeken`.
pub fn verb_forms_summary(article: &Html) -> Option<String> {
    let summary = article
        .select(&VARIANT_BLOCK)
        .next()
        .map(parenthesized_values)
        .filter(|parts| !parts.is_empty())
        .or_else(|| {
            article
                .select(&HEADWORD)
                .next()
                .map(headword_values)
                .filter(|parts| !parts.is_empty())
        })?;
    Some(summary.join(", "))
}

/// Values between the first `(` and the closing `)`/`;` of the headword line.
fn parenthesized_values(block: ElementRef<'_>) -> Vec<String> {
    let mut parts = Vec::new();
    let mut found_opening = false;

    for el in descendant_elements(block) {
        if has_class(el, classes::VALUE) {
            let text = stripped_text(el);
            if text == "(" {
                found_opening = true;
                continue;
            }
            if found_opening {
                if text == ";" || text == ")" {
                    break;
                }
                if text.is_empty() || VALUE_SEPARATORS.contains(&text.as_str()) {
                    continue;
                }
                // the category label itself
                if text.contains("werkwoord") || text == "ww" {
                    continue;
                }
                parts.push(text);
            }
        }
        if found_opening && has_class(el, classes::LABEL) {
            break;
        }
    }

    parts
}

fn headword_values(headword: ElementRef<'_>) -> Vec<String> {
    headword
        .select(&VALUES)
        .map(stripped_text)
        .filter(|text| !text.is_empty() && !matches!(text.as_str(), "(" | ")" | ","))
        .collect()
}
