//! Parser for Van Dale dictionary article fragments.
//!
//! [`parse_entry`] turns one article (plus the optional headword snippet that
//! accompanies it) into a structured [`Entry`]: headword and stress,
//! grammatical category, inflected forms, verb conjugation, senses with
//! examples and idioms, cross-references and media links.

pub mod classes;
pub mod conjugation;
pub mod entry;
pub mod error;
pub mod forms;
pub mod headword;
pub mod lexicon;
pub mod markup;
pub mod meanings;
pub mod media;
pub mod pos;
pub mod schema;

pub use conjugation::{ConjugationTable, PerfectTense, PronounSlot};
pub use entry::{parse_entry, Entry};
pub use error::{ParseError, SchemaError};
pub use headword::AlternateHeadword;
pub use meanings::{Idiom, Meaning};
pub use media::AudioLinks;
pub use pos::PartOfSpeech;
pub use schema::{init_pos_schema, normalize_part_of_speech, PosSchema};
