//! Cross-reference target, pronunciation audio and illustrations.

use lazy_static::lazy_static;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::classes;
use crate::lexicon::REFERRAL_LABELS;
use crate::markup::{class_selector, following_siblings, is_tag, stripped_text, tag_selector, Child};

lazy_static! {
    static ref LABELS: Selector = class_selector("span", classes::LABEL);
    static ref AUDIO: Selector = class_selector("a", classes::AUDIO);
    static ref IMAGES: Selector = tag_selector("img");
}

/// Recordings of the headword, Netherlands and Belgian pronunciation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioLinks {
    pub nl: Option<String>,
    pub be: Option<String>,
}

/// Target of a `zie ...` referral article.
pub fn cross_reference(article: &Html) -> Option<String> {
    article
        .select(&LABELS)
        .filter(|label| {
            let text = stripped_text(*label).to_lowercase();
            REFERRAL_LABELS.contains(&text.as_str())
        })
        .find_map(|label| {
            // only the next link counts; an empty one leaves this label unresolved
            let link = following_siblings(label).find_map(|sibling| match sibling {
                Child::Element(el) if is_tag(el, "a") => Some(el),
                _ => None,
            })?;
            Some(stripped_text(link)).filter(|target| !target.is_empty())
        })
}

pub fn audio_links(article: &Html) -> AudioLinks {
    let mut links = AudioLinks::default();
    for anchor in article.select(&AUDIO) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if href.contains("/nl/") {
            links.nl = Some(href.to_string());
        } else if href.contains("/be/") {
            links.be = Some(href.to_string());
        }
    }
    links
}

/// Image sources that are absolute http(s) URLs, in document order.
pub fn images(article: &Html) -> Vec<String> {
    article
        .select(&IMAGES)
        .filter_map(|img| img.value().attr("src"))
        .filter(|src| match Url::parse(src) {
            Ok(url) => matches!(url.scheme(), "http" | "https"),
            Err(err) => {
                debug!(src = *src, error = %err, "skipping image source");
                false
            }
        })
        .map(str::to_string)
        .collect()
}
