//! Note-card extraction from a search-results page snapshot.
//!
//! The source platform's markup is fragile, so every field is resolved through
//! an ordered list of selector strategies: the first strategy that yields a
//! non-empty value wins, and the final fallback is an empty default. A card
//! whose title cannot be obtained at all is skipped; any other missing
//! sub-element degrades to an empty string.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::note::NoteRecord;

/// Primary card selectors, most specific first.
const CARD_SELECTORS: &[&str] = &["section.note-item", "div.note-item", ".feeds-page .note-item"];

/// Broad fallback when the primary selectors match nothing (markup drift).
const CARD_FALLBACK_SELECTORS: &[&str] = &[r#"[class*="note"]"#];

const TITLE_SELECTORS: &[&str] = &[".title", "span.title", r#"[class*="title"]"#];

const AUTHOR_SELECTORS: &[&str] =
    &[".author", ".name", r#"[class*="author"]"#, r#"[class*="name"]"#];

const LIKES_SELECTORS: &[&str] = &[r#"[class*="like"]"#, r#"[class*="count"]"#];

/// Extracts note cards from rendered search-results HTML, in document order.
///
/// Relative links are resolved against `base_url`. No deduplication happens
/// here; the collector owns that across pagination rounds.
pub fn extract_cards(html: &str, base_url: &str) -> Vec<NoteRecord> {
    let doc = Html::parse_document(html);

    let mut cards = select_all(&doc, CARD_SELECTORS);
    if cards.is_empty() {
        cards = select_all(&doc, CARD_FALLBACK_SELECTORS);
    }

    cards.iter().filter_map(|card| extract_card(*card, base_url)).collect()
}

fn extract_card(card: ElementRef<'_>, base_url: &str) -> Option<NoteRecord> {
    let title = first_text(card, TITLE_SELECTORS)?;

    Some(NoteRecord {
        title,
        author: first_text(card, AUTHOR_SELECTORS).unwrap_or_default(),
        link: first_link(card, base_url).unwrap_or_default(),
        likes: first_text(card, LIKES_SELECTORS).unwrap_or_default(),
        query: String::new(),
    })
}

/// First non-empty inner text among the given selector strategies.
fn first_text(scope: ElementRef<'_>, selectors: &[&str]) -> Option<String> {
    for selector in selectors {
        let Ok(parsed) = Selector::parse(selector) else {
            continue;
        };
        if let Some(el) = scope.select(&parsed).next() {
            let text = el.text().collect::<String>().trim().to_string();
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// First anchor href within the card, normalized to absolute form.
fn first_link(scope: ElementRef<'_>, base_url: &str) -> Option<String> {
    let anchor = Selector::parse("a").ok()?;
    let href = scope.select(&anchor).find_map(|a| a.value().attr("href"))?;
    Some(absolutize(href, base_url))
}

fn absolutize(href: &str, base_url: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    match Url::parse(base_url).and_then(|base| base.join(href)) {
        Ok(url) => url.to_string(),
        Err(_) => href.to_string(),
    }
}

fn select_all<'a>(doc: &'a Html, selectors: &[&str]) -> Vec<ElementRef<'a>> {
    let mut found = Vec::new();
    for selector in selectors {
        let Ok(parsed) = Selector::parse(selector) else {
            continue;
        };
        for el in doc.select(&parsed) {
            if !found.iter().any(|seen: &ElementRef<'a>| seen.id() == el.id()) {
                found.push(el);
            }
        }
    }
    found
}
