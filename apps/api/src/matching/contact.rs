//! Contact details pulled from raw resume text: emails, phone numbers and a
//! best-effort name guess. Results keep first-occurrence order.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static RE_EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9.+_-]+@[a-zA-Z0-9._-]+\.[a-zA-Z]+").expect("static pattern is valid")
});

static RE_PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\d[\d\-() .]{6,}\d").expect("static pattern is valid"));

/// Year ranges such as "2019 - 2021" carry eight digits.
const MIN_PHONE_DIGITS: usize = 9;
const MAX_NAME_WORDS: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub name_guess: Option<String>,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
}

pub fn extract_contact(text: &str) -> ContactInfo {
    ContactInfo {
        name_guess: guess_name(text),
        emails: find_emails(text),
        phones: find_phones(text),
    }
}

pub fn find_emails(text: &str) -> Vec<String> {
    dedup(RE_EMAIL.find_iter(text).map(|m| m.as_str().to_string()))
}

pub fn find_phones(text: &str) -> Vec<String> {
    dedup(
        RE_PHONE
            .find_iter(text)
            .map(|m| m.as_str().trim().to_string())
            .filter(|p| p.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS),
    )
}

/// First non-empty line of 2-4 capitalized words with no `@` or digits.
pub fn guess_name(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.contains('@') && !line.chars().any(|c| c.is_ascii_digit()))
        .find(|line| {
            let words: Vec<&str> = line.split_whitespace().collect();
            (2..=MAX_NAME_WORDS).contains(&words.len())
                && words
                    .iter()
                    .all(|w| w.chars().next().is_some_and(char::is_uppercase))
        })
        .map(str::to_string)
}

fn dedup(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
