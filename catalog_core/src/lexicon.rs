//! Per-locale vocabularies used to classify exercise names and tags.
//!
//! Catalog records do not carry a structured cardio type, and the interval
//! flag only exists in the display name, so classification is substring
//! matching against these tables. Every lookup consults all locales: a
//! Norwegian catalog may still contain English names.

/// Matching vocabulary for a single locale
#[derive(Debug)]
pub struct Lexicon {
    pub running: &'static [&'static str],
    pub cycling: &'static [&'static str],
    pub rowing: &'static [&'static str],
    pub interval: &'static [&'static str],
    pub indoor: &'static [&'static str],
    pub outdoor: &'static [&'static str],
}

pub static ENGLISH: Lexicon = Lexicon {
    running: &["running", "run", "jog"],
    cycling: &["cycling", "cycle", "bike"],
    rowing: &["rowing", "row"],
    interval: &["interval", "4x4"],
    indoor: &["indoor"],
    outdoor: &["outdoor"],
};

pub static NORWEGIAN: Lexicon = Lexicon {
    running: &["løping", "løp", "jogg"],
    cycling: &["sykling", "sykkel"],
    rowing: &["roing", "romaskin"],
    interval: &["intervall", "4x4"],
    indoor: &["innendørs"],
    outdoor: &["utendørs"],
};

static ALL: [&Lexicon; 2] = [&ENGLISH, &NORWEGIAN];

/// All supported lexicons
pub fn lexicons() -> &'static [&'static Lexicon] {
    &ALL
}

/// Tokens shorter than this only match at the start of a word
const SHORT_TOKEN: usize = 4;

/// True if `text` contains any token of the selected table in any locale
///
/// `text` is lowercased before matching; tokens are stored lowercase. Short
/// tokens must start a word, so "run" does not match "crunch".
pub fn matches_any(text: &str, table: fn(&Lexicon) -> &'static [&'static str]) -> bool {
    let text = text.to_lowercase();
    lexicons()
        .iter()
        .flat_map(|lexicon| table(lexicon).iter())
        .any(|token| contains_token(&text, token))
}

fn contains_token(text: &str, token: &str) -> bool {
    if token.chars().count() >= SHORT_TOKEN {
        return text.contains(token);
    }
    text.match_indices(token).any(|(at, _)| {
        text[..at]
            .chars()
            .next_back()
            .map_or(true, |before| !before.is_alphanumeric())
    })
}

pub fn running(lexicon: &Lexicon) -> &'static [&'static str] {
    lexicon.running
}

pub fn cycling(lexicon: &Lexicon) -> &'static [&'static str] {
    lexicon.cycling
}

pub fn rowing(lexicon: &Lexicon) -> &'static [&'static str] {
    lexicon.rowing
}

pub fn interval(lexicon: &Lexicon) -> &'static [&'static str] {
    lexicon.interval
}

pub fn indoor(lexicon: &Lexicon) -> &'static [&'static str] {
    lexicon.indoor
}

pub fn outdoor(lexicon: &Lexicon) -> &'static [&'static str] {
    lexicon.outdoor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_lowercase() {
        for lexicon in lexicons() {
            let tables = [
                lexicon.running,
                lexicon.cycling,
                lexicon.rowing,
                lexicon.interval,
                lexicon.indoor,
                lexicon.outdoor,
            ];
            for token in tables.iter().flat_map(|t| t.iter()) {
                assert_eq!(*token, token.to_lowercase());
                assert!(!token.is_empty());
            }
        }
    }

    #[test]
    fn test_short_tokens_need_word_start() {
        assert!(matches_any("Run and Row Brick", running));
        assert!(matches_any("Løpeintervaller 4x4", running));
        assert!(matches_any("Easy jog", running));
        assert!(!matches_any("Cable Crunch", running));
        assert!(!matches_any("Medicine Ball Throw", rowing));
        assert!(!matches_any("Arrow Lunge", rowing));
        assert!(matches_any("Seated Row", rowing));
    }

    #[test]
    fn test_matches_across_locales() {
        assert!(matches_any("Treadmill Running", running));
        assert!(matches_any("Rolig løping ute", running));
        assert!(matches_any("Stasjonær sykkel", cycling));
        assert!(matches_any("ROWING MACHINE", rowing));
        assert!(!matches_any("Stationary Bike", running));
    }

    #[test]
    fn test_interval_markers() {
        assert!(matches_any("Running Intervals", interval));
        assert!(matches_any("4x4 sykkel", interval));
        assert!(matches_any("Intervalløping", interval));
        assert!(!matches_any("Easy Jog", interval));
    }
}
