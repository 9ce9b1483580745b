//! Phrase grammar: spoken phrases to semantic tokens.
//!
//! A recognizer matches an utterance against a fixed set of phrases and
//! reports the semantic value attached to the phrase, never the raw words.
//! Several phrasings map to one command token; each known color name maps
//! to itself, so the token handed to the dispatcher is always the canonical
//! table spelling.
//!
//! Phrases are compared after [`normalize`]: lower case, single spaces.

use crate::colors::ColorTable;
use crate::command;

/// (phrase, token) pairs for the fixed vocabulary, English.
const COMMAND_PHRASES: &[(&str, &str)] = &[
    ("forward",      command::FORWARD),
    ("forwards",     command::FORWARD),
    ("straight",     command::FORWARD),
    ("back",         command::BACK),
    ("backward",     command::BACK),
    ("backwards",    command::BACK),
    ("turn left",    command::LEFT),
    ("left",         command::LEFT),
    ("turn right",   command::RIGHT),
    ("right",        command::RIGHT),
    ("pen down",     command::PENDOWN),
    ("pen up",       command::PENUP),
    ("bigger",       command::BIGGER),
    ("grow",         command::BIGGER),
    ("smaller",      command::SMALLER),
    ("shrink",       command::SMALLER),
    ("colors",       command::COLORS),
    ("show colors",  command::COLORS),
    ("list colors",  command::COLORS),
    ("close",        command::CLOSE),
    ("exit",         command::CLOSE),
    ("quit",         command::CLOSE),
];

#[derive(Clone, Debug)]
struct Rule {
    phrase: String,
    token:  String,
}

/// Ordered list of phrase rules; the first match wins.
#[derive(Clone, Debug, Default)]
pub struct PhraseGrammar {
    rules: Vec<Rule>,
}

impl PhraseGrammar {
    /// Command phrases plus every color in `colors`.
    pub fn english(colors: &ColorTable) -> Self {
        let mut g = PhraseGrammar::default();
        for (phrase, token) in COMMAND_PHRASES {
            g.add(phrase, token);
        }
        g.add_names(colors.names());
        g
    }

    /// Register `phrase` as producing `token`.
    pub fn add(&mut self, phrase: &str, token: &str) {
        let phrase = normalize(phrase);
        if phrase.is_empty() || self.rules.iter().any(|r| r.phrase == phrase) {
            return;
        }
        self.rules.push(Rule { phrase, token: token.to_string() });
    }

    /// Register each name as its own semantic value, reachable both as one
    /// word ("deepskyblue") and as its spoken words ("deep sky blue").
    pub fn add_names<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            self.add(name, name);
            self.add(&split_camel_case(name), name);
        }
    }

    /// Token for the utterance, or `None` if no phrase matches (a rejection).
    pub fn recognize(&self, utterance: &str) -> Option<&str> {
        let said = normalize(utterance);
        self.rules.iter().find(|r| r.phrase == said).map(|r| r.token.as_str())
    }

    /// Phrases that produce `token`, in registration order.
    pub fn phrases_for<'a>(&'a self, token: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.rules.iter().filter(move |r| r.token == token).map(|r| r.phrase.as_str())
    }

    pub fn len(&self) -> usize { self.rules.len() }

    pub fn is_empty(&self) -> bool { self.rules.is_empty() }
}

/// Lower-case and collapse runs of whitespace to single spaces.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// "DeepSkyBlue" → "Deep Sky Blue".
fn split_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if i > 0 && ch.is_uppercase() {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar() -> PhraseGrammar { PhraseGrammar::english(&ColorTable::known()) }

    #[test]
    fn synonyms_share_a_token() {
        let g = grammar();
        assert_eq!(g.recognize("forward"),   Some("FORWARD"));
        assert_eq!(g.recognize("straight"),  Some("FORWARD"));
        assert_eq!(g.recognize("backwards"), Some("BACK"));
        assert_eq!(g.recognize("turn left"), Some("LEFT"));
    }

    #[test]
    fn utterances_are_normalized() {
        let g = grammar();
        assert_eq!(g.recognize("  Turn   RIGHT "), Some("RIGHT"));
        assert_eq!(g.recognize("Pen Down"), Some("PENDOWN"));
    }

    #[test]
    fn colors_map_to_canonical_names() {
        let g = grammar();
        assert_eq!(g.recognize("red"), Some("Red"));
        assert_eq!(g.recognize("deep sky blue"), Some("DeepSkyBlue"));
        assert_eq!(g.recognize("DeepSkyBlue"), Some("DeepSkyBlue"));
    }

    #[test]
    fn unknown_phrase_is_rejected() {
        let g = grammar();
        assert_eq!(g.recognize("do a barrel roll"), None);
        assert_eq!(g.recognize(""), None);
    }

    #[test]
    fn phrases_for_token() {
        let g = grammar();
        let fw: Vec<_> = g.phrases_for("FORWARD").collect();
        assert_eq!(fw, ["forward", "forwards", "straight"]);
    }

    #[test]
    fn duplicate_phrase_keeps_first() {
        let mut g = PhraseGrammar::default();
        g.add("go", "FORWARD");
        g.add("GO", "BACK");
        assert_eq!(g.len(), 1);
        assert_eq!(g.recognize("go"), Some("FORWARD"));
    }

    #[test]
    fn camel_case_split() {
        assert_eq!(split_camel_case("LightGoldenrodYellow"), "Light Goldenrod Yellow");
        assert_eq!(split_camel_case("Red"), "Red");
    }
}
