use std::collections::{HashMap, HashSet};

/// Non-semantic markers stripped from gloss text before tokenization:
/// citation abbreviations, grammatical shorthand, editorial tags.
///
/// The list is explicit construction-time configuration (per-language
/// override on top of built-in tables), not a module-level constant.
/// Matching keeps the trailing period significant, so the marker `act.`
/// never swallows the English word `act`.
#[derive(Debug, Clone)]
pub struct Denylist {
    /// Markers stripped regardless of language, stored lowercase
    base: HashSet<String>,

    /// language tag -> additional markers, stored lowercase
    per_language: HashMap<String, HashSet<String>>,
}

/// Citation and editorial abbreviations common to classical dictionaries.
const BASE_MARKERS: &[&str] = &[
    "cf.", "e.g.", "i.e.", "etc.", "esp.", "freq.", "lit.", "metaph.", "sc.", "s.v.", "viz.",
    "ibid.", "id.", "dub.", "prob.", "perh.", "usu.", "absol.", "abs.",
];

/// Grammatical shorthand: case, number, gender, voice, tense, part of
/// speech. Harmless to drop from gloss text because it annotates the
/// headword, not the meaning.
const GRAMMAR_MARKERS: &[&str] = &[
    "nom.", "acc.", "gen.", "dat.", "abl.", "voc.", "sg.", "pl.", "masc.", "fem.", "neut.",
    "adj.", "adv.", "subst.", "intr.", "trans.", "impers.", "dep.", "pf.", "impf.", "fut.",
    "aor.", "part.", "inf.", "opt.", "subj.", "mid.", "pass.", "act.",
];

/// Dialect and register tags used by Greek lexica.
const GREEK_MARKERS: &[&str] = &["ep.", "att.", "ion.", "dor.", "aeol.", "hom.", "trag."];

/// Period and register tags used by Latin lexica.
const LATIN_MARKERS: &[&str] = &["class.", "poet.", "eccl.", "ante-class.", "post-aug."];

impl Denylist {
    /// Built-in markers only.
    #[must_use]
    pub fn builtin() -> Self {
        let base = BASE_MARKERS
            .iter()
            .chain(GRAMMAR_MARKERS)
            .map(|m| m.to_string())
            .collect();

        let mut per_language = HashMap::new();
        per_language.insert(
            "grc".to_string(),
            GREEK_MARKERS.iter().map(|m| m.to_string()).collect(),
        );
        per_language.insert(
            "lat".to_string(),
            LATIN_MARKERS.iter().map(|m| m.to_string()).collect(),
        );

        Self { base, per_language }
    }

    /// Built-in markers extended with caller configuration
    /// (language tag -> extra markers).
    #[must_use]
    pub fn with_overrides(overrides: &HashMap<String, Vec<String>>) -> Self {
        let mut denylist = Self::builtin();
        for (language, markers) in overrides {
            let entry = denylist.per_language.entry(language.clone()).or_default();
            for marker in markers {
                entry.insert(marker.to_lowercase());
            }
        }
        denylist
    }

    /// Whether a whitespace-delimited chunk (already lowercased, stripped
    /// of surrounding brackets/commas) is a known marker for `language`.
    #[must_use]
    pub fn contains(&self, language: &str, chunk: &str) -> bool {
        self.base.contains(chunk)
            || self
                .per_language
                .get(language)
                .is_some_and(|set| set.contains(chunk))
    }

    /// Remove marker chunks from lowercased text, preserving the order and
    /// spacing of everything kept.
    #[must_use]
    pub fn strip(&self, language: &str, text: &str) -> String {
        let kept: Vec<&str> = text
            .split_whitespace()
            .filter(|chunk| {
                let trimmed = chunk.trim_matches(|c| matches!(c, '(' | ')' | '[' | ']' | ',' | ':'));
                !self.contains(language, trimmed)
            })
            .collect();
        kept.join(" ")
    }
}

impl Default for Denylist {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strips_citation_markers() {
        let denylist = Denylist::builtin();
        assert_eq!(
            denylist.strip("grc", "fire, cf. flame, esp. sacrificial"),
            "fire, flame, sacrificial"
        );
    }

    #[test]
    fn test_trailing_period_is_significant() {
        let denylist = Denylist::builtin();
        // "act." is shorthand, "act" is a word
        assert_eq!(denylist.strip("lat", "act. an act of war"), "an act of war");
    }

    #[test]
    fn test_per_language_markers() {
        let denylist = Denylist::builtin();
        assert_eq!(denylist.strip("grc", "ep. fire"), "fire");
        // Greek dialect tags are not stripped from Latin glosses
        assert_eq!(denylist.strip("lat", "ep. fire"), "ep. fire");
    }

    #[test]
    fn test_bracketed_markers_match() {
        let denylist = Denylist::builtin();
        assert_eq!(denylist.strip("grc", "fire (metaph.) passion"), "fire passion");
    }

    #[test]
    fn test_overrides_extend_builtin() {
        let mut overrides = HashMap::new();
        overrides.insert("grc".to_string(), vec!["Pind.".to_string()]);
        let denylist = Denylist::with_overrides(&overrides);

        assert!(denylist.contains("grc", "pind."));
        // Builtins survive the merge
        assert!(denylist.contains("grc", "cf."));
    }
}
