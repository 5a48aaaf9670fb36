//! English pluralization.
//!
//! The route classifier only needs two questions answered about a word: is it
//! plural, and what is its singular form. Both are behind the [`Pluralizer`]
//! trait so callers (and tests) can swap in their own oracle.
//!
//! [`EnglishPluralizer`] is a rule-based inflector:
//!
//! - uncountable words are left alone (`news`, `series`, `sheep`)
//! - irregular pairs are matched on the whole word (`person` / `people`)
//! - otherwise ordered suffix rules apply, the last matching rule wins
//!
//! ```rust
//! use fastauto_core::{EnglishPluralizer, Pluralizer};
//!
//! let p = EnglishPluralizer;
//! assert!(p.is_plural("Users"));
//! assert_eq!(p.singular("Users"), "User");
//! assert_eq!(p.singular("Categories"), "Category");
//! assert!(!p.is_plural("SendEmail"));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// Singular/plural oracle used by the classifier.
pub trait Pluralizer {
    /// Whether `word` is grammatically plural.
    fn is_plural(&self, word: &str) -> bool;

    /// Singular form of `word`, preserving its casing.
    fn singular(&self, word: &str) -> String;
}

impl<P: Pluralizer + ?Sized> Pluralizer for &P {
    fn is_plural(&self, word: &str) -> bool {
        (**self).is_plural(word)
    }

    fn singular(&self, word: &str) -> String {
        (**self).singular(word)
    }
}

// ============================================================================
// Rule tables
// ============================================================================

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

impl Rule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(&format!("(?i){}", pattern))
                .expect("inflection rule must be a valid regex"),
            replacement,
        }
    }
}

const IRREGULARS: &[(&str, &str)] = &[
    // Pronouns.
    ("i", "we"),
    ("me", "us"),
    ("he", "they"),
    ("she", "they"),
    ("them", "them"),
    ("myself", "ourselves"),
    ("yourself", "yourselves"),
    ("itself", "themselves"),
    ("herself", "themselves"),
    ("himself", "themselves"),
    ("themself", "themselves"),
    ("is", "are"),
    ("was", "were"),
    ("has", "have"),
    ("this", "these"),
    ("that", "those"),
    // Consonant followed by `o`.
    ("echo", "echoes"),
    ("dingo", "dingoes"),
    ("volcano", "volcanoes"),
    ("tornado", "tornadoes"),
    ("torpedo", "torpedoes"),
    // Ends with `us`.
    ("genus", "genera"),
    ("viscus", "viscera"),
    // Ends with `ma`.
    ("stigma", "stigmata"),
    ("stoma", "stomata"),
    ("dogma", "dogmata"),
    ("lemma", "lemmata"),
    ("schema", "schemata"),
    ("anathema", "anathemata"),
    ("ox", "oxen"),
    ("axe", "axes"),
    ("die", "dice"),
    ("yes", "yeses"),
    ("foot", "feet"),
    ("eave", "eaves"),
    ("goose", "geese"),
    ("tooth", "teeth"),
    ("quiz", "quizzes"),
    ("human", "humans"),
    ("proof", "proofs"),
    ("carve", "carves"),
    ("valve", "valves"),
    ("looey", "looies"),
    ("thief", "thieves"),
    ("groove", "grooves"),
    ("pickaxe", "pickaxes"),
    ("passerby", "passersby"),
];

const UNCOUNTABLE_WORDS: &[&str] = &[
    "adulthood",
    "advice",
    "agenda",
    "aid",
    "aircraft",
    "alcohol",
    "ammo",
    "analytics",
    "anime",
    "athletics",
    "audio",
    "bison",
    "blood",
    "bream",
    "buffalo",
    "butter",
    "carp",
    "cash",
    "chassis",
    "chess",
    "clothing",
    "cod",
    "commerce",
    "cooperation",
    "corps",
    "debris",
    "diabetes",
    "digestion",
    "elk",
    "energy",
    "equipment",
    "excretion",
    "expertise",
    "firmware",
    "flounder",
    "fun",
    "gallows",
    "garbage",
    "graffiti",
    "hardware",
    "headquarters",
    "health",
    "herpes",
    "highjinks",
    "homework",
    "housework",
    "information",
    "jeans",
    "justice",
    "kudos",
    "labour",
    "literature",
    "machinery",
    "mackerel",
    "mail",
    "media",
    "mews",
    "moose",
    "music",
    "mud",
    "manga",
    "news",
    "only",
    "personnel",
    "pike",
    "plankton",
    "pliers",
    "police",
    "pollution",
    "premises",
    "rain",
    "research",
    "rice",
    "salmon",
    "scissors",
    "series",
    "sewage",
    "shambles",
    "shrimp",
    "software",
    "staff",
    "swine",
    "tennis",
    "traffic",
    "transportation",
    "trout",
    "tuna",
    "wealth",
    "welfare",
    "whiting",
    "wildebeest",
    "wildlife",
    "you",
];

const UNCOUNTABLE_PATTERNS: &[&str] = &[
    "pok[eé]mon$",
    "[^aeiou]ese$",
    "deer$",
    "fish$",
    "measles$",
    "o[iu]s$",
    "pox$",
    "sheep$",
];

static PLURAL_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    let mut rules = vec![
        Rule::new("s?$", "s"),
        Rule::new("[^\\x00-\\x7F]$", "${0}"),
        Rule::new("([^aeiou]ese)$", "${1}"),
        Rule::new("(ax|test)is$", "${1}es"),
        Rule::new("(alias|[^aou]us|t[lm]as|gas|ris)$", "${1}es"),
        Rule::new("(e[mn]u)s?$", "${1}s"),
        Rule::new("([^l]ias|[aeiou]las|[ejzr]as|[iu]am)$", "${1}"),
        Rule::new(
            "(alumn|syllab|vir|radi|nucle|fung|cact|stimul|termin|bacill|foc|uter|loc|strat)(?:us|i)$",
            "${1}i",
        ),
        Rule::new("(alumn|alg|vertebr)(?:a|ae)$", "${1}ae"),
        Rule::new("(seraph|cherub)(?:im)?$", "${1}im"),
        Rule::new("(her|at|gr)o$", "${1}oes"),
        Rule::new(
            "(agend|addend|millenni|dat|extrem|bacteri|desiderat|strat|candelabr|errat|ov|symposi|curricul|automat|quor)(?:a|um)$",
            "${1}a",
        ),
        Rule::new(
            "(apheli|hyperbat|periheli|asyndet|noumen|phenomen|criteri|organ|prolegomen|hedr|automat)(?:a|on)$",
            "${1}a",
        ),
        Rule::new("sis$", "ses"),
        Rule::new("(?:(kni|wi|li)fe|(ar|l|ea|eo|oa|hoo)f)$", "${1}${2}ves"),
        Rule::new("([^aeiouy]|qu)y$", "${1}ies"),
        Rule::new("([^ch][ieo][ln])ey$", "${1}ies"),
        Rule::new("(x|ch|ss|sh|zz)$", "${1}es"),
        Rule::new("(matr|cod|mur|sil|vert|ind|append)(?:ix|ex)$", "${1}ices"),
        Rule::new("\\b((?:tit)?m|l)(?:ice|ouse)$", "${1}ice"),
        Rule::new("(pe)(?:rson|ople)$", "${1}ople"),
        Rule::new("(child)(?:ren)?$", "${1}ren"),
        Rule::new("eaux$", "${0}"),
        Rule::new("m[ae]n$", "men"),
        Rule::new("^thou$", "you"),
    ];
    rules.extend(uncountable_rules());
    rules
});

static SINGULAR_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    let mut rules = vec![
        Rule::new("s$", ""),
        Rule::new("(ss)$", "${1}"),
        Rule::new(
            "(wi|kni|(?:after|half|high|low|mid|non|night|[^\\w]|^)li)ves$",
            "${1}fe",
        ),
        Rule::new("(ar|(?:wo|[ae])l|[eo][ao])ves$", "${1}f"),
        Rule::new("ies$", "y"),
        Rule::new(
            "(dg|ss|ois|lk|ok|wn|mb|th|ch|ec|oal|is|ck|ix|sser|ts|wb)ies$",
            "${1}ie",
        ),
        Rule::new(
            "\\b(l|(?:neck|cross|hog|aun)?t|coll|faer|food|gen|goon|group|hipp|junk|vegg|(?:pork)?p|charl|calor|cut)ies$",
            "${1}ie",
        ),
        Rule::new("\\b(mon|smil)ies$", "${1}ey"),
        Rule::new("\\b((?:tit)?m|l)ice$", "${1}ouse"),
        Rule::new("(seraph|cherub)im$", "${1}"),
        Rule::new(
            "(x|ch|ss|sh|zz|tto|go|cho|alias|[^aou]us|t[lm]as|gas|(?:her|at|gr)o|[aeiou]ris)(?:es)?$",
            "${1}",
        ),
        Rule::new(
            "(analy|diagno|parenthe|progno|synop|the|empha|cri|ne)(?:sis|ses)$",
            "${1}sis",
        ),
        Rule::new("(movie|twelve|abuse|e[mn]u)s$", "${1}"),
        Rule::new("(test)(?:is|es)$", "${1}is"),
        Rule::new(
            "(alumn|syllab|vir|radi|nucle|fung|cact|stimul|termin|bacill|foc|uter|loc|strat)(?:us|i)$",
            "${1}us",
        ),
        Rule::new(
            "(agend|addend|millenni|dat|extrem|bacteri|desiderat|strat|candelabr|errat|ov|symposi|curricul|quor)a$",
            "${1}um",
        ),
        Rule::new(
            "(apheli|hyperbat|periheli|asyndet|noumen|phenomen|criteri|organ|prolegomen|hedr|automat)a$",
            "${1}on",
        ),
        Rule::new("(alumn|alg|vertebr)ae$", "${1}a"),
        Rule::new("(cod|mur|sil|vert|ind)ices$", "${1}ex"),
        Rule::new("(matr|append)ices$", "${1}ix"),
        Rule::new("(pe)(rson|ople)$", "${1}rson"),
        Rule::new("(child)ren$", "${1}"),
        Rule::new("(eau)x?$", "${1}"),
        Rule::new("men$", "man"),
    ];
    rules.extend(uncountable_rules());
    rules
});

fn uncountable_rules() -> impl Iterator<Item = Rule> {
    UNCOUNTABLE_PATTERNS
        .iter()
        .map(|pattern| Rule::new(pattern, "${0}"))
}

// ============================================================================
// EnglishPluralizer
// ============================================================================

/// Rule-based English inflector.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishPluralizer;

impl EnglishPluralizer {
    /// Plural form of `word`, preserving its casing.
    pub fn plural(&self, word: &str) -> String {
        let token = word.to_lowercase();
        if let Some((_, plural)) = IRREGULARS.iter().rev().find(|(_, p)| *p == token) {
            return restore_case(word, plural);
        }
        if let Some((_, plural)) = IRREGULARS.iter().rev().find(|(s, _)| *s == token) {
            return restore_case(word, plural);
        }
        sanitize(&token, word, &PLURAL_RULES)
    }
}

impl Pluralizer for EnglishPluralizer {
    fn is_plural(&self, word: &str) -> bool {
        let token = word.to_lowercase();
        if IRREGULARS.iter().any(|(_, plural)| *plural == token) {
            return true;
        }
        if IRREGULARS.iter().any(|(single, _)| *single == token) {
            return false;
        }
        sanitize(&token, &token, &PLURAL_RULES) == token
    }

    fn singular(&self, word: &str) -> String {
        let token = word.to_lowercase();
        if let Some((single, _)) = IRREGULARS.iter().rev().find(|(s, _)| *s == token) {
            return restore_case(word, single);
        }
        if let Some((single, _)) = IRREGULARS.iter().rev().find(|(_, p)| *p == token) {
            return restore_case(word, single);
        }
        sanitize(&token, word, &SINGULAR_RULES)
    }
}

/// Apply the highest-priority matching rule to `word`.
fn sanitize(token: &str, word: &str, rules: &[Rule]) -> String {
    if token.is_empty() || UNCOUNTABLE_WORDS.contains(&token) {
        return word.to_string();
    }

    rules
        .iter()
        .rev()
        .find(|rule| rule.pattern.is_match(word))
        .map(|rule| apply_rule(rule, word))
        .unwrap_or_else(|| word.to_string())
}

fn apply_rule(rule: &Rule, word: &str) -> String {
    let Some(caps) = rule.pattern.captures(word) else {
        return word.to_string();
    };
    let Some(whole) = caps.get(0) else {
        return word.to_string();
    };

    let mut replaced = String::new();
    caps.expand(rule.replacement, &mut replaced);

    // An empty match takes its casing from the preceding character.
    let restored = if whole.as_str().is_empty() {
        let previous = word[..whole.start()]
            .chars()
            .last()
            .map(String::from)
            .unwrap_or_default();
        restore_case(&previous, &replaced)
    } else {
        restore_case(whole.as_str(), &replaced)
    };

    format!(
        "{}{}{}",
        &word[..whole.start()],
        restored,
        &word[whole.end()..]
    )
}

/// Give `token` the casing style of `word`.
fn restore_case(word: &str, token: &str) -> String {
    if word == token {
        return token.to_string();
    }
    if word == word.to_lowercase() {
        return token.to_lowercase();
    }
    if word == word.to_uppercase() {
        return token.to_uppercase();
    }

    let starts_upper = word
        .chars()
        .next()
        .is_some_and(|c| c.to_uppercase().eq(std::iter::once(c)));
    if starts_upper {
        let lower = token.to_lowercase();
        let mut chars = lower.chars();
        return match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
    }

    token.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plurals() {
        let p = EnglishPluralizer;
        assert!(p.is_plural("users"));
        assert!(p.is_plural("Photos"));
        assert!(p.is_plural("Boxes"));
        assert!(!p.is_plural("user"));
        assert!(!p.is_plural("Photo"));
    }

    #[test]
    fn test_singular_preserves_case() {
        let p = EnglishPluralizer;
        assert_eq!(p.singular("Users"), "User");
        assert_eq!(p.singular("users"), "user");
        assert_eq!(p.singular("USERS"), "USER");
        assert_eq!(p.singular("UserIds"), "UserId");
    }

    #[test]
    fn test_singular_suffix_rules() {
        let p = EnglishPluralizer;
        assert_eq!(p.singular("Categories"), "Category");
        assert_eq!(p.singular("Boxes"), "Box");
        assert_eq!(p.singular("Wolves"), "Wolf");
        assert_eq!(p.singular("Knives"), "Knife");
        assert_eq!(p.singular("Analyses"), "Analysis");
        assert_eq!(p.singular("Matrices"), "Matrix");
        assert_eq!(p.singular("Movies"), "Movie");
        assert_eq!(p.singular("Class"), "Class");
    }

    #[test]
    fn test_irregulars() {
        let p = EnglishPluralizer;
        assert!(p.is_plural("people"));
        assert!(p.is_plural("Children"));
        assert!(!p.is_plural("person"));
        assert_eq!(p.singular("People"), "Person");
        assert_eq!(p.singular("PEOPLE"), "PERSON");
        assert_eq!(p.singular("Teeth"), "Tooth");
        assert_eq!(p.singular("Schemata"), "Schema");
    }

    #[test]
    fn test_uncountables() {
        let p = EnglishPluralizer;
        assert!(p.is_plural("news"));
        assert!(p.is_plural("Information"));
        assert!(p.is_plural("sheep"));
        assert_eq!(p.singular("News"), "News");
        assert_eq!(p.singular("Series"), "Series");
        assert_eq!(p.singular("Goldfish"), "Goldfish");
    }

    #[test]
    fn test_verbs_and_compound_words_are_singular() {
        let p = EnglishPluralizer;
        assert!(!p.is_plural("SendEmail"));
        assert!(!p.is_plural("Activate"));
        assert!(!p.is_plural("Status"));
        assert!(!p.is_plural("Id"));
    }

    #[test]
    fn test_plural() {
        let p = EnglishPluralizer;
        assert_eq!(p.plural("User"), "Users");
        assert_eq!(p.plural("category"), "categories");
        assert_eq!(p.plural("Box"), "Boxes");
        assert_eq!(p.plural("person"), "people");
        assert_eq!(p.plural("USER"), "USERS");
    }

    #[test]
    fn test_empty_word() {
        let p = EnglishPluralizer;
        assert!(p.is_plural(""));
        assert_eq!(p.singular(""), "");
    }

    #[test]
    fn test_restore_case() {
        assert_eq!(restore_case("Word", "token"), "Token");
        assert_eq!(restore_case("WORD", "token"), "TOKEN");
        assert_eq!(restore_case("word", "TOKEN"), "token");
        assert_eq!(restore_case("wOrd", "Token"), "token");
    }
}
