use std::collections::HashMap;
use std::sync::OnceLock;

static BG_LETTER_MAP: OnceLock<HashMap<char, &'static str>> = OnceLock::new();

const BG_LETTERS: &[(char, &str)] = &[
    ('а', "a"),
    ('б', "b"),
    ('в', "v"),
    ('г', "g"),
    ('д', "d"),
    ('е', "e"),
    ('ж', "zh"),
    ('з', "z"),
    ('и', "i"),
    ('ѝ', "y"),
    ('к', "k"),
    ('л', "l"),
    ('м', "m"),
    ('н', "n"),
    ('о', "o"),
    ('п', "p"),
    ('р', "r"),
    ('с', "s"),
    ('т', "t"),
    ('у', "u"),
    ('ф', "f"),
    ('х', "h"),
    ('ц', "ts"),
    ('ч', "ch"),
    ('ш', "sh"),
    ('щ', "sht"),
    ('ъ', "a"),
    ('ь', "y"),
    ('ю', "yu"),
    ('я', "ya"),
];

fn bg_letter_map() -> &'static HashMap<char, &'static str> {
    BG_LETTER_MAP.get_or_init(|| BG_LETTERS.iter().copied().collect())
}

/// Returns `true` when the lowercase form of `c` has a Latin transliteration.
pub(crate) fn is_bulgarian_letter(c: char) -> bool {
    lowercase(c).is_some_and(|lower| bg_letter_map().contains_key(&lower))
}

/// Transliterates a single character. Uppercase letters map through their
/// lowercase form and come back capitalized; unknown characters pass through.
pub fn transliterate_char(c: char) -> String {
    if c.is_lowercase() {
        return match bg_letter_map().get(&c) {
            Some(latin) => (*latin).to_string(),
            None => c.to_string(),
        };
    }

    match lowercase(c).and_then(|lower| bg_letter_map().get(&lower)) {
        Some(latin) => capitalize(latin),
        None => c.to_string(),
    }
}

pub fn transliterate_word(word: &str) -> String {
    word.chars().map(transliterate_char).collect()
}

fn lowercase(c: char) -> Option<char> {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => Some(single),
        _ => None,
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_thirty_letters() {
        assert_eq!(BG_LETTERS.len(), 30);
        assert_eq!(bg_letter_map().len(), 30);
    }

    #[test]
    fn lowercase_letters_map_directly() {
        assert_eq!(transliterate_char('а'), "a");
        assert_eq!(transliterate_char('щ'), "sht");
        assert_eq!(transliterate_char('ю'), "yu");
    }

    #[test]
    fn uppercase_letters_are_capitalized() {
        assert_eq!(transliterate_char('А'), "A");
        assert_eq!(transliterate_char('Ш'), "Sh");
        assert_eq!(transliterate_char('Щ'), "Sht");
    }

    #[test]
    fn unknown_characters_pass_through() {
        assert_eq!(transliterate_char('x'), "x");
        assert_eq!(transliterate_char('Q'), "Q");
        assert_eq!(transliterate_char('.'), ".");
        assert_eq!(transliterate_char('7'), "7");
    }

    #[test]
    fn words_transliterate_character_by_character() {
        assert_eq!(transliterate_word("Шипка"), "Shipka");
        assert_eq!(transliterate_word("Цар"), "Tsar");
        assert_eq!(transliterate_word("ул."), "ul.");
    }

    #[test]
    fn detects_bulgarian_letters_regardless_of_case() {
        assert!(is_bulgarian_letter('ш'));
        assert!(is_bulgarian_letter('Ш'));
        assert!(!is_bulgarian_letter('S'));
        assert!(!is_bulgarian_letter('1'));
    }
}
