use std::collections::HashMap;
use std::sync::OnceLock;

static BG_CITY_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

/// Canonical Latin name for a city written in Cyrillic, if it is a known one.
pub(crate) fn latin_city_name(cyrillic: &str) -> Option<&'static str> {
    bg_city_map().get(cyrillic).copied()
}

fn bg_city_map() -> &'static HashMap<&'static str, &'static str> {
    BG_CITY_MAP.get_or_init(|| {
        const CITY_TO_LATIN: &[(&str, &str)] = &[
            ("София", "Sofia"),
            ("Пловдив", "Plovdiv"),
            ("Варна", "Varna"),
            ("Бургас", "Burgas"),
            ("Русе", "Ruse"),
            ("Стара Загора", "Stara Zagora"),
        ];

        CITY_TO_LATIN.iter().copied().collect()
    })
}
