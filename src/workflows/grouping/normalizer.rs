use super::address::{split_address, AddressError};
use super::mapping::latin_city_name;
use super::transliteration::{is_bulgarian_letter, transliterate_word};

/// Countries whose address formats the grouper understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Country {
    Germany,
    China { postal_code: Option<String> },
    Bulgaria,
}

impl Country {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Germany => "Germany",
            Self::China { .. } => "China",
            Self::Bulgaria => "Bulgaria",
        }
    }

    pub fn key_segment(&self) -> String {
        match self {
            Self::China {
                postal_code: Some(code),
            } => format!("China_{code}"),
            other => other.label().to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error(transparent)]
    Address(#[from] AddressError),
    #[error("unsupported country '{0}'")]
    UnsupportedCountry(String),
    #[error("street '{0}' has no house number")]
    MissingHouseNumber(String),
    #[error("city field '{0}' has no city name")]
    MissingCity(String),
}

const STREET_ABBREVIATIONS: [&str; 2] = ["ul.", "ул."];
const STREET_WORD: &str = "Street";

/// Derives the grouping key `<country>_<city>_<street>` for a raw address.
pub fn compute_key(address: &str) -> Result<String, NormalizeError> {
    let parts = split_address(address)?;
    let country = normalize_country(parts.country)?;
    let city = normalize_city(parts.city, &country)?;
    let street = normalize_street(parts.street, &country)?;
    Ok(format!("{}_{city}_{street}", country.key_segment()))
}

pub fn normalize_country(field: &str) -> Result<Country, NormalizeError> {
    if field.contains("Germany") {
        return Ok(Country::Germany);
    }

    if field.contains("P.R.C") || field.contains("China") {
        let postal_code = field
            .split_whitespace()
            .find(|token| token.starts_with(|c: char| c.is_ascii_digit()))
            .map(str::to_string);
        return Ok(Country::China { postal_code });
    }

    if field.contains("Bulgaria") || field.contains("България") {
        return Ok(Country::Bulgaria);
    }

    Err(NormalizeError::UnsupportedCountry(field.trim().to_string()))
}

pub fn normalize_street(field: &str, country: &Country) -> Result<String, NormalizeError> {
    let (number, words) = split_numeric_tokens(field);
    let Some(number) = number else {
        return Err(NormalizeError::MissingHouseNumber(field.trim().to_string()));
    };

    let name = if *country == Country::Bulgaria {
        unify_bulgarian_street(&words)
    } else {
        words.join(" ")
    };

    Ok(format!("{number}_{}", name.replace(' ', "_")))
}

/// Brings Latin and Cyrillic spellings of a Bulgarian street onto one form.
/// Tokens are sorted so that "Shipka Street" and "ул. Шипка" compare equal.
pub fn unify_bulgarian_street(words: &[&str]) -> String {
    let mut unified: Vec<String> = words
        .iter()
        .map(|word| {
            if STREET_ABBREVIATIONS.contains(word) {
                STREET_WORD.to_string()
            } else if word.chars().next().is_some_and(is_bulgarian_letter) {
                transliterate_word(word)
            } else {
                (*word).to_string()
            }
        })
        .collect();
    unified.sort();
    unified.join(" ")
}

pub fn normalize_city(field: &str, country: &Country) -> Result<String, NormalizeError> {
    let (postal_code, words) = split_numeric_tokens(field);
    if words.is_empty() {
        return Err(NormalizeError::MissingCity(field.trim().to_string()));
    }

    let joined = words.join(" ");
    let starts_cyrillic = joined.chars().next().is_some_and(is_bulgarian_letter);
    let name = match latin_city_name(&joined) {
        Some(latin) if starts_cyrillic => latin.to_string(),
        _ => joined,
    };
    let name = name.replace(' ', "_");

    if *country == Country::Bulgaria {
        return Ok(name);
    }

    Ok(match postal_code {
        Some(code) => format!("{code}_{name}"),
        None => name,
    })
}

/// Separates purely numeric tokens from the rest. The last numeric token wins.
fn split_numeric_tokens(field: &str) -> (Option<&str>, Vec<&str>) {
    let mut number = None;
    let mut words = Vec::new();
    for token in field.split_whitespace() {
        if token.chars().all(|c| c.is_ascii_digit()) {
            number = Some(token);
        } else {
            words.push(token);
        }
    }
    (number, words)
}
