/// Street, city and country fields picked out of a raw comma-separated address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressParts<'a> {
    pub street: &'a str,
    pub city: &'a str,
    pub country: &'a str,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("address '{address}' has {found} comma-separated components, expected at least 3")]
    TooFewComponents { address: String, found: usize },
}

/// Street is the first component, city the second-to-last and country the
/// last. Anything in between (districts, building names) is ignored.
pub fn split_address(raw: &str) -> Result<AddressParts<'_>, AddressError> {
    let components: Vec<&str> = raw.split(',').collect();
    let found = components.len();
    if found < 3 {
        return Err(AddressError::TooFewComponents {
            address: raw.to_string(),
            found,
        });
    }

    Ok(AddressParts {
        street: components[0],
        city: components[found - 2],
        country: components[found - 1],
    })
}
