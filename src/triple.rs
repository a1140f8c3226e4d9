//! Flat `name|world|locator` form of an index entry.
//!
//! There is no escaping. Encoding refuses fields that contain the separator
//! or a line break, and decoding refuses anything that is not exactly three
//! non-empty fields.
//!
//! A file path ending in `#L<digits>` reads back as a container record, so
//! such a `File` locator is refused at encode time as well.

use crate::error::TripleError;
use crate::types::{ActorIndexEntry, ActorLocator};

pub const SEPARATOR: char = '|';

fn check_field(field: &'static str, value: &str) -> Result<(), TripleError> {
    if value.contains(SEPARATOR) || value.contains('\n') || value.contains('\r') {
        return Err(TripleError::ContainsSeparator { field });
    }
    Ok(())
}

/// Encode an entry as `name|world|locator`.
pub fn encode_entry(entry: &ActorIndexEntry) -> Result<String, TripleError> {
    let locator = entry.locator.to_string();
    check_field("name", &entry.name)?;
    check_field("world", &entry.world)?;
    check_field("locator", &locator)?;
    if locator.parse::<ActorLocator>().ok().as_ref() != Some(&entry.locator) {
        return Err(TripleError::AmbiguousLocator(locator));
    }
    Ok(format!(
        "{}{sep}{}{sep}{}",
        entry.name,
        entry.world,
        locator,
        sep = SEPARATOR
    ))
}

/// Decode a `name|world|locator` triple.
pub fn decode_entry(raw: &str) -> Result<ActorIndexEntry, TripleError> {
    let parts: Vec<&str> = raw.split(SEPARATOR).collect();
    let [name, world, locator] = parts.as_slice() else {
        return Err(TripleError::Malformed(format!(
            "expected 3 fields, found {}",
            parts.len()
        )));
    };
    if name.is_empty() || world.is_empty() || locator.is_empty() {
        return Err(TripleError::Malformed("empty field".to_string()));
    }
    if raw.contains('\n') || raw.contains('\r') {
        return Err(TripleError::Malformed("line break in triple".to_string()));
    }

    let locator: ActorLocator = locator
        .parse()
        .map_err(|e: crate::error::ApiError| TripleError::Malformed(e.to_string()))?;
    Ok(ActorIndexEntry {
        name: name.to_string(),
        world: world.to_string(),
        locator,
    })
}
