//! Guid vs name classification for user-supplied identifiers

/// Group lengths of the canonical 8-4-4-4-12 form
const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

/// A user-supplied identifier, classified before dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identifier<'a> {
    Guid(&'a str),
    Name(&'a str),
}

impl<'a> Identifier<'a> {
    /// Classify input as a guid when it has the canonical hyphenated hex
    /// shape (case-insensitive), otherwise as a name
    pub fn classify(input: &'a str) -> Self {
        if is_guid(input) {
            Identifier::Guid(input)
        } else {
            Identifier::Name(input)
        }
    }

    pub fn as_str(&self) -> &'a str {
        match self {
            Identifier::Guid(s) | Identifier::Name(s) => s,
        }
    }
}

/// Check for the canonical 8-4-4-4-12 hyphenated hex shape
pub fn is_guid(input: &str) -> bool {
    let mut parts = input.split('-');
    for expected in GROUPS {
        let valid = parts.next().is_some_and(|part| {
            part.len() == expected && part.bytes().all(|b| b.is_ascii_hexdigit())
        });
        if !valid {
            return false;
        }
    }
    parts.next().is_none()
}
