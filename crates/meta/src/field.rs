//! Field designators of the metadata text format.

/// A typed metadata setting, named by a single code point at the start of a
/// line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Resource identifier in base-62 (`i` / `ι`).
    Uid,
    /// Free-form date string (`d` / `δ`).
    Date,
    /// Copyright attribution (`c`).
    Copyright,
    /// A display name; may repeat (`s` / `σ`).
    Sentence,
    /// Visibility flag (`v`).
    Visible,
    /// External link (`l` / `λ`).
    Link,
}

// The format accepts a Latin and a Greek designator per field. Kept as a data
// table so new aliases are additive, not new branches.
const ALIASES: &[(char, Field)] = &[
    ('i', Field::Uid),
    ('ι', Field::Uid),
    ('d', Field::Date),
    ('δ', Field::Date),
    ('c', Field::Copyright),
    ('s', Field::Sentence),
    ('σ', Field::Sentence),
    ('v', Field::Visible),
    ('l', Field::Link),
    ('λ', Field::Link),
];

impl Field {
    /// Resolve a designator code point against the alias table.
    pub fn from_designator(designator: char) -> Option<Self> {
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == designator)
            .map(|(_, field)| *field)
    }
}
