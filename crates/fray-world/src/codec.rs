//! Line codec for the roster persistence format.
//!
//! One NPC per line, whitespace-delimited:
//!
//! ```text
//! <Species> <Name> <X> <Y>
//! ```
//!
//! Coordinates are ASCII decimal floats.  Serialization uses Rust's shortest
//! round-tripping float formatting, so integer-valued coordinates come out as
//! plain integers (`"12"`, not `"12.0"`).  Liveness is not persisted — the
//! format describes a starting roster, not an in-flight battle.

use std::str::FromStr;

use fray_core::Species;

use crate::{Npc, WorldError, WorldResult};

/// A successfully parsed record, not yet admitted to any roster.
///
/// Bounds checking belongs to the roster the record is added to, not to the
/// codec.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedNpc {
    pub species: Species,
    pub name:    String,
    pub x:       f32,
    pub y:       f32,
}

/// Render one NPC as a persistence line (no trailing newline).
pub fn serialize_line(npc: &Npc) -> String {
    format!("{} {} {} {}", npc.species.as_str(), npc.name, npc.pos.x, npc.pos.y)
}

/// Parse one persistence line.
///
/// Exactly four whitespace-separated fields; an unknown species tag is
/// [`WorldError::UnknownSpecies`], anything else malformed is
/// [`WorldError::MalformedRecord`].
pub fn parse_line(line: &str) -> WorldResult<ParsedNpc> {
    let malformed = |reason: &str| WorldError::MalformedRecord {
        line:   line.to_owned(),
        reason: reason.to_owned(),
    };

    let mut fields = line.split_whitespace();
    let tag  = fields.next().ok_or_else(|| malformed("empty record"))?;
    let name = fields.next().ok_or_else(|| malformed("missing name"))?;
    let x    = fields.next().ok_or_else(|| malformed("missing x coordinate"))?;
    let y    = fields.next().ok_or_else(|| malformed("missing y coordinate"))?;
    if fields.next().is_some() {
        return Err(malformed("trailing fields"));
    }

    let species = Species::from_str(tag)
        .map_err(|_| WorldError::UnknownSpecies(tag.to_owned()))?;
    let x: f32 = x.parse().map_err(|_| malformed("x is not a number"))?;
    let y: f32 = y.parse().map_err(|_| malformed("y is not a number"))?;

    Ok(ParsedNpc {
        species,
        name: name.to_owned(),
        x,
        y,
    })
}
