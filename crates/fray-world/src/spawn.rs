//! Random roster population.

use fray_core::{SimRng, Species};

use crate::Roster;

/// Populate `roster` with `count` NPCs at uniform random integer cells
/// inside the roster's bounds, with uniform random species and names
/// `NPC_0`, `NPC_1`, ….
///
/// Numbering continues from the current roster size so repeated calls keep
/// names unique.
pub fn populate_random(roster: &mut Roster, count: usize, rng: &mut SimRng) {
    let bounds = roster.bounds();
    let start = roster.len();
    for i in start..start + count {
        let species = *rng
            .choose(&Species::ALL)
            .unwrap_or(&Species::Orc);
        let x = rng.gen_range(0..bounds.width) as f32;
        let y = rng.gen_range(0..bounds.height) as f32;
        let name = format!("NPC_{i}");
        // In-bounds by construction, so add cannot fail.
        let _ = roster.add(species, &name, x, y);
    }
}
