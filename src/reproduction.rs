use ::rand::Rng;

use crate::creature::Creature;

/// Split a parent whose energy exceeds its reproduction threshold.
///
/// At most one offspring per call. The parent keeps half its energy and the
/// child, placed at the parent's position, starts with the other half.
pub fn try_reproduce(parent: &mut Creature, mutation_rate: f32, rng: &mut impl Rng) -> Option<Creature> {
    if parent.energy <= parent.reproduce_energy {
        return None;
    }

    parent.energy /= 2.0;

    let child_genome = parent.genome.mutate(mutation_rate, rng);
    let mut child = Creature::new_from_genome(child_genome, parent.pos);
    child.energy = parent.energy;
    Some(child)
}
