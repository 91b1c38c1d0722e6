//! Collide-and-remove primitives.
//!
//! Pairing policy for [`group_collide`]: members of the first group are
//! visited in order; each one takes every still-present member of the second
//! group it overlaps. A member of the second group is therefore claimed by
//! at most one member of the first, and both sides leave their collections
//! immediately, so later passes in the same frame never see them.

use crate::entities::Entity;
use crate::geometry::Rect;

/// One member of the first group together with everything it hit.
#[derive(Debug)]
pub struct Collision<A, B> {
    pub first: A,
    pub struck: Vec<B>,
}

/// Remove every overlapping pair between `group_a` and `group_b` and return
/// the removed entities, grouped by the `group_a` member that claimed them.
pub fn group_collide<A, B>(group_a: &mut Vec<A>, group_b: &mut Vec<B>) -> Vec<Collision<A, B>>
where
    A: Entity,
    B: Entity,
{
    let mut hits = Vec::new();
    let mut survivors = Vec::with_capacity(group_a.len());

    for first in group_a.drain(..) {
        let hitbox = first.hitbox();
        let struck = sprite_collide(&hitbox, group_b);
        if struck.is_empty() {
            survivors.push(first);
        } else {
            hits.push(Collision { first, struck });
        }
    }

    *group_a = survivors;
    hits
}

/// Remove and return every member of `group` overlapping `hitbox`,
/// preserving the group's order for both the removed and kept members.
pub fn sprite_collide<B: Entity>(hitbox: &Rect, group: &mut Vec<B>) -> Vec<B> {
    let (struck, spared): (Vec<B>, Vec<B>) = std::mem::take(group)
        .into_iter()
        .partition(|other| hitbox.overlaps(&other.hitbox()));
    *group = spared;
    struck
}
