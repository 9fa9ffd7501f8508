//! Move enumeration.
//!
//! Generic enumerators over a slice, in a fixed order, plus
//! [`grouped_moves`], which keeps attack branching down to same-rank groups
//! instead of the full power set of a hand.

use smallvec::smallvec;

use crate::cards::{Card, CardVec, Rank};

/// Every ordering of `from`. A single empty ordering for an empty input.
pub fn permutations<T: Clone>(from: &[T]) -> Vec<Vec<T>> {
    if from.is_empty() {
        return vec![Vec::new()];
    }
    let mut result = Vec::new();
    for (i, head) in from.iter().enumerate() {
        let mut rest = from.to_vec();
        rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head.clone());
            result.push(tail);
        }
    }
    result
}

/// Every `k`-subset of `from`, keeping input order inside each subset.
///
/// Subsets containing the first element come before those that skip it.
pub fn combinations<T: Clone>(from: &[T], k: usize) -> Vec<Vec<T>> {
    if k == 0 {
        return vec![Vec::new()];
    }
    let Some((head, tail)) = from.split_first() else {
        return Vec::new();
    };
    let mut result: Vec<Vec<T>> = combinations(tail, k - 1)
        .into_iter()
        .map(|mut rest| {
            rest.insert(0, head.clone());
            rest
        })
        .collect();
    result.extend(combinations(tail, k));
    result
}

/// Every ordered `k`-selection: each combination in every order.
pub fn variations<T: Clone>(from: &[T], k: usize) -> Vec<Vec<T>> {
    combinations(from, k)
        .iter()
        .flat_map(|combination| permutations(combination))
        .collect()
}

/// Combinations of every size from 1 to `k`.
pub fn combinations_up_to_k<T: Clone>(from: &[T], k: usize) -> Vec<Vec<T>> {
    (1..=k).flat_map(|size| combinations(from, size)).collect()
}

pub fn variations_up_to_k<T: Clone>(from: &[T], k: usize) -> Vec<Vec<T>> {
    (1..=k).flat_map(|size| variations(from, size)).collect()
}

/// Attack moves grouped by rank.
///
/// A rank held once contributes its single card. A rank held several times
/// contributes each card alone plus every same-rank combination of 2 up to
/// `max_size` cards. Groups follow the first appearance of each rank.
pub fn grouped_moves(cards: &[Card], max_size: usize) -> Vec<CardVec> {
    if max_size == 0 {
        return Vec::new();
    }

    let mut groups: Vec<(Rank, Vec<Card>)> = Vec::new();
    for card in cards {
        match groups.iter_mut().find(|(rank, _)| *rank == card.rank) {
            Some((_, group)) => group.push(*card),
            None => groups.push((card.rank, vec![*card])),
        }
    }

    let mut moves = Vec::new();
    for (_, group) in groups {
        if group.len() == 1 {
            moves.push(smallvec![group[0]]);
            continue;
        }
        moves.extend(group.iter().map(|card| smallvec![*card]));
        for k in 2..=max_size {
            moves.extend(
                combinations(&group, k)
                    .into_iter()
                    .map(|combination| combination.into_iter().collect::<CardVec>()),
            );
        }
    }
    moves
}
