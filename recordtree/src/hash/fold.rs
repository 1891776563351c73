//! Layer folding, from the record digests up to the root digest.
//!
//! A single digest always folds onto itself, so extra passes over the top layer are harmless.

use super::{index::Index, Digest, Hasher};

/// Number of folding passes required over a history of the given length.
///
/// This is the smallest `L` such that `2^(L-1) <= len <= 2^L`, and `1` for an empty history.
pub(super) fn passes(len: usize) -> u32 {
    match len {
        0 | 1 => 1,
        len => usize::BITS - (len - 1).leading_zeros(),
    }
}

/// Pair consecutive leaves left-to-right, carrying the odd one out forward at the end.
pub(super) fn leaves<H: Hasher>(index: &mut Index, leaves: &[Digest]) -> Vec<Digest> {
    for leaf in leaves {
        index.leaf(leaf);
    }

    fold_left::<H>(index, leaves)
}

/// Fold a layer for the given pass: even passes are right-anchored, odd ones are left-anchored.
pub(super) fn fold<H: Hasher>(index: &mut Index, layer: &[Digest], pass: u32) -> Vec<Digest> {
    match pass % 2 {
        0 => fold_right::<H>(index, layer),
        _ => fold_left::<H>(index, layer),
    }
}

/// Pair digests from the end of the layer backward, prepending the first one when left out.
fn fold_right<H: Hasher>(index: &mut Index, layer: &[Digest]) -> Vec<Digest> {
    let (leftover, paired) = match layer.split_first() {
        Some((first, rest)) if layer.len() % 2 == 1 => (Some(first), rest),
        _ => (None, layer),
    };

    let mut next = Vec::with_capacity(layer.len() / 2 + 1);
    next.extend(leftover.cloned());
    next.extend(paired.rchunks_exact(2).map(|pair| index.link::<H>(&pair[1], &pair[0])));
    next
}

/// Pair digests from the start of the layer forward, appending the last one when left out.
fn fold_left<H: Hasher>(index: &mut Index, layer: &[Digest]) -> Vec<Digest> {
    let pairs = layer.chunks_exact(2);
    let leftover = pairs.remainder().first().cloned();

    let mut next = Vec::with_capacity(layer.len() / 2 + 1);
    next.extend(pairs.map(|pair| index.link::<H>(&pair[0], &pair[1])));
    next.extend(leftover);
    next
}
