use tracing::trace;

use crate::error::Result;
use crate::instrument::fretted_position::FrettedPosition;
use crate::instrument::harmonic_node::HarmonicNode;
use crate::utils::util_methods::{euler_totient, gcd};

/// Enumerates the primitive harmonic ratios `k/h` up to a maximum order.
///
/// Only reduced fractions are produced: 2/4 lies on the same spot as 1/2 and
/// is skipped. Nodes of different roots may land on the same spot of the
/// string; those are all kept since each is played differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarmonicNodeGenerator {
    max_order: u32,
}

impl HarmonicNodeGenerator {
    pub fn new(max_order: u32) -> Self {
        HarmonicNodeGenerator { max_order }
    }

    pub fn max_order(&self) -> u32 {
        self.max_order
    }

    /// `(k, h)` pairs in increasing `h`, then increasing `k`.
    pub fn ratios(&self) -> impl Iterator<Item = (u32, u32)> {
        primitive_ratios(self.max_order)
    }

    /// Every harmonic node of `root`, in ratio order.
    pub fn nodes_for(&self, root: &FrettedPosition) -> Result<Vec<HarmonicNode>> {
        let nodes = self
            .ratios()
            .map(|(k, h)| {
                debug_assert!(k >= 1 && k < h && gcd(k, h) == 1);
                HarmonicNode::new(root, k, h)
            })
            .collect::<Result<Vec<_>>>()?;

        trace!(
            root_fret = root.fret_index(),
            count = nodes.len(),
            "generated harmonic nodes"
        );
        Ok(nodes)
    }

    /// Number of nodes per root: the sum of φ(h) for h in 2..=max_order.
    pub fn node_count(&self) -> usize {
        (2..=self.max_order).map(|h| euler_totient(h) as usize).sum()
    }
}

/// Reduced fractions `k/h` with `1 <= k < h <= max_order`.
pub fn primitive_ratios(max_order: u32) -> impl Iterator<Item = (u32, u32)> {
    (2..=max_order).flat_map(|h| (1..h).filter(move |&k| gcd(k, h) == 1).map(move |k| (k, h)))
}
