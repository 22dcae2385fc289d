//! Couple preferences.

use std::collections::HashMap;

use tracing::warn;

use crate::models::{Couple, Passenger};

/// Couples resolved into passenger indices.
///
/// Couples are advisory: they bias construction and can add an optional
/// fitness bonus, but never make a chromosome infeasible. Entries naming an
/// unknown passenger, pairing a passenger with itself, or involving a
/// passenger who already has a partner are skipped with a warning.
#[derive(Debug, Clone, Default)]
pub struct CoupleIndex {
    pairs: Vec<(usize, usize)>,
    partner: Vec<Option<usize>>,
}

impl CoupleIndex {
    /// Resolves caller couples against the passenger list.
    pub fn build(couples: &[Couple], passengers: &[Passenger]) -> Self {
        let index: HashMap<u64, usize> =
            passengers.iter().enumerate().map(|(i, p)| (p.id(), i)).collect();
        let mut pairs = Vec::new();
        let mut partner = vec![None; passengers.len()];

        for couple in couples {
            let (a_id, b_id) = couple.members();
            let (Some(&a), Some(&b)) = (index.get(&a_id), index.get(&b_id)) else {
                warn!(first = a_id, second = b_id, "couple references unknown passenger, skipped");
                continue;
            };
            if partner[a] == Some(b) {
                warn!(first = a_id, second = b_id, "duplicate couple, skipped");
                continue;
            }
            if a == b || partner[a].is_some() || partner[b].is_some() {
                warn!(first = a_id, second = b_id, "couple overlaps another couple, skipped");
                continue;
            }
            partner[a] = Some(b);
            partner[b] = Some(a);
            pairs.push((a, b));
        }

        Self { pairs, partner }
    }

    /// Resolved pairs.
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// The partner of `passenger`, if it belongs to a couple.
    pub fn partner(&self, passenger: usize) -> Option<usize> {
        self.partner.get(passenger).copied().flatten()
    }

    /// Returns `true` if there are no couples.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of couples riding in the same vehicle.
    pub fn together_count(&self, genes: &[Vec<usize>]) -> usize {
        if self.is_empty() {
            return 0;
        }
        let mut vehicle_of = vec![usize::MAX; self.partner.len()];
        for (v, route) in genes.iter().enumerate() {
            for &p in route {
                vehicle_of[p] = v;
            }
        }
        self.pairs()
            .iter()
            .filter(|&&(a, b)| vehicle_of[a] == vehicle_of[b])
            .count()
    }

    /// Reorders `pool` so each partner immediately follows the first member
    /// of its couple found in the pool. Relative order is otherwise kept.
    pub fn group_partners(&self, pool: &mut Vec<usize>) {
        if self.is_empty() {
            return;
        }
        let mut in_pool = vec![false; self.partner.len()];
        for &p in pool.iter() {
            in_pool[p] = true;
        }
        let mut placed = vec![false; self.partner.len()];
        let mut grouped = Vec::with_capacity(pool.len());
        for &p in pool.iter() {
            if placed[p] {
                continue;
            }
            grouped.push(p);
            placed[p] = true;
            if let Some(q) = self.partner(p).filter(|&q| in_pool[q] && !placed[q]) {
                grouped.push(q);
                placed[q] = true;
            }
        }
        *pool = grouped;
    }
}
