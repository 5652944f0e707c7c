use super::member::Member;
use super::options::SortMode;
use super::slots::{Slot, SlotList};

/// Score of a predicate-less slot.
pub const CATCH_ALL_SCORE: u32 = 1;

/// A slot a member may legitimately occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptableSlot {
    pub index: usize,
    pub sort: SortMode,
}

/// Score `member` against `slot`; `None` when any declared predicate fails.
pub fn score(slot: &Slot, member: &Member, paired: bool) -> Option<u32> {
    if slot.is_catch_all() {
        return Some(CATCH_ALL_SCORE);
    }

    slot.predicates.iter().try_fold(0, |total, predicate| {
        predicate
            .holds(member, paired)
            .then(|| total + predicate.weight())
    })
}

/// Every slot tied for the best score, in slot order.
pub fn acceptable_slots(slots: &SlotList, member: &Member, paired: bool) -> Vec<AcceptableSlot> {
    let scored: Vec<(&Slot, u32)> = slots
        .slots()
        .iter()
        .filter_map(|slot| score(slot, member, paired).map(|s| (slot, s)))
        .collect();

    let Some(best) = scored.iter().map(|(_, s)| *s).max() else {
        return Vec::new();
    };

    scored
        .into_iter()
        .filter(|(_, s)| *s == best)
        .map(|(slot, _)| AcceptableSlot {
            index: slot.index,
            sort: slot.sort,
        })
        .collect()
}
