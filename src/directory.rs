//! Owner directory: a paginated index of the objects an account owns
//!
//! The directory is an explicit index held by the ledger view: pages are
//! keyed by `(owner, page number)` with a separate record of each owner's
//! current tail page. No page is reachable except through its owner's
//! chain. For correctness the directory is a set; placement order within
//! and across pages carries no meaning.

use crate::result::TxResult;
use crate::types::{AccountId, ObjectId};
use crate::view::LedgerView;
use serde::{Deserialize, Serialize};

/// Maximum identifiers per directory page.
pub const DIR_PAGE_CAPACITY: usize = 32;

/// One page of an owner's directory chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectoryPage {
    pub entries: Vec<ObjectId>,
    /// Which account's objects this page holds; set by the describer.
    pub owner: Option<AccountId>,
}

/// Standard describer tagging newly allocated pages with their owner.
///
/// The describer is a generic hook invoked per page touched by an add,
/// letting the caller re-home auxiliary bookkeeping; it is not directory
/// logic itself.
pub fn owner_page_describer(owner: AccountId) -> impl FnMut(&mut DirectoryPage, bool) {
    move |page, created| {
        if created {
            page.owner = Some(owner);
        }
    }
}

/// Append `id` to `owner`'s directory, allocating a new tail page if the
/// current one is full.
///
/// Returns the page number holding the identifier, to be stored on the
/// object as its removal hint, along with the result code.
pub fn dir_add(
    view: &mut LedgerView,
    owner: AccountId,
    id: ObjectId,
    mut describer: impl FnMut(&mut DirectoryPage, bool),
) -> (u64, TxResult) {
    if let Some(tail) = view.dir_tails.get(&owner).copied() {
        let Some(page) = view.dir_pages.get_mut(&(owner, tail)) else {
            // Tail record points at a page that does not exist.
            return (0, TxResult::BadLedger);
        };
        if page.entries.len() < DIR_PAGE_CAPACITY {
            page.entries.push(id);
            describer(page, false);
            return (tail, TxResult::Success);
        }

        let next = tail + 1;
        let mut page = DirectoryPage {
            entries: vec![id],
            owner: None,
        };
        describer(&mut page, true);
        view.dir_pages.insert((owner, next), page);
        view.dir_tails.insert(owner, next);
        return (next, TxResult::Success);
    }

    // First object for this owner.
    let mut page = DirectoryPage {
        entries: vec![id],
        owner: None,
    };
    describer(&mut page, true);
    view.dir_pages.insert((owner, 0), page);
    view.dir_tails.insert(owner, 0);
    (0, TxResult::Success)
}

/// Remove `id` from `owner`'s directory.
///
/// The hinted page is checked first; if the hint went stale the full chain
/// is scanned. Emptied pages are unlinked and the tail retreats past empty
/// trailing pages so the chain never ends in a removed page.
pub fn dir_remove(
    view: &mut LedgerView,
    owner: AccountId,
    id: ObjectId,
    hint: u64,
) -> TxResult {
    let Some(tail) = view.dir_tails.get(&owner).copied() else {
        return TxResult::BadLedger;
    };

    let holding = if page_holds(view, owner, hint, &id) {
        Some(hint)
    } else {
        (0..=tail).find(|&n| page_holds(view, owner, n, &id))
    };
    let Some(page_no) = holding else {
        return TxResult::BadLedger;
    };

    let page = view
        .dir_pages
        .get_mut(&(owner, page_no))
        .expect("holding page was just located");
    page.entries.retain(|e| e != &id);

    if page.entries.is_empty() {
        view.dir_pages.remove(&(owner, page_no));
        retreat_tail(view, owner, tail);
    }
    TxResult::Success
}

fn page_holds(view: &LedgerView, owner: AccountId, page_no: u64, id: &ObjectId) -> bool {
    view.dir_pages
        .get(&(owner, page_no))
        .map(|p| p.entries.contains(id))
        .unwrap_or(false)
}

/// Re-point the tail at the highest surviving page, or drop the chain
/// record entirely when no pages remain.
fn retreat_tail(view: &mut LedgerView, owner: AccountId, tail: u64) {
    let last = view
        .dir_pages
        .range((owner, 0)..=(owner, tail))
        .next_back()
        .map(|((_, n), _)| *n);
    match last {
        Some(n) => {
            view.dir_tails.insert(owner, n);
        }
        None => {
            view.dir_tails.remove(&owner);
        }
    }
}

/// All identifiers in `owner`'s directory, in page order.
pub fn dir_entries(view: &LedgerView, owner: AccountId) -> Vec<ObjectId> {
    view.dir_pages
        .range((owner, 0)..=(owner, u64::MAX))
        .flat_map(|(_, page)| page.entries.iter().copied())
        .collect()
}

/// True iff `owner`'s directory holds `id` on any page.
pub fn dir_contains(view: &LedgerView, owner: AccountId, id: &ObjectId) -> bool {
    view.dir_pages
        .range((owner, 0)..=(owner, u64::MAX))
        .any(|(_, page)| page.entries.contains(id))
}

/// True iff `owner`'s directory holds no identifiers at all.
pub fn dir_is_empty(view: &LedgerView, owner: AccountId) -> bool {
    dir_entries(view, owner).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;
    use crate::types::CloseTime;
    use crate::view::ReserveSchedule;

    fn test_view() -> LedgerView {
        LedgerView::new(
            CloseTime::from_seconds(0),
            ReserveSchedule::new(Amount::ZERO, Amount::ZERO),
        )
    }

    fn oid(n: u8) -> ObjectId {
        ObjectId([n; 32])
    }

    #[test]
    fn test_first_add_allocates_page_zero() {
        let mut view = test_view();
        let owner = AccountId::new([1; 20]);

        let (hint, result) = dir_add(&mut view, owner, oid(1), owner_page_describer(owner));
        assert_eq!(result, TxResult::Success);
        assert_eq!(hint, 0);
        assert!(dir_contains(&view, owner, &oid(1)));
    }

    #[test]
    fn test_page_overflow_allocates_successor() {
        let mut view = test_view();
        let owner = AccountId::new([1; 20]);

        for n in 0..DIR_PAGE_CAPACITY as u8 {
            let (hint, result) = dir_add(&mut view, owner, oid(n), owner_page_describer(owner));
            assert_eq!(result, TxResult::Success);
            assert_eq!(hint, 0);
        }
        let (hint, result) = dir_add(&mut view, owner, oid(200), owner_page_describer(owner));
        assert_eq!(result, TxResult::Success);
        assert_eq!(hint, 1);
        assert_eq!(dir_entries(&view, owner).len(), DIR_PAGE_CAPACITY + 1);
    }

    #[test]
    fn test_describer_tags_new_pages() {
        let mut view = test_view();
        let owner = AccountId::new([1; 20]);
        let mut created_pages = 0;

        for n in 0..(DIR_PAGE_CAPACITY as u8 + 1) {
            dir_add(&mut view, owner, oid(n), |page, created| {
                if created {
                    page.owner = Some(owner);
                    created_pages += 1;
                }
            });
        }
        assert_eq!(created_pages, 2);
        assert_eq!(view.dir_pages[&(owner, 0)].owner, Some(owner));
        assert_eq!(view.dir_pages[&(owner, 1)].owner, Some(owner));
    }

    #[test]
    fn test_remove_with_valid_hint() {
        let mut view = test_view();
        let owner = AccountId::new([1; 20]);

        let (hint, _) = dir_add(&mut view, owner, oid(1), owner_page_describer(owner));
        assert_eq!(dir_remove(&mut view, owner, oid(1), hint), TxResult::Success);
        assert!(dir_is_empty(&view, owner));
    }

    #[test]
    fn test_remove_with_stale_hint_falls_back_to_scan() {
        let mut view = test_view();
        let owner = AccountId::new([1; 20]);

        for n in 0..(DIR_PAGE_CAPACITY as u8 + 2) {
            dir_add(&mut view, owner, oid(n), owner_page_describer(owner));
        }
        // oid(0) lives on page 0; lie about the hint.
        assert_eq!(dir_remove(&mut view, owner, oid(0), 99), TxResult::Success);
        assert!(!dir_contains(&view, owner, &oid(0)));
    }

    #[test]
    fn test_remove_absent_identifier() {
        let mut view = test_view();
        let owner = AccountId::new([1; 20]);

        assert_eq!(dir_remove(&mut view, owner, oid(1), 0), TxResult::BadLedger);

        dir_add(&mut view, owner, oid(1), owner_page_describer(owner));
        assert_eq!(dir_remove(&mut view, owner, oid(2), 0), TxResult::BadLedger);
    }

    #[test]
    fn test_emptied_tail_page_is_unlinked() {
        let mut view = test_view();
        let owner = AccountId::new([1; 20]);

        for n in 0..DIR_PAGE_CAPACITY as u8 {
            dir_add(&mut view, owner, oid(n), owner_page_describer(owner));
        }
        let (hint, _) = dir_add(&mut view, owner, oid(200), owner_page_describer(owner));
        assert_eq!(hint, 1);

        dir_remove(&mut view, owner, oid(200), hint);
        assert!(view.dir_pages.get(&(owner, 1)).is_none());
        assert_eq!(view.dir_tails[&owner], 0);

        // The chain keeps working after the tail retreats.
        let (hint, result) = dir_add(&mut view, owner, oid(201), owner_page_describer(owner));
        assert_eq!(result, TxResult::Success);
        assert_eq!(hint, 1);
    }

    #[test]
    fn test_owners_are_isolated() {
        let mut view = test_view();
        let a = AccountId::new([1; 20]);
        let b = AccountId::new([2; 20]);

        dir_add(&mut view, a, oid(1), owner_page_describer(a));
        dir_add(&mut view, b, oid(2), owner_page_describer(b));

        assert!(dir_contains(&view, a, &oid(1)));
        assert!(!dir_contains(&view, a, &oid(2)));
        assert!(dir_contains(&view, b, &oid(2)));

        dir_remove(&mut view, a, oid(1), 0);
        assert!(dir_is_empty(&view, a));
        assert!(!dir_is_empty(&view, b));
    }
}
