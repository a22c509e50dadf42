//! Property-based tests for dispatch ordering
//!
//! Validates the delivery-order invariants:
//! - Listeners always run in descending priority order
//! - Equal priorities preserve registration order (stable sort)
//! - Every registration is invoked exactly once per dispatch

use std::cell::RefCell;
use std::rc::Rc;

use modkit_events::EventBus;
use proptest::prelude::*;

proptest! {
    /// Property: delivery order is the stable descending sort of priorities
    ///
    /// For any list of priorities, dispatch must invoke the listeners in the
    /// order produced by stably sorting registration indices by descending
    /// priority.
    #[test]
    fn delivery_matches_stable_descending_sort(
        priorities in prop::collection::vec(-100i32..100, 0..32),
    ) {
        let invoked = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::<()>::new();

        for (index, &priority) in priorities.iter().enumerate() {
            let sink = Rc::clone(&invoked);
            bus.subscribe("topic", priority, move |_| {
                sink.borrow_mut().push(index);
                Ok(())
            });
        }
        bus.dispatch("topic", &());

        let mut expected: Vec<usize> = (0..priorities.len()).collect();
        expected.sort_by_key(|&index| std::cmp::Reverse(priorities[index]));

        prop_assert_eq!(&*invoked.borrow(), &expected);
    }

    /// Property: listener count tracks registrations and removals
    ///
    /// Subscribing n listeners then unsubscribing k of them leaves n - k
    /// registrations, and the topic key disappears when the count hits zero.
    #[test]
    fn listener_count_tracks_registrations(
        priorities in prop::collection::vec(-10i32..10, 1..16),
        removals in prop::collection::vec(any::<prop::sample::Index>(), 0..16),
    ) {
        let mut bus = EventBus::<()>::new();
        let ids: Vec<_> = priorities
            .iter()
            .map(|&priority| bus.subscribe("topic", priority, |_| Ok(())))
            .collect();

        let mut removed = std::collections::HashSet::new();
        for index in removals {
            let id = ids[index.index(ids.len())];
            bus.unsubscribe("topic", id);
            removed.insert(id);
        }

        let remaining = ids.len() - removed.len();
        prop_assert_eq!(bus.listener_count("topic"), remaining);
        prop_assert_eq!(bus.has_listeners("topic"), remaining > 0);
    }
}
