//! Checks the events the engine emits when built with the `tracing` feature.

#![cfg(feature = "tracing")]

use std::sync::{Arc, Mutex};

use avl_ost::{AvlTree, CircularList, ListError, TreeList};
use pretty_assertions::assert_eq;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::Registry;

/// One captured event: level and message.
type Record = (Level, String);

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<Record>>>);

impl Recorder {
    fn messages(&self, level: Level, message: &str) -> usize {
        let records = self.0.lock().unwrap();
        records.iter().filter(|(l, m)| *l == level && m == message).count()
    }
}

#[derive(Default)]
struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for Recorder {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("avl_ost") {
            return;
        }
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.0.lock().unwrap().push((*event.metadata().level(), visitor.0));
    }
}

/// Runs `f` with a recorder installed for the current thread.
fn record(f: impl FnOnce()) -> Recorder {
    let recorder = Recorder::default();
    let subscriber = Registry::default().with(recorder.clone());
    tracing::subscriber::with_default(subscriber, f);
    recorder
}

#[test]
fn every_single_rotation_emits_an_event() {
    let recorder = record(|| {
        let mut straight = AvlTree::new();
        for key in [1, 2, 3] {
            straight.insert(key, ());
        }
        // 30 -> 10 -> 20 is a zig-zag: a double rotation.
        let mut zig_zag = AvlTree::new();
        for key in [30, 10, 20] {
            zig_zag.insert(key, ());
        }
    });

    assert_eq!(recorder.messages(Level::TRACE, "rotation"), 3);
    // The first insert into an empty tree has nothing to rebalance.
    assert_eq!(recorder.messages(Level::TRACE, "rebalanced"), 4);
}

#[test]
fn delete_reports_which_case_ran() {
    let recorder = record(|| {
        let mut tree = AvlTree::new();
        for key in [2, 1, 3] {
            tree.insert(key, ());
        }
        tree.delete(2);
        tree.delete(1);
    });

    assert_eq!(recorder.messages(Level::TRACE, "delete: two children"), 1);
    assert_eq!(recorder.messages(Level::TRACE, "delete: at most one child"), 1);
}

#[test]
fn rejected_list_requests_log_at_debug() {
    let recorder = record(|| {
        let mut list: TreeList<()> = TreeList::new();
        assert_eq!(list.delete(0), Err(ListError::IndexOutOfBounds { index: 0, len: 0 }));

        let mut ring = CircularList::with_capacity(1);
        ring.insert(0, 0, ()).unwrap();
        assert_eq!(ring.insert(0, 1, ()), Err(ListError::CapacityExceeded { capacity: 1 }));
    });

    assert_eq!(recorder.messages(Level::DEBUG, "TreeList::delete rejected"), 1);
    assert_eq!(recorder.messages(Level::DEBUG, "CircularList::insert rejected: full"), 1);
}
