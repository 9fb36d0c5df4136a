//! Per-view reload sequencing.
//!
//! Every reload issued for a view is tagged with a monotonically increasing
//! sequence number. A completion is applied only if its number is higher than
//! anything already applied for that view; everything else is dropped on
//! arrival. There is no network cancellation, only discard. Duplicate
//! suppression applies solely to composed search queries; reloads without a
//! query are always issued.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::model::{ViewKind, ViewQuery};

#[derive(Debug, Default)]
struct ViewSeq {
    issued: u64,
    applied: u64,
    /// The query of the newest request still in flight, if any. Used to skip
    /// a reload whose query is identical to one already outstanding.
    in_flight: Option<(u64, Option<ViewQuery>)>,
}

#[derive(Debug, Default)]
pub struct Sequencer {
    views: Mutex<HashMap<ViewKind, ViewSeq>>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a sequence number for a new reload of `view`. Returns `None`
    /// only when `query` is given and an identical query is already in
    /// flight for the same view; the caller skips that request entirely.
    /// Reloads without a query always issue, and the newer number supersedes
    /// whatever is still outstanding.
    pub fn begin(&self, view: ViewKind, query: Option<&ViewQuery>) -> Option<u64> {
        let mut views = self.views.lock().expect("sequencer lock");
        let entry = views.entry(view).or_default();

        if let Some(query) = query
            && let Some((_, Some(in_flight))) = &entry.in_flight
            && in_flight == query
        {
            return None;
        }

        Some(issue(entry, query))
    }

    /// Issue unconditionally, bypassing duplicate suppression. Post-write
    /// reconciliation goes through here: a response to the same query issued
    /// before the write must not stand as the settled result, and the higher
    /// number discards it on arrival.
    pub fn begin_forced(&self, view: ViewKind, query: Option<&ViewQuery>) -> u64 {
        let mut views = self.views.lock().expect("sequencer lock");
        issue(views.entry(view).or_default(), query)
    }

    /// Record completion of request `seq` for `view` and decide whether its
    /// result may be applied. Only the highest sequence number observed so
    /// far wins; a superseded response returns `false` and must be discarded.
    pub fn complete(&self, view: ViewKind, seq: u64) -> bool {
        let mut views = self.views.lock().expect("sequencer lock");
        let entry = views.entry(view).or_default();

        if entry
            .in_flight
            .as_ref()
            .is_some_and(|(in_flight_seq, _)| *in_flight_seq == seq)
        {
            entry.in_flight = None;
        }

        if seq > entry.applied {
            entry.applied = seq;
            true
        } else {
            false
        }
    }
}

fn issue(entry: &mut ViewSeq, query: Option<&ViewQuery>) -> u64 {
    entry.issued += 1;
    entry.in_flight = Some((entry.issued, query.cloned()));
    entry.issued
}
