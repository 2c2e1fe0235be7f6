//! Single-use hand-off of review links from the submit step to the review
//! screen.
//!
//! The submit step deposits the links and gets a [`ReviewTicket`] back; the
//! ticket travels in the redirect URL and the review screen consumes it.
//! A ticket can be read once. Unknown, consumed or expired tickets read as
//! nothing, so a review screen reached any other way shows no links.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::ReviewLinks;

pub const HANDOFF_TTL_MINUTES: i64 = 10;

/// Names one deposit in the [`ReviewHandoffStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReviewTicket(Uuid);

impl ReviewTicket {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ReviewTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ReviewTicket {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

struct Deposit {
    links: ReviewLinks,
    deposited_at: DateTime<Utc>,
}

pub struct ReviewHandoffStore {
    deposits: Mutex<HashMap<ReviewTicket, Deposit>>,
    ttl: Duration,
}

impl ReviewHandoffStore {
    pub fn new() -> Self {
        Self::with_ttl(Duration::minutes(HANDOFF_TTL_MINUTES))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            deposits: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Store links for exactly one later read. Expired deposits are dropped.
    pub fn deposit(&self, links: ReviewLinks) -> ReviewTicket {
        let now = Utc::now();
        let ticket = ReviewTicket::new();

        let mut deposits = self.deposits.lock().expect("handoff lock poisoned");
        deposits.retain(|_, d| now - d.deposited_at < self.ttl);
        deposits.insert(
            ticket,
            Deposit {
                links,
                deposited_at: now,
            },
        );
        ticket
    }

    /// Take the links for a ticket. The deposit is gone afterwards.
    pub fn consume(&self, ticket: &ReviewTicket) -> Option<ReviewLinks> {
        let deposit = self
            .deposits
            .lock()
            .expect("handoff lock poisoned")
            .remove(ticket)?;

        (Utc::now() - deposit.deposited_at < self.ttl).then_some(deposit.links)
    }

    pub fn len(&self) -> usize {
        self.deposits.lock().expect("handoff lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ReviewHandoffStore {
    fn default() -> Self {
        Self::new()
    }
}
