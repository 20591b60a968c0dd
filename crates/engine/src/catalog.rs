//! In-memory lot catalog.
//!
//! The catalog owns lot records; sessions only borrow a clone for their
//! lifetime. Status transitions flow back from sessions as events, applied
//! through [`Catalog::apply`].

use crate::event::SessionEvent;
use bidding_core::{Error, Lot, LotId, LotStatus, Result};
use std::collections::BTreeMap;
use tracing::info;

/// Collection of lots known to the house.
#[derive(Debug, Default)]
pub struct Catalog {
    lots: BTreeMap<LotId, Lot>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a lot. Rejects duplicates and invalid lots.
    pub fn add_lot(&mut self, lot: Lot) -> Result<()> {
        lot.validate()?;
        if self.lots.contains_key(&lot.id) {
            return Err(Error::catalog(format!("duplicate lot id: {}", lot.id)));
        }
        info!(lot_id = %lot.id, title = %lot.title, "lot added to catalog");
        self.lots.insert(lot.id.clone(), lot);
        Ok(())
    }

    /// Look up a lot by id.
    pub fn get(&self, id: &str) -> Option<&Lot> {
        self.lots.get(id)
    }

    /// All lots, ordered by id.
    pub fn lots(&self) -> impl Iterator<Item = &Lot> {
        self.lots.values()
    }

    /// Number of lots in the catalog.
    pub fn len(&self) -> usize {
        self.lots.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    /// Rename a lot.
    pub fn update_title(&mut self, id: &str, title: impl Into<String>) -> Result<()> {
        let lot = self
            .lots
            .get_mut(id)
            .ok_or_else(|| Error::catalog(format!("unknown lot id: {id}")))?;
        let title = title.into();
        if title.trim().is_empty() {
            return Err(Error::lot("title must not be empty"));
        }
        lot.title = title;
        Ok(())
    }

    /// Remove a lot. A live lot cannot be removed.
    pub fn remove(&mut self, id: &str) -> Result<Lot> {
        let status = self
            .lots
            .get(id)
            .map(|lot| lot.status)
            .ok_or_else(|| Error::catalog(format!("unknown lot id: {id}")))?;
        if status == LotStatus::Live {
            return Err(Error::catalog(format!("lot {id} is live")));
        }
        Ok(self.lots.remove(id).expect("checked above"))
    }

    /// Fetch a scheduled lot for starting a session. The returned clone is
    /// what the session owns; the catalog copy is updated via `apply`.
    pub fn checkout(&self, id: &str) -> Result<Lot> {
        let lot = self
            .lots
            .get(id)
            .ok_or_else(|| Error::catalog(format!("unknown lot id: {id}")))?;
        if lot.status != LotStatus::Scheduled {
            return Err(Error::catalog(format!(
                "lot {id} is not scheduled (status: {:?})",
                lot.status
            )));
        }
        Ok(lot.clone())
    }

    /// Mirror a session's status transitions onto the owned lot record.
    pub fn apply(&mut self, event: &SessionEvent) {
        let status = match event {
            SessionEvent::Opened { .. } => Some(LotStatus::Live),
            SessionEvent::Closed { .. } => Some(LotStatus::Closed),
            _ => None,
        };
        if let (Some(status), Some(lot)) = (status, self.lots.get_mut(event.lot_id())) {
            lot.status = status;
        }
    }
}
