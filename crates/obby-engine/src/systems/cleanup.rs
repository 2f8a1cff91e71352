use crate::api::types::EntityId;

/// Entities waiting to be removed once game time passes their expiry.
/// Used for short-lived visuals (laser beams) that must outlive the frame
/// that created them.
pub struct CleanupQueue {
    pending: Vec<(f64, EntityId)>,
}

impl CleanupQueue {
    pub fn new() -> Self {
        Self {
            pending: Vec::with_capacity(16),
        }
    }

    /// Queue `id` for removal at absolute time `expires_at`.
    /// Scheduling an already queued ID moves its expiry.
    pub fn schedule(&mut self, id: EntityId, expires_at: f64) {
        self.cancel(id);
        self.pending.push((expires_at, id));
    }

    /// Forget a pending removal. Returns whether `id` was queued.
    pub fn cancel(&mut self, id: EntityId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(_, queued)| *queued != id);
        self.pending.len() != before
    }

    /// Remove and return every ID whose expiry is at or before `now`,
    /// in scheduling order.
    pub fn drain_expired(&mut self, now: f64) -> Vec<EntityId> {
        let mut expired = Vec::new();
        self.pending.retain(|(at, id)| {
            if *at <= now {
                expired.push(*id);
                false
            } else {
                true
            }
        });
        expired
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Default for CleanupQueue {
    fn default() -> Self {
        Self::new()
    }
}
