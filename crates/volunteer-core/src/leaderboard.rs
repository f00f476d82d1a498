//! Volunteer leaderboard

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: i64,
    pub name: String,
    pub hours: u32,
    pub points: u32,
    /// 1 is the top spot
    pub rank: u32,
}

impl LeaderboardEntry {
    pub fn is_podium(&self) -> bool {
        (1..=3).contains(&self.rank)
    }
}

/// Entries kept in rank order; ids are unique.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new(entries: Vec<LeaderboardEntry>) -> Self {
        let mut board = Self::default();
        for entry in entries {
            board.insert(entry);
        }
        board
    }

    /// Add an entry, replacing any existing row for the same id.
    pub fn insert(&mut self, entry: LeaderboardEntry) {
        self.entries.retain(|existing| existing.id != entry.id);
        let at = self.entries.partition_point(|existing| existing.rank <= entry.rank);
        self.entries.insert(at, entry);
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top(&self, n: usize) -> &[LeaderboardEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Zero-based row of `user_id`, used to scroll to the viewer's own entry.
    pub fn position_of(&self, user_id: i64) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == user_id)
    }

    pub fn entry_for(&self, user_id: i64) -> Option<&LeaderboardEntry> {
        self.position_of(user_id).map(|index| &self.entries[index])
    }
}
