//! In-memory repository for roster membership tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::assignment::domain::TeacherId;
use crate::roster::{
    domain::{ClassId, ClassRoster, StudentEntry},
    ports::{RosterRepository, RosterRepositoryError, RosterRepositoryResult},
};

/// Thread-safe in-memory roster repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRosterRepository {
    state: Arc<RwLock<HashMap<ClassId, ClassRoster>>>,
}

impl InMemoryRosterRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(
        &self,
    ) -> RosterRepositoryResult<std::sync::RwLockReadGuard<'_, HashMap<ClassId, ClassRoster>>> {
        self.state.read().map_err(|err| {
            RosterRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(
        &self,
    ) -> RosterRepositoryResult<std::sync::RwLockWriteGuard<'_, HashMap<ClassId, ClassRoster>>>
    {
        self.state.write().map_err(|err| {
            RosterRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn has_expired_removal(entry: &StudentEntry, cutoff: DateTime<Utc>) -> bool {
    entry
        .removal()
        .is_some_and(|removal| removal.removed_at() < cutoff)
}

#[async_trait]
impl RosterRepository for InMemoryRosterRepository {
    async fn store(&self, roster: &ClassRoster) -> RosterRepositoryResult<()> {
        let mut state = self.write_state()?;
        let class_id = roster.id();
        if state.contains_key(&class_id) {
            return Err(RosterRepositoryError::DuplicateRoster(class_id));
        }
        state.insert(class_id, roster.clone());
        Ok(())
    }

    async fn update(&self, roster: &ClassRoster) -> RosterRepositoryResult<()> {
        let mut state = self.write_state()?;
        let class_id = roster.id();
        if !state.contains_key(&class_id) {
            return Err(RosterRepositoryError::NotFound(class_id));
        }
        state.insert(class_id, roster.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ClassId) -> RosterRepositoryResult<Option<ClassRoster>> {
        let state = self.read_state()?;
        Ok(state.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner: TeacherId) -> RosterRepositoryResult<Vec<ClassRoster>> {
        let state = self.read_state()?;
        let mut rosters: Vec<ClassRoster> = state
            .values()
            .filter(|roster| roster.owner() == owner)
            .cloned()
            .collect();
        rosters.sort_by_key(ClassRoster::created_at);
        Ok(rosters)
    }

    async fn find_with_expired_removals(
        &self,
        cutoff: DateTime<Utc>,
    ) -> RosterRepositoryResult<Vec<ClassRoster>> {
        let state = self.read_state()?;
        Ok(state
            .values()
            .filter(|roster| {
                roster
                    .entries()
                    .iter()
                    .any(|entry| has_expired_removal(entry, cutoff))
            })
            .cloned()
            .collect())
    }
}
