//! Class roster aggregate and per-entry lifecycle types.

use super::{ClassId, RosterDomainError, StudentId};
use crate::assignment::domain::TeacherId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Membership action recorded in an entry's modification history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterAction {
    /// Student was enrolled.
    Enroll,
    /// Student's display name was changed.
    UpdateName,
    /// Student was removed from the roster.
    Remove,
    /// Student's removal was undone.
    Restore,
}

impl RosterAction {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enroll => "enroll",
            Self::UpdateName => "update_name",
            Self::Remove => "remove",
            Self::Restore => "restore",
        }
    }
}

/// One audit entry in a roster entry's modification history.
///
/// The modification history is distinct from the removal marker: it records
/// every membership action, while the marker only reflects the current
/// removal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModificationRecord {
    action: RosterAction,
    performed_by: TeacherId,
    timestamp: DateTime<Utc>,
    details: String,
}

impl ModificationRecord {
    /// Creates a modification entry.
    #[must_use]
    pub fn new(
        action: RosterAction,
        performed_by: TeacherId,
        timestamp: DateTime<Utc>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            action,
            performed_by,
            timestamp,
            details: details.into(),
        }
    }

    /// Returns the recorded action.
    #[must_use]
    pub const fn action(&self) -> RosterAction {
        self.action
    }

    /// Returns the teacher that performed the action.
    #[must_use]
    pub const fn performed_by(&self) -> TeacherId {
        self.performed_by
    }

    /// Returns when the action was performed.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the human-readable detail payload.
    #[must_use]
    pub fn details(&self) -> &str {
        &self.details
    }
}

/// Removal marker carried by a removed roster entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalState {
    removed_at: DateTime<Utc>,
    removed_by: TeacherId,
}

impl RemovalState {
    /// Returns when the student was removed.
    #[must_use]
    pub const fn removed_at(&self) -> DateTime<Utc> {
        self.removed_at
    }

    /// Returns the teacher that removed the student.
    #[must_use]
    pub const fn removed_by(&self) -> TeacherId {
        self.removed_by
    }
}

/// One student's membership entry within a class roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentEntry {
    student: StudentId,
    display_name: String,
    enrolled_at: DateTime<Utc>,
    removal: Option<RemovalState>,
    history: Vec<ModificationRecord>,
}

impl StudentEntry {
    /// Returns the student identifier.
    #[must_use]
    pub const fn student(&self) -> StudentId {
        self.student
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns when the student was enrolled.
    #[must_use]
    pub const fn enrolled_at(&self) -> DateTime<Utc> {
        self.enrolled_at
    }

    /// Returns the removal marker, if the student has been removed.
    #[must_use]
    pub const fn removal(&self) -> Option<&RemovalState> {
        self.removal.as_ref()
    }

    /// Returns `true` when the removal marker is set.
    #[must_use]
    pub const fn is_removed(&self) -> bool {
        self.removal.is_some()
    }

    /// Returns the modification history in append order.
    #[must_use]
    pub fn history(&self) -> &[ModificationRecord] {
        &self.history
    }

    fn record(&mut self, record: ModificationRecord) {
        self.history.push(record);
    }
}

/// Class roster aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRoster {
    id: ClassId,
    owner: TeacherId,
    entries: Vec<StudentEntry>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted roster aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedRosterData {
    /// Persisted class identifier.
    pub id: ClassId,
    /// Persisted owner identifier.
    pub owner: TeacherId,
    /// Persisted membership entries.
    pub entries: Vec<StudentEntry>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ClassRoster {
    /// Creates a new empty roster owned by `owner`.
    #[must_use]
    pub fn new(owner: TeacherId, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ClassId::new(),
            owner,
            entries: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a roster from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedRosterData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            entries: data.entries,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the class identifier.
    #[must_use]
    pub const fn id(&self) -> ClassId {
        self.id
    }

    /// Returns the owning teacher.
    #[must_use]
    pub const fn owner(&self) -> TeacherId {
        self.owner
    }

    /// Returns every membership entry, removed ones included.
    #[must_use]
    pub fn entries(&self) -> &[StudentEntry] {
        &self.entries
    }

    /// Returns the entries whose removal marker is not set.
    pub fn active_entries(&self) -> impl Iterator<Item = &StudentEntry> {
        self.entries.iter().filter(|entry| !entry.is_removed())
    }

    /// Returns the entry for `student`, if one exists.
    #[must_use]
    pub fn entry(&self, student: StudentId) -> Option<&StudentEntry> {
        self.entries.iter().find(|entry| entry.student == student)
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Enrolls a student.
    ///
    /// # Errors
    ///
    /// Returns [`RosterDomainError::NotOwner`] for non-owners,
    /// [`RosterDomainError::EmptyDisplayName`] for blank names, and
    /// [`RosterDomainError::AlreadyEnrolled`] when an entry for the student
    /// already exists, removed or not.
    pub fn enroll(
        &mut self,
        student: StudentId,
        display_name: impl Into<String>,
        actor: TeacherId,
        clock: &impl Clock,
    ) -> Result<(), RosterDomainError> {
        self.ensure_owner(actor)?;
        let name = validated_name(display_name)?;
        if self.entry(student).is_some() {
            return Err(RosterDomainError::AlreadyEnrolled {
                class_id: self.id,
                student,
            });
        }

        let timestamp = clock.utc();
        let mut entry = StudentEntry {
            student,
            display_name: name,
            enrolled_at: timestamp,
            removal: None,
            history: Vec::new(),
        };
        entry.record(ModificationRecord::new(
            RosterAction::Enroll,
            actor,
            timestamp,
            "student enrolled",
        ));
        self.entries.push(entry);
        self.updated_at = timestamp;
        Ok(())
    }

    /// Changes a student's display name.
    ///
    /// # Errors
    ///
    /// Returns [`RosterDomainError::NotOwner`] for non-owners,
    /// [`RosterDomainError::EmptyDisplayName`] for blank names,
    /// [`RosterDomainError::NotEnrolled`] when no entry exists, and
    /// [`RosterDomainError::AlreadyRemoved`] when the entry carries a
    /// removal marker.
    pub fn update_student_name(
        &mut self,
        student: StudentId,
        display_name: impl Into<String>,
        actor: TeacherId,
        clock: &impl Clock,
    ) -> Result<(), RosterDomainError> {
        self.ensure_owner(actor)?;
        let name = validated_name(display_name)?;
        let class_id = self.id;
        let timestamp = clock.utc();
        let entry = find_entry_mut(&mut self.entries, class_id, student)?;
        if entry.is_removed() {
            return Err(RosterDomainError::AlreadyRemoved { class_id, student });
        }

        let details = format!(
            "display name changed from \"{previous}\" to \"{name}\"",
            previous = entry.display_name
        );
        entry.display_name = name;
        entry.record(ModificationRecord::new(
            RosterAction::UpdateName,
            actor,
            timestamp,
            details,
        ));
        self.updated_at = timestamp;
        Ok(())
    }

    /// Removes a student from the roster.
    ///
    /// The entry stays on the roster with a removal marker until the
    /// retention sweep strikes it permanently.
    ///
    /// # Errors
    ///
    /// Returns [`RosterDomainError::NotOwner`] for non-owners,
    /// [`RosterDomainError::NotEnrolled`] when no entry exists, and
    /// [`RosterDomainError::AlreadyRemoved`] when the entry already carries
    /// a removal marker.
    pub fn remove_student(
        &mut self,
        student: StudentId,
        actor: TeacherId,
        clock: &impl Clock,
    ) -> Result<(), RosterDomainError> {
        self.ensure_owner(actor)?;
        let class_id = self.id;
        let timestamp = clock.utc();
        let entry = find_entry_mut(&mut self.entries, class_id, student)?;
        if entry.is_removed() {
            return Err(RosterDomainError::AlreadyRemoved { class_id, student });
        }

        entry.removal = Some(RemovalState {
            removed_at: timestamp,
            removed_by: actor,
        });
        entry.record(ModificationRecord::new(
            RosterAction::Remove,
            actor,
            timestamp,
            "student removed from roster",
        ));
        self.updated_at = timestamp;
        Ok(())
    }

    /// Undoes a student's removal.
    ///
    /// # Errors
    ///
    /// Returns [`RosterDomainError::NotOwner`] for non-owners,
    /// [`RosterDomainError::NotEnrolled`] when no entry exists, and
    /// [`RosterDomainError::NotRemoved`] when the entry carries no removal
    /// marker.
    pub fn restore_student(
        &mut self,
        student: StudentId,
        actor: TeacherId,
        clock: &impl Clock,
    ) -> Result<(), RosterDomainError> {
        self.ensure_owner(actor)?;
        let class_id = self.id;
        let timestamp = clock.utc();
        let entry = find_entry_mut(&mut self.entries, class_id, student)?;
        if !entry.is_removed() {
            return Err(RosterDomainError::NotRemoved { class_id, student });
        }

        entry.removal = None;
        entry.record(ModificationRecord::new(
            RosterAction::Restore,
            actor,
            timestamp,
            "student removal undone",
        ));
        self.updated_at = timestamp;
        Ok(())
    }

    /// Permanently strikes entries whose removal marker is strictly older
    /// than `cutoff`, returning how many were purged.
    ///
    /// Invoked by the retention sweep; no ownership check applies and no
    /// history is written, since the struck entries no longer exist.
    pub fn purge_removed_before(&mut self, cutoff: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| {
            entry
                .removal
                .is_none_or(|removal| removal.removed_at >= cutoff)
        });
        before - self.entries.len()
    }

    /// Rejects any actor other than the owner, before any state check.
    fn ensure_owner(&self, actor: TeacherId) -> Result<(), RosterDomainError> {
        if self.owner != actor {
            return Err(RosterDomainError::NotOwner {
                class_id: self.id,
                actor,
            });
        }
        Ok(())
    }
}

fn find_entry_mut(
    entries: &mut [StudentEntry],
    class_id: ClassId,
    student: StudentId,
) -> Result<&mut StudentEntry, RosterDomainError> {
    entries
        .iter_mut()
        .find(|entry| entry.student == student)
        .ok_or(RosterDomainError::NotEnrolled { class_id, student })
}

fn validated_name(display_name: impl Into<String>) -> Result<String, RosterDomainError> {
    let raw = display_name.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RosterDomainError::EmptyDisplayName);
    }
    Ok(trimmed.to_owned())
}
