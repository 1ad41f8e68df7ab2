//! The read-only input document: a group's members and their events.
//!
//! Produced by the persistence layer; the engine only reads it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::GroupSettings;
use crate::error::{Result, ValidationError};
use crate::event::{Event, UserId};

fn submitted_default() -> bool {
    true
}

/// One member's submitted schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSchedule {
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// `false` when the member has not submitted a schedule yet. Such a member
    /// has no events and still counts toward the member total.
    #[serde(default = "submitted_default")]
    pub submitted: bool,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl MemberSchedule {
    pub fn new(user_id: impl Into<UserId>, events: Vec<Event>) -> Self {
        Self {
            user_id: user_id.into(),
            note: None,
            submitted: true,
            events,
        }
    }

    /// A member who has not submitted a schedule.
    pub fn pending(user_id: impl Into<UserId>) -> Self {
        Self {
            submitted: false,
            ..Self::new(user_id, Vec::new())
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Ordered member list plus group settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSnapshot {
    pub members: Vec<MemberSchedule>,
    #[serde(default)]
    pub settings: GroupSettings,
}

impl GroupSnapshot {
    /// Parse and validate a JSON snapshot.
    ///
    /// Events without an `owner` inherit their member's `userId`.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut snapshot: GroupSnapshot = serde_json::from_str(json)?;
        for member in &mut snapshot.members {
            for event in &mut member.events {
                if event.owner.is_empty() {
                    event.owner = member.user_id.clone();
                }
            }
        }
        snapshot.validate()?;
        tracing::debug!(
            members = snapshot.members.len(),
            events = snapshot.members.iter().map(|m| m.events.len()).sum::<usize>(),
            "loaded group snapshot"
        );
        Ok(snapshot)
    }

    /// Checks settings, member id uniqueness and every event.
    pub fn validate(&self) -> Result<()> {
        self.settings.validate()?;
        let mut seen = BTreeSet::new();
        for member in &self.members {
            if !seen.insert(member.user_id.as_str()) {
                return Err(ValidationError::DuplicateMember(member.user_id.clone()));
            }
        }
        self.members
            .iter()
            .flat_map(|m| m.events.iter())
            .try_for_each(Event::validate)
    }

    pub fn schedules_submitted(&self) -> usize {
        schedules_submitted(&self.members)
    }
}

/// Members who have submitted a schedule.
pub fn schedules_submitted(members: &[MemberSchedule]) -> usize {
    members.iter().filter(|m| m.submitted).count()
}
