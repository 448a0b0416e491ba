//! The data collaborator consumed by the planner.
//!
//! [`ScheduleSource`] is the seam between the pure slot pipeline and whatever
//! stores teams, events and tasks. Rows come back raw: the interval builder
//! does all validation, defaulting and clipping itself.
//!
//! [`InMemorySource`] serves a [`Snapshot`] deserialized from JSON. It mirrors
//! the relational queries of the scheduling app closely enough to drive the
//! CLI and the tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::policy::SlotPolicy;

pub type MemberId = i64;
pub type TeamId = i64;

/// An accepted member of a team. Read-only snapshot for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: MemberId,
    pub name: String,
    /// Informational only; overlap math uses floating local time.
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Status of a team membership or an event invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
}

/// How the member is attached to an event row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventRole {
    Organizer,
    Participant(InviteStatus),
}

/// A raw event row for one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub start: String,
    pub end: Option<String>,
    pub role: EventRole,
}

/// A raw task row already selected for one member (owned, or a group task of
/// one of the member's teams).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub date: Option<String>,
}

/// Everything a member might be busy with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusyRows {
    pub events: Vec<EventRow>,
    pub tasks: Vec<TaskRow>,
}

/// Read-only access to team membership and per-member calendar rows.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; the planner issues
/// [`busy_rows`](ScheduleSource::busy_rows) calls for all members concurrently.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Members whose membership status is accepted, ordered by name.
    async fn team_members(&self, team_id: TeamId) -> Result<Vec<TeamMember>, SourceError>;

    /// Whether the team exists at all, regardless of its members.
    async fn team_exists(&self, team_id: TeamId) -> Result<bool, SourceError>;

    /// Event and task rows for one member around the window.
    async fn busy_rows(
        &self,
        member_id: MemberId,
        window_start: &str,
        window_end: &str,
    ) -> Result<BusyRows, SourceError>;
}

// ── Snapshot ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: MemberId,
    pub name: String,
    #[serde(default)]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    pub user: MemberId,
    #[serde(default)]
    pub status: InviteStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRecord {
    pub id: TeamId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub members: Vec<Membership>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub user: MemberId,
    #[serde(default)]
    pub status: InviteStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(default)]
    pub id: i64,
    pub organizer: MemberId,
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default)]
    pub id: i64,
    pub owner: MemberId,
    #[serde(default)]
    pub team: Option<TeamId>,
    #[serde(default)]
    pub group: bool,
    #[serde(default)]
    pub date: Option<String>,
}

/// A point-in-time dump of the scheduling data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub policy: Option<SlotPolicy>,
    pub users: Vec<UserRecord>,
    pub teams: Vec<TeamRecord>,
    pub events: Vec<EventRecord>,
    pub tasks: Vec<TaskRecord>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    fn team(&self, team_id: TeamId) -> Option<&TeamRecord> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    fn is_accepted_member(&self, team_id: TeamId, member_id: MemberId) -> bool {
        self.team(team_id).is_some_and(|team| {
            team.members
                .iter()
                .any(|m| m.user == member_id && m.status == InviteStatus::Accepted)
        })
    }
}

/// A [`ScheduleSource`] over an in-memory [`Snapshot`].
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    snapshot: Snapshot,
}

impl InMemorySource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

#[async_trait]
impl ScheduleSource for InMemorySource {
    async fn team_members(&self, team_id: TeamId) -> Result<Vec<TeamMember>, SourceError> {
        let Some(team) = self.snapshot.team(team_id) else {
            return Ok(Vec::new());
        };

        let mut members: Vec<TeamMember> = team
            .members
            .iter()
            .filter(|m| m.status == InviteStatus::Accepted)
            .filter_map(|m| self.snapshot.users.iter().find(|u| u.id == m.user))
            .map(|u| TeamMember {
                id: u.id,
                name: u.name.clone(),
                timezone: u.timezone.clone(),
            })
            .collect();
        members.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(members)
    }

    async fn team_exists(&self, team_id: TeamId) -> Result<bool, SourceError> {
        Ok(self.snapshot.team(team_id).is_some())
    }

    async fn busy_rows(
        &self,
        member_id: MemberId,
        _window_start: &str,
        _window_end: &str,
    ) -> Result<BusyRows, SourceError> {
        let events = self
            .snapshot
            .events
            .iter()
            .filter_map(|event| {
                let role = if event.organizer == member_id {
                    EventRole::Organizer
                } else {
                    let participant = event.participants.iter().find(|p| p.user == member_id)?;
                    EventRole::Participant(participant.status)
                };
                Some(EventRow {
                    start: event.start.clone(),
                    end: event.end.clone(),
                    role,
                })
            })
            .collect();

        let tasks = self
            .snapshot
            .tasks
            .iter()
            .filter(|task| {
                task.owner == member_id
                    || (task.group
                        && task
                            .team
                            .is_some_and(|team| self.snapshot.is_accepted_member(team, member_id)))
            })
            .map(|task| TaskRow {
                date: task.date.clone(),
            })
            .collect();

        Ok(BusyRows { events, tasks })
    }
}
