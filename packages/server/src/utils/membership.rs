//! Maintenance of the participant <-> team link table.

use std::collections::HashSet;

use chrono::Utc;
use sea_orm::*;
use tracing::{debug, warn};

use crate::entity::{participant, participant_team, team};
use crate::models::shared::dedup_ids;

/// The side of the link whose related set is being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOwner {
    /// Writes the teams of a participant.
    Participant(i32),
    /// Writes the members of a team.
    Team(i32),
}

impl LinkOwner {
    fn id(self) -> i32 {
        match self {
            LinkOwner::Participant(id) | LinkOwner::Team(id) => id,
        }
    }

    fn owner_column(self) -> participant_team::Column {
        match self {
            LinkOwner::Participant(_) => participant_team::Column::ParticipantId,
            LinkOwner::Team(_) => participant_team::Column::TeamId,
        }
    }

    fn other_column(self) -> participant_team::Column {
        match self {
            LinkOwner::Participant(_) => participant_team::Column::TeamId,
            LinkOwner::Team(_) => participant_team::Column::ParticipantId,
        }
    }

    fn link_to(self, other: i32) -> participant_team::ActiveModel {
        let (participant_id, team_id) = match self {
            LinkOwner::Participant(id) => (id, other),
            LinkOwner::Team(id) => (other, id),
        };
        participant_team::ActiveModel {
            participant_id: Set(participant_id),
            team_id: Set(team_id),
            joined_at: Set(Utc::now()),
        }
    }
}

/// Links to insert and delete to move from `current` to `requested`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LinkPlan {
    pub to_add: Vec<i32>,
    pub to_remove: Vec<i32>,
}

/// Compute the difference between the current and requested related sets.
///
/// IDs present in both are untouched so their `joined_at` survives.
pub fn plan_link_changes(current: &[i32], requested: &[i32]) -> LinkPlan {
    let current_set: HashSet<i32> = current.iter().copied().collect();
    let requested = dedup_ids(requested);
    let requested_set: HashSet<i32> = requested.iter().copied().collect();

    LinkPlan {
        to_add: requested
            .into_iter()
            .filter(|id| !current_set.contains(id))
            .collect(),
        to_remove: current
            .iter()
            .copied()
            .filter(|id| !requested_set.contains(id))
            .collect(),
    }
}

/// Keep the requested IDs that name existing rows on the other side of the link.
async fn existing_targets<C: ConnectionTrait>(
    db: &C,
    owner: LinkOwner,
    requested: &[i32],
) -> Result<Vec<i32>, DbErr> {
    let requested = dedup_ids(requested);
    if requested.is_empty() {
        return Ok(requested);
    }

    let found: HashSet<i32> = match owner {
        LinkOwner::Participant(_) => {
            team::Entity::find()
                .filter(team::Column::Id.is_in(requested.clone()))
                .select_only()
                .column(team::Column::Id)
                .into_tuple::<i32>()
                .all(db)
                .await?
        }
        LinkOwner::Team(_) => {
            participant::Entity::find()
                .filter(participant::Column::Id.is_in(requested.clone()))
                .select_only()
                .column(participant::Column::Id)
                .into_tuple::<i32>()
                .all(db)
                .await?
        }
    }
    .into_iter()
    .collect();

    let (known, unknown): (Vec<i32>, Vec<i32>) =
        requested.into_iter().partition(|id| found.contains(id));
    if !unknown.is_empty() {
        warn!(?owner, ?unknown, "Ignoring unknown related IDs");
    }
    Ok(known)
}

/// Make the owner's related set equal to `requested`, ignoring unknown IDs.
pub async fn replace_links<C: ConnectionTrait>(
    db: &C,
    owner: LinkOwner,
    requested: &[i32],
) -> Result<(), DbErr> {
    let requested = existing_targets(db, owner, requested).await?;

    let current: Vec<i32> = participant_team::Entity::find()
        .filter(owner.owner_column().eq(owner.id()))
        .select_only()
        .column(owner.other_column())
        .into_tuple::<i32>()
        .all(db)
        .await?;

    let plan = plan_link_changes(&current, &requested);

    if !plan.to_remove.is_empty() {
        participant_team::Entity::delete_many()
            .filter(owner.owner_column().eq(owner.id()))
            .filter(owner.other_column().is_in(plan.to_remove.clone()))
            .exec(db)
            .await?;
    }
    for other in &plan.to_add {
        owner.link_to(*other).insert(db).await?;
    }

    debug!(
        ?owner,
        added = plan.to_add.len(),
        removed = plan.to_remove.len(),
        "Replaced links"
    );
    Ok(())
}

/// Delete every link row of the owner.
pub async fn clear_links<C: ConnectionTrait>(db: &C, owner: LinkOwner) -> Result<(), DbErr> {
    participant_team::Entity::delete_many()
        .filter(owner.owner_column().eq(owner.id()))
        .exec(db)
        .await?;
    Ok(())
}
