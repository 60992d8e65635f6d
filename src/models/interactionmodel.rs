// models/interactionmodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "interaction_status", rename_all = "snake_case")]
pub enum InteractionStatus {
    New,
    Viewed,
    Contacted,
    Offered,
    Won,
    Lost,
    Rejected,
    Archived,
}

impl InteractionStatus {
    pub fn to_str(&self) -> &str {
        match self {
            InteractionStatus::New => "new",
            InteractionStatus::Viewed => "viewed",
            InteractionStatus::Contacted => "contacted",
            InteractionStatus::Offered => "offered",
            InteractionStatus::Won => "won",
            InteractionStatus::Lost => "lost",
            InteractionStatus::Rejected => "rejected",
            InteractionStatus::Archived => "archived",
        }
    }

    /// Won, lost, rejected and archived have no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            InteractionStatus::Won
                | InteractionStatus::Lost
                | InteractionStatus::Rejected
                | InteractionStatus::Archived
        )
    }

    /// Whether the professional may open a chat in this state.
    pub fn allows_chat(&self) -> bool {
        matches!(
            self,
            InteractionStatus::Contacted | InteractionStatus::Offered | InteractionStatus::Won
        )
    }

    /// Transition table for the per-(job, professional) state machine:
    ///
    /// new -> viewed            (professional opens job detail)
    /// new|viewed -> contacted  (first chat message)
    /// contacted -> offered     (price+time quote submitted)
    /// offered -> won|lost      (client accepts this / another quote)
    /// any non-terminal -> rejected|archived
    pub fn can_transition_to(&self, target: InteractionStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match target {
            InteractionStatus::New => false,
            InteractionStatus::Viewed => *self == InteractionStatus::New,
            InteractionStatus::Contacted => {
                matches!(self, InteractionStatus::New | InteractionStatus::Viewed)
            }
            InteractionStatus::Offered => *self == InteractionStatus::Contacted,
            InteractionStatus::Won | InteractionStatus::Lost => {
                *self == InteractionStatus::Offered
            }
            InteractionStatus::Rejected | InteractionStatus::Archived => true,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct JobInteraction {
    pub id: Uuid,
    pub job_id: Uuid,
    pub professional_id: Uuid,
    pub status: InteractionStatus,
    pub has_unread: Option<bool>, // Database has DEFAULT FALSE, can be NULL
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Interaction row with the professional's identity joined in, for the
/// client's per-job dashboard.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct JobInteractionWithProfessional {
    pub id: Uuid,
    pub job_id: Uuid,
    pub professional_id: Uuid,
    pub status: InteractionStatus,
    pub has_unread: Option<bool>,
    pub updated_at: Option<DateTime<Utc>>,
    pub professional_name: String,
    pub professional_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use InteractionStatus::*;

    const ALL: [InteractionStatus; 8] =
        [New, Viewed, Contacted, Offered, Won, Lost, Rejected, Archived];

    #[test]
    fn terminal_states_have_no_outgoing_transitions() {
        for from in [Won, Lost, Rejected, Archived] {
            for to in ALL {
                assert!(!from.can_transition_to(to), "{:?} -> {:?}", from, to);
            }
        }
    }

    #[test]
    fn contact_allowed_from_new_and_viewed_only() {
        assert!(New.can_transition_to(Contacted));
        assert!(Viewed.can_transition_to(Contacted));
        assert!(!Contacted.can_transition_to(Contacted));
        assert!(!Offered.can_transition_to(Contacted));
    }

    #[test]
    fn offer_requires_contacted() {
        assert!(Contacted.can_transition_to(Offered));
        for from in [New, Viewed, Offered] {
            assert!(!from.can_transition_to(Offered));
        }
    }

    #[test]
    fn won_and_lost_require_offered() {
        assert!(Offered.can_transition_to(Won));
        assert!(Offered.can_transition_to(Lost));
        for from in [New, Viewed, Contacted] {
            assert!(!from.can_transition_to(Won));
            assert!(!from.can_transition_to(Lost));
        }
    }

    #[test]
    fn any_non_terminal_can_be_rejected_or_archived() {
        for from in [New, Viewed, Contacted, Offered] {
            assert!(from.can_transition_to(Rejected));
            assert!(from.can_transition_to(Archived));
        }
    }

    #[test]
    fn nothing_transitions_back_to_new() {
        for from in ALL {
            assert!(!from.can_transition_to(New));
        }
    }

    #[test]
    fn chat_gating_matches_contacted_and_beyond() {
        assert!(Contacted.allows_chat());
        assert!(Offered.allows_chat());
        assert!(Won.allows_chat());
        for s in [New, Viewed, Lost, Rejected, Archived] {
            assert!(!s.allows_chat());
        }
    }
}
