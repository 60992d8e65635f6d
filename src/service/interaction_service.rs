// service/interaction_service.rs
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{db::DBClient, interactiondb::InteractionExt, jobdb::JobExt},
    models::{
        interactionmodel::{InteractionStatus, JobInteraction, JobInteractionWithProfessional},
        jobmodel::{Job, JobStatus},
    },
    service::error::ServiceError,
};

/// Outcome of a quote acceptance: the job moved to in_progress plus the full
/// post-fan-out interaction set for the job.
#[derive(Debug)]
pub struct AcceptOfferResult {
    pub job: Job,
    pub interactions: Vec<JobInteraction>,
}

/// How the peers of an accepted interaction are resolved: competing quotes
/// become `lost`, every other non-terminal row is archived, terminal rows
/// are left alone.
#[derive(Debug, Default, PartialEq)]
pub struct PeerResolution {
    pub lost: Vec<Uuid>,
    pub archived: Vec<Uuid>,
}

pub fn resolve_peer_interactions(rows: &[JobInteraction], accepted_id: Uuid) -> PeerResolution {
    let mut resolution = PeerResolution::default();

    for row in rows {
        if row.id == accepted_id {
            continue;
        }
        if row.status == InteractionStatus::Offered {
            resolution.lost.push(row.id);
        } else if !row.status.is_terminal() {
            resolution.archived.push(row.id);
        }
    }

    resolution
}

/// A guarded status write found the row in a different state than the one
/// validated against. Report the transition the caller would actually be
/// making, or not-found when the row vanished underneath us.
fn stale_transition_error(
    job_id: Uuid,
    professional_id: Uuid,
    current: Option<InteractionStatus>,
    target: InteractionStatus,
) -> ServiceError {
    match current {
        Some(from) => ServiceError::InvalidInteractionTransition {
            job: job_id,
            from,
            to: target,
        },
        None => ServiceError::InteractionNotFound(job_id, professional_id),
    }
}

#[derive(Debug, Clone)]
pub struct InteractionService {
    db_client: Arc<DBClient>,
}

impl InteractionService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    async fn require_job(&self, job_id: Uuid) -> Result<Job, ServiceError> {
        self.db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))
    }

    /// Applies a validated transition, keyed on the state it was validated
    /// against. When a concurrent writer moved the row first, the write hits
    /// nothing and the fresh state is reported instead of clobbered.
    async fn apply_transition(
        &self,
        job_id: Uuid,
        professional_id: Uuid,
        from: InteractionStatus,
        to: InteractionStatus,
        has_unread: Option<bool>,
    ) -> Result<JobInteraction, ServiceError> {
        match self
            .db_client
            .update_interaction_status(job_id, professional_id, from, to, has_unread)
            .await?
        {
            Some(row) => Ok(row),
            None => {
                let current = self
                    .db_client
                    .get_interaction(job_id, professional_id)
                    .await?;
                Err(stale_transition_error(
                    job_id,
                    professional_id,
                    current.map(|row| row.status),
                    to,
                ))
            }
        }
    }

    /// First engagement is an upsert: absent rows are created at `new`, a
    /// second view advances `new` to `viewed`, and anything beyond `viewed`
    /// is left untouched.
    pub async fn record_view(
        &self,
        job_id: Uuid,
        professional_id: Uuid,
    ) -> Result<JobInteraction, ServiceError> {
        self.require_job(job_id).await?;

        let existing = self
            .db_client
            .get_interaction(job_id, professional_id)
            .await?;

        match existing {
            None => Ok(self
                .db_client
                .upsert_interaction(job_id, professional_id)
                .await?),
            Some(row) if row.status == InteractionStatus::New => {
                let advanced = self
                    .db_client
                    .update_interaction_status(
                        job_id,
                        professional_id,
                        InteractionStatus::New,
                        InteractionStatus::Viewed,
                        None,
                    )
                    .await?;
                match advanced {
                    Some(row) => Ok(row),
                    // A concurrent contact or fan-out got there first; views
                    // beyond `new` are a no-op, so just hand back what is there.
                    None => self
                        .db_client
                        .get_interaction(job_id, professional_id)
                        .await?
                        .ok_or(ServiceError::InteractionNotFound(job_id, professional_id)),
                }
            }
            Some(row) => Ok(row),
        }
    }

    /// A first message is itself a contact event. Creates the row when the
    /// professional contacts without having viewed first, and flags the
    /// client's dashboard with `has_unread`.
    pub async fn record_contact(
        &self,
        job_id: Uuid,
        professional_id: Uuid,
    ) -> Result<JobInteraction, ServiceError> {
        self.require_job(job_id).await?;

        let current = match self
            .db_client
            .get_interaction(job_id, professional_id)
            .await?
        {
            Some(row) => row,
            None => {
                self.db_client
                    .upsert_interaction(job_id, professional_id)
                    .await?
            }
        };

        if !current
            .status
            .can_transition_to(InteractionStatus::Contacted)
        {
            return Err(ServiceError::InvalidInteractionTransition {
                job: job_id,
                from: current.status,
                to: InteractionStatus::Contacted,
            });
        }

        self.apply_transition(
            job_id,
            professional_id,
            current.status,
            InteractionStatus::Contacted,
            Some(true),
        )
        .await
    }

    pub async fn record_offer(
        &self,
        job_id: Uuid,
        professional_id: Uuid,
    ) -> Result<JobInteraction, ServiceError> {
        self.require_job(job_id).await?;

        let current = self
            .db_client
            .get_interaction(job_id, professional_id)
            .await?
            .ok_or(ServiceError::InteractionNotFound(job_id, professional_id))?;

        if !current.status.can_transition_to(InteractionStatus::Offered) {
            return Err(ServiceError::InvalidInteractionTransition {
                job: job_id,
                from: current.status,
                to: InteractionStatus::Offered,
            });
        }

        self.apply_transition(
            job_id,
            professional_id,
            current.status,
            InteractionStatus::Offered,
            None,
        )
        .await
    }

    /// The client accepts one professional's quote. In a single transaction,
    /// serialized per job by a row lock on the job row: the accepted
    /// interaction becomes `won`, every other `offered` row becomes `lost`,
    /// remaining non-terminal rows are archived, and the job moves to
    /// in_progress. Re-accepting an already-won pair is an idempotent no-op.
    pub async fn accept_offer(
        &self,
        job_id: Uuid,
        professional_id: Uuid,
        client_id: Uuid,
    ) -> Result<AcceptOfferResult, ServiceError> {
        let mut tx = self.db_client.pool.begin().await?;

        let job = sqlx::query_as::<_, Job>(
            r#"
            SELECT id, client_id, title, description, category, subcategory, location,
                   budget, images, status, created_at, updated_at
            FROM jobs
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(job_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ServiceError::JobNotFound(job_id))?;

        if job.client_id != client_id {
            return Err(ServiceError::Forbidden(client_id, job_id));
        }

        let rows = sqlx::query_as::<_, JobInteraction>(
            r#"
            SELECT id, job_id, professional_id, status, has_unread, created_at, updated_at
            FROM job_interactions
            WHERE job_id = $1
            FOR UPDATE
            "#,
        )
        .bind(job_id)
        .fetch_all(&mut *tx)
        .await?;

        let target = rows
            .iter()
            .find(|row| row.professional_id == professional_id)
            .cloned()
            .ok_or(ServiceError::InteractionNotFound(job_id, professional_id))?;

        // Double-tap on an already accepted quote: same end state, no writes.
        if target.status == InteractionStatus::Won
            && job.status_or_default() == JobStatus::InProgress
        {
            drop(tx);
            let interactions = self.interactions_snapshot(job_id).await?;
            return Ok(AcceptOfferResult { job, interactions });
        }

        if job.status_or_default() != JobStatus::Pending {
            return Err(ServiceError::InvalidJobTransition {
                job: job_id,
                from: job.status_or_default(),
                to: JobStatus::InProgress,
            });
        }

        if target.status != InteractionStatus::Offered {
            return Err(ServiceError::InvalidInteractionTransition {
                job: job_id,
                from: target.status,
                to: InteractionStatus::Won,
            });
        }

        sqlx::query(
            r#"
            UPDATE job_interactions
            SET status = 'won', updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(target.id)
        .execute(&mut *tx)
        .await?;

        let peers = resolve_peer_interactions(&rows, target.id);

        if !peers.lost.is_empty() {
            sqlx::query(
                r#"
                UPDATE job_interactions
                SET status = 'lost', updated_at = NOW()
                WHERE id = ANY($1)
                "#,
            )
            .bind(&peers.lost)
            .execute(&mut *tx)
            .await?;
        }

        if !peers.archived.is_empty() {
            sqlx::query(
                r#"
                UPDATE job_interactions
                SET status = 'archived', updated_at = NOW()
                WHERE id = ANY($1)
                "#,
            )
            .bind(&peers.archived)
            .execute(&mut *tx)
            .await?;
        }

        let updated_job = sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs
            SET status = 'in_progress', updated_at = NOW()
            WHERE id = $1
            RETURNING id, client_id, title, description, category, subcategory, location,
                      budget, images, status, created_at, updated_at
            "#,
        )
        .bind(job_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            job_id = %job_id,
            professional_id = %professional_id,
            "offer accepted, peer interactions resolved"
        );

        let interactions = self.interactions_snapshot(job_id).await?;

        Ok(AcceptOfferResult {
            job: updated_job,
            interactions,
        })
    }

    async fn interactions_snapshot(&self, job_id: Uuid) -> Result<Vec<JobInteraction>, ServiceError> {
        Ok(sqlx::query_as::<_, JobInteraction>(
            r#"
            SELECT id, job_id, professional_id, status, has_unread, created_at, updated_at
            FROM job_interactions
            WHERE job_id = $1
            ORDER BY updated_at DESC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.db_client.pool)
        .await?)
    }

    /// Professional withdraws or the client rejects explicitly.
    pub async fn reject(
        &self,
        job_id: Uuid,
        professional_id: Uuid,
        actor_id: Uuid,
    ) -> Result<JobInteraction, ServiceError> {
        let job = self.require_job(job_id).await?;

        if actor_id != professional_id && actor_id != job.client_id {
            return Err(ServiceError::Forbidden(actor_id, job_id));
        }

        self.transition_existing(job_id, professional_id, InteractionStatus::Rejected)
            .await
    }

    /// Professional files the job away without acting on it.
    pub async fn archive(
        &self,
        job_id: Uuid,
        professional_id: Uuid,
    ) -> Result<JobInteraction, ServiceError> {
        self.require_job(job_id).await?;
        self.transition_existing(job_id, professional_id, InteractionStatus::Archived)
            .await
    }

    async fn transition_existing(
        &self,
        job_id: Uuid,
        professional_id: Uuid,
        target: InteractionStatus,
    ) -> Result<JobInteraction, ServiceError> {
        let current = self
            .db_client
            .get_interaction(job_id, professional_id)
            .await?
            .ok_or(ServiceError::InteractionNotFound(job_id, professional_id))?;

        if !current.status.can_transition_to(target) {
            return Err(ServiceError::InvalidInteractionTransition {
                job: job_id,
                from: current.status,
                to: target,
            });
        }

        self.apply_transition(job_id, professional_id, current.status, target, None)
            .await
    }

    pub async fn list_for_job(
        &self,
        job_id: Uuid,
        client_id: Uuid,
    ) -> Result<Vec<JobInteractionWithProfessional>, ServiceError> {
        let job = self.require_job(job_id).await?;

        if job.client_id != client_id {
            return Err(ServiceError::Forbidden(client_id, job_id));
        }

        Ok(self.db_client.get_interactions_for_job(job_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;
    use InteractionStatus::*;

    fn row(status: InteractionStatus) -> JobInteraction {
        JobInteraction {
            id: Uuid::new_v4(),
            job_id: Uuid::new_v4(),
            professional_id: Uuid::new_v4(),
            status,
            has_unread: Some(false),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn competing_offers_lose_and_open_rows_archive() {
        let accepted = row(Offered);
        let other_offer = row(Offered);
        let viewed = row(Viewed);
        let contacted = row(Contacted);
        let rows = vec![
            accepted.clone(),
            other_offer.clone(),
            viewed.clone(),
            contacted.clone(),
        ];

        let peers = resolve_peer_interactions(&rows, accepted.id);

        assert_eq!(peers.lost, vec![other_offer.id]);
        assert_eq!(peers.archived, vec![viewed.id, contacted.id]);
    }

    #[test]
    fn accepted_row_is_never_resolved_as_peer() {
        let accepted = row(Offered);
        let peers = resolve_peer_interactions(&[accepted.clone()], accepted.id);
        assert_eq!(peers, PeerResolution::default());
    }

    #[test]
    fn terminal_peers_are_left_alone() {
        let accepted = row(Offered);
        let rows = vec![
            accepted.clone(),
            row(Lost),
            row(Rejected),
            row(Archived),
            row(Won),
        ];

        let peers = resolve_peer_interactions(&rows, accepted.id);

        assert!(peers.lost.is_empty());
        assert!(peers.archived.is_empty());
    }

    #[test]
    fn resolving_twice_is_a_no_op() {
        let accepted = row(Offered);
        let mut rows = vec![accepted.clone(), row(Offered), row(Contacted), row(New)];

        let first = resolve_peer_interactions(&rows, accepted.id);
        assert!(!first.lost.is_empty());
        assert!(!first.archived.is_empty());

        for r in rows.iter_mut() {
            if first.lost.contains(&r.id) {
                r.status = Lost;
            } else if first.archived.contains(&r.id) {
                r.status = Archived;
            }
        }
        rows[0].status = Won;

        let second = resolve_peer_interactions(&rows, accepted.id);
        assert_eq!(second, PeerResolution::default());
    }

    #[test]
    fn stale_write_reports_the_fresh_state() {
        let job_id = Uuid::new_v4();
        let professional_id = Uuid::new_v4();

        // An offer validated against `contacted` that lands after the row was
        // archived by a concurrent acceptance must surface as an invalid
        // archived -> offered move, not silently overwrite it.
        let err = stale_transition_error(job_id, professional_id, Some(Archived), Offered);
        match err {
            ServiceError::InvalidInteractionTransition { job, from, to } => {
                assert_eq!(job, job_id);
                assert_eq!(from, Archived);
                assert_eq!(to, Offered);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = stale_transition_error(job_id, professional_id, None, Offered);
        assert!(matches!(err, ServiceError::InteractionNotFound(j, p) if j == job_id && p == professional_id));
    }

    #[tokio::test]
    async fn interaction_service_compiles() {
        let pool = PgPool::connect_lazy("postgres://localhost/profix").unwrap();
        let db_client = Arc::new(DBClient::new(pool));
        let svc = InteractionService::new(db_client);

        let _ = svc.record_view(Uuid::nil(), Uuid::nil());
    }
}
