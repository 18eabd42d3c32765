//! Evaluation service - recording and reading quality evaluations.
//!
//! Scores and percentages are stored as submitted. Recording checks that
//! every referenced rubric row exists and that no score exceeds the
//! subcharacteristic's max.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use super::software_service::owned_software;
use crate::domain::{Evaluation, EvaluationReport, NewEvaluation};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait EvaluationService: Send + Sync {
    /// Record an evaluation of an owned project in one transaction
    async fn record_evaluation(
        &self,
        software_id: i32,
        user_id: i32,
        request: NewEvaluation,
    ) -> AppResult<EvaluationReport>;

    /// Evaluations of an owned project, newest first
    async fn list_evaluations(&self, software_id: i32, user_id: i32) -> AppResult<Vec<Evaluation>>;

    /// One evaluation with its details and summaries
    async fn get_evaluation(
        &self,
        software_id: i32,
        evaluation_id: i32,
        user_id: i32,
    ) -> AppResult<EvaluationReport>;
}

/// Concrete implementation of EvaluationService using Unit of Work.
pub struct EvaluationManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> EvaluationManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> EvaluationService for EvaluationManager<U> {
    async fn record_evaluation(
        &self,
        software_id: i32,
        user_id: i32,
        request: NewEvaluation,
    ) -> AppResult<EvaluationReport> {
        let software = owned_software(self.uow.as_ref(), software_id, user_id).await?;

        let report = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let rubric = ctx.rubric();
                    let repo = ctx.evaluations();

                    let sub_ids: Vec<i32> = request
                        .details
                        .iter()
                        .map(|d| d.subcharacteristic_id)
                        .collect();
                    let subcharacteristics: HashMap<_, _> = rubric
                        .find_subcharacteristics(&sub_ids)
                        .await?
                        .into_iter()
                        .map(|s| (s.id, s))
                        .collect();

                    let char_ids: Vec<i32> = request
                        .characteristic_summaries
                        .iter()
                        .map(|s| s.characteristic_id)
                        .collect();
                    let characteristics: HashMap<_, _> = rubric
                        .find_characteristics(&char_ids)
                        .await?
                        .into_iter()
                        .map(|c| (c.id, c))
                        .collect();

                    let evaluation = repo
                        .create(software.id, request.global_score_percentage)
                        .await?;

                    let mut details = Vec::with_capacity(request.details.len());
                    for detail in request.details {
                        let sub = subcharacteristics
                            .get(&detail.subcharacteristic_id)
                            .ok_or_else(|| {
                                AppError::bad_request(format!(
                                    "La subcaracterística {} no existe",
                                    detail.subcharacteristic_id
                                ))
                            })?;
                        if detail.score > sub.max_score {
                            return Err(AppError::bad_request(format!(
                                "El puntaje de '{}' no puede superar {}",
                                sub.name, sub.max_score
                            )));
                        }
                        details.push(
                            repo.add_detail(evaluation.id, sub, detail.score, detail.comment)
                                .await?,
                        );
                    }

                    let mut summaries = Vec::with_capacity(request.characteristic_summaries.len());
                    for summary in &request.characteristic_summaries {
                        let characteristic = characteristics
                            .get(&summary.characteristic_id)
                            .ok_or_else(|| {
                                AppError::bad_request(format!(
                                    "La característica {} no existe",
                                    summary.characteristic_id
                                ))
                            })?;
                        summaries.push(
                            repo.add_summary(evaluation.id, characteristic, summary)
                                .await?,
                        );
                    }

                    Ok(EvaluationReport {
                        evaluation,
                        details,
                        characteristic_summaries: summaries,
                    })
                })
            })
            .await?;

        tracing::info!(
            software_id,
            evaluation_id = report.evaluation.id,
            details = report.details.len(),
            "Evaluation recorded"
        );
        Ok(report)
    }

    async fn list_evaluations(&self, software_id: i32, user_id: i32) -> AppResult<Vec<Evaluation>> {
        let software = owned_software(self.uow.as_ref(), software_id, user_id).await?;
        self.uow.evaluations().list_for_software(software.id).await
    }

    async fn get_evaluation(
        &self,
        software_id: i32,
        evaluation_id: i32,
        user_id: i32,
    ) -> AppResult<EvaluationReport> {
        let software = owned_software(self.uow.as_ref(), software_id, user_id).await?;
        self.uow
            .evaluations()
            .find_report(software.id, evaluation_id)
            .await?
            .ok_or_not_found()
    }
}
