//! # 受付記録
//!
//! 送信に成功した問い合わせをベストエフォートで記録する。
//! 記録先が未設定なら何もしない。書き込みに失敗してもログに残すだけで、
//! 呼び出し元の結果には影響させない。

use std::sync::Arc;

use contact_relay_domain::{Submission, audit_record::AuditRecord, clock::Clock};
use contact_relay_infra::repository::SubmissionRepository;
use contact_relay_shared::{
    event_log::{error, event},
    log_business_event,
};

/// 受付記録サービス
pub struct SubmissionRecorder {
    repository: Option<Arc<dyn SubmissionRepository>>,
    clock:      Arc<dyn Clock>,
}

impl SubmissionRecorder {
    pub fn new(repository: Option<Arc<dyn SubmissionRepository>>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// 記録先が設定されていない Recorder
    pub fn disabled(clock: Arc<dyn Clock>) -> Self {
        Self::new(None, clock)
    }

    /// 受付記録を 1 回だけ書き込む（失敗は握りつぶす）
    pub async fn record(&self, submission: &Submission) {
        let Some(repository) = &self.repository else {
            tracing::debug!("記録先テーブルが未設定のため受付記録をスキップします");
            return;
        };

        let record = AuditRecord::received(submission, self.clock.now());

        match repository.record(&record).await {
            Ok(()) => {
                log_business_event!(
                    event.category = event::category::CONTACT,
                    event.action = event::action::CONTACT_RECORDED,
                    event.entity_type = event::entity_type::AUDIT_RECORD,
                    event.entity_id = %record.id,
                    event.result = event::result::SUCCESS,
                    "受付記録を保存しました"
                );
            }
            Err(e) => {
                tracing::error!(
                    error.category = error::category::INFRASTRUCTURE,
                    error.kind = error::kind::DYNAMODB,
                    error = %e,
                    span_trace = %e.span_trace(),
                    "受付記録の保存に失敗"
                );
                log_business_event!(
                    event.category = event::category::CONTACT,
                    event.action = event::action::CONTACT_RECORD_FAILED,
                    event.entity_type = event::entity_type::AUDIT_RECORD,
                    event.entity_id = %record.id,
                    event.result = event::result::FAILURE,
                    "受付記録の保存に失敗"
                );
            }
        }
    }
}
