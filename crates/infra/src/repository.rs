//! # リポジトリ
//!
//! 受付記録の永続化を担当する。

pub mod submission_repository;

pub use submission_repository::{DynamoDbSubmissionRepository, SubmissionRepository};
