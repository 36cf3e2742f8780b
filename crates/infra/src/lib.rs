//! # GroupLink インフラ層
//!
//! 外部システム（PostgreSQL）との接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートは社員・ユーザープロフィール・リンクの各ストアを
//! リポジトリトレイトとして定義し、PostgreSQL 実装を提供する。
//! ハンドラ層はトレイト経由でストアを使うため、テストではインメモリの
//! モック（`test-utils` feature）に差し替えられる。
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL 接続プールの作成・疎通確認・マイグレーション
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - ストアのトレイトと PostgreSQL 実装
//! - `mock` - テスト用インメモリストア（`test-utils` feature）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use grouplink_infra::{db, repository::PostgresEmployeeRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("postgres://localhost/grouplink", 10).await?;
//!     db::ping(&pool).await?;
//!     let employees = PostgresEmployeeRepository::new(pool.clone());
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
