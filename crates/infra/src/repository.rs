//! # リポジトリ（ストア）
//!
//! 社員・ユーザープロフィール・リンクの各ストアのトレイトと PostgreSQL 実装。
//!
//! ## 設計方針
//!
//! - **トレイト境界**: ハンドラ層は `Arc<dyn Trait>` でストアを受け取る
//! - **検索条件は値で渡す**: ドメイン層のフィルタ式を受け取り、
//!   PostgreSQL 実装が `sqlx::QueryBuilder` でバインド付き SQL に変換する
//! - **NotFound は種別で返す**: 単一取得で対象がない場合は
//!   `InfraErrorKind::NotFound` を返す

pub mod employee_repository;
pub mod link_repository;
pub mod user_profile_repository;

pub use employee_repository::{EmployeeRepository, PostgresEmployeeRepository};
pub use link_repository::{LinkRepository, PostgresLinkRepository};
pub use user_profile_repository::{PostgresUserProfileRepository, UserProfileRepository};
