//! # GroupLink ドメイン層
//!
//! グループ社員・ユーザープロフィール・リンクのドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **値の持ち回り**: 社員レコードの未知フィールドは解釈せずにそのまま保持する
//! - **クエリ式**: ストアへの検索条件は型付きのフィルタ式で表現し、
//!   SQL 組み立てやインメモリ評価はインフラ層・テストで行う
//! - **インフラ非依存**: このクレートは DB や HTTP に一切依存しない
//!
//! ## 依存関係の方向
//!
//! ```text
//! employee-service → infra → domain
//!          ↘                  ↑
//!            ─────────────────
//! ```
//!
//! ## モジュール構成
//!
//! - [`employee`] - 社員エンティティ、フィルタ式、フィールドマスク
//! - [`user_profile`] - ユーザープロフィール（読み取り専用）
//! - [`link`] - リソース間の有向リンクとリンク種別
//! - [`id`] - ID の正規化と採番
//! - [`error`] - ドメイン層エラー

pub mod employee;
pub mod error;
pub mod id;
pub mod link;
pub mod user_profile;

pub use error::DomainError;
