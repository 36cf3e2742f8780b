//! # ユースケース層
//!
//! Employee Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリを `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラはリクエストのデコードだけを行い、検証順序はユースケースに集約

pub mod employee;

pub use employee::EmployeeUseCaseImpl;
