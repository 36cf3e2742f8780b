//! # Employee Service ライブラリ
//!
//! グループ社員と会社リンクを扱う REST API のハンドラ・ユースケースを公開する。
//! 統合テストからルーターを組み立てられるよう、ライブラリとして分離している。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
