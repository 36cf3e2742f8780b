//! # ドメイン層エラー定義
//!
//! 入力値がドメインのルールに違反している場合のエラー型。
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 必須フィールドの欠落や不正なフォーマットなど。
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}
