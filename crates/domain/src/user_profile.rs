//! # ユーザープロフィール
//!
//! このサービスからは読み取り専用。社員作成時に、
//! メールアドレスが既存ユーザーのものかを確認するためだけに使う。

use serde::{Deserialize, Serialize};

/// ユーザープロフィール
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id:         String,
    pub email:      String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name:  Option<String>,
}

/// ユーザープロフィールの検索条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserProfileFilter {
    IdEq(String),
    EmailEq(String),
}

impl UserProfileFilter {
    /// プロフィールがこの条件に一致するかをメモリ上で評価する
    pub fn matches(&self, profile: &UserProfile) -> bool {
        match self {
            Self::IdEq(id) => profile.id == *id,
            Self::EmailEq(email) => profile.email == *email,
        }
    }
}
