//! # UserProfileRepository
//!
//! ユーザープロフィールの参照を担当するリポジトリ。
//!
//! 社員作成時に、作成するメールアドレスのユーザーが存在するかを
//! 確認するために使う。プロフィールの作成・更新はこのサービスの責務外。

use async_trait::async_trait;
use grouplink_domain::user_profile::{UserProfile, UserProfileFilter};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::error::InfraError;

/// ユーザープロフィールリポジトリトレイト
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    /// 条件に一致するプロフィールを 1 件取得する
    ///
    /// 一致するプロフィールがない場合は `InfraErrorKind::NotFound` を返す。
    async fn get(&self, filter: &UserProfileFilter) -> Result<UserProfile, InfraError>;
}

/// PostgreSQL 実装の UserProfileRepository
#[derive(Debug, Clone)]
pub struct PostgresUserProfileRepository {
    pool: PgPool,
}

impl PostgresUserProfileRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserProfileRow {
    id:         String,
    email:      String,
    first_name: Option<String>,
    last_name:  Option<String>,
}

impl From<UserProfileRow> for UserProfile {
    fn from(row: UserProfileRow) -> Self {
        UserProfile {
            id:         row.id,
            email:      row.email,
            first_name: row.first_name,
            last_name:  row.last_name,
        }
    }
}

fn select_query(filter: &UserProfileFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(
        "SELECT id, email, first_name, last_name FROM user_profiles WHERE ",
    );
    match filter {
        UserProfileFilter::IdEq(id) => builder.push("id = ").push_bind(id.clone()),
        UserProfileFilter::EmailEq(email) => builder.push("email = ").push_bind(email.clone()),
    };
    builder.push(" LIMIT 1");
    builder
}

#[async_trait]
impl UserProfileRepository for PostgresUserProfileRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn get(&self, filter: &UserProfileFilter) -> Result<UserProfile, InfraError> {
        let row = select_query(filter)
            .build_query_as::<UserProfileRow>()
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserProfile::from)
            .ok_or_else(|| InfraError::not_found("UserProfile"))
    }
}
