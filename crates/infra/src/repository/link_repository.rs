//! # LinkRepository
//!
//! リソース間の有向リンクの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **参照整合性は検査しない**: リンク元・リンク先の存在確認は行わない
//! - **重複を許容する**: 同じリンクを複数回追加すると重複行になる
//! - **一括追加**: 複数リンクを 1 文の INSERT で追加する

use async_trait::async_trait;
use grouplink_domain::link::{Link, LinkType, LinkedResource, ListLinksRequest};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::error::InfraError;

/// リンクリポジトリトレイト
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// 条件に一致するリンクを追加順に取得する
    async fn list(&self, request: &ListLinksRequest) -> Result<Vec<Link>, InfraError>;

    /// リンクを追加する
    async fn add(&self, links: &[Link]) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の LinkRepository
#[derive(Debug, Clone)]
pub struct PostgresLinkRepository {
    pool: PgPool,
}

impl PostgresLinkRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LinkRow {
    first_resource_id:  String,
    second_resource_id: String,
    link_type:          String,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link {
            first_resource_id:  row.first_resource_id,
            second_resource_id: row.second_resource_id,
            link_type:          LinkType::new(row.link_type),
        }
    }
}

fn list_query(request: &ListLinksRequest) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(
        "SELECT first_resource_id, second_resource_id, link_type FROM links WHERE ",
    );
    match &request.resource {
        LinkedResource::First(id) => builder.push("first_resource_id = ").push_bind(id.clone()),
        LinkedResource::Second(id) => builder.push("second_resource_id = ").push_bind(id.clone()),
    };
    builder
        .push(" AND link_type = ")
        .push_bind(request.link_type.as_str().to_string())
        .push(" ORDER BY id");
    builder
}

#[async_trait]
impl LinkRepository for PostgresLinkRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(link_type = %request.link_type))]
    async fn list(&self, request: &ListLinksRequest) -> Result<Vec<Link>, InfraError> {
        let rows = list_query(request)
            .build_query_as::<LinkRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(count = links.len()))]
    async fn add(&self, links: &[Link]) -> Result<(), InfraError> {
        if links.is_empty() {
            return Ok(());
        }

        let mut builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO links (first_resource_id, second_resource_id, link_type) ",
        );
        builder.push_values(links, |mut row, link| {
            row.push_bind(link.first_resource_id.clone())
                .push_bind(link.second_resource_id.clone())
                .push_bind(link.link_type.as_str().to_string());
        });
        builder.build().execute(&self.pool).await?;

        Ok(())
    }
}
