//! # EmployeeRepository
//!
//! グループ社員の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **フィルタ式の変換**: [`EmployeeFilter`] を WHERE 句に変換する。
//!   値はすべて `push_bind` でバインドし、SQL 文字列に埋め込まない
//! - **フィールドマスク**: 選択されていないカラムは空値リテラルで返す
//! - **採番**: ID はストアが `emp_<UUID v7>` 形式で採番する
//! - **一意性は強制しない**: `(email, parent)` の重複検査は API 境界の責務

use async_trait::async_trait;
use grouplink_domain::{
    employee::{Employee, EmployeeField, EmployeeFieldMask, EmployeeFilter, NewEmployee},
    id::{self, EMPLOYEE_ID_PREFIX},
};
use serde_json::{Map, Value};
use sqlx::{PgPool, Postgres, QueryBuilder, types::Json};

use crate::error::InfraError;

/// 社員リポジトリトレイト
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// 条件に一致する社員の一覧を取得する
    async fn list(
        &self,
        mask: &EmployeeFieldMask,
        filter: &EmployeeFilter,
    ) -> Result<Vec<Employee>, InfraError>;

    /// 条件に一致する社員を 1 件取得する
    ///
    /// 一致する社員がいない場合は `InfraErrorKind::NotFound` を返す。
    async fn get(
        &self,
        mask: &EmployeeFieldMask,
        filter: &EmployeeFilter,
    ) -> Result<Employee, InfraError>;

    /// 社員を作成し、採番した ID を入力と同じ順序で返す
    async fn create(&self, employees: &[NewEmployee]) -> Result<Vec<String>, InfraError>;

    /// 条件に一致する社員を削除する
    ///
    /// 一致する社員がいなくてもエラーにしない。
    async fn delete(&self, filter: &EmployeeFilter) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の EmployeeRepository
#[derive(Debug, Clone)]
pub struct PostgresEmployeeRepository {
    pool: PgPool,
}

impl PostgresEmployeeRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// `employees` テーブルの行
///
/// `attributes` は JSONB のまま受け取り、`TryFrom` でオブジェクトとして検証する。
#[derive(Debug, sqlx::FromRow)]
struct EmployeeRow {
    id:         String,
    email:      String,
    parent:     String,
    attributes: Value,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = InfraError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        Ok(Employee {
            id:         row.id,
            email:      row.email,
            parent:     row.parent,
            attributes: serde_json::from_value::<Map<String, Value>>(row.attributes)?,
        })
    }
}

/// SELECT 句と FROM 句を組み立てる
fn push_select(builder: &mut QueryBuilder<'_, Postgres>, mask: &EmployeeFieldMask) {
    builder.push("SELECT id, ");
    builder.push(if mask.includes(EmployeeField::Email) {
        "email"
    } else {
        "''::text AS email"
    });
    builder.push(", ");
    builder.push(if mask.includes(EmployeeField::Parent) {
        "parent"
    } else {
        "''::text AS parent"
    });
    builder.push(", ");
    builder.push(if mask.includes(EmployeeField::Attributes) {
        "attributes"
    } else {
        "'{}'::jsonb AS attributes"
    });
    builder.push(" FROM employees WHERE ");
}

/// フィルタ式を WHERE 句の条件に変換する
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &EmployeeFilter) {
    match filter {
        EmployeeFilter::IdEq(id) => {
            builder.push("id = ").push_bind(id.clone());
        }
        EmployeeFilter::IdIn(ids) => {
            builder.push("id = ANY(").push_bind(ids.clone()).push(")");
        }
        EmployeeFilter::EmailEq(email) => {
            builder.push("email = ").push_bind(email.clone());
        }
        EmployeeFilter::ParentEq(parent) => {
            builder.push("parent = ").push_bind(parent.clone());
        }
        EmployeeFilter::And(filters) => push_group(builder, filters, " AND ", "TRUE"),
        EmployeeFilter::Or(filters) => push_group(builder, filters, " OR ", "FALSE"),
    }
}

/// 複合条件を括弧付きで連結する。空の場合は単位元を出力する
fn push_group(
    builder: &mut QueryBuilder<'_, Postgres>,
    filters: &[EmployeeFilter],
    separator: &str,
    identity: &str,
) {
    if filters.is_empty() {
        builder.push(identity);
        return;
    }

    builder.push("(");
    for (i, filter) in filters.iter().enumerate() {
        if i > 0 {
            builder.push(separator);
        }
        push_filter(builder, filter);
    }
    builder.push(")");
}

/// 一覧・単一取得用のクエリを組み立てる
fn select_query(mask: &EmployeeFieldMask, filter: &EmployeeFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("");
    push_select(&mut builder, mask);
    push_filter(&mut builder, filter);
    builder.push(" ORDER BY created_at, id");
    builder
}

#[async_trait]
impl EmployeeRepository for PostgresEmployeeRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn list(
        &self,
        mask: &EmployeeFieldMask,
        filter: &EmployeeFilter,
    ) -> Result<Vec<Employee>, InfraError> {
        let rows = select_query(mask, filter)
            .build_query_as::<EmployeeRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Employee::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn get(
        &self,
        mask: &EmployeeFieldMask,
        filter: &EmployeeFilter,
    ) -> Result<Employee, InfraError> {
        let mut builder = select_query(mask, filter);
        builder.push(" LIMIT 1");

        let row = builder
            .build_query_as::<EmployeeRow>()
            .fetch_optional(&self.pool)
            .await?;

        row.map(Employee::try_from)
            .transpose()?
            .ok_or_else(|| InfraError::not_found("Employee"))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(count = employees.len()))]
    async fn create(&self, employees: &[NewEmployee]) -> Result<Vec<String>, InfraError> {
        if employees.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = employees
            .iter()
            .map(|_| id::generate(EMPLOYEE_ID_PREFIX))
            .collect();

        let mut builder = QueryBuilder::new("INSERT INTO employees (id, parent, email, attributes) ");
        builder.push_values(employees.iter().zip(&ids), |mut row, (employee, id)| {
            row.push_bind(id.clone())
                .push_bind(employee.parent.clone())
                .push_bind(employee.email.clone())
                .push_bind(Json(employee.attributes.clone()));
        });

        let result = builder.build().execute(&self.pool).await?;
        if result.rows_affected() != ids.len() as u64 {
            return Err(InfraError::unexpected(format!(
                "社員の作成件数が一致しません: expected={}, actual={}",
                ids.len(),
                result.rows_affected()
            )));
        }

        Ok(ids)
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn delete(&self, filter: &EmployeeFilter) -> Result<(), InfraError> {
        let mut builder = QueryBuilder::new("DELETE FROM employees WHERE ");
        push_filter(&mut builder, filter);

        let result = builder.build().execute(&self.pool).await?;
        tracing::debug!(deleted = result.rows_affected(), "社員を削除しました");

        Ok(())
    }
}
