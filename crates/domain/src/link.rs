//! # リンク
//!
//! 2 つのリソース ID を結ぶ、種別付きの有向な関連。
//!
//! このサービスが扱うのは「グループ社員 → 会社」の関連のみで、
//! 種別は [`LinkType::GROUP_EMPLOYEE_COMPANY`] に固定される。
//!
//! ```text
//! first_resource_id (社員 ID) ──GROUP_EMPLOYEE_COMPANY──▶ second_resource_id (会社 ID)
//! ```
//!
//! 同じ組のリンクを複数作成してもよい。更新と削除はこのサービスでは提供しない。

use std::{borrow::Cow, fmt};

use serde::{Deserialize, Serialize};

/// リンク種別
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkType(Cow<'static, str>);

impl LinkType {
    /// グループ社員が会社に所属することを表す種別
    pub const GROUP_EMPLOYEE_COMPANY: LinkType = LinkType(Cow::Borrowed("GROUP_EMPLOYEE_COMPANY"));

    /// 任意の種別を作成する
    pub fn new(value: impl Into<String>) -> Self {
        Self(Cow::Owned(value.into()))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// リンク
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub first_resource_id:  String,
    pub second_resource_id: String,
    pub link_type:          LinkType,
}

impl Link {
    /// 社員を会社に結ぶリンクを作成する
    pub fn group_employee_company(
        employee_id: impl Into<String>,
        company_id: impl Into<String>,
    ) -> Self {
        Self {
            first_resource_id:  employee_id.into(),
            second_resource_id: company_id.into(),
            link_type:          LinkType::GROUP_EMPLOYEE_COMPANY,
        }
    }
}

/// リンク一覧の検索で照合する側のリソース
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkedResource {
    /// `first_resource_id` で照合する
    First(String),
    /// `second_resource_id` で照合する
    Second(String),
}

/// リンク一覧の検索条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLinksRequest {
    pub resource:  LinkedResource,
    pub link_type: LinkType,
}

impl ListLinksRequest {
    /// 会社に所属するグループ社員のリンクを検索する条件
    pub fn employees_of_company(company_id: impl Into<String>) -> Self {
        Self {
            resource:  LinkedResource::Second(company_id.into()),
            link_type: LinkType::GROUP_EMPLOYEE_COMPANY,
        }
    }

    /// リンクがこの条件に一致するかをメモリ上で評価する
    pub fn matches(&self, link: &Link) -> bool {
        let resource_matches = match &self.resource {
            LinkedResource::First(id) => link.first_resource_id == *id,
            LinkedResource::Second(id) => link.second_resource_id == *id,
        };
        resource_matches && link.link_type == self.link_type
    }
}
