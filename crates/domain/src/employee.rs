//! # グループ社員
//!
//! グループ（親リソース）配下に所属する社員レコードと、
//! 社員ストアに渡す検索条件・取得フィールドの型を定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`Employee`] | グループ社員 | `parent` にグループ ID を持つ社員レコード |
//! | [`NewEmployee`] | 社員作成入力 | ストアが ID を採番する前の社員 |
//! | [`EmployeeFilter`] | 検索条件 | フィールド一致・IN・AND/OR の合成 |
//! | [`EmployeeFieldMask`] | 取得フィールド | ストアから返すフィールドの選択 |
//!
//! ## 不変条件
//!
//! - 同じ `(email, parent)` の組を持つ社員は 2 人以上存在しない
//!   （API 境界で検査する。ストアは強制しない）
//! - 既知フィールド以外の値は解釈せずに保持し、そのまま返す

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::DomainError;

/// グループ社員
///
/// JSON 表現は `id` / `email` / `parent` と、任意の追加フィールドをフラットに持つ。
///
/// ```
/// use grouplink_domain::employee::Employee;
///
/// let employee: Employee =
///     serde_json::from_str(r#"{"id":"grp_01","email":"a@x.com","first_name":"A"}"#).unwrap();
/// assert_eq!(employee.email, "a@x.com");
/// assert_eq!(employee.attributes["first_name"], "A");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Employee {
    /// 社員 ID
    ///
    /// 作成リクエストでは所属させたい親（グループ）を表す。
    #[serde(default)]
    pub id:         String,
    /// メールアドレス
    #[serde(default)]
    pub email:      String,
    /// 親リソース（グループ）の完全 ID
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub parent:     String,
    /// 未知のフィールド
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Employee {
    /// 作成に必須のメールアドレスを取り出す
    ///
    /// # エラー
    ///
    /// メールアドレスが空の場合は `DomainError::Validation` を返す。
    pub fn required_email(&self) -> Result<&str, DomainError> {
        if self.email.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスは必須です".to_string(),
            ));
        }
        Ok(&self.email)
    }

    /// 作成リクエストからストアに渡す入力を組み立てる
    ///
    /// リクエストの `id` は作成先の親コンテキストとして扱う。
    pub fn to_new_employee(&self) -> NewEmployee {
        NewEmployee {
            parent:     self.id.clone(),
            email:      self.email.clone(),
            attributes: self.attributes.clone(),
        }
    }
}

/// 社員作成入力
///
/// ID はストアが採番する。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewEmployee {
    pub parent:     String,
    pub email:      String,
    pub attributes: Map<String, Value>,
}

impl NewEmployee {
    /// 採番済み ID を付与して社員レコードにする
    pub fn into_employee(self, id: String) -> Employee {
        Employee {
            id,
            email: self.email,
            parent: self.parent,
            attributes: self.attributes,
        }
    }
}

// =============================================================================
// 検索条件
// =============================================================================

/// 社員の検索条件
///
/// 任意の組み合わせを表現できる小さなクエリ式。
///
/// - `And(vec![])` はすべてに一致する
/// - `Or(vec![])` と `IdIn(vec![])` は何にも一致しない
///
/// ```
/// use grouplink_domain::employee::EmployeeFilter;
///
/// let filter = EmployeeFilter::and([
///     EmployeeFilter::EmailEq("a@x.com".to_string()),
///     EmployeeFilter::ParentEq("grp_01".to_string()),
/// ]);
/// assert!(matches!(filter, EmployeeFilter::And(ref items) if items.len() == 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeFilter {
    IdEq(String),
    IdIn(Vec<String>),
    EmailEq(String),
    ParentEq(String),
    And(Vec<EmployeeFilter>),
    Or(Vec<EmployeeFilter>),
}

impl EmployeeFilter {
    /// 条件の論理積を作る
    pub fn and(filters: impl IntoIterator<Item = EmployeeFilter>) -> Self {
        Self::And(filters.into_iter().collect())
    }

    /// 条件の論理和を作る
    pub fn or(filters: impl IntoIterator<Item = EmployeeFilter>) -> Self {
        Self::Or(filters.into_iter().collect())
    }

    /// 社員がこの条件に一致するかをメモリ上で評価する
    pub fn matches(&self, employee: &Employee) -> bool {
        match self {
            Self::IdEq(id) => employee.id == *id,
            Self::IdIn(ids) => ids.contains(&employee.id),
            Self::EmailEq(email) => employee.email == *email,
            Self::ParentEq(parent) => employee.parent == *parent,
            Self::And(filters) => filters.iter().all(|f| f.matches(employee)),
            Self::Or(filters) => filters.iter().any(|f| f.matches(employee)),
        }
    }
}

// =============================================================================
// 取得フィールド
// =============================================================================

/// 選択可能な社員フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmployeeField {
    Email,
    Parent,
    Attributes,
}

/// ストアから返すフィールドの選択
///
/// `id` は常に返す。`Only` に含まれないフィールドは空値になる。
/// `Only(vec![])` は `All` と同じ扱い。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EmployeeFieldMask {
    #[default]
    All,
    Only(Vec<EmployeeField>),
}

impl EmployeeFieldMask {
    /// フィールドが選択されているか
    pub fn includes(&self, field: EmployeeField) -> bool {
        match self {
            Self::All => true,
            Self::Only(fields) => fields.is_empty() || fields.contains(&field),
        }
    }

    /// 選択されていないフィールドを空にする
    pub fn apply(&self, mut employee: Employee) -> Employee {
        if !self.includes(EmployeeField::Email) {
            employee.email.clear();
        }
        if !self.includes(EmployeeField::Parent) {
            employee.parent.clear();
        }
        if !self.includes(EmployeeField::Attributes) {
            employee.attributes.clear();
        }
        employee
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn employee(id: &str, email: &str, parent: &str) -> Employee {
        Employee {
            id:         id.to_string(),
            email:      email.to_string(),
            parent:     parent.to_string(),
            attributes: Map::new(),
        }
    }

    // ===== シリアライズ =====

    #[test]
    fn test_未知のフィールドがそのまま往復する() {
        let body = json!({
            "id": "grp_01",
            "email": "a@x.com",
            "first_name": "Alice",
            "metadata": { "team": "ops" }
        });

        let parsed: Employee = serde_json::from_value(body.clone()).unwrap();
        let serialized = serde_json::to_value(&parsed).unwrap();

        assert_eq!(serialized, body);
    }

    #[test]
    fn test_空のparentはシリアライズされない() {
        let json = serde_json::to_value(employee("emp_1", "a@x.com", "")).unwrap();

        assert!(json.get("parent").is_none());
    }

    #[test]
    fn test_フィールドが欠けていても空値でデシリアライズできる() {
        let parsed: Employee = serde_json::from_str("{}").unwrap();

        assert_eq!(parsed, Employee::default());
    }

    // ===== required_email =====

    #[test]
    fn test_required_emailが空ならバリデーションエラー() {
        let result = employee("grp_01", "", "").required_email().map(str::to_string);

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_required_emailがメールアドレスを返す() {
        let target = employee("grp_01", "a@x.com", "");

        assert_eq!(target.required_email().unwrap(), "a@x.com");
    }

    // ===== to_new_employee =====

    #[test]
    fn test_to_new_employeeはidを親として扱う() {
        let mut request = employee("grp_01", "a@x.com", "");
        request.attributes.insert("first_name".to_string(), json!("Alice"));

        let new_employee = request.to_new_employee();

        assert_eq!(new_employee.parent, "grp_01");
        assert_eq!(new_employee.email, "a@x.com");
        assert_eq!(new_employee.attributes["first_name"], "Alice");
    }

    // ===== EmployeeFilter =====

    #[rstest]
    #[case(EmployeeFilter::IdEq("emp_1".to_string()), true)]
    #[case(EmployeeFilter::IdEq("emp_2".to_string()), false)]
    #[case(EmployeeFilter::IdIn(vec!["emp_0".to_string(), "emp_1".to_string()]), true)]
    #[case(EmployeeFilter::IdIn(vec![]), false)]
    #[case(EmployeeFilter::EmailEq("a@x.com".to_string()), true)]
    #[case(EmployeeFilter::ParentEq("grp_02".to_string()), false)]
    #[case(EmployeeFilter::And(vec![]), true)]
    #[case(EmployeeFilter::Or(vec![]), false)]
    #[case(
        EmployeeFilter::and([
            EmployeeFilter::EmailEq("a@x.com".to_string()),
            EmployeeFilter::ParentEq("grp_01".to_string()),
        ]),
        true
    )]
    #[case(
        EmployeeFilter::and([
            EmployeeFilter::EmailEq("a@x.com".to_string()),
            EmployeeFilter::ParentEq("grp_02".to_string()),
        ]),
        false
    )]
    #[case(
        EmployeeFilter::or([
            EmployeeFilter::ParentEq("grp_02".to_string()),
            EmployeeFilter::IdEq("emp_1".to_string()),
        ]),
        true
    )]
    fn test_matchesが条件を評価する(#[case] filter: EmployeeFilter, #[case] expected: bool) {
        let target = employee("emp_1", "a@x.com", "grp_01");

        assert_eq!(filter.matches(&target), expected);
    }

    // ===== EmployeeFieldMask =====

    #[test]
    fn test_allは全フィールドを残す() {
        let mut target = employee("emp_1", "a@x.com", "grp_01");
        target.attributes.insert("k".to_string(), json!(1));

        assert_eq!(EmployeeFieldMask::All.apply(target.clone()), target);
    }

    #[test]
    fn test_空のonlyはallと同じ扱い() {
        let mask = EmployeeFieldMask::Only(vec![]);

        assert!(mask.includes(EmployeeField::Email));
        assert!(mask.includes(EmployeeField::Parent));
        assert!(mask.includes(EmployeeField::Attributes));
    }

    #[test]
    fn test_onlyは選択外のフィールドを空にする() {
        let mut target = employee("emp_1", "a@x.com", "grp_01");
        target.attributes.insert("k".to_string(), json!(1));

        let masked = EmployeeFieldMask::Only(vec![EmployeeField::Email]).apply(target);

        assert_eq!(masked, employee("emp_1", "a@x.com", ""));
    }
}
