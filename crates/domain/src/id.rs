//! # ID ユーティリティ
//!
//! リソース ID の正規化と採番を行う。
//!
//! ## ID の形式
//!
//! 外部から渡される ID は次のいずれかの形をとる:
//!
//! | 形式 | 例 |
//! |------|----|
//! | 内部 ID | `emp_0190c3a4b2e07d8a9f1e3c5a7b9d1f20` |
//! | パス形式（親リソース付き） | `groups/grp_01/emp_0190c3a4...` |
//! | 任意の不透明な文字列 | `legacy-42` |
//!
//! ストアは内部 ID（パスの最後のセグメント）で検索するため、
//! 外部入力は [`normalize`] を通してから使う。

use uuid::Uuid;

/// 社員 ID のプレフィックス
pub const EMPLOYEE_ID_PREFIX: &str = "emp";

/// 外部から渡された ID を内部 ID に正規化する
///
/// 前後の空白を除去し、`/` 区切りの最後のセグメントを返す。
/// `/` を含まない ID はそのまま返す。
///
/// ```
/// use grouplink_domain::id::normalize;
///
/// assert_eq!(normalize("groups/grp_01/emp_42"), "emp_42");
/// assert_eq!(normalize("emp_42"), "emp_42");
/// ```
pub fn normalize(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.rsplit_once('/') {
        Some((_, last)) => last,
        None => trimmed,
    }
}

/// プレフィックス付きの新しい内部 ID を生成する（UUID v7）
///
/// UUID v7 のため生成順にソート可能。
pub fn generate(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::now_v7().simple())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("emp_42", "emp_42")]
    #[case("groups/grp_01/emp_42", "emp_42")]
    #[case("employees/emp_42", "emp_42")]
    #[case("  emp_42 ", "emp_42")]
    #[case("groups/grp_01/", "")]
    #[case("", "")]
    fn test_normalizeが最後のセグメントを返す(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize(raw), expected);
    }

    #[test]
    fn test_generateがプレフィックス付きのidを返す() {
        let id = generate(EMPLOYEE_ID_PREFIX);

        assert!(id.starts_with("emp_"));
        assert_eq!(id.len(), "emp_".len() + 32);
    }

    #[test]
    fn test_generateは呼び出しごとに異なるidを返す() {
        assert_ne!(generate("emp"), generate("emp"));
    }
}
