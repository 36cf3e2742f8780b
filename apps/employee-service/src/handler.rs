//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックはユースケースに委譲

pub mod company;
pub mod employee;
pub mod health;

pub use company::{LinkEmployeeToCompanyRequest, link_employee_to_company, list_company_employees};
pub use employee::{
    EmployeeState,
    create_group_employee,
    delete_company_segment_employee,
    delete_group_employee,
    list_company_segment_employees,
    list_group_employees,
};
pub use health::{ReadinessState, health_check, readiness_check};
