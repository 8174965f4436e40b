//! # Fitout Core
//!
//! 核心資料模型與類型定義

pub mod apartment;
pub mod contract;
pub mod item;
pub mod schedule;
pub mod shortage;
pub mod store;

// Re-export 主要類型
pub use apartment::{Apartment, ApartmentKey, ApartmentStatus, Opening, OpeningKind};
pub use contract::{Contract, ContractStatus, ContractType};
pub use item::{ApartmentItem, Item};
pub use schedule::{CompletionRow, ScheduleItem, ScheduleJoinRow, ScheduleLink, WorkType};
pub use shortage::{Shortage, ShortageStatus};
pub use store::PlanStore;

/// 履約引擎錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("無效的輸入: {0}")]
    Validation(String),

    #[error("違反參照完整性: {0}")]
    ReferentialViolation(String),

    #[error("找不到合約: {0}")]
    ContractNotFound(i64),

    #[error("找不到排程項目: {0}")]
    ScheduleItemNotFound(i64),

    #[error("儲存層錯誤: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;
