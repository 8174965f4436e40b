//! 缺料模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 缺料狀態
///
/// 只會單向前進 `Pending → Ordered → Complete`，缺料紀錄不會被自動刪除
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShortageStatus {
    /// 待叫料
    Pending,
    /// 已下單
    Ordered,
    /// 已到貨
    Complete,
}

impl ShortageStatus {
    /// 下一個狀態（已到貨後維持不變）
    pub fn advanced(self) -> ShortageStatus {
        match self {
            ShortageStatus::Pending => ShortageStatus::Ordered,
            ShortageStatus::Ordered | ShortageStatus::Complete => ShortageStatus::Complete,
        }
    }
}

/// 缺料紀錄：庫存不足時產生，等待採購補足
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shortage {
    /// 缺料ID
    pub id: i64,

    /// 缺料品項ID
    pub item_id: i64,

    /// 缺少數量
    pub amount: i32,

    /// 需補足期限
    pub due_date: NaiveDate,

    /// 處理狀態
    pub status: ShortageStatus,
}

impl Shortage {
    /// 創建新的缺料紀錄（狀態為待叫料）
    pub fn new(id: i64, item_id: i64, amount: i32, due_date: NaiveDate) -> Self {
        Self {
            id,
            item_id,
            amount,
            due_date,
            status: ShortageStatus::Pending,
        }
    }

    /// 檢查缺料是否尚未結案
    pub fn is_open(&self) -> bool {
        self.status != ShortageStatus::Complete
    }
}
