//! 品項與庫存模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::apartment::ApartmentKey;

/// 品項目錄條目
///
/// 門窗類品項帶有寬高，用於與公寓開口尺寸精確比對
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// 品項ID
    pub id: i64,

    /// 品項名稱（門窗類固定為 "Door" / "Window"）
    pub name: String,

    /// 現有庫存（非負，一次扣減一單位）
    pub quantity: i32,

    /// 單價
    pub price: Decimal,

    /// 寬度（門窗類）
    pub width: Option<Decimal>,

    /// 高度（門窗類）
    pub height: Option<Decimal>,
}

impl Item {
    /// 創建新的品項
    pub fn new(id: i64, name: String, quantity: i32, price: Decimal) -> Self {
        Self {
            id,
            name,
            quantity,
            price,
            width: None,
            height: None,
        }
    }

    /// 建構器模式：設置尺寸
    pub fn with_dimensions(mut self, width: Decimal, height: Decimal) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// 檢查是否有現貨
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// 檢查名稱與尺寸是否完全符合
    pub fn matches(&self, name: &str, width: Decimal, height: Decimal) -> bool {
        self.name == name && self.width == Some(width) && self.height == Some(height)
    }
}

/// 公寓品項需求（連結列）
///
/// 記錄某公寓需要的品項與數量，與當下庫存無關
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApartmentItem {
    /// 品項ID
    pub item_id: i64,

    /// 公寓複合鍵
    pub apartment: ApartmentKey,

    /// 該公寓需要的數量
    pub quantity: i32,
}

impl ApartmentItem {
    pub fn new(item_id: i64, apartment: ApartmentKey, quantity: i32) -> Self {
        Self {
            item_id,
            apartment,
            quantity,
        }
    }
}
