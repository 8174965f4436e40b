//! 公寓（住宅單位）模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 公寓狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApartmentStatus {
    /// 待施工
    Pending,
    /// 已完工
    Complete,
}

/// 開口類型（門或窗）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpeningKind {
    /// 門
    Door,
    /// 窗
    Window,
}

impl OpeningKind {
    /// 對應的品項目錄名稱
    pub fn catalog_name(self) -> &'static str {
        match self {
            OpeningKind::Door => "Door",
            OpeningKind::Window => "Window",
        }
    }
}

/// 開口尺寸（寬 × 高）
///
/// 只有寬高皆有值時才構成開口，用 `Option<Opening>` 在類型上保證
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opening {
    /// 寬度
    pub width: Decimal,
    /// 高度
    pub height: Decimal,
}

impl Opening {
    pub fn new(width: Decimal, height: Decimal) -> Self {
        Self { width, height }
    }
}

/// 公寓複合鍵：(合約, 樓層, 門牌號)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApartmentKey {
    /// 合約ID
    pub contract_id: i64,
    /// 樓層
    pub floor: i32,
    /// 門牌號
    pub number: i32,
}

impl ApartmentKey {
    pub fn new(contract_id: i64, floor: i32, number: i32) -> Self {
        Self {
            contract_id,
            floor,
            number,
        }
    }

    /// 排程連結比對用的 (樓層, 門牌號) 鍵（合約由排程項目隱含）
    pub fn position(&self) -> (i32, i32) {
        (self.floor, self.number)
    }
}

/// 公寓
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Apartment {
    /// 所屬合約ID
    pub contract_id: i64,

    /// 樓層
    pub floor: i32,

    /// 門牌號
    pub number: i32,

    /// 窗開口（寬高皆有才存在）
    pub window: Option<Opening>,

    /// 門開口（寬高皆有才存在）
    pub door: Option<Opening>,

    /// 施工狀態
    pub status: ApartmentStatus,
}

impl Apartment {
    /// 創建新的公寓（無開口、狀態待施工）
    pub fn new(contract_id: i64, floor: i32, number: i32) -> Self {
        Self {
            contract_id,
            floor,
            number,
            window: None,
            door: None,
            status: ApartmentStatus::Pending,
        }
    }

    /// 建構器模式：設置窗開口
    pub fn with_window(mut self, width: Decimal, height: Decimal) -> Self {
        self.window = Some(Opening::new(width, height));
        self
    }

    /// 建構器模式：設置門開口
    pub fn with_door(mut self, width: Decimal, height: Decimal) -> Self {
        self.door = Some(Opening::new(width, height));
        self
    }

    /// 建構器模式：設置狀態
    pub fn with_status(mut self, status: ApartmentStatus) -> Self {
        self.status = status;
        self
    }

    /// 公寓複合鍵
    pub fn key(&self) -> ApartmentKey {
        ApartmentKey::new(self.contract_id, self.floor, self.number)
    }

    /// 取得指定類型的開口
    pub fn opening(&self, kind: OpeningKind) -> Option<Opening> {
        match kind {
            OpeningKind::Door => self.door,
            OpeningKind::Window => self.window,
        }
    }
}
