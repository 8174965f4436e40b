//! 排程模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::apartment::{Apartment, ApartmentKey, ApartmentStatus};
use crate::item::Item;

/// 工項類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkType {
    /// 安裝框體
    InstallFrame,
    /// 安裝門窗扇
    InstallContents,
}

/// 排程項目：指派給工班的一筆工作
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleItem {
    /// 排程項目ID
    pub id: i64,

    /// 施工日期
    pub date: NaiveDate,

    /// 所屬合約ID
    pub contract_id: i64,

    /// 工項類型
    pub work_type: WorkType,

    /// 指派工班ID
    pub team_id: i64,

    /// 備註
    pub description: Option<String>,
}

impl ScheduleItem {
    /// 創建新的排程項目
    pub fn new(id: i64, date: NaiveDate, contract_id: i64, work_type: WorkType, team_id: i64) -> Self {
        Self {
            id,
            date,
            contract_id,
            work_type,
            team_id,
            description: None,
        }
    }

    /// 建構器模式：設置備註
    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }
}

/// 排程項目與公寓的連結列
///
/// 此集合在排程建立後仍可變動，是差異比對演算法的對象
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleLink {
    /// 排程項目ID
    pub schedule_id: i64,

    /// 公寓複合鍵
    pub apartment: ApartmentKey,
}

impl ScheduleLink {
    pub fn new(schedule_id: i64, apartment: ApartmentKey) -> Self {
        Self {
            schedule_id,
            apartment,
        }
    }
}

/// 工班排程查詢的扁平連接列
///
/// 一列 = 排程項目 × 公寓 × 公寓品項需求 × 品項目錄，
/// 已依工班過濾、依施工日期遞增排序
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleJoinRow {
    /// 排程項目
    pub schedule_item: ScheduleItem,

    /// 合約工地地址
    pub address: String,

    /// 連結的公寓
    pub apartment: Apartment,

    /// 需求品項（目錄資料）
    pub item: Item,

    /// 該公寓的需求數量（取代目錄庫存量）
    pub link_quantity: i32,
}

/// 排程完工盤點列：排程項目 × 其連結公寓的施工狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRow {
    /// 排程項目ID
    pub schedule_id: i64,

    /// 連結公寓的狀態
    pub status: ApartmentStatus,
}
