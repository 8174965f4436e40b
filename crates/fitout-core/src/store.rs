//! 關聯式儲存層介面
//!
//! 引擎透過此 trait 與儲存層協作，不依賴任何特定資料庫。
//! 單次引擎呼叫內的所有寫入應由呼叫端包在同一個交易邊界內；
//! 引擎本身遇到第一個不可恢復的錯誤即中止，不做部分回滾。

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::apartment::{Apartment, ApartmentKey};
use crate::contract::{Contract, ContractStatus};
use crate::item::{ApartmentItem, Item};
use crate::schedule::{CompletionRow, ScheduleItem, ScheduleJoinRow, ScheduleLink};
use crate::shortage::Shortage;
use crate::Result;

/// 儲存層查詢與寫入原語
pub trait PlanStore {
    /// 列出合約下的所有公寓（依主鍵順序，處理順序必須可重現）
    fn list_apartments_by_contract(&self, contract_id: i64) -> Result<Vec<Apartment>>;

    /// 依名稱與精確尺寸查詢品項目錄
    fn find_item_by_dimensions(
        &self,
        name: &str,
        width: Decimal,
        height: Decimal,
    ) -> Result<Option<Item>>;

    /// 將品項庫存扣減一單位
    ///
    /// 庫存已為 0 時不動作；呼叫前引擎必須自行檢查庫存。
    /// 此「先讀後寫」在並發合約轉換下有競態，SQL 實作應改用
    /// `UPDATE ... SET quantity = quantity - 1 WHERE quantity > 0` 式的條件更新。
    fn decrement_item_quantity(&mut self, item_id: i64) -> Result<()>;

    /// 創建缺料紀錄（狀態為待叫料）
    fn create_shortage(&mut self, item_id: i64, amount: i32, due_date: NaiveDate) -> Result<()>;

    /// 列出排程項目目前連結的公寓鍵
    fn list_linked_apartments(&self, schedule_id: i64) -> Result<Vec<ApartmentKey>>;

    /// 批次插入排程連結列（呼叫端保證批次非空）
    fn insert_apartment_links(&mut self, links: &[ScheduleLink]) -> Result<()>;

    /// 刪除單筆排程連結列
    fn delete_apartment_link(&mut self, schedule_id: i64, apartment: &ApartmentKey) -> Result<()>;

    /// 工班排程連接查詢：已依工班過濾、只含待施工公寓、依日期遞增排序
    fn list_team_schedule_rows(&self, team_id: i64) -> Result<Vec<ScheduleJoinRow>>;

    /// 更新合約狀態
    fn set_contract_status(&mut self, contract_id: i64, status: ContractStatus) -> Result<()>;

    /// 插入公寓
    fn insert_apartment(&mut self, apartment: &Apartment) -> Result<()>;

    /// 插入公寓品項需求列
    fn insert_apartment_item(&mut self, link: &ApartmentItem) -> Result<()>;

    /// 更新排程項目欄位（不含公寓連結集合）
    fn update_schedule_item(&mut self, item: &ScheduleItem) -> Result<()>;

    /// 刪除排程項目及其所有公寓連結
    fn delete_schedule_item(&mut self, schedule_id: i64) -> Result<()>;

    /// 排程完工盤點：某工班所有排程項目 × 連結公寓狀態（不過濾待施工）
    fn list_completion_rows(&self, team_id: i64) -> Result<Vec<CompletionRow>>;

    /// 合約檢視連接查詢：指定狀態的合約 × 其公寓，依 (樓層, 門牌號) 排序
    fn list_contract_apartment_rows(
        &self,
        status: ContractStatus,
    ) -> Result<Vec<(Contract, Apartment)>>;

    /// 品項檢視左連接查詢：所有品項 × 其缺料紀錄（無缺料則為 None）
    fn list_item_shortage_rows(&self) -> Result<Vec<(Item, Option<Shortage>)>>;
}
