//! 排程公寓集合差異比對
//!
//! 比對排程項目目前連結的公寓集合與提交的新集合，
//! 只對差集發出插入/刪除，不做整批刪除重建；
//! 兩集合皆有的公寓完全不動，避免無謂的外鍵churn。

use std::collections::HashSet;

use fitout_core::{ApartmentKey, PlanError, PlanStore, Result, ScheduleItem, ScheduleLink};

/// 差異比對結果：需要插入與刪除的連結
#[derive(Debug, Clone, Default)]
pub struct LinkDelta {
    /// 待插入的連結列（新集合有、目前沒有）
    pub to_add: Vec<ScheduleLink>,

    /// 待刪除的公寓鍵（目前有、新集合沒有）
    pub to_remove: Vec<ApartmentKey>,
}

impl LinkDelta {
    /// 檢查是否無任何變動
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// 公寓集合差異比對器
pub struct Reconciler;

impl Reconciler {
    /// 計算目前集合與新集合的對稱差
    ///
    /// 比對鍵為 (樓層, 門牌號) 的精確整數相等，合約由排程項目隱含。
    /// 保證：`to_add ∩ current = ∅`、`to_remove ⊆ current`、
    /// 兩集合皆有的公寓不出現在任何一側。
    pub fn diff(
        schedule_id: i64,
        contract_id: i64,
        current: &[ApartmentKey],
        desired: &[(i32, i32)],
    ) -> LinkDelta {
        let current_positions: HashSet<(i32, i32)> =
            current.iter().map(|key| key.position()).collect();
        let desired_positions: HashSet<(i32, i32)> = desired.iter().copied().collect();

        let to_add = desired
            .iter()
            .filter(|position| !current_positions.contains(position))
            .map(|&(floor, number)| {
                ScheduleLink::new(schedule_id, ApartmentKey::new(contract_id, floor, number))
            })
            .collect();

        let to_remove = current
            .iter()
            .filter(|key| !desired_positions.contains(&key.position()))
            .copied()
            .collect();

        LinkDelta { to_add, to_remove }
    }

    /// 讀取目前連結、計算差集並套用到儲存層
    ///
    /// `to_add` 為空時完全不發出插入呼叫（空批次在部分驅動下
    /// 會被拒絕或不一致地no-op，必須明確跳過）。
    pub fn apply<S: PlanStore>(
        store: &mut S,
        schedule_id: i64,
        contract_id: i64,
        desired: &[(i32, i32)],
    ) -> Result<LinkDelta> {
        if schedule_id <= 0 {
            return Err(PlanError::Validation(format!(
                "排程項目ID必須為正數: {schedule_id}"
            )));
        }

        let current = store.list_linked_apartments(schedule_id)?;
        let delta = Self::diff(schedule_id, contract_id, &current, desired);

        tracing::debug!(
            "排程 {} 連結差異: 插入 {} 筆, 刪除 {} 筆",
            schedule_id,
            delta.to_add.len(),
            delta.to_remove.len()
        );

        if !delta.to_add.is_empty() {
            store.insert_apartment_links(&delta.to_add)?;
        }

        for key in &delta.to_remove {
            store.delete_apartment_link(schedule_id, key)?;
        }

        Ok(delta)
    }

    /// 更新排程項目欄位並調節其公寓連結集合
    pub fn update_schedule<S: PlanStore>(
        store: &mut S,
        item: &ScheduleItem,
        desired: &[(i32, i32)],
    ) -> Result<LinkDelta> {
        store.update_schedule_item(item)?;
        Self::apply(store, item.id, item.contract_id, desired)
    }
}
