//! 工班排程彙總
//!
//! 將扁平的連接列（排程項目 × 公寓 × 需求 × 品項）彙總成巢狀的
//! 工班排程檢視：每個排程項目一個條目，其下是連結的公寓，
//! 公寓之下是該公寓的需求品項與數量。

use std::collections::HashMap;

use fitout_core::{Apartment, Item, PlanStore, Result, ScheduleItem, ScheduleJoinRow};

/// 公寓需求品項：目錄資料 + 該公寓的需求數量
///
/// `quantity` 一律取自需求連結列，目錄庫存量不得滲入
#[derive(Debug, Clone)]
pub struct RequiredItem {
    /// 品項目錄資料
    pub item: Item,

    /// 該公寓的需求數量
    pub quantity: i32,
}

/// 排程條目下的一間公寓及其需求品項
#[derive(Debug, Clone)]
pub struct ApartmentWork {
    /// 公寓
    pub apartment: Apartment,

    /// 需求品項列表
    pub items: Vec<RequiredItem>,
}

/// 工班排程條目
#[derive(Debug, Clone)]
pub struct ScheduleEntry {
    /// 排程項目
    pub item: ScheduleItem,

    /// 合約工地地址
    pub address: String,

    /// 連結的公寓（保留首見順序）
    pub apartments: Vec<ApartmentWork>,
}

/// 排程彙總器
pub struct ScheduleAggregator;

impl ScheduleAggregator {
    /// 將扁平連接列彙總為巢狀排程檢視
    ///
    /// 單次線性掃描，O(列數)。兩層有序累積：
    /// 外層以排程項目ID分組、內層以 (樓層, 門牌號) 分組，
    /// 兩層皆保留輸入中的首見順序，因此輸出順序與
    /// 儲存層的日期遞增排序一致。
    ///
    /// 已知限制：沒有任何連結公寓列的排程項目不會進入連接結果，
    /// 因此也不會出現在輸出中；需要顯示空排程項目的元件
    /// 必須另外查詢排程項目是否存在。
    pub fn aggregate(rows: Vec<ScheduleJoinRow>) -> Vec<ScheduleEntry> {
        let mut entries: Vec<ScheduleEntry> = Vec::new();
        // 外層索引：排程項目ID → entries 位置
        let mut entry_index: HashMap<i64, usize> = HashMap::new();
        // 內層索引：(排程項目ID, 樓層, 門牌號) → apartments 位置
        let mut apartment_index: HashMap<(i64, i32, i32), usize> = HashMap::new();

        for row in rows {
            let schedule_id = row.schedule_item.id;

            let entry_pos = match entry_index.get(&schedule_id) {
                Some(&pos) => pos,
                None => {
                    entries.push(ScheduleEntry {
                        item: row.schedule_item.clone(),
                        address: row.address.clone(),
                        apartments: Vec::new(),
                    });
                    let pos = entries.len() - 1;
                    entry_index.insert(schedule_id, pos);
                    pos
                }
            };

            let inner_key = (schedule_id, row.apartment.floor, row.apartment.number);
            let apartment_pos = match apartment_index.get(&inner_key) {
                Some(&pos) => pos,
                None => {
                    let apartments = &mut entries[entry_pos].apartments;
                    apartments.push(ApartmentWork {
                        apartment: row.apartment.clone(),
                        items: Vec::new(),
                    });
                    let pos = apartments.len() - 1;
                    apartment_index.insert(inner_key, pos);
                    pos
                }
            };

            // 數量以需求連結列為準
            entries[entry_pos].apartments[apartment_pos]
                .items
                .push(RequiredItem {
                    item: row.item,
                    quantity: row.link_quantity,
                });
        }

        entries
    }

    /// 查詢並彙總單一工班的排程
    pub fn team_schedule<S: PlanStore>(store: &S, team_id: i64) -> Result<Vec<ScheduleEntry>> {
        let rows = store.list_team_schedule_rows(team_id)?;
        tracing::debug!("工班 {} 排程連接列: {} 筆", team_id, rows.len());

        let entries = Self::aggregate(rows);
        tracing::debug!("工班 {} 排程條目: {} 筆", team_id, entries.len());

        Ok(entries)
    }

    /// 查詢並彙總多個工班的排程
    pub fn all_team_schedules<S: PlanStore>(
        store: &S,
        team_ids: &[i64],
    ) -> Result<Vec<Vec<ScheduleEntry>>> {
        let mut schedules = Vec::with_capacity(team_ids.len());
        for &team_id in team_ids {
            schedules.push(Self::team_schedule(store, team_id)?);
        }
        Ok(schedules)
    }
}
