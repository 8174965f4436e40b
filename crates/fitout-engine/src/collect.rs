//! 排程完工回收
//!
//! 工班排程載入時順手清掉已無事可做的排程項目：
//! 連結公寓全數完工的排程項目連同其連結列一併刪除。

use std::collections::HashMap;

use fitout_core::{ApartmentStatus, PlanStore, Result};

/// 刪除某工班下公寓全數完工的排程項目，回傳被刪除的排程項目ID
///
/// 依盤點列分組：只要有任何一間連結公寓仍待施工，排程項目就保留。
/// 沒有任何連結公寓的排程項目不會出現在盤點列中，因此也不會被刪。
pub fn collect_completed<S: PlanStore>(store: &mut S, team_id: i64) -> Result<Vec<i64>> {
    let rows = store.list_completion_rows(team_id)?;

    // 排程項目ID → 是否全數完工（保留首見順序以便刪除順序可重現）
    let mut all_complete: HashMap<i64, bool> = HashMap::new();
    let mut order: Vec<i64> = Vec::new();

    for row in rows {
        let entry = all_complete.entry(row.schedule_id).or_insert_with(|| {
            order.push(row.schedule_id);
            true
        });
        if row.status != ApartmentStatus::Complete {
            *entry = false;
        }
    }

    let mut collected = Vec::new();
    for schedule_id in order {
        if all_complete[&schedule_id] {
            store.delete_schedule_item(schedule_id)?;
            collected.push(schedule_id);
        }
    }

    if !collected.is_empty() {
        tracing::info!("工班 {} 回收完工排程項目: {:?}", team_id, collected);
    }

    Ok(collected)
}
