//! 單層分組檢視
//!
//! 與排程彙總同一套首見順序分組手法的單層版本：
//! 合約檢視（合約 × 其公寓）與品項檢視（品項 × 其缺料，左連接）。

use std::collections::HashMap;

use fitout_core::{Apartment, Contract, ContractStatus, Item, PlanStore, Result, Shortage};

/// 合約檢視：合約及其下所有公寓
#[derive(Debug, Clone)]
pub struct ContractView {
    /// 合約
    pub contract: Contract,

    /// 公寓（依儲存層排序：樓層、門牌號遞增）
    pub apartments: Vec<Apartment>,
}

/// 品項檢視：品項及其缺料紀錄
#[derive(Debug, Clone)]
pub struct ItemView {
    /// 品項
    pub item: Item,

    /// 缺料紀錄（無缺料則為空）
    pub shortages: Vec<Shortage>,
}

/// 將合約 × 公寓連接列分組為合約檢視（保留首見順序）
pub fn group_contracts(rows: Vec<(Contract, Apartment)>) -> Vec<ContractView> {
    let mut views: Vec<ContractView> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for (contract, apartment) in rows {
        let pos = match index.get(&contract.id) {
            Some(&pos) => pos,
            None => {
                index.insert(contract.id, views.len());
                views.push(ContractView {
                    contract,
                    apartments: Vec::new(),
                });
                views.len() - 1
            }
        };
        views[pos].apartments.push(apartment);
    }

    views
}

/// 將品項 × 缺料左連接列分組為品項檢視（保留首見順序）
///
/// 左連接語義：沒有缺料的品項仍要出現，缺料列為空
pub fn group_items(rows: Vec<(Item, Option<Shortage>)>) -> Vec<ItemView> {
    let mut views: Vec<ItemView> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for (item, shortage) in rows {
        let pos = match index.get(&item.id) {
            Some(&pos) => pos,
            None => {
                index.insert(item.id, views.len());
                views.push(ItemView {
                    item,
                    shortages: Vec::new(),
                });
                views.len() - 1
            }
        };
        if let Some(shortage) = shortage {
            views[pos].shortages.push(shortage);
        }
    }

    views
}

/// 查詢並分組指定狀態的合約檢視
pub fn contracts_by_status<S: PlanStore>(
    store: &S,
    status: ContractStatus,
) -> Result<Vec<ContractView>> {
    let rows = store.list_contract_apartment_rows(status)?;
    Ok(group_contracts(rows))
}

/// 查詢並分組品項檢視
pub fn items_with_shortages<S: PlanStore>(store: &S) -> Result<Vec<ItemView>> {
    let rows = store.list_item_shortage_rows()?;
    Ok(group_items(rows))
}
