//! # Fitout Store
//!
//! `PlanStore` 的記憶體實作：以 Vec 模擬關聯表，
//! 供單元測試、性質測試與整合測試使用。
//! 寫入時檢查參照完整性，行為對齊真實資料庫的外鍵約束。

use chrono::NaiveDate;
use rust_decimal::Decimal;

use fitout_core::{
    Apartment, ApartmentItem, ApartmentKey, CompletionRow, Contract, ContractStatus, Item,
    PlanError, PlanStore, Result, ScheduleItem, ScheduleJoinRow, ScheduleLink, Shortage,
};

/// 記憶體儲存
#[derive(Debug, Default)]
pub struct MemoryStore {
    contracts: Vec<Contract>,
    apartments: Vec<Apartment>,
    items: Vec<Item>,
    apartment_items: Vec<ApartmentItem>,
    schedule_items: Vec<ScheduleItem>,
    schedule_links: Vec<ScheduleLink>,
    shortages: Vec<Shortage>,
    next_contract_id: i64,
    next_item_id: i64,
    next_schedule_id: i64,
    next_shortage_id: i64,
}

impl MemoryStore {
    /// 創建空的記憶體儲存
    pub fn new() -> Self {
        Self {
            next_contract_id: 1,
            next_item_id: 1,
            next_schedule_id: 1,
            next_shortage_id: 1,
            ..Default::default()
        }
    }

    /// 新增合約，指派ID後回傳
    pub fn add_contract(&mut self, contract: Contract) -> i64 {
        let id = self.next_contract_id;
        self.next_contract_id += 1;
        self.contracts.push(Contract { id, ..contract });
        id
    }

    /// 新增公寓（測試播種用，不檢查目錄）
    pub fn add_apartment(&mut self, apartment: Apartment) {
        self.apartments.push(apartment);
    }

    /// 新增品項，指派ID後回傳
    pub fn add_item(&mut self, item: Item) -> i64 {
        let id = self.next_item_id;
        self.next_item_id += 1;
        self.items.push(Item { id, ..item });
        id
    }

    /// 新增排程項目，指派ID後回傳
    pub fn add_schedule_item(&mut self, item: ScheduleItem) -> i64 {
        let id = self.next_schedule_id;
        self.next_schedule_id += 1;
        self.schedule_items.push(ScheduleItem { id, ..item });
        id
    }

    /// 新增排程連結列
    pub fn link_apartment(&mut self, schedule_id: i64, apartment: &ApartmentKey) -> Result<()> {
        let link = ScheduleLink::new(schedule_id, *apartment);
        self.insert_apartment_links(std::slice::from_ref(&link))
    }

    /// 新增公寓品項需求列（測試播種用）
    pub fn add_apartment_item(&mut self, link: ApartmentItem) {
        self.apartment_items.push(link);
    }

    /// 依ID查合約
    pub fn contract(&self, id: i64) -> Option<&Contract> {
        self.contracts.iter().find(|c| c.id == id)
    }

    /// 依ID查品項
    pub fn item(&self, id: i64) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// 依ID查排程項目
    pub fn schedule_item(&self, id: i64) -> Option<&ScheduleItem> {
        self.schedule_items.iter().find(|s| s.id == id)
    }

    /// 所有缺料紀錄
    pub fn shortages(&self) -> &[Shortage] {
        &self.shortages
    }

    /// 所有公寓品項需求列
    pub fn apartment_items(&self) -> &[ApartmentItem] {
        &self.apartment_items
    }

    /// 將公寓標記為已完工
    pub fn complete_apartment(&mut self, key: &ApartmentKey) -> Result<()> {
        let apartment = self
            .apartments
            .iter_mut()
            .find(|a| a.key() == *key)
            .ok_or_else(|| {
                PlanError::ReferentialViolation(format!(
                    "公寓不存在: ({}, {}, {})",
                    key.contract_id, key.floor, key.number
                ))
            })?;
        apartment.status = fitout_core::ApartmentStatus::Complete;
        Ok(())
    }

    /// 推進缺料狀態一步
    pub fn advance_shortage(&mut self, shortage_id: i64) -> Result<()> {
        let shortage = self
            .shortages
            .iter_mut()
            .find(|s| s.id == shortage_id)
            .ok_or_else(|| PlanError::Store(format!("找不到缺料紀錄: {shortage_id}")))?;
        shortage.status = shortage.status.advanced();
        Ok(())
    }

    fn apartment_exists(&self, key: &ApartmentKey) -> bool {
        self.apartments.iter().any(|a| a.key() == *key)
    }
}

impl PlanStore for MemoryStore {
    fn list_apartments_by_contract(&self, contract_id: i64) -> Result<Vec<Apartment>> {
        Ok(self
            .apartments
            .iter()
            .filter(|a| a.contract_id == contract_id)
            .cloned()
            .collect())
    }

    fn find_item_by_dimensions(
        &self,
        name: &str,
        width: Decimal,
        height: Decimal,
    ) -> Result<Option<Item>> {
        Ok(self
            .items
            .iter()
            .find(|item| item.matches(name, width, height))
            .cloned())
    }

    fn decrement_item_quantity(&mut self, item_id: i64) -> Result<()> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| PlanError::ReferentialViolation(format!("品項不存在: {item_id}")))?;

        // 庫存為 0 時不動作，絕不為負
        if item.quantity > 0 {
            item.quantity -= 1;
        }
        Ok(())
    }

    fn create_shortage(&mut self, item_id: i64, amount: i32, due_date: NaiveDate) -> Result<()> {
        if self.item(item_id).is_none() {
            return Err(PlanError::ReferentialViolation(format!(
                "缺料參照的品項不存在: {item_id}"
            )));
        }
        let id = self.next_shortage_id;
        self.next_shortage_id += 1;
        self.shortages.push(Shortage::new(id, item_id, amount, due_date));
        Ok(())
    }

    fn list_linked_apartments(&self, schedule_id: i64) -> Result<Vec<ApartmentKey>> {
        Ok(self
            .schedule_links
            .iter()
            .filter(|link| link.schedule_id == schedule_id)
            .map(|link| link.apartment)
            .collect())
    }

    fn insert_apartment_links(&mut self, links: &[ScheduleLink]) -> Result<()> {
        for link in links {
            if !self.apartment_exists(&link.apartment) {
                return Err(PlanError::ReferentialViolation(format!(
                    "連結參照的公寓不存在: ({}, {}, {})",
                    link.apartment.contract_id, link.apartment.floor, link.apartment.number
                )));
            }
            if self.schedule_item(link.schedule_id).is_none() {
                return Err(PlanError::ReferentialViolation(format!(
                    "連結參照的排程項目不存在: {}",
                    link.schedule_id
                )));
            }
        }
        self.schedule_links.extend_from_slice(links);
        Ok(())
    }

    fn delete_apartment_link(&mut self, schedule_id: i64, apartment: &ApartmentKey) -> Result<()> {
        self.schedule_links
            .retain(|link| !(link.schedule_id == schedule_id && link.apartment == *apartment));
        Ok(())
    }

    fn list_team_schedule_rows(&self, team_id: i64) -> Result<Vec<ScheduleJoinRow>> {
        // 依日期遞增（穩定排序，同日維持插入順序）
        let mut team_items: Vec<&ScheduleItem> = self
            .schedule_items
            .iter()
            .filter(|item| item.team_id == team_id)
            .collect();
        team_items.sort_by_key(|item| item.date);

        let mut rows = Vec::new();
        for schedule_item in team_items {
            let address = match self.contract(schedule_item.contract_id) {
                Some(contract) => contract.address.clone(),
                None => continue,
            };

            for link in self
                .schedule_links
                .iter()
                .filter(|link| link.schedule_id == schedule_item.id)
            {
                // 只含待施工公寓
                let Some(apartment) = self.apartments.iter().find(|a| {
                    a.key() == link.apartment
                        && a.status == fitout_core::ApartmentStatus::Pending
                }) else {
                    continue;
                };

                for demand in self
                    .apartment_items
                    .iter()
                    .filter(|d| d.apartment == link.apartment)
                {
                    let Some(item) = self.item(demand.item_id) else {
                        continue;
                    };
                    rows.push(ScheduleJoinRow {
                        schedule_item: schedule_item.clone(),
                        address: address.clone(),
                        apartment: apartment.clone(),
                        item: item.clone(),
                        link_quantity: demand.quantity,
                    });
                }
            }
        }

        Ok(rows)
    }

    fn set_contract_status(&mut self, contract_id: i64, status: ContractStatus) -> Result<()> {
        let contract = self
            .contracts
            .iter_mut()
            .find(|c| c.id == contract_id)
            .ok_or(PlanError::ContractNotFound(contract_id))?;
        contract.status = status;
        Ok(())
    }

    fn insert_apartment(&mut self, apartment: &Apartment) -> Result<()> {
        if self.contract(apartment.contract_id).is_none() {
            return Err(PlanError::ReferentialViolation(format!(
                "公寓參照的合約不存在: {}",
                apartment.contract_id
            )));
        }
        if self.apartment_exists(&apartment.key()) {
            return Err(PlanError::ReferentialViolation(format!(
                "公寓主鍵重複: ({}, {}, {})",
                apartment.contract_id, apartment.floor, apartment.number
            )));
        }
        self.apartments.push(apartment.clone());
        Ok(())
    }

    fn insert_apartment_item(&mut self, link: &ApartmentItem) -> Result<()> {
        if self.item(link.item_id).is_none() {
            return Err(PlanError::ReferentialViolation(format!(
                "需求參照的品項不存在: {}",
                link.item_id
            )));
        }
        if !self.apartment_exists(&link.apartment) {
            return Err(PlanError::ReferentialViolation(format!(
                "需求參照的公寓不存在: ({}, {}, {})",
                link.apartment.contract_id, link.apartment.floor, link.apartment.number
            )));
        }
        self.apartment_items.push(link.clone());
        Ok(())
    }

    fn update_schedule_item(&mut self, item: &ScheduleItem) -> Result<()> {
        let existing = self
            .schedule_items
            .iter_mut()
            .find(|s| s.id == item.id)
            .ok_or(PlanError::ScheduleItemNotFound(item.id))?;
        *existing = item.clone();
        Ok(())
    }

    fn delete_schedule_item(&mut self, schedule_id: i64) -> Result<()> {
        // 先刪連結列再刪項目，對齊外鍵約束下的刪除順序
        self.schedule_links
            .retain(|link| link.schedule_id != schedule_id);
        self.schedule_items.retain(|item| item.id != schedule_id);
        Ok(())
    }

    fn list_completion_rows(&self, team_id: i64) -> Result<Vec<CompletionRow>> {
        let mut rows = Vec::new();
        for schedule_item in self
            .schedule_items
            .iter()
            .filter(|item| item.team_id == team_id)
        {
            for link in self
                .schedule_links
                .iter()
                .filter(|link| link.schedule_id == schedule_item.id)
            {
                if let Some(apartment) =
                    self.apartments.iter().find(|a| a.key() == link.apartment)
                {
                    rows.push(CompletionRow {
                        schedule_id: schedule_item.id,
                        status: apartment.status,
                    });
                }
            }
        }
        Ok(rows)
    }

    fn list_contract_apartment_rows(
        &self,
        status: ContractStatus,
    ) -> Result<Vec<(Contract, Apartment)>> {
        let mut rows = Vec::new();
        for contract in self.contracts.iter().filter(|c| c.status == status) {
            let mut apartments: Vec<&Apartment> = self
                .apartments
                .iter()
                .filter(|a| a.contract_id == contract.id)
                .collect();
            apartments.sort_by_key(|a| (a.floor, a.number));

            for apartment in apartments {
                rows.push((contract.clone(), apartment.clone()));
            }
        }
        Ok(rows)
    }

    fn list_item_shortage_rows(&self) -> Result<Vec<(Item, Option<Shortage>)>> {
        let mut rows = Vec::new();
        for item in &self.items {
            let item_shortages: Vec<&Shortage> = self
                .shortages
                .iter()
                .filter(|s| s.item_id == item.id)
                .collect();

            if item_shortages.is_empty() {
                rows.push((item.clone(), None));
            } else {
                for shortage in item_shortages {
                    rows.push((item.clone(), Some(shortage.clone())));
                }
            }
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitout_core::{ApartmentStatus, WorkType};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn seed_contract(store: &mut MemoryStore) -> i64 {
        store.add_contract(Contract::new(
            0,
            "台北市大安區和平東路60號".to_string(),
            date(1),
            date(28),
            Decimal::from(1_000_000),
        ))
    }

    #[test]
    fn test_link_unknown_apartment_rejected() {
        let mut store = MemoryStore::new();
        let contract_id = seed_contract(&mut store);
        let schedule_id = store.add_schedule_item(ScheduleItem::new(
            0,
            date(10),
            contract_id,
            WorkType::InstallFrame,
            1,
        ));

        let result = store.link_apartment(schedule_id, &ApartmentKey::new(contract_id, 5, 5));

        assert!(matches!(result, Err(PlanError::ReferentialViolation(_))));
    }

    #[test]
    fn test_decrement_at_zero_is_noop() {
        let mut store = MemoryStore::new();
        let item_id = store.add_item(Item::new(0, "Door".to_string(), 0, Decimal::from(3200)));

        store.decrement_item_quantity(item_id).unwrap();

        assert_eq!(store.item(item_id).unwrap().quantity, 0);
    }

    #[test]
    fn test_duplicate_apartment_key_rejected() {
        let mut store = MemoryStore::new();
        let contract_id = seed_contract(&mut store);
        let apartment = Apartment::new(contract_id, 1, 1);

        store.insert_apartment(&apartment).unwrap();
        let result = store.insert_apartment(&apartment);

        assert!(matches!(result, Err(PlanError::ReferentialViolation(_))));
    }

    #[test]
    fn test_team_schedule_rows_sorted_and_filtered() {
        let mut store = MemoryStore::new();
        let contract_id = seed_contract(&mut store);
        store.add_apartment(Apartment::new(contract_id, 1, 1));
        store.add_apartment(
            Apartment::new(contract_id, 1, 2).with_status(ApartmentStatus::Complete),
        );
        let item_id = store.add_item(Item::new(0, "Door".to_string(), 5, Decimal::from(3200)));
        store.add_apartment_item(ApartmentItem::new(
            item_id,
            ApartmentKey::new(contract_id, 1, 1),
            1,
        ));
        store.add_apartment_item(ApartmentItem::new(
            item_id,
            ApartmentKey::new(contract_id, 1, 2),
            1,
        ));

        // 晚的日期先插入，查詢結果仍須依日期遞增
        let late = store.add_schedule_item(ScheduleItem::new(
            0,
            date(20),
            contract_id,
            WorkType::InstallFrame,
            1,
        ));
        let early = store.add_schedule_item(ScheduleItem::new(
            0,
            date(5),
            contract_id,
            WorkType::InstallFrame,
            1,
        ));
        for id in [late, early] {
            store
                .link_apartment(id, &ApartmentKey::new(contract_id, 1, 1))
                .unwrap();
            store
                .link_apartment(id, &ApartmentKey::new(contract_id, 1, 2))
                .unwrap();
        }

        let rows = store.list_team_schedule_rows(1).unwrap();

        // 已完工公寓 (1,2) 被濾掉：每個排程項目只剩 (1,1) 一列
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].schedule_item.id, early);
        assert_eq!(rows[1].schedule_item.id, late);
        assert!(rows
            .iter()
            .all(|row| row.apartment.status == ApartmentStatus::Pending));
    }

    #[test]
    fn test_item_shortage_rows_left_join() {
        let mut store = MemoryStore::new();
        let door = store.add_item(Item::new(0, "Door".to_string(), 5, Decimal::from(3200)));
        let paint = store.add_item(Item::new(0, "Paint".to_string(), 40, Decimal::from(450)));
        store.create_shortage(door, 1, date(15)).unwrap();
        store.create_shortage(door, 1, date(20)).unwrap();

        let rows = store.list_item_shortage_rows().unwrap();

        let door_rows = rows.iter().filter(|(item, _)| item.id == door).count();
        let paint_rows: Vec<_> = rows.iter().filter(|(item, _)| item.id == paint).collect();
        assert_eq!(door_rows, 2);
        assert_eq!(paint_rows.len(), 1);
        assert!(paint_rows[0].1.is_none());
    }

    #[test]
    fn test_advance_shortage_status() {
        let mut store = MemoryStore::new();
        let item_id = store.add_item(Item::new(0, "Door".to_string(), 0, Decimal::from(3200)));
        store.create_shortage(item_id, 1, date(15)).unwrap();
        let shortage_id = store.shortages()[0].id;

        store.advance_shortage(shortage_id).unwrap();
        assert_eq!(
            store.shortages()[0].status,
            fitout_core::ShortageStatus::Ordered
        );

        store.advance_shortage(shortage_id).unwrap();
        assert_eq!(
            store.shortages()[0].status,
            fitout_core::ShortageStatus::Complete
        );
    }
}
