//! 集成測試

use chrono::NaiveDate;
use rust_decimal::Decimal;

use fitout_core::*;
use fitout_engine::{
    collect_completed, register_apartment, views, ConsumptionEngine, Reconciler,
    ScheduleAggregator,
};
use fitout_store::MemoryStore;

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, m, d).unwrap()
}

fn new_contract(address: &str) -> Contract {
    Contract::new(
        0,
        address.to_string(),
        date(1, 10),
        date(6, 30),
        Decimal::from(1_200_000),
    )
}

#[test]
fn test_consumption_across_two_contracts() {
    // 場景：兩份合約共用同一目錄品項
    //   合約一：公寓 (1,1) 門 4×10、公寓 (1,2) 無開口
    //   目錄：Door 4×10 庫存 1
    //   合約一開工 → 庫存歸零、無缺料
    //   合約二開工 → 同尺寸門已無庫存 → 登記缺料

    // 1. 播種
    let mut store = MemoryStore::new();
    let c1 = store.add_contract(new_contract("台北市信義區松仁路100號"));
    let c2 = store.add_contract(new_contract("台北市中山區民生東路45號"));
    store.add_apartment(Apartment::new(c1, 1, 1).with_door(Decimal::from(4), Decimal::from(10)));
    store.add_apartment(Apartment::new(c1, 1, 2));
    store.add_apartment(Apartment::new(c2, 2, 1).with_door(Decimal::from(4), Decimal::from(10)));
    let door = store.add_item(
        Item::new(0, "Door".to_string(), 1, Decimal::from(3200))
            .with_dimensions(Decimal::from(4), Decimal::from(10)),
    );

    // 2. 合約一開工
    let report = ConsumptionEngine::mark_in_progress(&mut store, c1, date(5, 1)).unwrap();

    assert_eq!(report.consumed_count(), 1);
    assert_eq!(report.shortage_count(), 0);
    assert_eq!(store.item(door).unwrap().quantity, 0);
    assert!(store.shortages().is_empty());
    assert_eq!(
        store.contract(c1).unwrap().status,
        ContractStatus::InProgress
    );

    // 3. 合約二開工：庫存已為 0
    let report = ConsumptionEngine::mark_in_progress(&mut store, c2, date(5, 15)).unwrap();

    assert_eq!(report.consumed_count(), 0);
    assert_eq!(report.shortage_count(), 1);
    // 庫存不得為負
    assert_eq!(store.item(door).unwrap().quantity, 0);

    let shortages = store.shortages();
    assert_eq!(shortages.len(), 1);
    assert_eq!(shortages[0].item_id, door);
    assert_eq!(shortages[0].amount, 1);
    assert_eq!(shortages[0].due_date, date(5, 15));
    assert_eq!(shortages[0].status, ShortageStatus::Pending);
}

#[test]
fn test_schedule_lifecycle() {
    // 場景：登錄公寓 → 建排程 → 彙總檢視 → 調整公寓集合 → 完工回收

    // 1. 合約、目錄與公寓
    let mut store = MemoryStore::new();
    let contract_id = store.add_contract(new_contract("新竹市東區光復路300號"));
    store.add_item(
        Item::new(0, "Door".to_string(), 10, Decimal::from(3200))
            .with_dimensions(Decimal::from(4), Decimal::from(10)),
    );
    store.add_item(
        Item::new(0, "Window".to_string(), 10, Decimal::from(1800))
            .with_dimensions(Decimal::from(2), Decimal::from(3)),
    );

    for number in 1..=3 {
        let apartment = Apartment::new(contract_id, 1, number)
            .with_door(Decimal::from(4), Decimal::from(10))
            .with_window(Decimal::from(2), Decimal::from(3));
        let registered = register_apartment(&mut store, &apartment).unwrap();
        assert_eq!(registered.len(), 2);
    }

    // 2. 建排程：工班 1 負責公寓 (1,1)、(1,2)
    let team_id = 1;
    let schedule_id = store.add_schedule_item(ScheduleItem::new(
        0,
        date(3, 15),
        contract_id,
        WorkType::InstallFrame,
        team_id,
    ));
    for number in [1, 2] {
        store
            .link_apartment(schedule_id, &ApartmentKey::new(contract_id, 1, number))
            .unwrap();
    }

    // 3. 彙總工班排程
    let entries = ScheduleAggregator::team_schedule(&store, team_id).unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].address, "新竹市東區光復路300號");
    assert_eq!(entries[0].apartments.len(), 2);
    // 每間公寓兩筆需求（門、窗），數量取自需求連結列
    for apartment_work in &entries[0].apartments {
        assert_eq!(apartment_work.items.len(), 2);
        assert!(apartment_work.items.iter().all(|r| r.quantity == 1));
    }

    // 4. 調整公寓集合：移除 (1,1)、加入 (1,3)，(1,2) 不動
    let delta =
        Reconciler::apply(&mut store, schedule_id, contract_id, &[(1, 2), (1, 3)]).unwrap();

    assert_eq!(delta.to_add.len(), 1);
    assert_eq!(delta.to_remove.len(), 1);
    let mut linked = store.list_linked_apartments(schedule_id).unwrap();
    linked.sort_by_key(|key| key.position());
    assert_eq!(
        linked,
        vec![
            ApartmentKey::new(contract_id, 1, 2),
            ApartmentKey::new(contract_id, 1, 3),
        ]
    );

    // 5. 再次提交相同集合：無任何變動
    let delta =
        Reconciler::apply(&mut store, schedule_id, contract_id, &[(1, 2), (1, 3)]).unwrap();
    assert!(delta.is_empty());

    // 6. 兩間公寓完工後回收排程項目
    store
        .complete_apartment(&ApartmentKey::new(contract_id, 1, 2))
        .unwrap();
    store
        .complete_apartment(&ApartmentKey::new(contract_id, 1, 3))
        .unwrap();

    let collected = collect_completed(&mut store, team_id).unwrap();

    assert_eq!(collected, vec![schedule_id]);
    assert!(store.schedule_item(schedule_id).is_none());
}

#[test]
fn test_views_after_consumption() {
    // 場景：開工產生缺料後，檢視合約與品項

    let mut store = MemoryStore::new();
    let contract_id = store.add_contract(new_contract("台中市北區三民路20號"));
    store.add_apartment(
        Apartment::new(contract_id, 2, 1).with_window(Decimal::from(2), Decimal::from(3)),
    );
    store.add_apartment(Apartment::new(contract_id, 1, 1));
    let window = store.add_item(
        Item::new(0, "Window".to_string(), 0, Decimal::from(1800))
            .with_dimensions(Decimal::from(2), Decimal::from(3)),
    );
    let paint = store.add_item(Item::new(0, "Paint".to_string(), 40, Decimal::from(450)));

    ConsumptionEngine::mark_in_progress(&mut store, contract_id, date(4, 1)).unwrap();

    // 合約檢視：公寓依 (樓層, 門牌號) 排序
    let contract_views = views::contracts_by_status(&store, ContractStatus::InProgress).unwrap();
    assert_eq!(contract_views.len(), 1);
    let positions: Vec<(i32, i32)> = contract_views[0]
        .apartments
        .iter()
        .map(|a| (a.floor, a.number))
        .collect();
    assert_eq!(positions, vec![(1, 1), (2, 1)]);

    // 品項檢視：左連接語義
    let item_views = views::items_with_shortages(&store).unwrap();
    assert_eq!(item_views.len(), 2);
    let window_view = item_views.iter().find(|v| v.item.id == window).unwrap();
    let paint_view = item_views.iter().find(|v| v.item.id == paint).unwrap();
    assert_eq!(window_view.shortages.len(), 1);
    assert!(paint_view.shortages.is_empty());
}
