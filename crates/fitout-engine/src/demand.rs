//! 公寓登錄與品項需求登記
//!
//! 新公寓入庫時，依其門窗開口在品項目錄中比對尺寸，
//! 為每個比對成功的開口寫入一筆需求連結列（數量 1）。
//! 需求紀錄的是「要用什麼」，與當下庫存無關。

use fitout_core::{Apartment, ApartmentItem, OpeningKind, PlanStore, Result};

/// 登錄公寓並登記其開口的品項需求
///
/// 目錄查無對應尺寸的開口採與扣減引擎一致的靜默略過政策，
/// 不讓單一開口讓整筆登錄失敗；略過會記log。
/// 回傳實際寫入的需求連結列。
pub fn register_apartment<S: PlanStore>(
    store: &mut S,
    apartment: &Apartment,
) -> Result<Vec<ApartmentItem>> {
    store.insert_apartment(apartment)?;

    let mut registered = Vec::new();
    for kind in [OpeningKind::Door, OpeningKind::Window] {
        let Some(opening) = apartment.opening(kind) else {
            continue;
        };

        let found =
            store.find_item_by_dimensions(kind.catalog_name(), opening.width, opening.height)?;

        match found {
            Some(item) => {
                let link = ApartmentItem::new(item.id, apartment.key(), 1);
                store.insert_apartment_item(&link)?;
                registered.push(link);
            }
            None => {
                tracing::warn!(
                    "目錄查無 {} {}×{}，公寓 ({}, {}, {}) 未登記此需求",
                    kind.catalog_name(),
                    opening.width,
                    opening.height,
                    apartment.contract_id,
                    apartment.floor,
                    apartment.number
                );
            }
        }
    }

    Ok(registered)
}
