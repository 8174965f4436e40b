//! 合約開工庫存扣減與缺料登記
//!
//! 合約轉為施工中是唯一的扣減觸發點。逐間公寓檢查門窗開口，
//! 以名稱加精確尺寸比對品項目錄：有貨扣一單位、
//! 沒貨登記缺料、目錄查無此尺寸則略過。

use chrono::NaiveDate;

use fitout_core::{
    ApartmentKey, ContractStatus, OpeningKind, PlanError, PlanStore, Result,
};

/// 單一開口的處理結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    /// 有貨，已扣減一單位
    Consumed { item_id: i64 },
    /// 目錄有此尺寸但庫存為 0，已登記缺料
    Shortage { item_id: i64 },
    /// 目錄查無此名稱與尺寸，略過（已知缺口，只記log）
    NoCatalogMatch,
}

/// 開口處理紀錄
#[derive(Debug, Clone, Copy)]
pub struct OpeningOutcome {
    /// 公寓複合鍵
    pub apartment: ApartmentKey,

    /// 開口類型
    pub kind: OpeningKind,

    /// 處理結果
    pub outcome: OutcomeKind,
}

/// 合約開工處理報告
#[derive(Debug, Clone, Default)]
pub struct ConsumptionReport {
    /// 逐開口的處理紀錄（依公寓列出順序）
    pub outcomes: Vec<OpeningOutcome>,
}

impl ConsumptionReport {
    /// 已扣減的開口數
    pub fn consumed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, OutcomeKind::Consumed { .. }))
            .count()
    }

    /// 已登記的缺料數
    pub fn shortage_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, OutcomeKind::Shortage { .. }))
            .count()
    }

    /// 因目錄查無而略過的開口數
    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.outcome == OutcomeKind::NoCatalogMatch)
            .count()
    }
}

/// 庫存扣減與缺料引擎
///
/// 固定採「每間公寓每種開口扣一單位」的記帳方式，
/// 不論該開口實際需要幾件實體品項；此為沿用的既定設計決策。
///
/// 此操作不可重入：對同一合約重跑會重複扣庫存、重複登記缺料，
/// 呼叫端必須保證每次狀態轉換至多觸發一次。
pub struct ConsumptionEngine;

impl ConsumptionEngine {
    /// 將合約轉為施工中並扣減其公寓所需的門窗庫存
    ///
    /// 公寓依儲存層列出順序逐間處理（順序不影響正確性，
    /// 但必須可重現以利測試）；每間公寓先處理窗、再處理門。
    /// 任一寫入失敗即中止整次呼叫並回傳錯誤，
    /// 回滾由呼叫端的交易邊界負責。
    pub fn mark_in_progress<S: PlanStore>(
        store: &mut S,
        contract_id: i64,
        due_date: NaiveDate,
    ) -> Result<ConsumptionReport> {
        if contract_id <= 0 {
            return Err(PlanError::Validation(format!(
                "合約ID必須為正數: {contract_id}"
            )));
        }

        tracing::info!("合約 {} 轉為施工中，開始扣減庫存", contract_id);
        store.set_contract_status(contract_id, ContractStatus::InProgress)?;

        let apartments = store.list_apartments_by_contract(contract_id)?;
        tracing::debug!("合約 {} 公寓數: {}", contract_id, apartments.len());

        let mut report = ConsumptionReport::default();
        for apartment in &apartments {
            for kind in [OpeningKind::Window, OpeningKind::Door] {
                let Some(opening) = apartment.opening(kind) else {
                    continue;
                };

                let found = store.find_item_by_dimensions(
                    kind.catalog_name(),
                    opening.width,
                    opening.height,
                )?;

                let outcome = match found {
                    Some(item) if item.in_stock() => {
                        store.decrement_item_quantity(item.id)?;
                        OutcomeKind::Consumed { item_id: item.id }
                    }
                    Some(item) => {
                        store.create_shortage(item.id, 1, due_date)?;
                        OutcomeKind::Shortage { item_id: item.id }
                    }
                    None => {
                        tracing::warn!(
                            "目錄查無 {} {}×{}，公寓 ({}, {}, {}) 的需求被略過",
                            kind.catalog_name(),
                            opening.width,
                            opening.height,
                            apartment.contract_id,
                            apartment.floor,
                            apartment.number
                        );
                        OutcomeKind::NoCatalogMatch
                    }
                };

                report.outcomes.push(OpeningOutcome {
                    apartment: apartment.key(),
                    kind,
                    outcome,
                });
            }
        }

        tracing::info!(
            "合約 {} 扣減完成: 扣減 {} 筆, 缺料 {} 筆, 略過 {} 筆",
            contract_id,
            report.consumed_count(),
            report.shortage_count(),
            report.skipped_count()
        );

        Ok(report)
    }

    /// 更新合約狀態（不觸碰庫存）
    ///
    /// 只有轉為施工中才走 [`ConsumptionEngine::mark_in_progress`]，
    /// 其他狀態轉換單純更新欄位。
    pub fn set_status<S: PlanStore>(
        store: &mut S,
        contract_id: i64,
        status: ContractStatus,
    ) -> Result<()> {
        if contract_id <= 0 {
            return Err(PlanError::Validation(format!(
                "合約ID必須為正數: {contract_id}"
            )));
        }

        store.set_contract_status(contract_id, status)
    }
}
