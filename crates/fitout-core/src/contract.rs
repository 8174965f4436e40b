//! 合約模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 合約類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractType {
    /// 新建工程
    NewContract,
    /// 修繕工程
    RepairedContract,
}

/// 合約狀態
///
/// 正常流程下只會單向前進：`New → InProgress → Complete`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractStatus {
    /// 新簽約
    New,
    /// 施工中
    InProgress,
    /// 已完工
    Complete,
}

impl ContractStatus {
    /// 狀態在生命週期中的序位
    fn rank(self) -> u8 {
        match self {
            ContractStatus::New => 0,
            ContractStatus::InProgress => 1,
            ContractStatus::Complete => 2,
        }
    }

    /// 檢查轉換到 `next` 是否為單向前進
    pub fn is_forward_transition(self, next: ContractStatus) -> bool {
        next.rank() > self.rank()
    }
}

/// 合約
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    /// 合約ID
    pub id: i64,

    /// 工地地址
    pub address: String,

    /// 簽約日期
    pub signing_date: NaiveDate,

    /// 交付期限
    pub due_date: NaiveDate,

    /// 合約金額
    pub price: Decimal,

    /// 合約狀態
    pub status: ContractStatus,

    /// 合約類型
    pub contract_type: ContractType,
}

impl Contract {
    /// 創建新的合約（狀態預設為 New、類型預設為新建工程）
    pub fn new(
        id: i64,
        address: String,
        signing_date: NaiveDate,
        due_date: NaiveDate,
        price: Decimal,
    ) -> Self {
        Self {
            id,
            address,
            signing_date,
            due_date,
            price,
            status: ContractStatus::New,
            contract_type: ContractType::NewContract,
        }
    }

    /// 建構器模式：設置合約狀態
    pub fn with_status(mut self, status: ContractStatus) -> Self {
        self.status = status;
        self
    }

    /// 建構器模式：設置合約類型
    pub fn with_contract_type(mut self, contract_type: ContractType) -> Self {
        self.contract_type = contract_type;
        self
    }

    /// 檢查合約是否仍在進行中（新簽約或施工中）
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            ContractStatus::New | ContractStatus::InProgress
        )
    }
}
