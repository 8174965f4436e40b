//! # Fitout
//!
//! 營造合約履約管理：合約、公寓、品項庫存、工班排程與缺料。
//! 此 crate 為門面，彙整各子 crate 的公開介面。

pub use fitout_core as core;
pub use fitout_engine as engine;
pub use fitout_store as store;

pub use fitout_core::{PlanError, PlanStore, Result};
pub use fitout_engine::{ConsumptionEngine, Reconciler, ScheduleAggregator};
pub use fitout_store::MemoryStore;
