//! # Fitout Engine
//!
//! 排程與庫存調節引擎：
//! 工班排程彙總、排程公寓集合差異比對、合約開工庫存扣減與缺料登記

pub mod aggregator;
pub mod collect;
pub mod consumption;
pub mod demand;
pub mod reconcile;
pub mod views;

// Re-export 主要類型
pub use aggregator::{ApartmentWork, RequiredItem, ScheduleAggregator, ScheduleEntry};
pub use collect::collect_completed;
pub use demand::register_apartment;
pub use consumption::{ConsumptionEngine, ConsumptionReport, OpeningOutcome, OutcomeKind};
pub use reconcile::{LinkDelta, Reconciler};
pub use views::{ContractView, ItemView};
