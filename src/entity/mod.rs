//! SeaORM entity definitions
//!
//! One module per table; enums live next to the entity that owns them.

pub mod allocation;
pub mod asset;
pub mod audit_log;
pub mod branch;
pub mod contract;
pub mod department;
pub mod invoice;
pub mod notification;
pub mod payment;
pub mod reminder_schedule;
pub mod renewal_history;
pub mod user;
pub mod vendor;
