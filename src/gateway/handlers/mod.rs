//! HTTP handlers for the Saral gateway
//! Saral网关的HTTP处理器

pub mod generate;
pub mod health;
pub mod spa;

// Re-export all public items from each module / 重新导出每个模块的所有公共项
pub use generate::*;
pub use health::*;
pub use spa::*;
