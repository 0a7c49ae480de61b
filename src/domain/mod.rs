// ==========================================
// MES 系统管理核心 - 领域层
// ==========================================
// 职责: 定义扁平实体记录与实体级状态类型
// 约束: 领域结构不含 SQL，行映射在仓储绑定层完成
// ==========================================

pub mod department;
pub mod dictionary;
pub mod manufacturing;
pub mod permission;
pub mod role;
pub mod system;
pub mod types;
pub mod user;

// 重导出核心实体
pub use department::{Department, Employee};
pub use dictionary::{Dictionary, DictionaryItem};
pub use manufacturing::{Bom, Equipment, MaintenanceRecord, ProcessRoute, ProcessStep, Product};
pub use permission::Permission;
pub use role::{Role, RolePermission};
pub use system::{OperationLog, SystemConfig};
pub use user::{User, UserRole};
