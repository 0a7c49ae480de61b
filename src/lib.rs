// ==========================================
// MES 系统管理核心 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 制造执行系统桌面客户端的系统管理/主数据核心
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 泛型数据访问
pub mod repository;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// schema 配置（建表/索引/外键，启动时统一应用）
pub mod schema;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 桌面壳层集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    DictStatus, EmployeeStatus, EquipmentStatus, LogResult, MaintenanceType, PermissionKind,
    ProductStatus, RoleStatus, UserStatus,
};

// 领域实体
pub use domain::{
    Bom, Department, Dictionary, DictionaryItem, Employee, Equipment, MaintenanceRecord,
    OperationLog, Permission, ProcessRoute, ProcessStep, Product, Role, RolePermission,
    SystemConfig, User, UserRole,
};

// 仓储
pub use repository::{Entity, Filter, Repository, RepositoryError, RepositoryResult};

// API
pub use api::{
    ApiError, ApiResult, ConfigApi, DictApi, EquipmentApi, LogApi, OrgApi, ProductApi, RoleApi,
    UserApi,
};

// 应用状态
pub use app::{get_default_db_path, AppState};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "MES系统管理核心";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
