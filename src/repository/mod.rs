// ==========================================
// MES 系统管理核心 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod bindings;
pub mod error;
pub mod filter;
pub mod generic;

// 重导出核心类型
pub use error::{RepositoryError, RepositoryResult};
pub use filter::Filter;
pub use generic::{Entity, Repository};
