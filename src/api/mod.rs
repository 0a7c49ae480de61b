// ==========================================
// MES 系统管理核心 - API层
// ==========================================
// 面向桌面壳层的服务接口: 仓储之上的业务校验 + 操作审计
// ==========================================

pub mod audit;
pub mod config_api;
pub mod dict_api;
pub mod equipment_api;
pub mod error;
pub mod log_api;
pub mod org_api;
pub mod product_api;
pub mod role_api;
pub mod user_api;

pub use audit::Audit;
pub use config_api::{ConfigApi, ConfigSnapshot};
pub use dict_api::DictApi;
pub use equipment_api::EquipmentApi;
pub use error::{ApiError, ApiResult};
pub use log_api::{LogApi, LogQuery};
pub use org_api::{DeptNode, OrgApi};
pub use product_api::ProductApi;
pub use role_api::{PermissionNode, RoleApi};
pub use user_api::{LoginSession, UserApi};
