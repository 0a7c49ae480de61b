// ==========================================
// MES 系统管理核心 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 说明: 单连接 + Mutex 共享; 启动时统一应用 schema 配置
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{
    Audit, ConfigApi, DictApi, EquipmentApi, LogApi, OrgApi, ProductApi, RoleApi, UserApi,
};
use crate::db::open_sqlite_connection;
use crate::domain::{
    Bom, Department, Dictionary, DictionaryItem, Employee, Equipment, MaintenanceRecord,
    OperationLog, Permission, ProcessRoute, ProcessStep, Product, Role, RolePermission,
    SystemConfig, User, UserRole,
};
use crate::repository::Repository;
use crate::schema::ensure_schema;

/// 应用状态
///
/// 包含所有API实例和共享资源，由桌面壳层作为全局状态持有
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 用户管理API
    pub user_api: Arc<UserApi>,

    /// 角色权限API
    pub role_api: Arc<RoleApi>,

    /// 组织结构API
    pub org_api: Arc<OrgApi>,

    /// 数据字典API
    pub dict_api: Arc<DictApi>,

    /// 系统配置API
    pub config_api: Arc<ConfigApi>,

    /// 产品工艺API
    pub product_api: Arc<ProductApi>,

    /// 设备管理API
    pub equipment_api: Arc<EquipmentApi>,

    /// 操作日志API
    pub log_api: Arc<LogApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// 该方法会:
    /// 1. 打开共享数据库连接并应用统一 PRAGMA
    /// 2. 应用全部 schema 配置（建表/索引/外键）
    /// 3. 初始化所有 Repository 和 API 实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn =
            open_sqlite_connection(&db_path).map_err(|e| format!("无法打开数据库: {}", e))?;
        ensure_schema(&conn).map_err(|e| format!("schema 初始化失败: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================

        let user_repo = Arc::new(Repository::<User>::new(conn.clone()));
        let user_role_repo = Arc::new(Repository::<UserRole>::new(conn.clone()));
        let role_repo = Arc::new(Repository::<Role>::new(conn.clone()));
        let role_permission_repo = Arc::new(Repository::<RolePermission>::new(conn.clone()));
        let permission_repo = Arc::new(Repository::<Permission>::new(conn.clone()));
        let dept_repo = Arc::new(Repository::<Department>::new(conn.clone()));
        let employee_repo = Arc::new(Repository::<Employee>::new(conn.clone()));
        let dict_repo = Arc::new(Repository::<Dictionary>::new(conn.clone()));
        let dict_item_repo = Arc::new(Repository::<DictionaryItem>::new(conn.clone()));
        let config_repo = Arc::new(Repository::<SystemConfig>::new(conn.clone()));
        let oplog_repo = Arc::new(Repository::<OperationLog>::new(conn.clone()));
        let product_repo = Arc::new(Repository::<Product>::new(conn.clone()));
        let bom_repo = Arc::new(Repository::<Bom>::new(conn.clone()));
        let route_repo = Arc::new(Repository::<ProcessRoute>::new(conn.clone()));
        let step_repo = Arc::new(Repository::<ProcessStep>::new(conn.clone()));
        let equipment_repo = Arc::new(Repository::<Equipment>::new(conn.clone()));
        let maintenance_repo = Arc::new(Repository::<MaintenanceRecord>::new(conn.clone()));

        // 审计日志（所有变更API共享）
        let audit = Arc::new(Audit::new(oplog_repo.clone()));

        // ==========================================
        // 初始化API层
        // ==========================================

        let user_api = Arc::new(UserApi::new(
            user_repo,
            role_repo.clone(),
            user_role_repo,
            audit.clone(),
        ));
        let role_api = Arc::new(RoleApi::new(
            role_repo,
            permission_repo,
            role_permission_repo,
            audit.clone(),
        ));
        let org_api = Arc::new(OrgApi::new(dept_repo, employee_repo, audit.clone()));
        let dict_api = Arc::new(DictApi::new(dict_repo, dict_item_repo, audit.clone()));
        let config_api = Arc::new(ConfigApi::new(config_repo, audit.clone()));
        let product_api = Arc::new(ProductApi::new(
            product_repo,
            bom_repo,
            route_repo,
            step_repo,
            audit.clone(),
        ));
        let equipment_api = Arc::new(EquipmentApi::new(equipment_repo, maintenance_repo, audit));
        let log_api = Arc::new(LogApi::new(oplog_repo));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            user_api,
            role_api,
            org_api,
            dict_api,
            config_api,
            product_api,
            equipment_api,
            log_api,
        })
    }

    /// 获取数据库路径
    pub fn get_db_path(&self) -> &str {
        &self.db_path
    }
}

// ==========================================
// 默认数据库路径辅助函数
// ==========================================

/// 获取默认数据库路径
///
/// 解析顺序: 环境变量 MES_SYSTEM_DB_PATH → 用户数据目录 → 本地回退文件
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var("MES_SYSTEM_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./mes_system.db");

    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录，避免污染生产数据
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("mes-system-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("mes-system");
        }

        std::fs::create_dir_all(&path).ok();
        path = path.join("mes_system.db");
    }

    path.to_string_lossy().to_string()
}
