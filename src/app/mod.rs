// ==========================================
// MES 系统管理核心 - 应用层
// ==========================================

pub mod state;

pub use state::{get_default_db_path, AppState};
