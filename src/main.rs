// ==========================================
// MES 系统管理核心 - 主入口
// ==========================================
// 说明: 无界面启动入口，初始化日志与应用状态后即退出
//       桌面壳层以库模式持有 AppState
// ==========================================

use mes_system_core::app::{get_default_db_path, AppState};

fn main() {
    mes_system_core::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", mes_system_core::APP_NAME);
    tracing::info!("系统版本: {}", mes_system_core::VERSION);
    tracing::info!("==================================================");

    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    tracing::info!("正在初始化AppState...");
    match AppState::new(db_path) {
        Ok(state) => {
            tracing::info!("AppState初始化成功: db={}", state.get_db_path());
            tracing::info!("库模式使用: use mes_system_core::app::AppState;");
        }
        Err(e) => {
            tracing::error!("AppState初始化失败: {}", e);
            std::process::exit(1);
        }
    }
}
