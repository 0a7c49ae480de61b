// ==========================================
// MES 系统管理核心 - 系统配置API
// ==========================================
// 职责: key-value 配置读写（upsert）、JSON 快照导出/恢复
// 红线: config_key 全局唯一，set 永远只保留一行
// ==========================================

use crate::api::audit::Audit;
use crate::api::error::{ApiError, ApiResult};
use crate::domain::SystemConfig;
use crate::repository::{Filter, Repository};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

const MODULE: &str = "系统配置";

/// 配置快照（JSON 导出/恢复载体）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    pub exported_at: chrono::DateTime<Utc>,
    pub entries: BTreeMap<String, String>,
}

/// 系统配置API
pub struct ConfigApi {
    config_repo: Arc<Repository<SystemConfig>>,
    audit: Arc<Audit>,
}

impl ConfigApi {
    pub fn new(config_repo: Arc<Repository<SystemConfig>>, audit: Arc<Audit>) -> Self {
        Self { config_repo, audit }
    }

    fn find_entry(&self, config_key: &str) -> ApiResult<Option<SystemConfig>> {
        let mut found = self
            .config_repo
            .find(&Filter::new().eq("config_key", config_key.to_string()))?;
        Ok(found.pop())
    }

    /// 读取配置值
    pub fn get(&self, config_key: &str) -> ApiResult<Option<String>> {
        Ok(self.find_entry(config_key)?.map(|c| c.config_value))
    }

    /// 读取配置值，缺失时返回默认值
    pub fn get_or(&self, config_key: &str, default: &str) -> ApiResult<String> {
        Ok(self
            .get(config_key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 写入配置（upsert: 已存在则覆盖值，否则新建）
    pub fn set(&self, config_key: &str, config_value: &str, operator: &str) -> ApiResult<()> {
        if config_key.trim().is_empty() {
            return Err(ApiError::InvalidInput("配置键不能为空".to_string()));
        }

        match self.find_entry(config_key)? {
            Some(mut entry) => {
                entry.config_value = config_value.to_string();
                entry.updated_at = Utc::now();
                self.config_repo.update(&entry)?;
            }
            None => {
                self.config_repo.add(SystemConfig::new(
                    config_key.trim().to_string(),
                    config_value.to_string(),
                ))?;
            }
        }

        self.audit.success(
            operator,
            MODULE,
            "写入配置",
            Some(format!("config_key={}", config_key)),
        );
        Ok(())
    }

    pub fn delete(&self, config_key: &str, operator: &str) -> ApiResult<bool> {
        let removed = match self.find_entry(config_key)? {
            Some(entry) => self.config_repo.delete_by_id(entry.id)?,
            None => false,
        };
        if removed {
            self.audit.success(
                operator,
                MODULE,
                "删除配置",
                Some(format!("config_key={}", config_key)),
            );
        }
        Ok(removed)
    }

    pub fn list_all(&self) -> ApiResult<Vec<SystemConfig>> {
        Ok(self.config_repo.get_all()?)
    }

    /// 导出全部配置为 JSON 快照
    pub fn snapshot(&self) -> ApiResult<String> {
        let entries = self
            .config_repo
            .get_all()?
            .into_iter()
            .map(|c| (c.config_key, c.config_value))
            .collect();

        let snapshot = ConfigSnapshot {
            exported_at: Utc::now(),
            entries,
        };
        serde_json::to_string_pretty(&snapshot)
            .map_err(|e| ApiError::InternalError(format!("配置快照序列化失败: {}", e)))
    }

    /// 从 JSON 快照恢复（逐键 upsert，不删除快照外的键）
    pub fn restore_snapshot(&self, json: &str, operator: &str) -> ApiResult<usize> {
        let snapshot: ConfigSnapshot = serde_json::from_str(json)
            .map_err(|e| ApiError::InvalidInput(format!("配置快照解析失败: {}", e)))?;

        let count = snapshot.entries.len();
        for (key, value) in &snapshot.entries {
            self.set(key, value, operator)?;
        }

        self.audit.success(
            operator,
            MODULE,
            "恢复配置快照",
            Some(format!("entries={}", count)),
        );
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_sqlite_connection;
    use crate::domain::OperationLog;
    use crate::schema::ensure_schema;
    use std::sync::Mutex;

    fn setup_api() -> ConfigApi {
        let conn = open_sqlite_connection(":memory:").expect("打开内存库失败");
        ensure_schema(&conn).expect("建表失败");
        let conn = Arc::new(Mutex::new(conn));

        let oplog_repo = Arc::new(Repository::<OperationLog>::new(conn.clone()));
        ConfigApi::new(
            Arc::new(Repository::<SystemConfig>::new(conn.clone())),
            Arc::new(Audit::new(oplog_repo)),
        )
    }

    #[test]
    fn test_set_twice_keeps_single_row() {
        let api = setup_api();
        api.set("factory.name", "一号轧钢厂", "admin").expect("写入失败");
        api.set("factory.name", "二号轧钢厂", "admin").expect("覆盖失败");

        assert_eq!(
            api.get("factory.name").expect("读取失败"),
            Some("二号轧钢厂".to_string())
        );
        assert_eq!(api.list_all().expect("列表失败").len(), 1);
    }

    #[test]
    fn test_get_or_default() {
        let api = setup_api();
        assert_eq!(
            api.get_or("missing.key", "fallback").expect("读取失败"),
            "fallback"
        );
    }

    #[test]
    fn test_snapshot_restore_roundtrip() {
        let api = setup_api();
        api.set("a", "1", "admin").expect("写入失败");
        api.set("b", "2", "admin").expect("写入失败");

        let json = api.snapshot().expect("快照失败");

        api.set("a", "changed", "admin").expect("覆盖失败");
        api.delete("b", "admin").expect("删除失败");

        let restored = api.restore_snapshot(&json, "admin").expect("恢复失败");
        assert_eq!(restored, 2);
        assert_eq!(api.get("a").expect("读取失败"), Some("1".to_string()));
        assert_eq!(api.get("b").expect("读取失败"), Some("2".to_string()));
    }
}
