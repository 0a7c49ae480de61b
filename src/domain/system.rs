// ==========================================
// MES 系统管理核心 - 系统配置与操作日志
// ==========================================
// 对齐: schema sys_config / sys_operation_log 表
// 说明: 操作日志为无结构追加日志，无保留/轮转策略
// ==========================================

use crate::domain::types::LogResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 系统配置（key-value）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    pub id: i64,
    pub config_key: String,           // 配置键（全局唯一）
    pub config_value: String,         // 配置值
    pub remark: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SystemConfig {
    pub fn new(config_key: String, config_value: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            config_key,
            config_value,
            remark: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 操作日志（追加式审计记录）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationLog {
    pub id: i64,
    pub operator: String,             // 操作人（登录名）
    pub module: String,               // 功能模块（如 "用户管理"）
    pub action: String,               // 操作动作（如 "创建用户"）
    pub detail: Option<String>,       // 操作详情
    pub result: LogResult,            // 结果: 0=失败, 1=成功
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OperationLog {
    pub fn new(
        operator: String,
        module: String,
        action: String,
        detail: Option<String>,
        result: LogResult,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            operator,
            module,
            action,
            detail,
            result,
            created_at: now,
            updated_at: now,
        }
    }
}
