// ==========================================
// MES 系统管理核心 - 角色领域模型
// ==========================================
// 对齐: schema sys_role / sys_role_permission 表
// 红线: role_code 全局唯一; (role_id, permission_id) 对至多出现一次
// ==========================================

use crate::domain::types::RoleStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 角色
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub role_code: String,            // 角色编码（全局唯一）
    pub role_name: String,            // 角色名称
    pub status: RoleStatus,           // 状态: 1=启用, 2=禁用
    pub remark: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    pub fn new(role_code: String, role_name: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            role_code,
            role_name,
            status: RoleStatus::Enabled,
            remark: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 角色-权限关联（多对多）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolePermission {
    pub id: i64,
    pub role_id: i64,
    pub permission_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RolePermission {
    pub fn new(role_id: i64, permission_id: i64) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            role_id,
            permission_id,
            created_at: now,
            updated_at: now,
        }
    }
}
