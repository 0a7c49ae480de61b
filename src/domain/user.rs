// ==========================================
// MES 系统管理核心 - 用户领域模型
// ==========================================
// 对齐: schema sys_user / sys_user_role 表
// 红线: username 全局唯一; (user_id, role_id) 对至多出现一次
// ==========================================

use crate::domain::types::UserStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 系统用户
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,                      // 代理主键（会话分配，0=未持久化）
    pub username: String,             // 登录名（全局唯一）
    pub password_hash: String,        // bcrypt 密码散列
    pub real_name: Option<String>,    // 真实姓名
    pub employee_id: Option<i64>,     // 关联员工（可空外键）
    pub status: UserStatus,           // 状态: 1=启用, 2=禁用
    pub remark: Option<String>,       // 备注
    pub created_at: DateTime<Utc>,    // 创建时间
    pub updated_at: DateTime<Utc>,    // 更新时间
}

impl User {
    /// 创建新用户记录（id 由仓储 add 时分配）
    pub fn new(username: String, password_hash: String, real_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            username,
            password_hash,
            real_name,
            employee_id: None,
            status: UserStatus::Enabled,
            remark: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 用户-角色关联（多对多）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRole {
    pub id: i64,
    pub user_id: i64,
    pub role_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRole {
    pub fn new(user_id: i64, role_id: i64) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            user_id,
            role_id,
            created_at: now,
            updated_at: now,
        }
    }
}
