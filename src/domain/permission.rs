// ==========================================
// MES 系统管理核心 - 权限领域模型
// ==========================================
// 对齐: schema sys_permission 表
// 红线: 自引用树（parent_id），父节点被引用时禁止删除（RESTRICT）
// ==========================================

use crate::domain::types::PermissionKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 权限（目录/菜单/按钮，自引用树形结构）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permission {
    pub id: i64,
    pub permission_code: String,      // 权限编码（全局唯一）
    pub permission_name: String,      // 权限名称
    pub kind: PermissionKind,         // 类型: 1=目录, 2=菜单, 3=按钮
    pub parent_id: Option<i64>,       // 父权限（可空自引用外键）
    pub menu_path: Option<String>,    // 菜单路径（kind=菜单时使用）
    pub icon: Option<String>,         // 图标标识
    pub sort_order: i64,              // 同级排序号
    pub status: i64,                  // 状态: 1=启用, 2=禁用（仅存储，不做校验）
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Permission {
    pub fn new(
        permission_code: String,
        permission_name: String,
        kind: PermissionKind,
        parent_id: Option<i64>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            permission_code,
            permission_name,
            kind,
            parent_id,
            menu_path: None,
            icon: None,
            sort_order: 0,
            status: 1,
            created_at: now,
            updated_at: now,
        }
    }
}
