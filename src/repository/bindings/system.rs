// ==========================================
// 实体映射绑定 - 系统管理实体
// ==========================================
// 覆盖: 用户/角色/权限/关联行/字典/配置/操作日志
// ==========================================

use super::ts;
use crate::domain::{
    Dictionary, DictionaryItem, OperationLog, Permission, Role, RolePermission, SystemConfig,
    User, UserRole,
};
use crate::repository::generic::Entity;
use rusqlite::types::Value;
use rusqlite::Row;

impl Entity for User {
    const TABLE: &'static str = "sys_user";
    const DATA_COLUMNS: &'static [&'static str] = &[
        "username",
        "password_hash",
        "real_name",
        "employee_id",
        "status",
        "remark",
        "created_at",
        "updated_at",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            username: row.get(1)?,
            password_hash: row.get(2)?,
            real_name: row.get(3)?,
            employee_id: row.get(4)?,
            status: row.get(5)?,
            remark: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    fn data_values(&self) -> Vec<Value> {
        vec![
            self.username.clone().into(),
            self.password_hash.clone().into(),
            self.real_name.clone().into(),
            self.employee_id.into(),
            Value::Integer(self.status.as_i64()),
            self.remark.clone().into(),
            ts(&self.created_at),
            ts(&self.updated_at),
        ]
    }
}

impl Entity for UserRole {
    const TABLE: &'static str = "sys_user_role";
    const DATA_COLUMNS: &'static [&'static str] =
        &["user_id", "role_id", "created_at", "updated_at"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            role_id: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }

    fn data_values(&self) -> Vec<Value> {
        vec![
            self.user_id.into(),
            self.role_id.into(),
            ts(&self.created_at),
            ts(&self.updated_at),
        ]
    }
}

impl Entity for Role {
    const TABLE: &'static str = "sys_role";
    const DATA_COLUMNS: &'static [&'static str] = &[
        "role_code",
        "role_name",
        "status",
        "remark",
        "created_at",
        "updated_at",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            role_code: row.get(1)?,
            role_name: row.get(2)?,
            status: row.get(3)?,
            remark: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }

    fn data_values(&self) -> Vec<Value> {
        vec![
            self.role_code.clone().into(),
            self.role_name.clone().into(),
            Value::Integer(self.status.as_i64()),
            self.remark.clone().into(),
            ts(&self.created_at),
            ts(&self.updated_at),
        ]
    }
}

impl Entity for RolePermission {
    const TABLE: &'static str = "sys_role_permission";
    const DATA_COLUMNS: &'static [&'static str] =
        &["role_id", "permission_id", "created_at", "updated_at"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            role_id: row.get(1)?,
            permission_id: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }

    fn data_values(&self) -> Vec<Value> {
        vec![
            self.role_id.into(),
            self.permission_id.into(),
            ts(&self.created_at),
            ts(&self.updated_at),
        ]
    }
}

impl Entity for Permission {
    const TABLE: &'static str = "sys_permission";
    const DATA_COLUMNS: &'static [&'static str] = &[
        "permission_code",
        "permission_name",
        "kind",
        "parent_id",
        "menu_path",
        "icon",
        "sort_order",
        "status",
        "created_at",
        "updated_at",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            permission_code: row.get(1)?,
            permission_name: row.get(2)?,
            kind: row.get(3)?,
            parent_id: row.get(4)?,
            menu_path: row.get(5)?,
            icon: row.get(6)?,
            sort_order: row.get(7)?,
            status: row.get(8)?,
            created_at: row.get(9)?,
            updated_at: row.get(10)?,
        })
    }

    fn data_values(&self) -> Vec<Value> {
        vec![
            self.permission_code.clone().into(),
            self.permission_name.clone().into(),
            Value::Integer(self.kind.as_i64()),
            self.parent_id.into(),
            self.menu_path.clone().into(),
            self.icon.clone().into(),
            self.sort_order.into(),
            self.status.into(),
            ts(&self.created_at),
            ts(&self.updated_at),
        ]
    }
}

impl Entity for Dictionary {
    const TABLE: &'static str = "sys_dictionary";
    const DATA_COLUMNS: &'static [&'static str] = &[
        "dict_code",
        "dict_name",
        "status",
        "remark",
        "created_at",
        "updated_at",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            dict_code: row.get(1)?,
            dict_name: row.get(2)?,
            status: row.get(3)?,
            remark: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }

    fn data_values(&self) -> Vec<Value> {
        vec![
            self.dict_code.clone().into(),
            self.dict_name.clone().into(),
            Value::Integer(self.status.as_i64()),
            self.remark.clone().into(),
            ts(&self.created_at),
            ts(&self.updated_at),
        ]
    }
}

impl Entity for DictionaryItem {
    const TABLE: &'static str = "sys_dictionary_item";
    const DATA_COLUMNS: &'static [&'static str] = &[
        "dict_id",
        "item_value",
        "item_label",
        "sort_order",
        "status",
        "created_at",
        "updated_at",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            dict_id: row.get(1)?,
            item_value: row.get(2)?,
            item_label: row.get(3)?,
            sort_order: row.get(4)?,
            status: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }

    fn data_values(&self) -> Vec<Value> {
        vec![
            self.dict_id.into(),
            self.item_value.clone().into(),
            self.item_label.clone().into(),
            self.sort_order.into(),
            self.status.into(),
            ts(&self.created_at),
            ts(&self.updated_at),
        ]
    }
}

impl Entity for SystemConfig {
    const TABLE: &'static str = "sys_config";
    const DATA_COLUMNS: &'static [&'static str] = &[
        "config_key",
        "config_value",
        "remark",
        "created_at",
        "updated_at",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            config_key: row.get(1)?,
            config_value: row.get(2)?,
            remark: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }

    fn data_values(&self) -> Vec<Value> {
        vec![
            self.config_key.clone().into(),
            self.config_value.clone().into(),
            self.remark.clone().into(),
            ts(&self.created_at),
            ts(&self.updated_at),
        ]
    }
}

impl Entity for OperationLog {
    const TABLE: &'static str = "sys_operation_log";
    const DATA_COLUMNS: &'static [&'static str] = &[
        "operator",
        "module",
        "action",
        "detail",
        "result",
        "created_at",
        "updated_at",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            operator: row.get(1)?,
            module: row.get(2)?,
            action: row.get(3)?,
            detail: row.get(4)?,
            result: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }

    fn data_values(&self) -> Vec<Value> {
        vec![
            self.operator.clone().into(),
            self.module.clone().into(),
            self.action.clone().into(),
            self.detail.clone().into(),
            Value::Integer(self.result.as_i64()),
            ts(&self.created_at),
            ts(&self.updated_at),
        ]
    }
}
