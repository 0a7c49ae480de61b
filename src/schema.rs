// ==========================================
// MES 系统管理核心 - 数据库 Schema 配置
// ==========================================
// 职责: 声明式定义全部实体表结构（列约束/唯一索引/外键）
// 约束: 启动时一次性应用（CREATE TABLE IF NOT EXISTS，幂等）
// 红线: 自引用树（部门/权限）删除父节点使用 RESTRICT，禁止级联
// ==========================================

use crate::db::CURRENT_SCHEMA_VERSION;
use rusqlite::Connection;

/// 应用全部 schema 配置（幂等）
///
/// 说明：
/// - 所有业务编码字段（username/role_code/permission_code/dept_code/...）全局唯一
/// - 多对多关联（user_role/role_permission）对 (左,右) 建唯一索引
/// - 从属子表（字典项/工序步骤/维修记录/关联行）随属主 CASCADE
/// - 跨实体引用（员工→部门、BOM→产品、设备→部门）RESTRICT
pub fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        -- ===== schema 版本记录 =====
        CREATE TABLE IF NOT EXISTS schema_version (
          version INTEGER PRIMARY KEY,
          applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- ===== 组织结构 =====
        CREATE TABLE IF NOT EXISTS sys_department (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          dept_code TEXT NOT NULL,
          dept_name TEXT NOT NULL,
          parent_id INTEGER,
          leader TEXT,
          phone TEXT,
          sort_order INTEGER NOT NULL DEFAULT 0,
          status INTEGER NOT NULL DEFAULT 1,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL,
          FOREIGN KEY (parent_id) REFERENCES sys_department(id) ON DELETE RESTRICT
        );
        CREATE UNIQUE INDEX IF NOT EXISTS uq_department_code ON sys_department(dept_code);
        CREATE INDEX IF NOT EXISTS idx_department_parent ON sys_department(parent_id);

        CREATE TABLE IF NOT EXISTS sys_employee (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          employee_code TEXT NOT NULL,
          employee_name TEXT NOT NULL,
          gender INTEGER NOT NULL DEFAULT 0,
          dept_id INTEGER,
          phone TEXT,
          email TEXT,
          hire_date TEXT,
          status INTEGER NOT NULL DEFAULT 1,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL,
          FOREIGN KEY (dept_id) REFERENCES sys_department(id) ON DELETE RESTRICT
        );
        CREATE UNIQUE INDEX IF NOT EXISTS uq_employee_code ON sys_employee(employee_code);
        CREATE INDEX IF NOT EXISTS idx_employee_dept ON sys_employee(dept_id);

        -- ===== 用户/角色/权限 =====
        CREATE TABLE IF NOT EXISTS sys_user (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          username TEXT NOT NULL,
          password_hash TEXT NOT NULL,
          real_name TEXT,
          employee_id INTEGER,
          status INTEGER NOT NULL DEFAULT 1,
          remark TEXT,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL,
          FOREIGN KEY (employee_id) REFERENCES sys_employee(id) ON DELETE RESTRICT
        );
        CREATE UNIQUE INDEX IF NOT EXISTS uq_user_username ON sys_user(username);

        CREATE TABLE IF NOT EXISTS sys_role (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          role_code TEXT NOT NULL,
          role_name TEXT NOT NULL,
          status INTEGER NOT NULL DEFAULT 1,
          remark TEXT,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL
        );
        CREATE UNIQUE INDEX IF NOT EXISTS uq_role_code ON sys_role(role_code);

        CREATE TABLE IF NOT EXISTS sys_permission (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          permission_code TEXT NOT NULL,
          permission_name TEXT NOT NULL,
          kind INTEGER NOT NULL DEFAULT 2,
          parent_id INTEGER,
          menu_path TEXT,
          icon TEXT,
          sort_order INTEGER NOT NULL DEFAULT 0,
          status INTEGER NOT NULL DEFAULT 1,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL,
          FOREIGN KEY (parent_id) REFERENCES sys_permission(id) ON DELETE RESTRICT
        );
        CREATE UNIQUE INDEX IF NOT EXISTS uq_permission_code ON sys_permission(permission_code);
        CREATE INDEX IF NOT EXISTS idx_permission_parent ON sys_permission(parent_id);

        CREATE TABLE IF NOT EXISTS sys_user_role (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          user_id INTEGER NOT NULL,
          role_id INTEGER NOT NULL,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL,
          FOREIGN KEY (user_id) REFERENCES sys_user(id) ON DELETE CASCADE,
          FOREIGN KEY (role_id) REFERENCES sys_role(id) ON DELETE CASCADE
        );
        CREATE UNIQUE INDEX IF NOT EXISTS uq_user_role_pair ON sys_user_role(user_id, role_id);
        CREATE INDEX IF NOT EXISTS idx_user_role_role ON sys_user_role(role_id);

        CREATE TABLE IF NOT EXISTS sys_role_permission (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          role_id INTEGER NOT NULL,
          permission_id INTEGER NOT NULL,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL,
          FOREIGN KEY (role_id) REFERENCES sys_role(id) ON DELETE CASCADE,
          FOREIGN KEY (permission_id) REFERENCES sys_permission(id) ON DELETE CASCADE
        );
        CREATE UNIQUE INDEX IF NOT EXISTS uq_role_permission_pair
          ON sys_role_permission(role_id, permission_id);
        CREATE INDEX IF NOT EXISTS idx_role_permission_permission
          ON sys_role_permission(permission_id);

        -- ===== 数据字典 =====
        CREATE TABLE IF NOT EXISTS sys_dictionary (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          dict_code TEXT NOT NULL,
          dict_name TEXT NOT NULL,
          status INTEGER NOT NULL DEFAULT 1,
          remark TEXT,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL
        );
        CREATE UNIQUE INDEX IF NOT EXISTS uq_dictionary_code ON sys_dictionary(dict_code);

        CREATE TABLE IF NOT EXISTS sys_dictionary_item (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          dict_id INTEGER NOT NULL,
          item_value TEXT NOT NULL,
          item_label TEXT NOT NULL,
          sort_order INTEGER NOT NULL DEFAULT 0,
          status INTEGER NOT NULL DEFAULT 1,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL,
          FOREIGN KEY (dict_id) REFERENCES sys_dictionary(id) ON DELETE CASCADE
        );
        CREATE UNIQUE INDEX IF NOT EXISTS uq_dictionary_item_value
          ON sys_dictionary_item(dict_id, item_value);
        CREATE INDEX IF NOT EXISTS idx_dictionary_item_dict ON sys_dictionary_item(dict_id);

        -- ===== 系统配置 / 操作日志 =====
        CREATE TABLE IF NOT EXISTS sys_config (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          config_key TEXT NOT NULL,
          config_value TEXT NOT NULL,
          remark TEXT,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL
        );
        CREATE UNIQUE INDEX IF NOT EXISTS uq_config_key ON sys_config(config_key);

        CREATE TABLE IF NOT EXISTS sys_operation_log (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          operator TEXT NOT NULL,
          module TEXT NOT NULL,
          action TEXT NOT NULL,
          detail TEXT,
          result INTEGER NOT NULL DEFAULT 1,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL
        );
        -- 操作日志按时间窗口查询频繁，保持查询性能
        CREATE INDEX IF NOT EXISTS idx_oplog_created_at ON sys_operation_log(created_at);
        CREATE INDEX IF NOT EXISTS idx_oplog_module_ts ON sys_operation_log(module, created_at);
        CREATE INDEX IF NOT EXISTS idx_oplog_operator_ts ON sys_operation_log(operator, created_at);

        -- ===== 制造主数据 =====
        CREATE TABLE IF NOT EXISTS mes_product (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          product_code TEXT NOT NULL,
          product_name TEXT NOT NULL,
          spec TEXT,
          unit TEXT,
          status INTEGER NOT NULL DEFAULT 1,
          remark TEXT,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL
        );
        CREATE UNIQUE INDEX IF NOT EXISTS uq_product_code ON mes_product(product_code);

        CREATE TABLE IF NOT EXISTS mes_bom (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          product_id INTEGER NOT NULL,
          component_id INTEGER NOT NULL,
          quantity REAL NOT NULL DEFAULT 1.0,
          remark TEXT,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL,
          FOREIGN KEY (product_id) REFERENCES mes_product(id) ON DELETE RESTRICT,
          FOREIGN KEY (component_id) REFERENCES mes_product(id) ON DELETE RESTRICT
        );
        CREATE UNIQUE INDEX IF NOT EXISTS uq_bom_pair ON mes_bom(product_id, component_id);
        CREATE INDEX IF NOT EXISTS idx_bom_component ON mes_bom(component_id);

        CREATE TABLE IF NOT EXISTS mes_process_route (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          route_code TEXT NOT NULL,
          route_name TEXT NOT NULL,
          product_id INTEGER,
          status INTEGER NOT NULL DEFAULT 1,
          remark TEXT,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL,
          FOREIGN KEY (product_id) REFERENCES mes_product(id) ON DELETE RESTRICT
        );
        CREATE UNIQUE INDEX IF NOT EXISTS uq_route_code ON mes_process_route(route_code);
        CREATE INDEX IF NOT EXISTS idx_route_product ON mes_process_route(product_id);

        CREATE TABLE IF NOT EXISTS mes_equipment (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          equipment_code TEXT NOT NULL,
          equipment_name TEXT NOT NULL,
          model TEXT,
          dept_id INTEGER,
          location TEXT,
          status INTEGER NOT NULL DEFAULT 1,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL,
          FOREIGN KEY (dept_id) REFERENCES sys_department(id) ON DELETE RESTRICT
        );
        CREATE UNIQUE INDEX IF NOT EXISTS uq_equipment_code ON mes_equipment(equipment_code);
        CREATE INDEX IF NOT EXISTS idx_equipment_dept ON mes_equipment(dept_id);

        CREATE TABLE IF NOT EXISTS mes_process_step (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          route_id INTEGER NOT NULL,
          step_no INTEGER NOT NULL,
          step_name TEXT NOT NULL,
          equipment_id INTEGER,
          remark TEXT,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL,
          FOREIGN KEY (route_id) REFERENCES mes_process_route(id) ON DELETE CASCADE,
          FOREIGN KEY (equipment_id) REFERENCES mes_equipment(id) ON DELETE RESTRICT
        );
        CREATE UNIQUE INDEX IF NOT EXISTS uq_process_step_no ON mes_process_step(route_id, step_no);
        CREATE INDEX IF NOT EXISTS idx_process_step_route ON mes_process_step(route_id);

        CREATE TABLE IF NOT EXISTS mes_maintenance_record (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          equipment_id INTEGER NOT NULL,
          maintenance_type INTEGER NOT NULL DEFAULT 1,
          content TEXT,
          maintainer TEXT,
          maintained_at TEXT NOT NULL,
          result INTEGER NOT NULL DEFAULT 1,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL,
          FOREIGN KEY (equipment_id) REFERENCES mes_equipment(id) ON DELETE CASCADE
        );
        CREATE INDEX IF NOT EXISTS idx_maintenance_equipment
          ON mes_maintenance_record(equipment_id, maintained_at);
        "#,
    )?;

    // 记录 schema 版本（幂等，重复应用不新增）
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{open_sqlite_connection, read_schema_version};

    #[test]
    fn test_ensure_schema_idempotent() {
        let conn = open_sqlite_connection(":memory:").expect("打开内存库失败");
        ensure_schema(&conn).expect("首次建表失败");
        ensure_schema(&conn).expect("重复建表应幂等");

        let version = read_schema_version(&conn).expect("读取版本失败");
        assert_eq!(version, Some(CURRENT_SCHEMA_VERSION));
    }

    #[test]
    fn test_all_tables_created() {
        let conn = open_sqlite_connection(":memory:").expect("打开内存库失败");
        ensure_schema(&conn).expect("建表失败");

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master
                 WHERE type='table' AND (name LIKE 'sys_%' OR name LIKE 'mes_%')",
                [],
                |row| row.get(0),
            )
            .expect("查询表数量失败");

        // 11 张系统管理表 + 6 张制造主数据表
        assert_eq!(count, 17);
    }
}
