// ==========================================
// 实体映射绑定 - 组织结构实体
// ==========================================
// 覆盖: 部门/员工
// ==========================================

use super::{opt_date, ts};
use crate::domain::{Department, Employee};
use crate::repository::generic::Entity;
use rusqlite::types::Value;
use rusqlite::Row;

impl Entity for Department {
    const TABLE: &'static str = "sys_department";
    const DATA_COLUMNS: &'static [&'static str] = &[
        "dept_code",
        "dept_name",
        "parent_id",
        "leader",
        "phone",
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
            dept_code: row.get(1)?,
            dept_name: row.get(2)?,
            parent_id: row.get(3)?,
            leader: row.get(4)?,
            phone: row.get(5)?,
            sort_order: row.get(6)?,
            status: row.get(7)?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
        })
    }

    fn data_values(&self) -> Vec<Value> {
        vec![
            self.dept_code.clone().into(),
            self.dept_name.clone().into(),
            self.parent_id.into(),
            self.leader.clone().into(),
            self.phone.clone().into(),
            self.sort_order.into(),
            self.status.into(),
            ts(&self.created_at),
            ts(&self.updated_at),
        ]
    }
}

impl Entity for Employee {
    const TABLE: &'static str = "sys_employee";
    const DATA_COLUMNS: &'static [&'static str] = &[
        "employee_code",
        "employee_name",
        "gender",
        "dept_id",
        "phone",
        "email",
        "hire_date",
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
            employee_code: row.get(1)?,
            employee_name: row.get(2)?,
            gender: row.get(3)?,
            dept_id: row.get(4)?,
            phone: row.get(5)?,
            email: row.get(6)?,
            hire_date: row.get(7)?,
            status: row.get(8)?,
            created_at: row.get(9)?,
            updated_at: row.get(10)?,
        })
    }

    fn data_values(&self) -> Vec<Value> {
        vec![
            self.employee_code.clone().into(),
            self.employee_name.clone().into(),
            self.gender.into(),
            self.dept_id.into(),
            self.phone.clone().into(),
            self.email.clone().into(),
            opt_date(&self.hire_date),
            Value::Integer(self.status.as_i64()),
            ts(&self.created_at),
            ts(&self.updated_at),
        ]
    }
}
