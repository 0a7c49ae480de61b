// ==========================================
// MES 系统管理核心 - 组织结构领域模型
// ==========================================
// 对齐: schema sys_department / sys_employee 表
// 红线: 部门为自引用树，父部门被引用时禁止删除（RESTRICT）
//       员工引用部门亦为 RESTRICT，不允许删除仍有员工的部门
// ==========================================

use crate::domain::types::EmployeeStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// 部门（自引用树形结构，邻接表存储）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub dept_code: String,            // 部门编码（全局唯一）
    pub dept_name: String,            // 部门名称
    pub parent_id: Option<i64>,       // 父部门（可空自引用外键）
    pub leader: Option<String>,       // 负责人
    pub phone: Option<String>,        // 联系电话
    pub sort_order: i64,              // 同级排序号
    pub status: i64,                  // 状态: 1=正常, 2=停用（仅存储，不做校验）
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Department {
    pub fn new(dept_code: String, dept_name: String, parent_id: Option<i64>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            dept_code,
            dept_name,
            parent_id,
            leader: None,
            phone: None,
            sort_order: 0,
            status: 1,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 员工
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub employee_code: String,        // 员工工号（全局唯一）
    pub employee_name: String,        // 员工姓名
    pub gender: i64,                  // 性别: 0=未知, 1=男, 2=女（仅存储）
    pub dept_id: Option<i64>,         // 所属部门（可空外键）
    pub phone: Option<String>,
    pub email: Option<String>,
    pub hire_date: Option<NaiveDate>, // 入职日期
    pub status: EmployeeStatus,       // 状态: 1=在职, 2=离职
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn new(employee_code: String, employee_name: String, dept_id: Option<i64>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            employee_code,
            employee_name,
            gender: 0,
            dept_id,
            phone: None,
            email: None,
            hire_date: None,
            status: EmployeeStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }
}
