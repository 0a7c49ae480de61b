// ==========================================
// MES 系统管理核心 - 组织结构API
// ==========================================
// 职责: 部门CRUD（自引用树）、员工CRUD、员工调动
// 红线: 被子部门或员工引用的部门禁止删除（RESTRICT 上抛）
// ==========================================

use crate::api::audit::Audit;
use crate::api::error::{ApiError, ApiResult};
use crate::domain::{Department, Employee};
use crate::repository::{Filter, Repository};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

const MODULE: &str = "组织管理";

/// 部门树节点（邻接表组装结果）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeptNode {
    pub department: Department,
    pub children: Vec<DeptNode>,
}

/// 组织结构API
pub struct OrgApi {
    dept_repo: Arc<Repository<Department>>,
    employee_repo: Arc<Repository<Employee>>,
    audit: Arc<Audit>,
}

impl OrgApi {
    pub fn new(
        dept_repo: Arc<Repository<Department>>,
        employee_repo: Arc<Repository<Employee>>,
        audit: Arc<Audit>,
    ) -> Self {
        Self {
            dept_repo,
            employee_repo,
            audit,
        }
    }

    // ==========================================
    // 部门
    // ==========================================

    pub fn create_department(
        &self,
        dept_code: &str,
        dept_name: &str,
        parent_id: Option<i64>,
        operator: &str,
    ) -> ApiResult<Department> {
        if dept_code.trim().is_empty() {
            return Err(ApiError::InvalidInput("部门编码不能为空".to_string()));
        }
        if let Some(pid) = parent_id {
            if self.dept_repo.find_by_id(pid)?.is_none() {
                return Err(ApiError::NotFound(format!("父部门(id={})不存在", pid)));
            }
        }

        let dept = self.dept_repo.add(Department::new(
            dept_code.trim().to_string(),
            dept_name.to_string(),
            parent_id,
        ))?;
        self.audit.success(
            operator,
            MODULE,
            "创建部门",
            Some(format!("dept_code={}", dept.dept_code)),
        );
        Ok(dept)
    }

    pub fn list_departments(&self) -> ApiResult<Vec<Department>> {
        Ok(self.dept_repo.get_all()?)
    }

    pub fn update_department(&self, dept: &Department, operator: &str) -> ApiResult<()> {
        let mut updated = dept.clone();
        updated.updated_at = Utc::now();
        self.dept_repo.update(&updated)?;
        self.audit.success(
            operator,
            MODULE,
            "更新部门",
            Some(format!("dept_id={}", dept.id)),
        );
        Ok(())
    }

    /// 删除部门（仍被子部门/员工引用时由 RESTRICT 外键拒绝）
    pub fn delete_department(&self, dept_id: i64, operator: &str) -> ApiResult<bool> {
        match self.dept_repo.delete_by_id(dept_id) {
            Ok(removed) => {
                if removed {
                    self.audit.success(
                        operator,
                        MODULE,
                        "删除部门",
                        Some(format!("dept_id={}", dept_id)),
                    );
                }
                Ok(removed)
            }
            Err(e) => {
                self.audit.failure(
                    operator,
                    MODULE,
                    "删除部门",
                    Some(format!("dept_id={}, error={}", dept_id, e)),
                );
                Err(e.into())
            }
        }
    }

    /// 部门树（按 parent_id 邻接表组装，同级按 sort_order, id 排序）
    pub fn department_tree(&self) -> ApiResult<Vec<DeptNode>> {
        let all = self.dept_repo.get_all()?;

        let mut children_map: HashMap<Option<i64>, Vec<Department>> = HashMap::new();
        for d in all {
            children_map.entry(d.parent_id).or_default().push(d);
        }

        fn attach(
            map: &mut HashMap<Option<i64>, Vec<Department>>,
            parent: Option<i64>,
        ) -> Vec<DeptNode> {
            let mut nodes = Vec::new();
            if let Some(mut list) = map.remove(&parent) {
                list.sort_by_key(|d| (d.sort_order, d.id));
                for d in list {
                    let id = d.id;
                    nodes.push(DeptNode {
                        children: attach(map, Some(id)),
                        department: d,
                    });
                }
            }
            nodes
        }

        Ok(attach(&mut children_map, None))
    }

    // ==========================================
    // 员工
    // ==========================================

    pub fn create_employee(
        &self,
        employee_code: &str,
        employee_name: &str,
        dept_id: Option<i64>,
        operator: &str,
    ) -> ApiResult<Employee> {
        if employee_code.trim().is_empty() {
            return Err(ApiError::InvalidInput("员工工号不能为空".to_string()));
        }
        if let Some(did) = dept_id {
            if self.dept_repo.find_by_id(did)?.is_none() {
                return Err(ApiError::NotFound(format!("部门(id={})不存在", did)));
            }
        }

        let employee = self.employee_repo.add(Employee::new(
            employee_code.trim().to_string(),
            employee_name.to_string(),
            dept_id,
        ))?;
        self.audit.success(
            operator,
            MODULE,
            "创建员工",
            Some(format!("employee_code={}", employee.employee_code)),
        );
        Ok(employee)
    }

    pub fn get_employee(&self, employee_id: i64) -> ApiResult<Option<Employee>> {
        Ok(self.employee_repo.find_by_id(employee_id)?)
    }

    pub fn list_employees(&self) -> ApiResult<Vec<Employee>> {
        Ok(self.employee_repo.get_all()?)
    }

    /// 按部门查询在职员工
    pub fn list_department_employees(&self, dept_id: i64) -> ApiResult<Vec<Employee>> {
        Ok(self.employee_repo.find(
            &Filter::new()
                .eq("dept_id", dept_id)
                .order_by("employee_code ASC"),
        )?)
    }

    pub fn update_employee(&self, employee: &Employee, operator: &str) -> ApiResult<()> {
        let mut updated = employee.clone();
        updated.updated_at = Utc::now();
        self.employee_repo.update(&updated)?;
        self.audit.success(
            operator,
            MODULE,
            "更新员工",
            Some(format!("employee_id={}", employee.id)),
        );
        Ok(())
    }

    /// 员工调动（目标部门必须存在; None 表示调出至无部门）
    pub fn transfer_employee(
        &self,
        employee_id: i64,
        target_dept_id: Option<i64>,
        operator: &str,
    ) -> ApiResult<Employee> {
        let mut employee = self
            .employee_repo
            .find_by_id(employee_id)?
            .ok_or_else(|| ApiError::NotFound(format!("员工(id={})不存在", employee_id)))?;

        if let Some(did) = target_dept_id {
            if self.dept_repo.find_by_id(did)?.is_none() {
                return Err(ApiError::NotFound(format!("目标部门(id={})不存在", did)));
            }
        }

        let from = employee.dept_id;
        employee.dept_id = target_dept_id;
        employee.updated_at = Utc::now();
        self.employee_repo.update(&employee)?;

        self.audit.success(
            operator,
            MODULE,
            "员工调动",
            Some(format!(
                "employee_id={}, from_dept={:?}, to_dept={:?}",
                employee_id, from, target_dept_id
            )),
        );
        Ok(employee)
    }

    pub fn delete_employee(&self, employee_id: i64, operator: &str) -> ApiResult<bool> {
        let removed = self.employee_repo.delete_by_id(employee_id)?;
        if removed {
            self.audit.success(
                operator,
                MODULE,
                "删除员工",
                Some(format!("employee_id={}", employee_id)),
            );
        }
        Ok(removed)
    }
}
