// ==========================================
// MES 系统管理核心 - 角色权限API
// ==========================================
// 职责: 角色CRUD、权限CRUD（自引用树）、角色-权限授权
// 红线: (role_id, permission_id) 对至多一次;
//       被子权限引用的父权限禁止删除（RESTRICT 上抛）
// ==========================================

use crate::api::audit::Audit;
use crate::api::error::{ApiError, ApiResult};
use crate::domain::types::PermissionKind;
use crate::domain::{Permission, Role, RolePermission};
use crate::repository::{Filter, Repository};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

const MODULE: &str = "角色权限管理";

/// 权限树节点（邻接表组装结果）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionNode {
    pub permission: Permission,
    pub children: Vec<PermissionNode>,
}

/// 角色权限API
pub struct RoleApi {
    role_repo: Arc<Repository<Role>>,
    permission_repo: Arc<Repository<Permission>>,
    role_permission_repo: Arc<Repository<RolePermission>>,
    audit: Arc<Audit>,
}

impl RoleApi {
    pub fn new(
        role_repo: Arc<Repository<Role>>,
        permission_repo: Arc<Repository<Permission>>,
        role_permission_repo: Arc<Repository<RolePermission>>,
        audit: Arc<Audit>,
    ) -> Self {
        Self {
            role_repo,
            permission_repo,
            role_permission_repo,
            audit,
        }
    }

    // ==========================================
    // 角色
    // ==========================================

    pub fn create_role(&self, role_code: &str, role_name: &str, operator: &str) -> ApiResult<Role> {
        if role_code.trim().is_empty() {
            return Err(ApiError::InvalidInput("角色编码不能为空".to_string()));
        }

        let role = self
            .role_repo
            .add(Role::new(role_code.trim().to_string(), role_name.to_string()))?;
        self.audit.success(
            operator,
            MODULE,
            "创建角色",
            Some(format!("role_code={}", role.role_code)),
        );
        Ok(role)
    }

    pub fn list_roles(&self) -> ApiResult<Vec<Role>> {
        Ok(self.role_repo.get_all()?)
    }

    pub fn update_role(&self, role: &Role, operator: &str) -> ApiResult<()> {
        let mut updated = role.clone();
        updated.updated_at = Utc::now();
        self.role_repo.update(&updated)?;
        self.audit.success(
            operator,
            MODULE,
            "更新角色",
            Some(format!("role_id={}", role.id)),
        );
        Ok(())
    }

    /// 删除角色（授权行级联删除; id 不存在为空操作）
    pub fn delete_role(&self, role_id: i64, operator: &str) -> ApiResult<bool> {
        let removed = self.role_repo.delete_by_id(role_id)?;
        if removed {
            self.audit.success(
                operator,
                MODULE,
                "删除角色",
                Some(format!("role_id={}", role_id)),
            );
        }
        Ok(removed)
    }

    // ==========================================
    // 权限（自引用树）
    // ==========================================

    pub fn create_permission(
        &self,
        permission_code: &str,
        permission_name: &str,
        kind: PermissionKind,
        parent_id: Option<i64>,
        operator: &str,
    ) -> ApiResult<Permission> {
        if permission_code.trim().is_empty() {
            return Err(ApiError::InvalidInput("权限编码不能为空".to_string()));
        }
        if let Some(pid) = parent_id {
            if self.permission_repo.find_by_id(pid)?.is_none() {
                return Err(ApiError::NotFound(format!("父权限(id={})不存在", pid)));
            }
        }

        let permission = self.permission_repo.add(Permission::new(
            permission_code.trim().to_string(),
            permission_name.to_string(),
            kind,
            parent_id,
        ))?;
        self.audit.success(
            operator,
            MODULE,
            "创建权限",
            Some(format!("permission_code={}", permission.permission_code)),
        );
        Ok(permission)
    }

    /// 删除权限（仍被子权限引用时由 RESTRICT 外键拒绝）
    pub fn delete_permission(&self, permission_id: i64, operator: &str) -> ApiResult<bool> {
        match self.permission_repo.delete_by_id(permission_id) {
            Ok(removed) => {
                if removed {
                    self.audit.success(
                        operator,
                        MODULE,
                        "删除权限",
                        Some(format!("permission_id={}", permission_id)),
                    );
                }
                Ok(removed)
            }
            Err(e) => {
                self.audit.failure(
                    operator,
                    MODULE,
                    "删除权限",
                    Some(format!("permission_id={}, error={}", permission_id, e)),
                );
                Err(e.into())
            }
        }
    }

    /// 权限树（按 parent_id 邻接表组装，同级按 sort_order, id 排序）
    pub fn permission_tree(&self) -> ApiResult<Vec<PermissionNode>> {
        let all = self.permission_repo.get_all()?;

        let mut children_map: HashMap<Option<i64>, Vec<Permission>> = HashMap::new();
        for p in all {
            children_map.entry(p.parent_id).or_default().push(p);
        }

        fn attach(
            map: &mut HashMap<Option<i64>, Vec<Permission>>,
            parent: Option<i64>,
        ) -> Vec<PermissionNode> {
            let mut nodes = Vec::new();
            if let Some(mut list) = map.remove(&parent) {
                list.sort_by_key(|p| (p.sort_order, p.id));
                for p in list {
                    let id = p.id;
                    nodes.push(PermissionNode {
                        children: attach(map, Some(id)),
                        permission: p,
                    });
                }
            }
            nodes
        }

        Ok(attach(&mut children_map, None))
    }

    // ==========================================
    // 授权
    // ==========================================

    /// 为角色授予权限（重复授予触发唯一约束违反）
    pub fn grant_permission(
        &self,
        role_id: i64,
        permission_id: i64,
        operator: &str,
    ) -> ApiResult<RolePermission> {
        if self.role_repo.find_by_id(role_id)?.is_none() {
            return Err(ApiError::NotFound(format!("角色(id={})不存在", role_id)));
        }
        if self.permission_repo.find_by_id(permission_id)?.is_none() {
            return Err(ApiError::NotFound(format!(
                "权限(id={})不存在",
                permission_id
            )));
        }

        match self
            .role_permission_repo
            .add(RolePermission::new(role_id, permission_id))
        {
            Ok(grant) => {
                self.audit.success(
                    operator,
                    MODULE,
                    "授予权限",
                    Some(format!(
                        "role_id={}, permission_id={}",
                        role_id, permission_id
                    )),
                );
                Ok(grant)
            }
            Err(e) => {
                self.audit.failure(
                    operator,
                    MODULE,
                    "授予权限",
                    Some(format!(
                        "role_id={}, permission_id={}, error={}",
                        role_id, permission_id, e
                    )),
                );
                Err(e.into())
            }
        }
    }

    /// 撤销角色的权限（授权不存在为空操作）
    pub fn revoke_permission(
        &self,
        role_id: i64,
        permission_id: i64,
        operator: &str,
    ) -> ApiResult<bool> {
        let grants = self.role_permission_repo.find(
            &Filter::new()
                .eq("role_id", role_id)
                .eq("permission_id", permission_id),
        )?;

        let mut removed = false;
        for grant in grants {
            removed |= self.role_permission_repo.delete_by_id(grant.id)?;
        }

        if removed {
            self.audit.success(
                operator,
                MODULE,
                "撤销权限",
                Some(format!(
                    "role_id={}, permission_id={}",
                    role_id, permission_id
                )),
            );
        }
        Ok(removed)
    }

    /// 查询角色拥有的权限列表
    pub fn list_role_permissions(&self, role_id: i64) -> ApiResult<Vec<Permission>> {
        let grants = self.role_permission_repo.find(
            &Filter::new()
                .eq("role_id", role_id)
                .order_by("permission_id ASC"),
        )?;

        let mut permissions = Vec::with_capacity(grants.len());
        for grant in grants {
            if let Some(p) = self.permission_repo.find_by_id(grant.permission_id)? {
                permissions.push(p);
            }
        }
        Ok(permissions)
    }
}
