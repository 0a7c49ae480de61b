// ==========================================
// MES 系统管理核心 - 用户管理API
// ==========================================
// 职责: 用户CRUD、登录认证、密码管理、用户-角色分配
// 红线: 密码仅存 bcrypt 散列; (user_id, role_id) 对至多一次
// ==========================================

use crate::api::audit::Audit;
use crate::api::error::{ApiError, ApiResult};
use crate::domain::types::UserStatus;
use crate::domain::{Role, User, UserRole};
use crate::repository::{Filter, Repository};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// 模块名（操作日志归档用）
const MODULE: &str = "用户管理";

/// 登录会话
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginSession {
    pub token: String,             // 会话令牌（UUID）
    pub user_id: i64,
    pub username: String,
    pub real_name: Option<String>,
    pub login_at: DateTime<Utc>,
}

/// 用户管理API
pub struct UserApi {
    user_repo: Arc<Repository<User>>,
    role_repo: Arc<Repository<Role>>,
    user_role_repo: Arc<Repository<UserRole>>,
    audit: Arc<Audit>,
}

impl UserApi {
    pub fn new(
        user_repo: Arc<Repository<User>>,
        role_repo: Arc<Repository<Role>>,
        user_role_repo: Arc<Repository<UserRole>>,
        audit: Arc<Audit>,
    ) -> Self {
        Self {
            user_repo,
            role_repo,
            user_role_repo,
            audit,
        }
    }

    /// 创建用户（密码即时散列，明文不落库）
    pub fn create_user(
        &self,
        username: &str,
        password: &str,
        real_name: Option<String>,
        operator: &str,
    ) -> ApiResult<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ApiError::InvalidInput("登录名不能为空".to_string()));
        }
        if password.is_empty() {
            return Err(ApiError::InvalidInput("密码不能为空".to_string()));
        }

        let hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| ApiError::InternalError(format!("密码散列失败: {}", e)))?;

        match self
            .user_repo
            .add(User::new(username.to_string(), hash, real_name))
        {
            Ok(user) => {
                self.audit.success(
                    operator,
                    MODULE,
                    "创建用户",
                    Some(format!("username={}", user.username)),
                );
                Ok(user)
            }
            Err(e) => {
                self.audit.failure(
                    operator,
                    MODULE,
                    "创建用户",
                    Some(format!("username={}, error={}", username, e)),
                );
                Err(e.into())
            }
        }
    }

    /// 登录认证
    ///
    /// 成功返回会话令牌; 用户不存在/密码错误/用户禁用均拒绝，
    /// 成功与失败均写入操作日志。
    pub fn login(&self, username: &str, password: &str) -> ApiResult<LoginSession> {
        let found = self
            .user_repo
            .find(&Filter::new().eq("username", username.to_string()))?;

        let user = match found.into_iter().next() {
            Some(u) => u,
            None => {
                self.audit
                    .failure(username, MODULE, "登录", Some("用户不存在".to_string()));
                // 不区分“用户不存在”与“密码错误”，避免探测登录名
                return Err(ApiError::AuthenticationFailed(
                    "用户名或密码错误".to_string(),
                ));
            }
        };

        if user.status == UserStatus::Disabled {
            self.audit
                .failure(username, MODULE, "登录", Some("用户已禁用".to_string()));
            return Err(ApiError::AuthenticationFailed("用户已禁用".to_string()));
        }

        let verified = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| ApiError::InternalError(format!("密码校验失败: {}", e)))?;

        if !verified {
            self.audit
                .failure(username, MODULE, "登录", Some("密码错误".to_string()));
            return Err(ApiError::AuthenticationFailed(
                "用户名或密码错误".to_string(),
            ));
        }

        self.audit.success(username, MODULE, "登录", None);

        Ok(LoginSession {
            token: Uuid::new_v4().to_string(),
            user_id: user.id,
            username: user.username,
            real_name: user.real_name,
            login_at: Utc::now(),
        })
    }

    /// 修改密码（需提供原密码）
    pub fn change_password(
        &self,
        user_id: i64,
        old_password: &str,
        new_password: &str,
        operator: &str,
    ) -> ApiResult<()> {
        if new_password.is_empty() {
            return Err(ApiError::InvalidInput("新密码不能为空".to_string()));
        }

        let mut user = self
            .user_repo
            .find_by_id(user_id)?
            .ok_or_else(|| ApiError::NotFound(format!("用户(id={})不存在", user_id)))?;

        let verified = bcrypt::verify(old_password, &user.password_hash)
            .map_err(|e| ApiError::InternalError(format!("密码校验失败: {}", e)))?;
        if !verified {
            self.audit.failure(
                operator,
                MODULE,
                "修改密码",
                Some(format!("user_id={}, 原密码错误", user_id)),
            );
            return Err(ApiError::AuthenticationFailed("原密码错误".to_string()));
        }

        user.password_hash = bcrypt::hash(new_password, bcrypt::DEFAULT_COST)
            .map_err(|e| ApiError::InternalError(format!("密码散列失败: {}", e)))?;
        user.updated_at = Utc::now();
        self.user_repo.update(&user)?;

        self.audit.success(
            operator,
            MODULE,
            "修改密码",
            Some(format!("user_id={}", user_id)),
        );
        Ok(())
    }

    pub fn get_user(&self, user_id: i64) -> ApiResult<Option<User>> {
        Ok(self.user_repo.find_by_id(user_id)?)
    }

    pub fn list_users(&self) -> ApiResult<Vec<User>> {
        Ok(self.user_repo.get_all()?)
    }

    /// 整行覆盖更新（密码散列保持原值，需通过 change_password 修改）
    pub fn update_user(&self, user: &User, operator: &str) -> ApiResult<()> {
        let existing = self
            .user_repo
            .find_by_id(user.id)?
            .ok_or_else(|| ApiError::NotFound(format!("用户(id={})不存在", user.id)))?;

        let mut updated = user.clone();
        updated.password_hash = existing.password_hash;
        updated.updated_at = Utc::now();
        self.user_repo.update(&updated)?;

        self.audit.success(
            operator,
            MODULE,
            "更新用户",
            Some(format!("user_id={}", user.id)),
        );
        Ok(())
    }

    /// 删除用户（关联的用户-角色行随之级联删除; id 不存在为空操作）
    pub fn delete_user(&self, user_id: i64, operator: &str) -> ApiResult<bool> {
        let removed = self.user_repo.delete_by_id(user_id)?;
        if removed {
            self.audit.success(
                operator,
                MODULE,
                "删除用户",
                Some(format!("user_id={}", user_id)),
            );
        }
        Ok(removed)
    }

    /// 为用户分配角色（重复分配触发唯一约束违反）
    pub fn assign_role(&self, user_id: i64, role_id: i64, operator: &str) -> ApiResult<UserRole> {
        if self.user_repo.find_by_id(user_id)?.is_none() {
            return Err(ApiError::NotFound(format!("用户(id={})不存在", user_id)));
        }
        if self.role_repo.find_by_id(role_id)?.is_none() {
            return Err(ApiError::NotFound(format!("角色(id={})不存在", role_id)));
        }

        match self.user_role_repo.add(UserRole::new(user_id, role_id)) {
            Ok(link) => {
                self.audit.success(
                    operator,
                    MODULE,
                    "分配角色",
                    Some(format!("user_id={}, role_id={}", user_id, role_id)),
                );
                Ok(link)
            }
            Err(e) => {
                self.audit.failure(
                    operator,
                    MODULE,
                    "分配角色",
                    Some(format!(
                        "user_id={}, role_id={}, error={}",
                        user_id, role_id, e
                    )),
                );
                Err(e.into())
            }
        }
    }

    /// 移除用户的角色（关联不存在为空操作）
    pub fn revoke_role(&self, user_id: i64, role_id: i64, operator: &str) -> ApiResult<bool> {
        let links = self.user_role_repo.find(
            &Filter::new()
                .eq("user_id", user_id)
                .eq("role_id", role_id),
        )?;

        let mut removed = false;
        for link in links {
            removed |= self.user_role_repo.delete_by_id(link.id)?;
        }

        if removed {
            self.audit.success(
                operator,
                MODULE,
                "移除角色",
                Some(format!("user_id={}, role_id={}", user_id, role_id)),
            );
        }
        Ok(removed)
    }

    /// 查询用户拥有的角色列表
    pub fn list_user_roles(&self, user_id: i64) -> ApiResult<Vec<Role>> {
        let links = self
            .user_role_repo
            .find(&Filter::new().eq("user_id", user_id).order_by("role_id ASC"))?;

        let mut roles = Vec::with_capacity(links.len());
        for link in links {
            if let Some(role) = self.role_repo.find_by_id(link.role_id)? {
                roles.push(role);
            }
        }
        Ok(roles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_sqlite_connection;
    use crate::domain::OperationLog;
    use crate::schema::ensure_schema;
    use std::sync::Mutex;

    fn setup_api() -> (UserApi, Arc<Repository<OperationLog>>) {
        let conn = open_sqlite_connection(":memory:").expect("打开内存库失败");
        ensure_schema(&conn).expect("建表失败");
        let conn = Arc::new(Mutex::new(conn));

        let oplog_repo = Arc::new(Repository::<OperationLog>::new(conn.clone()));
        let api = UserApi::new(
            Arc::new(Repository::<User>::new(conn.clone())),
            Arc::new(Repository::<Role>::new(conn.clone())),
            Arc::new(Repository::<UserRole>::new(conn.clone())),
            Arc::new(Audit::new(oplog_repo.clone())),
        );
        (api, oplog_repo)
    }

    #[test]
    fn test_create_user_and_login() {
        let (api, oplog_repo) = setup_api();

        let user = api
            .create_user("alice", "secret123", Some("张三".to_string()), "admin")
            .expect("创建用户失败");
        assert!(user.id > 0);
        assert_ne!(user.password_hash, "secret123"); // 明文不落库

        let session = api.login("alice", "secret123").expect("登录失败");
        assert_eq!(session.user_id, user.id);
        assert!(!session.token.is_empty());

        // 创建 + 登录各有一条成功日志
        let logs = oplog_repo.get_all().expect("查询日志失败");
        assert_eq!(logs.len(), 2);
    }

    #[test]
    fn test_login_wrong_password_rejected_and_audited() {
        let (api, oplog_repo) = setup_api();
        api.create_user("bob", "right", None, "admin")
            .expect("创建用户失败");

        let result = api.login("bob", "wrong");
        match result {
            Err(ApiError::AuthenticationFailed(_)) => {}
            other => panic!("期望认证失败，实际: {:?}", other.err()),
        }

        // 失败登录也被审计
        let failures = oplog_repo
            .find(&Filter::new().eq("result", 0i64))
            .expect("查询日志失败");
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].action, "登录");
    }

    #[test]
    fn test_login_disabled_user_rejected() {
        let (api, _) = setup_api();
        let mut user = api
            .create_user("carol", "pw", None, "admin")
            .expect("创建用户失败");

        user.status = UserStatus::Disabled;
        api.update_user(&user, "admin").expect("更新用户失败");

        match api.login("carol", "pw") {
            Err(ApiError::AuthenticationFailed(msg)) => assert!(msg.contains("禁用")),
            other => panic!("期望认证失败，实际: {:?}", other.err()),
        }
    }

    #[test]
    fn test_assign_role_duplicate_rejected() {
        let (api, _) = setup_api();
        let user = api
            .create_user("dave", "pw", None, "admin")
            .expect("创建用户失败");
        let role = api
            .role_repo
            .add(Role::new("OP".to_string(), "操作员".to_string()))
            .expect("创建角色失败");

        api.assign_role(user.id, role.id, "admin")
            .expect("首次分配失败");

        match api.assign_role(user.id, role.id, "admin") {
            Err(ApiError::BusinessRuleViolation(msg)) => assert!(msg.contains("唯一约束")),
            other => panic!("期望唯一约束违反，实际: {:?}", other.err()),
        }

        let roles = api.list_user_roles(user.id).expect("查询角色失败");
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].role_code, "OP");
    }

    #[test]
    fn test_change_password() {
        let (api, _) = setup_api();
        let user = api
            .create_user("eve", "old-pw", None, "admin")
            .expect("创建用户失败");

        // 原密码错误被拒绝
        assert!(api.change_password(user.id, "bad", "new-pw", "eve").is_err());

        api.change_password(user.id, "old-pw", "new-pw", "eve")
            .expect("修改密码失败");
        api.login("eve", "new-pw").expect("新密码登录失败");
        assert!(api.login("eve", "old-pw").is_err());
    }
}
