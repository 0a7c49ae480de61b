// ==========================================
// MES 系统管理核心 - 操作日志查询API
// ==========================================
// 职责: 审计日志按模块/操作人/时间范围查询
// 说明: 日志只追加不修改，无保留/轮转策略
// ==========================================

use crate::api::error::ApiResult;
use crate::domain::OperationLog;
use crate::repository::{Filter, Repository};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// 日志查询条件
#[derive(Debug, Clone, Default)]
pub struct LogQuery {
    pub module: Option<String>,
    pub operator: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<u32>,
}

/// 操作日志API
pub struct LogApi {
    oplog_repo: Arc<Repository<OperationLog>>,
}

impl LogApi {
    pub fn new(oplog_repo: Arc<Repository<OperationLog>>) -> Self {
        Self { oplog_repo }
    }

    /// 条件查询（时间倒序）
    pub fn query(&self, query: &LogQuery) -> ApiResult<Vec<OperationLog>> {
        let mut filter = Filter::new();
        if let Some(module) = &query.module {
            filter = filter.eq("module", module.clone());
        }
        if let Some(operator) = &query.operator {
            filter = filter.eq("operator", operator.clone());
        }
        if let Some(from) = &query.from {
            filter = filter.ge("created_at", from.to_rfc3339());
        }
        if let Some(to) = &query.to {
            filter = filter.le("created_at", to.to_rfc3339());
        }
        filter = filter.order_by("created_at DESC, id DESC");
        if let Some(n) = query.limit {
            filter = filter.limit(n as usize);
        }
        Ok(self.oplog_repo.find(&filter)?)
    }

    /// 最近 N 条日志
    pub fn recent(&self, limit: u32) -> ApiResult<Vec<OperationLog>> {
        self.query(&LogQuery {
            limit: Some(limit),
            ..LogQuery::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_sqlite_connection;
    use crate::domain::types::LogResult;
    use crate::schema::ensure_schema;
    use std::sync::{Arc, Mutex};

    fn setup() -> (LogApi, Arc<Repository<OperationLog>>) {
        let conn = open_sqlite_connection(":memory:").expect("打开内存库失败");
        ensure_schema(&conn).expect("建表失败");
        let conn = Arc::new(Mutex::new(conn));
        let repo = Arc::new(Repository::<OperationLog>::new(conn));
        (LogApi::new(repo.clone()), repo)
    }

    fn append(repo: &Repository<OperationLog>, operator: &str, module: &str, action: &str) {
        repo.add(OperationLog::new(
            operator.to_string(),
            module.to_string(),
            action.to_string(),
            None,
            LogResult::Success,
        ))
        .expect("写日志失败");
    }

    #[test]
    fn test_query_by_module_and_operator() {
        let (api, repo) = setup();
        append(&repo, "admin", "用户管理", "创建用户");
        append(&repo, "admin", "设备管理", "创建设备");
        append(&repo, "zhang", "用户管理", "登录");

        let logs = api
            .query(&LogQuery {
                module: Some("用户管理".to_string()),
                ..LogQuery::default()
            })
            .expect("查询失败");
        assert_eq!(logs.len(), 2);

        let logs = api
            .query(&LogQuery {
                module: Some("用户管理".to_string()),
                operator: Some("zhang".to_string()),
                ..LogQuery::default()
            })
            .expect("查询失败");
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].action, "登录");
    }

    #[test]
    fn test_recent_limit_and_order() {
        let (api, repo) = setup();
        for i in 0..5 {
            append(&repo, "admin", "系统配置", &format!("写入配置{}", i));
        }

        let logs = api.recent(3).expect("查询失败");
        assert_eq!(logs.len(), 3);
        // 时间倒序，id 倒序兜底
        assert!(logs[0].id > logs[1].id);
    }

    #[test]
    fn test_query_time_range() {
        let (api, repo) = setup();
        append(&repo, "admin", "用户管理", "创建用户");

        let future = Utc::now() + chrono::Duration::hours(1);
        let logs = api
            .query(&LogQuery {
                from: Some(future),
                ..LogQuery::default()
            })
            .expect("查询失败");
        assert!(logs.is_empty());

        let logs = api
            .query(&LogQuery {
                to: Some(future),
                ..LogQuery::default()
            })
            .expect("查询失败");
        assert_eq!(logs.len(), 1);
    }
}
