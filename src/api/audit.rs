// ==========================================
// MES 系统管理核心 - 操作日志记录器
// ==========================================
// 职责: 为各API提供统一的审计追加入口
// 约束: 审计写入为尽力而为，失败只告警，不影响业务操作结果
// ==========================================

use crate::domain::types::LogResult;
use crate::domain::OperationLog;
use crate::repository::Repository;
use std::sync::Arc;

/// 操作日志记录器
pub struct Audit {
    oplog_repo: Arc<Repository<OperationLog>>,
}

impl Audit {
    pub fn new(oplog_repo: Arc<Repository<OperationLog>>) -> Self {
        Self { oplog_repo }
    }

    /// 追加一条操作日志
    pub fn record(
        &self,
        operator: &str,
        module: &str,
        action: &str,
        detail: Option<String>,
        result: LogResult,
    ) {
        let log = OperationLog::new(
            operator.to_string(),
            module.to_string(),
            action.to_string(),
            detail,
            result,
        );

        if let Err(e) = self.oplog_repo.add(log) {
            tracing::warn!("操作日志写入失败(不影响业务操作): {}", e);
        }
    }

    pub fn success(&self, operator: &str, module: &str, action: &str, detail: Option<String>) {
        self.record(operator, module, action, detail, LogResult::Success);
    }

    pub fn failure(&self, operator: &str, module: &str, action: &str, detail: Option<String>) {
        self.record(operator, module, action, detail, LogResult::Failure);
    }
}
