// ==========================================
// MES 系统管理核心 - 实体映射绑定
// ==========================================
// 职责: 为全部领域实体实现 Entity 契约（表/列元数据 + 行映射 + 取值）
// 说明: 映射放在仓储侧，领域结构保持无 SQL
// ==========================================

mod manufacturing;
mod org;
mod system;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Value;

/// 时间戳落库为 RFC3339 文本（与 rusqlite chrono 特性读取口径一致）
pub(crate) fn ts(dt: &DateTime<Utc>) -> Value {
    Value::Text(dt.to_rfc3339())
}

/// 业务日期落库为 ISO DATE 文本（YYYY-MM-DD）
pub(crate) fn opt_date(d: &Option<NaiveDate>) -> Value {
    match d {
        Some(d) => Value::Text(d.format("%Y-%m-%d").to_string()),
        None => Value::Null,
    }
}
