// ==========================================
// MES 系统管理核心 - 服务端过滤条件构建
// ==========================================
// 职责: 为通用仓储的 find 操作构建参数化 WHERE 子句
// 约束: 所有比较值走占位符参数，列名来自代码侧常量，防止 SQL 注入
// ==========================================

use rusqlite::types::Value;

/// 查询过滤器（链式 API）
///
/// 生成 `WHERE c1 = ?1 AND c2 LIKE ?2 ...` 形式的参数化子句，
/// 可选追加 ORDER BY / LIMIT。
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<String>,
    params: Vec<Value>,
    order_by_clause: Option<String>,
    limit_clause: Option<usize>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, column: &str, op: &str, value: Value) -> Self {
        // 占位符编号跟随参数位置
        self.params.push(value);
        self.clauses
            .push(format!("{} {} ?{}", column, op, self.params.len()));
        self
    }

    pub fn eq(self, column: &str, value: impl Into<Value>) -> Self {
        self.push(column, "=", value.into())
    }

    pub fn ne(self, column: &str, value: impl Into<Value>) -> Self {
        self.push(column, "<>", value.into())
    }

    pub fn gt(self, column: &str, value: impl Into<Value>) -> Self {
        self.push(column, ">", value.into())
    }

    pub fn ge(self, column: &str, value: impl Into<Value>) -> Self {
        self.push(column, ">=", value.into())
    }

    pub fn lt(self, column: &str, value: impl Into<Value>) -> Self {
        self.push(column, "<", value.into())
    }

    pub fn le(self, column: &str, value: impl Into<Value>) -> Self {
        self.push(column, "<=", value.into())
    }

    pub fn like(self, column: &str, pattern: impl Into<String>) -> Self {
        self.push(column, "LIKE", Value::Text(pattern.into()))
    }

    pub fn is_null(mut self, column: &str) -> Self {
        self.clauses.push(format!("{} IS NULL", column));
        self
    }

    pub fn is_not_null(mut self, column: &str) -> Self {
        self.clauses.push(format!("{} IS NOT NULL", column));
        self
    }

    /// 添加 ORDER BY 子句（例如: "sort_order ASC, id ASC"）
    pub fn order_by(mut self, order: &str) -> Self {
        self.order_by_clause = Some(order.to_string());
        self
    }

    /// 添加 LIMIT 子句
    pub fn limit(mut self, n: usize) -> Self {
        self.limit_clause = Some(n);
        self
    }

    /// 基于基础 SELECT 构建完整 SQL
    pub fn build_sql(&self, base_select: &str) -> String {
        let mut sql = base_select.to_string();

        if !self.clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.clauses.join(" AND "));
        }

        if let Some(order) = &self.order_by_clause {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }

        if let Some(limit) = self.limit_clause {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        sql
    }

    /// 占位符参数（与 clause 编号一致）
    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_empty() {
        let f = Filter::new();
        assert_eq!(f.build_sql("SELECT * FROM sys_user"), "SELECT * FROM sys_user");
        assert!(f.params().is_empty());
    }

    #[test]
    fn test_filter_eq_chain() {
        let f = Filter::new()
            .eq("username", "alice".to_string())
            .eq("status", 1i64);

        assert_eq!(
            f.build_sql("SELECT * FROM sys_user"),
            "SELECT * FROM sys_user WHERE username = ?1 AND status = ?2"
        );
        assert_eq!(f.params().len(), 2);
    }

    #[test]
    fn test_filter_like_and_null() {
        let f = Filter::new()
            .like("dept_name", "%车间%")
            .is_null("parent_id");

        let sql = f.build_sql("SELECT * FROM sys_department");
        assert!(sql.contains("dept_name LIKE ?1"));
        assert!(sql.contains("parent_id IS NULL"));
        assert_eq!(f.params().len(), 1);
    }

    #[test]
    fn test_filter_order_and_limit() {
        let f = Filter::new()
            .ge("created_at", "2026-01-01".to_string())
            .order_by("created_at DESC")
            .limit(20);

        assert_eq!(
            f.build_sql("SELECT * FROM sys_operation_log"),
            "SELECT * FROM sys_operation_log WHERE created_at >= ?1 ORDER BY created_at DESC LIMIT 20"
        );
    }

    #[test]
    fn test_filter_range() {
        let f = Filter::new()
            .ge("created_at", "2026-01-01".to_string())
            .lt("created_at", "2026-02-01".to_string());

        assert_eq!(
            f.build_sql("SELECT id FROM sys_operation_log"),
            "SELECT id FROM sys_operation_log WHERE created_at >= ?1 AND created_at < ?2"
        );
    }
}
