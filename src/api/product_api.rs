// ==========================================
// MES 系统管理核心 - 产品工艺API
// ==========================================
// 职责: 产品CRUD、BOM维护、工艺路线/工序维护
// 红线: BOM 不允许产品引用自身为组件;
//       (product_id, component_id) 对唯一; (route_id, step_no) 唯一
// ==========================================

use crate::api::audit::Audit;
use crate::api::error::{ApiError, ApiResult};
use crate::domain::{Bom, ProcessRoute, ProcessStep, Product};
use crate::repository::{Filter, Repository};
use chrono::Utc;
use std::sync::Arc;

const MODULE: &str = "产品工艺";

/// 产品工艺API
pub struct ProductApi {
    product_repo: Arc<Repository<Product>>,
    bom_repo: Arc<Repository<Bom>>,
    route_repo: Arc<Repository<ProcessRoute>>,
    step_repo: Arc<Repository<ProcessStep>>,
    audit: Arc<Audit>,
}

impl ProductApi {
    pub fn new(
        product_repo: Arc<Repository<Product>>,
        bom_repo: Arc<Repository<Bom>>,
        route_repo: Arc<Repository<ProcessRoute>>,
        step_repo: Arc<Repository<ProcessStep>>,
        audit: Arc<Audit>,
    ) -> Self {
        Self {
            product_repo,
            bom_repo,
            route_repo,
            step_repo,
            audit,
        }
    }

    // ==========================================
    // 产品
    // ==========================================

    pub fn create_product(
        &self,
        product_code: &str,
        product_name: &str,
        operator: &str,
    ) -> ApiResult<Product> {
        if product_code.trim().is_empty() {
            return Err(ApiError::InvalidInput("产品编码不能为空".to_string()));
        }

        let product = self.product_repo.add(Product::new(
            product_code.trim().to_string(),
            product_name.to_string(),
        ))?;
        self.audit.success(
            operator,
            MODULE,
            "创建产品",
            Some(format!("product_code={}", product.product_code)),
        );
        Ok(product)
    }

    pub fn get_product(&self, product_id: i64) -> ApiResult<Option<Product>> {
        Ok(self.product_repo.find_by_id(product_id)?)
    }

    pub fn list_products(&self) -> ApiResult<Vec<Product>> {
        Ok(self.product_repo.get_all()?)
    }

    pub fn update_product(&self, product: &Product, operator: &str) -> ApiResult<()> {
        let mut updated = product.clone();
        updated.updated_at = Utc::now();
        self.product_repo.update(&updated)?;
        self.audit.success(
            operator,
            MODULE,
            "更新产品",
            Some(format!("product_id={}", product.id)),
        );
        Ok(())
    }

    /// 删除产品（仍被 BOM 引用时由 RESTRICT 外键拒绝）
    pub fn delete_product(&self, product_id: i64, operator: &str) -> ApiResult<bool> {
        match self.product_repo.delete_by_id(product_id) {
            Ok(removed) => {
                if removed {
                    self.audit.success(
                        operator,
                        MODULE,
                        "删除产品",
                        Some(format!("product_id={}", product_id)),
                    );
                }
                Ok(removed)
            }
            Err(e) => {
                self.audit.failure(
                    operator,
                    MODULE,
                    "删除产品",
                    Some(format!("product_id={}, error={}", product_id, e)),
                );
                Err(e.into())
            }
        }
    }

    // ==========================================
    // BOM
    // ==========================================

    /// 新增 BOM 行（自引用拒绝; 重复组件对触发唯一约束违反）
    pub fn add_bom_line(
        &self,
        product_id: i64,
        component_id: i64,
        quantity: f64,
        operator: &str,
    ) -> ApiResult<Bom> {
        if product_id == component_id {
            return Err(ApiError::BusinessRuleViolation(
                "产品不能引用自身作为组件".to_string(),
            ));
        }
        if quantity <= 0.0 {
            return Err(ApiError::InvalidInput("组件用量必须大于0".to_string()));
        }
        if self.product_repo.find_by_id(product_id)?.is_none() {
            return Err(ApiError::NotFound(format!("产品(id={})不存在", product_id)));
        }
        if self.product_repo.find_by_id(component_id)?.is_none() {
            return Err(ApiError::NotFound(format!(
                "组件产品(id={})不存在",
                component_id
            )));
        }

        match self.bom_repo.add(Bom::new(product_id, component_id, quantity)) {
            Ok(line) => {
                self.audit.success(
                    operator,
                    MODULE,
                    "新增BOM行",
                    Some(format!(
                        "product_id={}, component_id={}",
                        product_id, component_id
                    )),
                );
                Ok(line)
            }
            Err(e) => {
                self.audit.failure(
                    operator,
                    MODULE,
                    "新增BOM行",
                    Some(format!(
                        "product_id={}, component_id={}, error={}",
                        product_id, component_id, e
                    )),
                );
                Err(e.into())
            }
        }
    }

    pub fn remove_bom_line(&self, bom_id: i64, operator: &str) -> ApiResult<bool> {
        let removed = self.bom_repo.delete_by_id(bom_id)?;
        if removed {
            self.audit.success(
                operator,
                MODULE,
                "删除BOM行",
                Some(format!("bom_id={}", bom_id)),
            );
        }
        Ok(removed)
    }

    /// 查询产品的 BOM 组件清单
    pub fn list_bom(&self, product_id: i64) -> ApiResult<Vec<Bom>> {
        Ok(self.bom_repo.find(
            &Filter::new()
                .eq("product_id", product_id)
                .order_by("component_id ASC"),
        )?)
    }

    // ==========================================
    // 工艺路线/工序
    // ==========================================

    pub fn create_route(
        &self,
        route_code: &str,
        route_name: &str,
        product_id: Option<i64>,
        operator: &str,
    ) -> ApiResult<ProcessRoute> {
        if route_code.trim().is_empty() {
            return Err(ApiError::InvalidInput("路线编码不能为空".to_string()));
        }
        if let Some(pid) = product_id {
            if self.product_repo.find_by_id(pid)?.is_none() {
                return Err(ApiError::NotFound(format!("产品(id={})不存在", pid)));
            }
        }

        let route = self.route_repo.add(ProcessRoute::new(
            route_code.trim().to_string(),
            route_name.to_string(),
            product_id,
        ))?;
        self.audit.success(
            operator,
            MODULE,
            "创建工艺路线",
            Some(format!("route_code={}", route.route_code)),
        );
        Ok(route)
    }

    pub fn list_routes(&self) -> ApiResult<Vec<ProcessRoute>> {
        Ok(self.route_repo.get_all()?)
    }

    /// 删除工艺路线（工序随路线级联删除）
    pub fn delete_route(&self, route_id: i64, operator: &str) -> ApiResult<bool> {
        let removed = self.route_repo.delete_by_id(route_id)?;
        if removed {
            self.audit.success(
                operator,
                MODULE,
                "删除工艺路线",
                Some(format!("route_id={}", route_id)),
            );
        }
        Ok(removed)
    }

    /// 新增工序（路线内 step_no 重复触发唯一约束违反）
    pub fn add_step(
        &self,
        route_id: i64,
        step_no: i64,
        step_name: &str,
        equipment_id: Option<i64>,
        operator: &str,
    ) -> ApiResult<ProcessStep> {
        if self.route_repo.find_by_id(route_id)?.is_none() {
            return Err(ApiError::NotFound(format!("工艺路线(id={})不存在", route_id)));
        }

        let mut step = ProcessStep::new(route_id, step_no, step_name.to_string());
        step.equipment_id = equipment_id;
        match self.step_repo.add(step) {
            Ok(step) => {
                self.audit.success(
                    operator,
                    MODULE,
                    "新增工序",
                    Some(format!("route_id={}, step_no={}", route_id, step_no)),
                );
                Ok(step)
            }
            Err(e) => {
                self.audit.failure(
                    operator,
                    MODULE,
                    "新增工序",
                    Some(format!(
                        "route_id={}, step_no={}, error={}",
                        route_id, step_no, e
                    )),
                );
                Err(e.into())
            }
        }
    }

    pub fn remove_step(&self, step_id: i64, operator: &str) -> ApiResult<bool> {
        let removed = self.step_repo.delete_by_id(step_id)?;
        if removed {
            self.audit.success(
                operator,
                MODULE,
                "删除工序",
                Some(format!("step_id={}", step_id)),
            );
        }
        Ok(removed)
    }

    /// 查询路线的工序清单（工序号升序）
    pub fn list_steps(&self, route_id: i64) -> ApiResult<Vec<ProcessStep>> {
        Ok(self.step_repo.find(
            &Filter::new()
                .eq("route_id", route_id)
                .order_by("step_no ASC"),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_sqlite_connection;
    use crate::domain::OperationLog;
    use crate::schema::ensure_schema;
    use std::sync::Mutex;

    fn setup_api() -> ProductApi {
        let conn = open_sqlite_connection(":memory:").expect("打开内存库失败");
        ensure_schema(&conn).expect("建表失败");
        let conn = Arc::new(Mutex::new(conn));

        let oplog_repo = Arc::new(Repository::<OperationLog>::new(conn.clone()));
        ProductApi::new(
            Arc::new(Repository::<Product>::new(conn.clone())),
            Arc::new(Repository::<Bom>::new(conn.clone())),
            Arc::new(Repository::<ProcessRoute>::new(conn.clone())),
            Arc::new(Repository::<ProcessStep>::new(conn.clone())),
            Arc::new(Audit::new(oplog_repo)),
        )
    }

    #[test]
    fn test_bom_self_reference_rejected() {
        let api = setup_api();
        let p = api
            .create_product("P001", "热轧卷板", "admin")
            .expect("创建产品失败");

        match api.add_bom_line(p.id, p.id, 1.0, "admin") {
            Err(ApiError::BusinessRuleViolation(msg)) => assert!(msg.contains("自身")),
            other => panic!("期望业务规则违反，实际: {:?}", other.err()),
        }
    }

    #[test]
    fn test_bom_duplicate_pair_rejected() {
        let api = setup_api();
        let p = api.create_product("P001", "热轧卷板", "admin").expect("创建失败");
        let c = api.create_product("P002", "板坯", "admin").expect("创建失败");

        api.add_bom_line(p.id, c.id, 1.05, "admin").expect("首次新增失败");
        assert!(api.add_bom_line(p.id, c.id, 2.0, "admin").is_err());
        assert_eq!(api.list_bom(p.id).expect("查询失败").len(), 1);
    }

    #[test]
    fn test_delete_product_referenced_by_bom_rejected() {
        let api = setup_api();
        let p = api.create_product("P001", "热轧卷板", "admin").expect("创建失败");
        let c = api.create_product("P002", "板坯", "admin").expect("创建失败");
        api.add_bom_line(p.id, c.id, 1.0, "admin").expect("新增失败");

        assert!(api.delete_product(c.id, "admin").is_err());
    }

    #[test]
    fn test_route_steps_unique_and_cascade() {
        let api = setup_api();
        let route = api
            .create_route("R001", "热轧标准流程", None, "admin")
            .expect("创建路线失败");

        api.add_step(route.id, 10, "加热", None, "admin").expect("新增工序失败");
        api.add_step(route.id, 20, "粗轧", None, "admin").expect("新增工序失败");
        // 路线内工序号重复被拒绝
        assert!(api.add_step(route.id, 10, "重复", None, "admin").is_err());

        let steps = api.list_steps(route.id).expect("查询失败");
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].step_no, 10);

        assert!(api.delete_route(route.id, "admin").expect("删除路线失败"));
        assert!(api.list_steps(route.id).expect("查询失败").is_empty());
    }
}
