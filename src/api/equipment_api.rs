// ==========================================
// MES 系统管理核心 - 设备管理API
// ==========================================
// 职责: 设备台账CRUD、维护记录登记与历史查询
// 红线: 维护记录随设备级联删除; 设备所属部门为 RESTRICT 外键
// ==========================================

use crate::api::audit::Audit;
use crate::api::error::{ApiError, ApiResult};
use crate::domain::types::{EquipmentStatus, MaintenanceType};
use crate::domain::{Equipment, MaintenanceRecord};
use crate::repository::{Filter, Repository};
use chrono::Utc;
use std::sync::Arc;

const MODULE: &str = "设备管理";

/// 设备管理API
pub struct EquipmentApi {
    equipment_repo: Arc<Repository<Equipment>>,
    maintenance_repo: Arc<Repository<MaintenanceRecord>>,
    audit: Arc<Audit>,
}

impl EquipmentApi {
    pub fn new(
        equipment_repo: Arc<Repository<Equipment>>,
        maintenance_repo: Arc<Repository<MaintenanceRecord>>,
        audit: Arc<Audit>,
    ) -> Self {
        Self {
            equipment_repo,
            maintenance_repo,
            audit,
        }
    }

    pub fn create_equipment(
        &self,
        equipment_code: &str,
        equipment_name: &str,
        operator: &str,
    ) -> ApiResult<Equipment> {
        if equipment_code.trim().is_empty() {
            return Err(ApiError::InvalidInput("设备编码不能为空".to_string()));
        }

        let equipment = self.equipment_repo.add(Equipment::new(
            equipment_code.trim().to_string(),
            equipment_name.to_string(),
        ))?;
        self.audit.success(
            operator,
            MODULE,
            "创建设备",
            Some(format!("equipment_code={}", equipment.equipment_code)),
        );
        Ok(equipment)
    }

    pub fn get_equipment(&self, equipment_id: i64) -> ApiResult<Option<Equipment>> {
        Ok(self.equipment_repo.find_by_id(equipment_id)?)
    }

    pub fn list_equipment(&self) -> ApiResult<Vec<Equipment>> {
        Ok(self.equipment_repo.get_all()?)
    }

    pub fn update_equipment(&self, equipment: &Equipment, operator: &str) -> ApiResult<()> {
        let mut updated = equipment.clone();
        updated.updated_at = Utc::now();
        self.equipment_repo.update(&updated)?;
        self.audit.success(
            operator,
            MODULE,
            "更新设备",
            Some(format!("equipment_id={}", equipment.id)),
        );
        Ok(())
    }

    /// 删除设备（维护记录级联删除）
    pub fn delete_equipment(&self, equipment_id: i64, operator: &str) -> ApiResult<bool> {
        let removed = self.equipment_repo.delete_by_id(equipment_id)?;
        if removed {
            self.audit.success(
                operator,
                MODULE,
                "删除设备",
                Some(format!("equipment_id={}", equipment_id)),
            );
        }
        Ok(removed)
    }

    /// 登记维护记录，并将设备状态切换为维修中/恢复运行
    pub fn record_maintenance(
        &self,
        equipment_id: i64,
        maintenance_type: MaintenanceType,
        content: Option<String>,
        maintainer: Option<String>,
        operator: &str,
    ) -> ApiResult<MaintenanceRecord> {
        let mut equipment = self
            .equipment_repo
            .find_by_id(equipment_id)?
            .ok_or_else(|| ApiError::NotFound(format!("设备(id={})不存在", equipment_id)))?;

        let mut record = MaintenanceRecord::new(equipment_id, maintenance_type);
        record.content = content;
        record.maintainer = maintainer;
        let record = self.maintenance_repo.add(record)?;

        // 故障维修/大修置为维修中，日常保养不改状态
        if matches!(
            maintenance_type,
            MaintenanceType::Repair | MaintenanceType::Overhaul
        ) {
            equipment.status = EquipmentStatus::UnderMaintenance;
            equipment.updated_at = Utc::now();
            self.equipment_repo.update(&equipment)?;
        }

        self.audit.success(
            operator,
            MODULE,
            "登记维护记录",
            Some(format!(
                "equipment_id={}, maintenance_type={}",
                equipment_id, maintenance_type
            )),
        );
        Ok(record)
    }

    /// 维护历史（时间倒序，可限制条数）
    pub fn maintenance_history(
        &self,
        equipment_id: i64,
        limit: Option<u32>,
    ) -> ApiResult<Vec<MaintenanceRecord>> {
        let mut filter = Filter::new()
            .eq("equipment_id", equipment_id)
            .order_by("maintained_at DESC, id DESC");
        if let Some(n) = limit {
            filter = filter.limit(n as usize);
        }
        Ok(self.maintenance_repo.find(&filter)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_sqlite_connection;
    use crate::domain::OperationLog;
    use crate::schema::ensure_schema;
    use std::sync::Mutex;

    fn setup_api() -> EquipmentApi {
        let conn = open_sqlite_connection(":memory:").expect("打开内存库失败");
        ensure_schema(&conn).expect("建表失败");
        let conn = Arc::new(Mutex::new(conn));

        let oplog_repo = Arc::new(Repository::<OperationLog>::new(conn.clone()));
        EquipmentApi::new(
            Arc::new(Repository::<Equipment>::new(conn.clone())),
            Arc::new(Repository::<MaintenanceRecord>::new(conn.clone())),
            Arc::new(Audit::new(oplog_repo)),
        )
    }

    #[test]
    fn test_record_maintenance_switches_status() {
        let api = setup_api();
        let eq = api
            .create_equipment("EQ-001", "粗轧机", "admin")
            .expect("创建设备失败");
        assert_eq!(eq.status, EquipmentStatus::Running);

        api.record_maintenance(
            eq.id,
            MaintenanceType::Repair,
            Some("轧辊更换".to_string()),
            Some("李四".to_string()),
            "admin",
        )
        .expect("登记维护失败");

        let reloaded = api
            .get_equipment(eq.id)
            .expect("查询失败")
            .expect("设备丢失");
        assert_eq!(reloaded.status, EquipmentStatus::UnderMaintenance);
    }

    #[test]
    fn test_routine_maintenance_keeps_status() {
        let api = setup_api();
        let eq = api
            .create_equipment("EQ-002", "精轧机", "admin")
            .expect("创建设备失败");

        api.record_maintenance(eq.id, MaintenanceType::Routine, None, None, "admin")
            .expect("登记维护失败");

        let reloaded = api
            .get_equipment(eq.id)
            .expect("查询失败")
            .expect("设备丢失");
        assert_eq!(reloaded.status, EquipmentStatus::Running);
    }

    #[test]
    fn test_maintenance_history_limit_and_cascade() {
        let api = setup_api();
        let eq = api
            .create_equipment("EQ-003", "卷取机", "admin")
            .expect("创建设备失败");

        for _ in 0..3 {
            api.record_maintenance(eq.id, MaintenanceType::Routine, None, None, "admin")
                .expect("登记维护失败");
        }

        let history = api
            .maintenance_history(eq.id, Some(2))
            .expect("查询历史失败");
        assert_eq!(history.len(), 2);

        assert!(api.delete_equipment(eq.id, "admin").expect("删除设备失败"));
        assert!(api
            .maintenance_history(eq.id, None)
            .expect("查询历史失败")
            .is_empty());
    }
}
