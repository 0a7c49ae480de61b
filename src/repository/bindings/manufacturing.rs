// ==========================================
// 实体映射绑定 - 制造主数据实体
// ==========================================
// 覆盖: 产品/BOM/工艺路线/工序步骤/设备/维护记录
// ==========================================

use super::ts;
use crate::domain::{Bom, Equipment, MaintenanceRecord, ProcessRoute, ProcessStep, Product};
use crate::repository::generic::Entity;
use rusqlite::types::Value;
use rusqlite::Row;

impl Entity for Product {
    const TABLE: &'static str = "mes_product";
    const DATA_COLUMNS: &'static [&'static str] = &[
        "product_code",
        "product_name",
        "spec",
        "unit",
        "status",
        "remark",
        "created_at",
        "updated_at",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            product_code: row.get(1)?,
            product_name: row.get(2)?,
            spec: row.get(3)?,
            unit: row.get(4)?,
            status: row.get(5)?,
            remark: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    fn data_values(&self) -> Vec<Value> {
        vec![
            self.product_code.clone().into(),
            self.product_name.clone().into(),
            self.spec.clone().into(),
            self.unit.clone().into(),
            Value::Integer(self.status.as_i64()),
            self.remark.clone().into(),
            ts(&self.created_at),
            ts(&self.updated_at),
        ]
    }
}

impl Entity for Bom {
    const TABLE: &'static str = "mes_bom";
    const DATA_COLUMNS: &'static [&'static str] = &[
        "product_id",
        "component_id",
        "quantity",
        "remark",
        "created_at",
        "updated_at",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            product_id: row.get(1)?,
            component_id: row.get(2)?,
            quantity: row.get(3)?,
            remark: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }

    fn data_values(&self) -> Vec<Value> {
        vec![
            self.product_id.into(),
            self.component_id.into(),
            self.quantity.into(),
            self.remark.clone().into(),
            ts(&self.created_at),
            ts(&self.updated_at),
        ]
    }
}

impl Entity for ProcessRoute {
    const TABLE: &'static str = "mes_process_route";
    const DATA_COLUMNS: &'static [&'static str] = &[
        "route_code",
        "route_name",
        "product_id",
        "status",
        "remark",
        "created_at",
        "updated_at",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            route_code: row.get(1)?,
            route_name: row.get(2)?,
            product_id: row.get(3)?,
            status: row.get(4)?,
            remark: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }

    fn data_values(&self) -> Vec<Value> {
        vec![
            self.route_code.clone().into(),
            self.route_name.clone().into(),
            self.product_id.into(),
            self.status.into(),
            self.remark.clone().into(),
            ts(&self.created_at),
            ts(&self.updated_at),
        ]
    }
}

impl Entity for ProcessStep {
    const TABLE: &'static str = "mes_process_step";
    const DATA_COLUMNS: &'static [&'static str] = &[
        "route_id",
        "step_no",
        "step_name",
        "equipment_id",
        "remark",
        "created_at",
        "updated_at",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            route_id: row.get(1)?,
            step_no: row.get(2)?,
            step_name: row.get(3)?,
            equipment_id: row.get(4)?,
            remark: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }

    fn data_values(&self) -> Vec<Value> {
        vec![
            self.route_id.into(),
            self.step_no.into(),
            self.step_name.clone().into(),
            self.equipment_id.into(),
            self.remark.clone().into(),
            ts(&self.created_at),
            ts(&self.updated_at),
        ]
    }
}

impl Entity for Equipment {
    const TABLE: &'static str = "mes_equipment";
    const DATA_COLUMNS: &'static [&'static str] = &[
        "equipment_code",
        "equipment_name",
        "model",
        "dept_id",
        "location",
        "status",
        "created_at",
        "updated_at",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            equipment_code: row.get(1)?,
            equipment_name: row.get(2)?,
            model: row.get(3)?,
            dept_id: row.get(4)?,
            location: row.get(5)?,
            status: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    fn data_values(&self) -> Vec<Value> {
        vec![
            self.equipment_code.clone().into(),
            self.equipment_name.clone().into(),
            self.model.clone().into(),
            self.dept_id.into(),
            self.location.clone().into(),
            Value::Integer(self.status.as_i64()),
            ts(&self.created_at),
            ts(&self.updated_at),
        ]
    }
}

impl Entity for MaintenanceRecord {
    const TABLE: &'static str = "mes_maintenance_record";
    const DATA_COLUMNS: &'static [&'static str] = &[
        "equipment_id",
        "maintenance_type",
        "content",
        "maintainer",
        "maintained_at",
        "result",
        "created_at",
        "updated_at",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            equipment_id: row.get(1)?,
            maintenance_type: row.get(2)?,
            content: row.get(3)?,
            maintainer: row.get(4)?,
            maintained_at: row.get(5)?,
            result: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    fn data_values(&self) -> Vec<Value> {
        vec![
            self.equipment_id.into(),
            Value::Integer(self.maintenance_type.as_i64()),
            self.content.clone().into(),
            self.maintainer.clone().into(),
            ts(&self.maintained_at),
            Value::Integer(self.result.as_i64()),
            ts(&self.created_at),
            ts(&self.updated_at),
        ]
    }
}
