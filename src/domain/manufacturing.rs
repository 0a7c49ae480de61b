// ==========================================
// MES 系统管理核心 - 制造主数据领域模型
// ==========================================
// 对齐: schema mes_product / mes_bom / mes_process_route /
//       mes_process_step / mes_equipment / mes_maintenance_record 表
// 红线: (product_id, component_id) BOM 对唯一，且产品不得引用自身为组件
// ==========================================

use crate::domain::types::{EquipmentStatus, MaintenanceType, ProductStatus};
use crate::domain::types::LogResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 产品主数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub product_code: String,         // 产品编码（全局唯一）
    pub product_name: String,         // 产品名称
    pub spec: Option<String>,         // 规格型号
    pub unit: Option<String>,         // 计量单位
    pub status: ProductStatus,        // 状态: 1=量产, 2=试制, 3=停产
    pub remark: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(product_code: String, product_name: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            product_code,
            product_name,
            spec: None,
            unit: None,
            status: ProductStatus::MassProduction,
            remark: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// BOM 行（产品-组件用量）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bom {
    pub id: i64,
    pub product_id: i64,              // 父产品（外键，RESTRICT）
    pub component_id: i64,            // 组件产品（外键，RESTRICT）
    pub quantity: f64,                // 单位用量
    pub remark: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bom {
    pub fn new(product_id: i64, component_id: i64, quantity: f64) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            product_id,
            component_id,
            quantity,
            remark: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 工艺路线（头）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRoute {
    pub id: i64,
    pub route_code: String,           // 路线编码（全局唯一）
    pub route_name: String,           // 路线名称
    pub product_id: Option<i64>,      // 适用产品（可空外键）
    pub status: i64,                  // 状态: 1=启用, 2=停用（仅存储）
    pub remark: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProcessRoute {
    pub fn new(route_code: String, route_name: String, product_id: Option<i64>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            route_code,
            route_name,
            product_id,
            status: 1,
            remark: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 工序步骤（从属于工艺路线，随路线级联删除）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessStep {
    pub id: i64,
    pub route_id: i64,                // 所属路线（外键，CASCADE）
    pub step_no: i64,                 // 工序号（路线内唯一）
    pub step_name: String,            // 工序名称
    pub equipment_id: Option<i64>,    // 指定设备（可空外键）
    pub remark: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProcessStep {
    pub fn new(route_id: i64, step_no: i64, step_name: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            route_id,
            step_no,
            step_name,
            equipment_id: None,
            remark: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 设备台账
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Equipment {
    pub id: i64,
    pub equipment_code: String,       // 设备编码（全局唯一）
    pub equipment_name: String,       // 设备名称
    pub model: Option<String>,        // 型号
    pub dept_id: Option<i64>,         // 所属部门（可空外键，RESTRICT）
    pub location: Option<String>,     // 安装位置
    pub status: EquipmentStatus,      // 状态: 1=运行, 2=停机, 3=维修中
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Equipment {
    pub fn new(equipment_code: String, equipment_name: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            equipment_code,
            equipment_name,
            model: None,
            dept_id: None,
            location: None,
            status: EquipmentStatus::Running,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 设备维护记录（从属于设备，随设备级联删除）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: i64,
    pub equipment_id: i64,            // 所属设备（外键，CASCADE）
    pub maintenance_type: MaintenanceType, // 类型: 1=日常保养, 2=故障维修, 3=大修
    pub content: Option<String>,      // 维护内容
    pub maintainer: Option<String>,   // 维护人
    pub maintained_at: DateTime<Utc>, // 维护时间
    pub result: LogResult,            // 结果: 0=失败, 1=成功
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MaintenanceRecord {
    pub fn new(equipment_id: i64, maintenance_type: MaintenanceType) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            equipment_id,
            maintenance_type,
            content: None,
            maintainer: None,
            maintained_at: now,
            result: LogResult::Success,
            created_at: now,
            updated_at: now,
        }
    }
}
