// ==========================================
// MES 系统管理核心 - 领域类型定义
// ==========================================
// 红线: 状态枚举按实体独立，不做跨实体统一
//       （原系统各实体状态数值口径不一致: 有的 0=失败/1=成功，有的 1=启用/2=禁用）
// 存储: 状态以 INTEGER 落库，提供 FromSql/ToSql 转换
// ==========================================

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;

// 状态枚举与 INTEGER 列的双向转换（数值口径见各枚举注释）
macro_rules! impl_int_enum_sql {
    ($ty:ty) => {
        impl FromSql for $ty {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                let v = i64::column_result(value)?;
                <$ty>::from_i64(v).ok_or(FromSqlError::OutOfRange(v))
            }
        }

        impl ToSql for $ty {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_i64()))
            }
        }
    };
}

// ==========================================
// 用户状态 (User Status)
// ==========================================
// 口径: 1=启用, 2=禁用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
    Enabled,  // 启用
    Disabled, // 禁用
}

impl UserStatus {
    pub fn as_i64(self) -> i64 {
        match self {
            UserStatus::Enabled => 1,
            UserStatus::Disabled => 2,
        }
    }

    pub fn from_i64(v: i64) -> Option<Self> {
        match v {
            1 => Some(UserStatus::Enabled),
            2 => Some(UserStatus::Disabled),
            _ => None,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserStatus::Enabled => write!(f, "启用"),
            UserStatus::Disabled => write!(f, "禁用"),
        }
    }
}

impl_int_enum_sql!(UserStatus);

// ==========================================
// 角色状态 (Role Status)
// ==========================================
// 口径: 1=启用, 2=禁用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleStatus {
    Enabled,  // 启用
    Disabled, // 禁用
}

impl RoleStatus {
    pub fn as_i64(self) -> i64 {
        match self {
            RoleStatus::Enabled => 1,
            RoleStatus::Disabled => 2,
        }
    }

    pub fn from_i64(v: i64) -> Option<Self> {
        match v {
            1 => Some(RoleStatus::Enabled),
            2 => Some(RoleStatus::Disabled),
            _ => None,
        }
    }
}

impl fmt::Display for RoleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleStatus::Enabled => write!(f, "启用"),
            RoleStatus::Disabled => write!(f, "禁用"),
        }
    }
}

impl_int_enum_sql!(RoleStatus);

// ==========================================
// 权限类型 (Permission Kind)
// ==========================================
// 口径: 1=目录, 2=菜单, 3=按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionKind {
    Directory, // 目录
    Menu,      // 菜单
    Button,    // 按钮
}

impl PermissionKind {
    pub fn as_i64(self) -> i64 {
        match self {
            PermissionKind::Directory => 1,
            PermissionKind::Menu => 2,
            PermissionKind::Button => 3,
        }
    }

    pub fn from_i64(v: i64) -> Option<Self> {
        match v {
            1 => Some(PermissionKind::Directory),
            2 => Some(PermissionKind::Menu),
            3 => Some(PermissionKind::Button),
            _ => None,
        }
    }
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionKind::Directory => write!(f, "目录"),
            PermissionKind::Menu => write!(f, "菜单"),
            PermissionKind::Button => write!(f, "按钮"),
        }
    }
}

impl_int_enum_sql!(PermissionKind);

// ==========================================
// 员工状态 (Employee Status)
// ==========================================
// 口径: 1=在职, 2=离职
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeStatus {
    Active,   // 在职
    Departed, // 离职
}

impl EmployeeStatus {
    pub fn as_i64(self) -> i64 {
        match self {
            EmployeeStatus::Active => 1,
            EmployeeStatus::Departed => 2,
        }
    }

    pub fn from_i64(v: i64) -> Option<Self> {
        match v {
            1 => Some(EmployeeStatus::Active),
            2 => Some(EmployeeStatus::Departed),
            _ => None,
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmployeeStatus::Active => write!(f, "在职"),
            EmployeeStatus::Departed => write!(f, "离职"),
        }
    }
}

impl_int_enum_sql!(EmployeeStatus);

// ==========================================
// 字典状态 (Dictionary Status)
// ==========================================
// 口径: 0=停用, 1=启用（注意与用户/角色口径不同，保持原系统数值）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DictStatus {
    Stopped, // 停用
    Enabled, // 启用
}

impl DictStatus {
    pub fn as_i64(self) -> i64 {
        match self {
            DictStatus::Stopped => 0,
            DictStatus::Enabled => 1,
        }
    }

    pub fn from_i64(v: i64) -> Option<Self> {
        match v {
            0 => Some(DictStatus::Stopped),
            1 => Some(DictStatus::Enabled),
            _ => None,
        }
    }
}

impl fmt::Display for DictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictStatus::Stopped => write!(f, "停用"),
            DictStatus::Enabled => write!(f, "启用"),
        }
    }
}

impl_int_enum_sql!(DictStatus);

// ==========================================
// 操作结果 (Log Result)
// ==========================================
// 口径: 0=失败, 1=成功
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogResult {
    Failure, // 失败
    Success, // 成功
}

impl LogResult {
    pub fn as_i64(self) -> i64 {
        match self {
            LogResult::Failure => 0,
            LogResult::Success => 1,
        }
    }

    pub fn from_i64(v: i64) -> Option<Self> {
        match v {
            0 => Some(LogResult::Failure),
            1 => Some(LogResult::Success),
            _ => None,
        }
    }
}

impl fmt::Display for LogResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogResult::Failure => write!(f, "失败"),
            LogResult::Success => write!(f, "成功"),
        }
    }
}

impl_int_enum_sql!(LogResult);

// ==========================================
// 产品状态 (Product Status)
// ==========================================
// 口径: 1=量产, 2=试制, 3=停产
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductStatus {
    MassProduction, // 量产
    Trial,          // 试制
    Discontinued,   // 停产
}

impl ProductStatus {
    pub fn as_i64(self) -> i64 {
        match self {
            ProductStatus::MassProduction => 1,
            ProductStatus::Trial => 2,
            ProductStatus::Discontinued => 3,
        }
    }

    pub fn from_i64(v: i64) -> Option<Self> {
        match v {
            1 => Some(ProductStatus::MassProduction),
            2 => Some(ProductStatus::Trial),
            3 => Some(ProductStatus::Discontinued),
            _ => None,
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductStatus::MassProduction => write!(f, "量产"),
            ProductStatus::Trial => write!(f, "试制"),
            ProductStatus::Discontinued => write!(f, "停产"),
        }
    }
}

impl_int_enum_sql!(ProductStatus);

// ==========================================
// 设备状态 (Equipment Status)
// ==========================================
// 口径: 1=运行, 2=停机, 3=维修中
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentStatus {
    Running,          // 运行
    Idle,             // 停机
    UnderMaintenance, // 维修中
}

impl EquipmentStatus {
    pub fn as_i64(self) -> i64 {
        match self {
            EquipmentStatus::Running => 1,
            EquipmentStatus::Idle => 2,
            EquipmentStatus::UnderMaintenance => 3,
        }
    }

    pub fn from_i64(v: i64) -> Option<Self> {
        match v {
            1 => Some(EquipmentStatus::Running),
            2 => Some(EquipmentStatus::Idle),
            3 => Some(EquipmentStatus::UnderMaintenance),
            _ => None,
        }
    }
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipmentStatus::Running => write!(f, "运行"),
            EquipmentStatus::Idle => write!(f, "停机"),
            EquipmentStatus::UnderMaintenance => write!(f, "维修中"),
        }
    }
}

impl_int_enum_sql!(EquipmentStatus);

// ==========================================
// 维护类型 (Maintenance Type)
// ==========================================
// 口径: 1=日常保养, 2=故障维修, 3=大修
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaintenanceType {
    Routine,  // 日常保养
    Repair,   // 故障维修
    Overhaul, // 大修
}

impl MaintenanceType {
    pub fn as_i64(self) -> i64 {
        match self {
            MaintenanceType::Routine => 1,
            MaintenanceType::Repair => 2,
            MaintenanceType::Overhaul => 3,
        }
    }

    pub fn from_i64(v: i64) -> Option<Self> {
        match v {
            1 => Some(MaintenanceType::Routine),
            2 => Some(MaintenanceType::Repair),
            3 => Some(MaintenanceType::Overhaul),
            _ => None,
        }
    }
}

impl fmt::Display for MaintenanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaintenanceType::Routine => write!(f, "日常保养"),
            MaintenanceType::Repair => write!(f, "故障维修"),
            MaintenanceType::Overhaul => write!(f, "大修"),
        }
    }
}

impl_int_enum_sql!(MaintenanceType);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_status_roundtrip() {
        assert_eq!(UserStatus::from_i64(1), Some(UserStatus::Enabled));
        assert_eq!(UserStatus::from_i64(2), Some(UserStatus::Disabled));
        assert_eq!(UserStatus::from_i64(0), None);
        assert_eq!(UserStatus::Enabled.as_i64(), 1);
    }

    #[test]
    fn test_dict_status_zero_based() {
        // 字典状态与用户状态口径不同: 0=停用, 1=启用
        assert_eq!(DictStatus::from_i64(0), Some(DictStatus::Stopped));
        assert_eq!(DictStatus::from_i64(1), Some(DictStatus::Enabled));
        assert_eq!(DictStatus::from_i64(2), None);
    }

    #[test]
    fn test_log_result_roundtrip() {
        assert_eq!(LogResult::from_i64(0), Some(LogResult::Failure));
        assert_eq!(LogResult::from_i64(1), Some(LogResult::Success));
        assert_eq!(LogResult::Success.as_i64(), 1);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(UserStatus::Enabled.to_string(), "启用");
        assert_eq!(EquipmentStatus::UnderMaintenance.to_string(), "维修中");
        assert_eq!(MaintenanceType::Overhaul.to_string(), "大修");
    }
}
