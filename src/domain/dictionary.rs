// ==========================================
// MES 系统管理核心 - 数据字典领域模型
// ==========================================
// 对齐: schema sys_dictionary / sys_dictionary_item 表
// 红线: (dict_id, item_value) 在同一字典内唯一
// ==========================================

use crate::domain::types::DictStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 数据字典（查找表头）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dictionary {
    pub id: i64,
    pub dict_code: String,            // 字典编码（全局唯一）
    pub dict_name: String,            // 字典名称
    pub status: DictStatus,           // 状态: 0=停用, 1=启用
    pub remark: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Dictionary {
    pub fn new(dict_code: String, dict_name: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            dict_code,
            dict_name,
            status: DictStatus::Enabled,
            remark: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 字典项（一对多从属于字典，随字典级联删除）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryItem {
    pub id: i64,
    pub dict_id: i64,                 // 所属字典（外键，CASCADE）
    pub item_value: String,           // 项值（字典内唯一）
    pub item_label: String,           // 显示标签
    pub sort_order: i64,              // 排序号
    pub status: i64,                  // 状态: 0=停用, 1=启用（仅存储）
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DictionaryItem {
    pub fn new(dict_id: i64, item_value: String, item_label: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            dict_id,
            item_value,
            item_label,
            sort_order: 0,
            status: 1,
            created_at: now,
            updated_at: now,
        }
    }
}
