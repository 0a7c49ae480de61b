// ==========================================
// MES 系统管理核心 - 数据字典API
// ==========================================
// 职责: 字典头/字典项维护; 字典项随字典级联删除
// 红线: (dict_id, item_value) 同一字典内唯一
// ==========================================

use crate::api::audit::Audit;
use crate::api::error::{ApiError, ApiResult};
use crate::domain::{Dictionary, DictionaryItem};
use crate::repository::{Filter, Repository};
use chrono::Utc;
use std::sync::Arc;

const MODULE: &str = "数据字典";

/// 数据字典API
pub struct DictApi {
    dict_repo: Arc<Repository<Dictionary>>,
    item_repo: Arc<Repository<DictionaryItem>>,
    audit: Arc<Audit>,
}

impl DictApi {
    pub fn new(
        dict_repo: Arc<Repository<Dictionary>>,
        item_repo: Arc<Repository<DictionaryItem>>,
        audit: Arc<Audit>,
    ) -> Self {
        Self {
            dict_repo,
            item_repo,
            audit,
        }
    }

    pub fn create_dictionary(
        &self,
        dict_code: &str,
        dict_name: &str,
        operator: &str,
    ) -> ApiResult<Dictionary> {
        if dict_code.trim().is_empty() {
            return Err(ApiError::InvalidInput("字典编码不能为空".to_string()));
        }

        let dict = self.dict_repo.add(Dictionary::new(
            dict_code.trim().to_string(),
            dict_name.to_string(),
        ))?;
        self.audit.success(
            operator,
            MODULE,
            "创建字典",
            Some(format!("dict_code={}", dict.dict_code)),
        );
        Ok(dict)
    }

    pub fn list_dictionaries(&self) -> ApiResult<Vec<Dictionary>> {
        Ok(self.dict_repo.get_all()?)
    }

    pub fn find_dictionary(&self, dict_code: &str) -> ApiResult<Option<Dictionary>> {
        let mut found = self
            .dict_repo
            .find(&Filter::new().eq("dict_code", dict_code.to_string()))?;
        Ok(found.pop())
    }

    pub fn update_dictionary(&self, dict: &Dictionary, operator: &str) -> ApiResult<()> {
        let mut updated = dict.clone();
        updated.updated_at = Utc::now();
        self.dict_repo.update(&updated)?;
        self.audit.success(
            operator,
            MODULE,
            "更新字典",
            Some(format!("dict_id={}", dict.id)),
        );
        Ok(())
    }

    /// 删除字典（字典项级联删除）
    pub fn delete_dictionary(&self, dict_id: i64, operator: &str) -> ApiResult<bool> {
        let removed = self.dict_repo.delete_by_id(dict_id)?;
        if removed {
            self.audit.success(
                operator,
                MODULE,
                "删除字典",
                Some(format!("dict_id={}", dict_id)),
            );
        }
        Ok(removed)
    }

    // ==========================================
    // 字典项
    // ==========================================

    /// 新增字典项（同字典内重复 item_value 触发唯一约束违反）
    pub fn add_item(
        &self,
        dict_id: i64,
        item_value: &str,
        item_label: &str,
        operator: &str,
    ) -> ApiResult<DictionaryItem> {
        if self.dict_repo.find_by_id(dict_id)?.is_none() {
            return Err(ApiError::NotFound(format!("字典(id={})不存在", dict_id)));
        }

        match self.item_repo.add(DictionaryItem::new(
            dict_id,
            item_value.to_string(),
            item_label.to_string(),
        )) {
            Ok(item) => {
                self.audit.success(
                    operator,
                    MODULE,
                    "新增字典项",
                    Some(format!("dict_id={}, item_value={}", dict_id, item_value)),
                );
                Ok(item)
            }
            Err(e) => {
                self.audit.failure(
                    operator,
                    MODULE,
                    "新增字典项",
                    Some(format!(
                        "dict_id={}, item_value={}, error={}",
                        dict_id, item_value, e
                    )),
                );
                Err(e.into())
            }
        }
    }

    pub fn update_item(&self, item: &DictionaryItem, operator: &str) -> ApiResult<()> {
        let mut updated = item.clone();
        updated.updated_at = Utc::now();
        self.item_repo.update(&updated)?;
        self.audit.success(
            operator,
            MODULE,
            "更新字典项",
            Some(format!("item_id={}", item.id)),
        );
        Ok(())
    }

    pub fn delete_item(&self, item_id: i64, operator: &str) -> ApiResult<bool> {
        let removed = self.item_repo.delete_by_id(item_id)?;
        if removed {
            self.audit.success(
                operator,
                MODULE,
                "删除字典项",
                Some(format!("item_id={}", item_id)),
            );
        }
        Ok(removed)
    }

    /// 按字典编码取全部字典项（sort_order 升序）
    pub fn items_of(&self, dict_code: &str) -> ApiResult<Vec<DictionaryItem>> {
        let dict = self
            .find_dictionary(dict_code)?
            .ok_or_else(|| ApiError::NotFound(format!("字典({})不存在", dict_code)))?;

        Ok(self.item_repo.find(
            &Filter::new()
                .eq("dict_id", dict.id)
                .order_by("sort_order ASC, id ASC"),
        )?)
    }
}
