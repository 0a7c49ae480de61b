// ==========================================
// MES 系统管理核心 - 通用仓储
// ==========================================
// 职责: 为所有实体提供统一的八操作 CRUD 契约
//       get_all / find / find_by_id / add / update / delete / delete_by_id / save
// 红线: 仓储不含业务逻辑; 所有查询参数化
// 约束: 无分页、无重试，存储错误原样上抛
// ==========================================

use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::filter::Filter;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Result as SqliteResult, Row};
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};

/// 实体映射契约
///
/// 每个落库实体实现一次（见 repository::bindings），
/// 之后即获得 `Repository<T>` 的全部八个操作，无实体级覆写。
pub trait Entity: Sized {
    /// 表名
    const TABLE: &'static str;

    /// 数据列（不含 id，顺序与 from_row / data_values 一致）
    const DATA_COLUMNS: &'static [&'static str];

    /// 代理主键（0 = 未持久化）
    fn id(&self) -> i64;

    /// 回写会话分配的代理主键
    fn set_id(&mut self, id: i64);

    /// 行映射（SELECT 列顺序: id, DATA_COLUMNS...）
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// 数据列取值（顺序与 DATA_COLUMNS 一致）
    fn data_values(&self) -> Vec<Value>;
}

/// 通用仓储
///
/// 包装共享连接上的单表句柄，按实体类型参数化。
pub struct Repository<T: Entity> {
    conn: Arc<Mutex<Connection>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity> Repository<T> {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            conn,
            _marker: PhantomData,
        }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn select_sql() -> String {
        format!(
            "SELECT id, {} FROM {}",
            T::DATA_COLUMNS.join(", "),
            T::TABLE
        )
    }

    /// 查询全部记录（按 id 升序，无分页）
    pub fn get_all(&self) -> RepositoryResult<Vec<T>> {
        let conn = self.get_conn()?;
        let sql = format!("{} ORDER BY id ASC", Self::select_sql());
        let mut stmt = conn.prepare(&sql)?;

        let rows = stmt
            .query_map([], |row| T::from_row(row))?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(rows)
    }

    /// 按过滤条件查询（服务端过滤，参数化 WHERE）
    pub fn find(&self, filter: &Filter) -> RepositoryResult<Vec<T>> {
        let conn = self.get_conn()?;
        let sql = filter.build_sql(&Self::select_sql());
        let mut stmt = conn.prepare(&sql)?;

        let rows = stmt
            .query_map(params_from_iter(filter.params().iter()), |row| {
                T::from_row(row)
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(rows)
    }

    /// 按主键查询
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<T>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE id = ?1", Self::select_sql());

        let result = conn.query_row(&sql, [id], |row| T::from_row(row));

        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 新增记录（会话分配代理主键后返回已存储记录）
    pub fn add(&self, mut entity: T) -> RepositoryResult<T> {
        let conn = self.get_conn()?;

        let placeholders: Vec<String> = (1..=T::DATA_COLUMNS.len())
            .map(|i| format!("?{}", i))
            .collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            T::TABLE,
            T::DATA_COLUMNS.join(", "),
            placeholders.join(", ")
        );

        conn.execute(&sql, params_from_iter(entity.data_values()))?;
        entity.set_id(conn.last_insert_rowid());
        Ok(entity)
    }

    /// 整行覆盖更新（按主键，主键不存在返回 NotFound）
    pub fn update(&self, entity: &T) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let assignments: Vec<String> = T::DATA_COLUMNS
            .iter()
            .enumerate()
            .map(|(i, col)| format!("{} = ?{}", col, i + 1))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            T::TABLE,
            assignments.join(", "),
            T::DATA_COLUMNS.len() + 1
        );

        let mut values = entity.data_values();
        values.push(Value::Integer(entity.id()));

        let affected = conn.execute(&sql, params_from_iter(values))?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: T::TABLE.to_string(),
                id: entity.id().to_string(),
            });
        }
        Ok(())
    }

    /// 物理删除记录
    pub fn delete(&self, entity: &T) -> RepositoryResult<()> {
        self.delete_by_id(entity.id())?;
        Ok(())
    }

    /// 按主键物理删除（id 不存在时为空操作，返回 false）
    pub fn delete_by_id(&self, id: i64) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let sql = format!("DELETE FROM {} WHERE id = ?1", T::TABLE);
        let affected = conn.execute(&sql, [id])?;
        Ok(affected > 0)
    }

    /// 显式提交挂起写入
    ///
    /// 说明: 语句默认自动提交；仅当连接上存在显式事务时才真正 COMMIT。
    pub fn save(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        if !conn.is_autocommit() {
            conn.execute_batch("COMMIT").map_err(|e| {
                RepositoryError::DatabaseTransactionError(e.to_string())
            })?;
        }
        Ok(())
    }
}
