// ==========================================
// 仓储层集成测试
// ==========================================
// 覆盖: 泛型仓储八操作、唯一约束、自引用 RESTRICT、级联删除
// ==========================================

use mes_system_core::db::open_sqlite_connection;
use mes_system_core::schema::ensure_schema;
use mes_system_core::{
    Department, Dictionary, DictionaryItem, Employee, Filter, Permission, PermissionKind,
    Repository, RepositoryError, Role, User, UserRole,
};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

struct TestDb {
    // 目录随测试结束删除
    _dir: TempDir,
    conn: Arc<Mutex<rusqlite::Connection>>,
}

fn setup_db() -> TestDb {
    let dir = TempDir::new().expect("创建临时目录失败");
    let db_path = dir.path().join("test.db");
    let conn = open_sqlite_connection(db_path.to_str().expect("路径编码失败")).expect("打开数据库失败");
    ensure_schema(&conn).expect("建表失败");
    TestDb {
        _dir: dir,
        conn: Arc::new(Mutex::new(conn)),
    }
}

#[test]
fn test_add_then_find_by_id_roundtrip() {
    let db = setup_db();
    let repo = Repository::<User>::new(db.conn.clone());

    let added = repo
        .add(User::new("alice".to_string(), "hash".to_string(), None))
        .expect("插入失败");
    assert!(added.id > 0);

    let found = repo
        .find_by_id(added.id)
        .expect("查询失败")
        .expect("记录丢失");
    assert_eq!(found.username, "alice");
    assert_eq!(found.password_hash, "hash");
}

#[test]
fn test_duplicate_username_rejected() {
    let db = setup_db();
    let repo = Repository::<User>::new(db.conn.clone());

    repo.add(User::new("alice".to_string(), "h1".to_string(), None))
        .expect("插入失败");
    let err = repo
        .add(User::new("alice".to_string(), "h2".to_string(), None))
        .expect_err("期望唯一约束违反");
    assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));
}

#[test]
fn test_update_reflects_new_values() {
    let db = setup_db();
    let repo = Repository::<Role>::new(db.conn.clone());

    let mut role = repo
        .add(Role::new("OP".to_string(), "操作员".to_string()))
        .expect("插入失败");
    role.role_name = "高级操作员".to_string();
    repo.update(&role).expect("更新失败");

    let reloaded = repo
        .find_by_id(role.id)
        .expect("查询失败")
        .expect("记录丢失");
    assert_eq!(reloaded.role_name, "高级操作员");
}

#[test]
fn test_update_missing_id_not_found() {
    let db = setup_db();
    let repo = Repository::<Role>::new(db.conn.clone());

    let mut ghost = Role::new("X".to_string(), "幽灵".to_string());
    ghost.id = 9999;
    let err = repo.update(&ghost).expect_err("期望 NotFound");
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[test]
fn test_delete_by_id_missing_is_noop() {
    let db = setup_db();
    let repo = Repository::<User>::new(db.conn.clone());
    assert!(!repo.delete_by_id(12345).expect("删除失败"));
}

#[test]
fn test_user_role_pair_unique() {
    let db = setup_db();
    let user_repo = Repository::<User>::new(db.conn.clone());
    let role_repo = Repository::<Role>::new(db.conn.clone());
    let link_repo = Repository::<UserRole>::new(db.conn.clone());

    let user = user_repo
        .add(User::new("alice".to_string(), "h".to_string(), None))
        .expect("插入失败");
    let role = role_repo
        .add(Role::new("OP".to_string(), "操作员".to_string()))
        .expect("插入失败");

    link_repo
        .add(UserRole::new(user.id, role.id))
        .expect("首次关联失败");
    let err = link_repo
        .add(UserRole::new(user.id, role.id))
        .expect_err("期望唯一约束违反");
    assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));
}

#[test]
fn test_department_parent_restrict_delete() {
    let db = setup_db();
    let repo = Repository::<Department>::new(db.conn.clone());

    let root = repo
        .add(Department::new("D1".to_string(), "生产中心".to_string(), None))
        .expect("插入失败");
    let leaf = repo
        .add(Department::new(
            "D2".to_string(),
            "轧钢车间".to_string(),
            Some(root.id),
        ))
        .expect("插入失败");

    // 父部门被引用，删除被拒绝
    let err = repo.delete_by_id(root.id).expect_err("期望外键约束违反");
    assert!(matches!(err, RepositoryError::ForeignKeyViolation(_)));

    // 叶子先删，父部门随后可删
    assert!(repo.delete_by_id(leaf.id).expect("删除叶子失败"));
    assert!(repo.delete_by_id(root.id).expect("删除根失败"));
}

#[test]
fn test_department_with_employee_restrict_delete() {
    let db = setup_db();
    let dept_repo = Repository::<Department>::new(db.conn.clone());
    let emp_repo = Repository::<Employee>::new(db.conn.clone());

    let dept = dept_repo
        .add(Department::new("D1".to_string(), "设备科".to_string(), None))
        .expect("插入失败");
    emp_repo
        .add(Employee::new(
            "E001".to_string(),
            "张三".to_string(),
            Some(dept.id),
        ))
        .expect("插入失败");

    let err = dept_repo.delete_by_id(dept.id).expect_err("期望外键约束违反");
    assert!(matches!(err, RepositoryError::ForeignKeyViolation(_)));
}

#[test]
fn test_permission_parent_restrict_delete() {
    let db = setup_db();
    let repo = Repository::<Permission>::new(db.conn.clone());

    let root = repo
        .add(Permission::new(
            "sys".to_string(),
            "系统管理".to_string(),
            PermissionKind::Directory,
            None,
        ))
        .expect("插入失败");
    repo.add(Permission::new(
        "sys:user".to_string(),
        "用户管理".to_string(),
        PermissionKind::Menu,
        Some(root.id),
    ))
    .expect("插入失败");

    let err = repo.delete_by_id(root.id).expect_err("期望外键约束违反");
    assert!(matches!(err, RepositoryError::ForeignKeyViolation(_)));
}

#[test]
fn test_dictionary_item_unique_within_dict_only() {
    let db = setup_db();
    let dict_repo = Repository::<Dictionary>::new(db.conn.clone());
    let item_repo = Repository::<DictionaryItem>::new(db.conn.clone());

    let d1 = dict_repo
        .add(Dictionary::new("gender".to_string(), "性别".to_string()))
        .expect("插入失败");
    let d2 = dict_repo
        .add(Dictionary::new("status".to_string(), "状态".to_string()))
        .expect("插入失败");

    item_repo
        .add(DictionaryItem::new(d1.id, "1".to_string(), "男".to_string()))
        .expect("插入失败");
    // 同字典内重复值被拒绝
    let err = item_repo
        .add(DictionaryItem::new(d1.id, "1".to_string(), "重复".to_string()))
        .expect_err("期望唯一约束违反");
    assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));
    // 不同字典允许相同值
    item_repo
        .add(DictionaryItem::new(d2.id, "1".to_string(), "启用".to_string()))
        .expect("跨字典同值失败");

    // 字典删除后字典项级联删除
    assert!(dict_repo.delete_by_id(d1.id).expect("删除字典失败"));
    let orphans = item_repo
        .find(&Filter::new().eq("dict_id", d1.id))
        .expect("查询失败");
    assert!(orphans.is_empty());
}

#[test]
fn test_get_all_ordered_by_id() {
    let db = setup_db();
    let repo = Repository::<Role>::new(db.conn.clone());

    for code in ["C", "A", "B"] {
        repo.add(Role::new(code.to_string(), code.to_string()))
            .expect("插入失败");
    }

    let all = repo.get_all().expect("查询失败");
    assert_eq!(all.len(), 3);
    assert!(all.windows(2).all(|w| w[0].id < w[1].id));
}

#[test]
fn test_find_with_filter_and_limit() {
    let db = setup_db();
    let repo = Repository::<Employee>::new(db.conn.clone());

    for i in 1..=5 {
        repo.add(Employee::new(format!("E{:03}", i), format!("员工{}", i), None))
            .expect("插入失败");
    }

    let found = repo
        .find(
            &Filter::new()
                .gt("employee_code", "E002".to_string())
                .order_by("employee_code DESC")
                .limit(2),
        )
        .expect("查询失败");
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].employee_code, "E005");
    assert_eq!(found[1].employee_code, "E004");
}
