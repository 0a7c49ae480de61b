// ==========================================
// API层集成测试
// ==========================================
// 覆盖: 应用装配、登录与审计、BOM规则、配置快照、字典查询
// ==========================================

use mes_system_core::api::LogQuery;
use mes_system_core::{ApiError, AppState, MaintenanceType};
use tempfile::TempDir;

struct TestApp {
    _dir: TempDir,
    state: AppState,
}

fn setup_app() -> TestApp {
    let dir = TempDir::new().expect("创建临时目录失败");
    let db_path = dir
        .path()
        .join("mes_system.db")
        .to_string_lossy()
        .to_string();
    let state = AppState::new(db_path).expect("AppState初始化失败");
    TestApp { _dir: dir, state }
}

#[test]
fn test_login_flow_with_audit() {
    let app = setup_app();
    let user_api = &app.state.user_api;

    let user = user_api
        .create_user("alice", "secret123", Some("爱丽丝".to_string()), "system")
        .expect("创建用户失败");
    assert!(user.id > 0);
    // 散列存储，不落明文
    assert_ne!(user.password_hash, "secret123");

    // 正确口令登录成功
    let session = user_api.login("alice", "secret123").expect("登录失败");
    assert_eq!(session.user_id, user.id);
    assert!(!session.token.is_empty());

    // 错误口令与未知用户返回同一种错误
    let err = user_api.login("alice", "wrong").expect_err("期望登录失败");
    assert!(matches!(err, ApiError::AuthenticationFailed(_)));
    let err = user_api.login("nobody", "x").expect_err("期望登录失败");
    assert!(matches!(err, ApiError::AuthenticationFailed(_)));

    // 成功与失败均落审计日志
    let logs = app
        .state
        .log_api
        .query(&LogQuery {
            module: Some("用户管理".to_string()),
            ..LogQuery::default()
        })
        .expect("查询日志失败");
    assert!(logs.iter().any(|l| l.action == "登录"));
    assert!(logs.len() >= 3);
}

#[test]
fn test_change_password_then_relogin() {
    let app = setup_app();
    let user_api = &app.state.user_api;

    let user = user_api
        .create_user("bob", "old-pass", None, "system")
        .expect("创建用户失败");

    user_api
        .change_password(user.id, "old-pass", "new-pass", "bob")
        .expect("修改密码失败");

    assert!(user_api.login("bob", "old-pass").is_err());
    user_api.login("bob", "new-pass").expect("新密码登录失败");
}

#[test]
fn test_role_assignment_flow() {
    let app = setup_app();
    let user = app
        .state
        .user_api
        .create_user("alice", "pw", None, "system")
        .expect("创建用户失败");
    let role = app
        .state
        .role_api
        .create_role("ADMIN", "管理员", "system")
        .expect("创建角色失败");

    app.state
        .user_api
        .assign_role(user.id, role.id, "system")
        .expect("分配角色失败");
    // 重复分配被唯一约束拒绝
    assert!(app
        .state
        .user_api
        .assign_role(user.id, role.id, "system")
        .is_err());

    let roles = app
        .state
        .user_api
        .list_user_roles(user.id)
        .expect("查询角色失败");
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].role_code, "ADMIN");

    assert!(app
        .state
        .user_api
        .revoke_role(user.id, role.id, "system")
        .expect("撤销角色失败"));
    assert!(app
        .state
        .user_api
        .list_user_roles(user.id)
        .expect("查询角色失败")
        .is_empty());
}

#[test]
fn test_bom_rules_end_to_end() {
    let app = setup_app();
    let product_api = &app.state.product_api;

    let coil = product_api
        .create_product("P001", "热轧卷板", "admin")
        .expect("创建产品失败");
    let slab = product_api
        .create_product("P002", "板坯", "admin")
        .expect("创建产品失败");

    // 自引用拒绝
    assert!(product_api
        .add_bom_line(coil.id, coil.id, 1.0, "admin")
        .is_err());

    product_api
        .add_bom_line(coil.id, slab.id, 1.05, "admin")
        .expect("新增BOM行失败");
    // 重复组件对拒绝
    assert!(product_api
        .add_bom_line(coil.id, slab.id, 2.0, "admin")
        .is_err());

    // 被BOM引用的组件产品删除被拒绝
    assert!(product_api.delete_product(slab.id, "admin").is_err());

    let bom = product_api.list_bom(coil.id).expect("查询BOM失败");
    assert_eq!(bom.len(), 1);
    assert!((bom[0].quantity - 1.05).abs() < f64::EPSILON);
}

#[test]
fn test_config_snapshot_restore() {
    let app = setup_app();
    let config_api = &app.state.config_api;

    config_api
        .set("factory.name", "一号轧钢厂", "admin")
        .expect("写入失败");
    config_api.set("shift.count", "3", "admin").expect("写入失败");

    let snapshot = config_api.snapshot().expect("快照失败");

    config_api
        .set("factory.name", "临时厂名", "admin")
        .expect("覆盖失败");
    config_api.delete("shift.count", "admin").expect("删除失败");

    config_api
        .restore_snapshot(&snapshot, "admin")
        .expect("恢复失败");
    assert_eq!(
        config_api.get("factory.name").expect("读取失败"),
        Some("一号轧钢厂".to_string())
    );
    assert_eq!(
        config_api.get("shift.count").expect("读取失败"),
        Some("3".to_string())
    );
}

#[test]
fn test_dict_items_lookup() {
    let app = setup_app();
    let dict_api = &app.state.dict_api;

    let dict = dict_api
        .create_dictionary("equipment_status", "设备状态", "admin")
        .expect("创建字典失败");
    dict_api
        .add_item(dict.id, "1", "运行", "admin")
        .expect("新增字典项失败");
    dict_api
        .add_item(dict.id, "2", "停机", "admin")
        .expect("新增字典项失败");

    let items = dict_api.items_of("equipment_status").expect("查询失败");
    assert_eq!(items.len(), 2);
    assert!(dict_api.items_of("missing_dict").is_err());
}

#[test]
fn test_org_and_equipment_flow() {
    let app = setup_app();

    let dept = app
        .state
        .org_api
        .create_department("D100", "生产中心", None, "admin")
        .expect("创建部门失败");
    app.state
        .org_api
        .create_employee("E001", "张三", Some(dept.id), "admin")
        .expect("创建员工失败");

    // 有员工的部门不可删除
    assert!(app.state.org_api.delete_department(dept.id, "admin").is_err());

    let eq = app
        .state
        .equipment_api
        .create_equipment("EQ-001", "粗轧机", "admin")
        .expect("创建设备失败");
    app.state
        .equipment_api
        .record_maintenance(
            eq.id,
            MaintenanceType::Repair,
            Some("轧辊更换".to_string()),
            None,
            "admin",
        )
        .expect("登记维护失败");

    let history = app
        .state
        .equipment_api
        .maintenance_history(eq.id, None)
        .expect("查询维护历史失败");
    assert_eq!(history.len(), 1);

    // 全流程操作都进了审计日志
    let recent = app.state.log_api.recent(50).expect("查询日志失败");
    assert!(recent.iter().any(|l| l.module == "组织管理"));
    assert!(recent.iter().any(|l| l.module == "设备管理"));
}
