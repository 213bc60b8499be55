//! HTTP 层集成测试，每个用例使用独立的内存 SQLite 数据库

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use synexa_sis::middlewares::RequestLogger;
use synexa_sis::models::{AppStartTime, ErrorCode};
use synexa_sis::routes;
use synexa_sis::storage::Storage;
use synexa_sis::storage::sea_orm_storage::SeaOrmStorage;
use synexa_sis::utils::{json_error_handler, query_error_handler};

async fn memory_storage() -> Arc<dyn Storage> {
    let storage = SeaOrmStorage::connect("sqlite::memory:", 1, 5)
        .await
        .expect("in-memory database");
    Arc::new(storage)
}

macro_rules! init_app {
    ($storage:expr) => {
        test::init_service(
            App::new()
                .wrap(RequestLogger)
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new($storage.clone()))
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: chrono::Utc::now(),
                }))
                .configure(routes::configure_api_routes),
        )
        .await
    };
}

macro_rules! call {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

macro_rules! post {
    ($app:expr, $uri:expr, $body:expr) => {
        call!($app, test::TestRequest::post().uri($uri).set_json($body))
    };
}

macro_rules! put {
    ($app:expr, $uri:expr, $body:expr) => {
        call!($app, test::TestRequest::put().uri($uri).set_json($body))
    };
}

macro_rules! get {
    ($app:expr, $uri:expr) => {
        call!($app, test::TestRequest::get().uri($uri))
    };
}

macro_rules! delete {
    ($app:expr, $uri:expr) => {
        call!($app, test::TestRequest::delete().uri($uri))
    };
}

fn id_of(body: &Value) -> i64 {
    body["data"]["id"].as_i64().expect("response carries an id")
}

fn code_of(body: &Value) -> i64 {
    body["code"].as_i64().unwrap_or(-1)
}

macro_rules! create_students {
    ($app:expr, $count:expr) => {{
        let mut ids = Vec::new();
        for i in 0..$count {
            let (status, body) = post!(
                $app,
                "/api/v1/students",
                json!({
                    "full_name": format!("Aluno {i}"),
                    "student_number": format!("2025-{i:04}"),
                })
            );
            assert_eq!(status, StatusCode::CREATED, "{body}");
            ids.push(id_of(&body));
        }
        ids
    }};
}

macro_rules! create_teacher {
    ($app:expr, $email:expr) => {{
        let (status, body) = post!(
            $app,
            "/api/v1/teachers",
            json!({ "full_name": "Maria Silva", "email": $email })
        );
        assert_eq!(status, StatusCode::CREATED, "{body}");
        id_of(&body)
    }};
}

macro_rules! create_subject {
    ($app:expr, $name:expr, $code:expr) => {{
        let (status, body) = post!(
            $app,
            "/api/v1/subjects",
            json!({
                "name": $name,
                "code": $code,
                "category": "Ciências",
                "workload_hours": 4,
            })
        );
        assert_eq!(status, StatusCode::CREATED, "{body}");
        id_of(&body)
    }};
}

#[actix_web::test]
async fn test_class_roster_over_capacity_rejected() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    let students = create_students!(app, 31);

    let (status, body) = post!(
        app,
        "/api/v1/classes",
        json!({
            "name": "10A",
            "academic_year": 2025,
            "shift": "morning",
            "capacity": 30,
            "student_ids": students,
        })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), ErrorCode::CapacityExceeded as i64);

    // 拒绝后不应落库
    let (_, list) = get!(app, "/api/v1/classes");
    assert_eq!(list["data"]["pagination"]["total"], 0);

    let (status, body) = post!(
        app,
        "/api/v1/classes",
        json!({
            "name": "10A",
            "academic_year": 2025,
            "shift": "morning",
            "capacity": 31,
            "student_ids": students,
        })
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["active_enrollments"], 31);
    assert_eq!(body["data"]["available_seats"], 0);
}

#[actix_web::test]
async fn test_class_name_unique_per_academic_year() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let class = json!({ "name": "10A", "academic_year": 2025, "shift": "morning", "capacity": 30 });
    let (status, _) = post!(app, "/api/v1/classes", &class);
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post!(app, "/api/v1/classes", &class);
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(code_of(&body), ErrorCode::DuplicateKey as i64);

    let (status, body) = post!(
        app,
        "/api/v1/classes",
        json!({ "name": "10A", "academic_year": 2026, "shift": "morning", "capacity": 30 })
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
}

#[actix_web::test]
async fn test_class_update_to_existing_name_conflicts() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let (_, _) = post!(
        app,
        "/api/v1/classes",
        json!({ "name": "10A", "academic_year": 2025, "shift": "morning", "capacity": 30 })
    );
    let (_, body) = post!(
        app,
        "/api/v1/classes",
        json!({ "name": "10B", "academic_year": 2025, "shift": "afternoon", "capacity": 30 })
    );
    let class_b = id_of(&body);

    let (status, body) = put!(
        app,
        &format!("/api/v1/classes/{class_b}"),
        json!({ "name": "10A" })
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(code_of(&body), ErrorCode::DuplicateKey as i64);

    // 保持自身名称不视为重复
    let (status, body) = put!(
        app,
        &format!("/api/v1/classes/{class_b}"),
        json!({ "name": "10B", "capacity": 35 })
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["capacity"], 35);
}

#[actix_web::test]
async fn test_class_update_roster_over_capacity_rejected() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    let students = create_students!(app, 3);

    let (_, body) = post!(
        app,
        "/api/v1/classes",
        json!({ "name": "7A", "academic_year": 2025, "shift": "morning", "capacity": 2 })
    );
    let class_id = id_of(&body);

    let (status, body) = put!(
        app,
        &format!("/api/v1/classes/{class_id}"),
        json!({ "student_ids": students })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), ErrorCode::CapacityExceeded as i64);

    let (_, body) = get!(app, &format!("/api/v1/classes/{class_id}"));
    assert_eq!(body["data"]["active_enrollments"], 0);
}

#[actix_web::test]
async fn test_class_capacity_below_active_count_rejected() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    let students = create_students!(app, 3);

    let (_, body) = post!(
        app,
        "/api/v1/classes",
        json!({ "name": "7B", "academic_year": 2025, "shift": "afternoon", "capacity": 3, "student_ids": students })
    );
    let class_id = id_of(&body);

    let (status, body) = put!(
        app,
        &format!("/api/v1/classes/{class_id}"),
        json!({ "capacity": 2 })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), ErrorCode::CapacityExceeded as i64);

    let (_, body) = get!(app, &format!("/api/v1/classes/{class_id}"));
    assert_eq!(body["data"]["capacity"], 3);
    assert_eq!(body["data"]["active_enrollments"], 3);
}

#[actix_web::test]
async fn test_class_update_roster_with_unknown_student_rejected() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    let students = create_students!(app, 1);

    let (_, body) = post!(
        app,
        "/api/v1/classes",
        json!({ "name": "7C", "academic_year": 2025, "shift": "evening", "capacity": 10 })
    );
    let class_id = id_of(&body);

    let (status, body) = put!(
        app,
        &format!("/api/v1/classes/{class_id}"),
        json!({ "student_ids": [students[0], 9999] })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), ErrorCode::MissingReferences as i64);
    let message = body["message"].as_str().unwrap_or_default();
    assert!(message.contains("9999"), "{message}");

    let (_, body) = get!(app, &format!("/api/v1/students/{}", students[0]));
    assert!(body["data"]["class_id"].is_null());
}

#[actix_web::test]
async fn test_subject_with_unknown_teachers_rejected() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let (status, body) = post!(
        app,
        "/api/v1/subjects",
        json!({
            "name": "Química",
            "code": "QUI",
            "category": "Ciências",
            "workload_hours": 3,
            "teacher_ids": [777],
        })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), ErrorCode::MissingReferences as i64);

    let (_, list) = get!(app, "/api/v1/subjects");
    assert_eq!(list["data"]["pagination"]["total"], 0);
}

#[actix_web::test]
async fn test_schedule_update_into_occupied_slot_conflicts() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    let teacher = create_teacher!(app, "lucia@escola.ao");
    let subject = create_subject!(app, "História", "HIS");
    let uri = format!("/api/v1/teachers/{teacher}/schedules");

    let (status, _) = post!(
        app,
        &uri,
        json!({ "subject_id": subject, "weekday": "wednesday", "start_time": "08:00", "end_time": "09:00" })
    );
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = post!(
        app,
        &uri,
        json!({ "subject_id": subject, "weekday": "wednesday", "start_time": "10:00", "end_time": "11:00" })
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let second = id_of(&body);

    // 只改开始时间，结束时间沿用原值 11:00
    let (status, body) = put!(
        app,
        &format!("{uri}/{second}"),
        json!({ "start_time": "08:30" })
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(code_of(&body), ErrorCode::ScheduleConflict as i64);

    let (_, body) = get!(app, &format!("{uri}?weekday=wednesday"));
    let items = body["data"]["items"].as_array().cloned().unwrap_or_default();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["start_time"], "10:00");
}

#[actix_web::test]
async fn test_class_with_unknown_teachers_rejected() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    let teacher = create_teacher!(app, "maria@escola.ao");

    let (status, body) = post!(
        app,
        "/api/v1/classes",
        json!({
            "name": "11B",
            "academic_year": 2025,
            "shift": "afternoon",
            "capacity": 25,
            "teacher_ids": [teacher, 998, 999],
        })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), ErrorCode::MissingReferences as i64);
    let message = body["message"].as_str().unwrap_or_default();
    assert!(message.contains("998") && message.contains("999"), "{message}");
    assert!(!message.contains(&teacher.to_string()), "{message}");
}

#[actix_web::test]
async fn test_schedule_overlap_and_adjacent_slots() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    let teacher = create_teacher!(app, "joao@escola.ao");
    let subject = create_subject!(app, "Matemática", "MAT");
    let uri = format!("/api/v1/teachers/{teacher}/schedules");

    let (status, body) = post!(
        app,
        &uri,
        json!({ "subject_id": subject, "weekday": "monday", "start_time": "08:00", "end_time": "09:00" })
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["shift"], "morning");
    let first = id_of(&body);

    let (status, body) = post!(
        app,
        &uri,
        json!({ "subject_id": subject, "weekday": "monday", "start_time": "08:30", "end_time": "09:30" })
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(code_of(&body), ErrorCode::ScheduleConflict as i64);

    // 首尾相接不算冲突
    let (status, body) = post!(
        app,
        &uri,
        json!({ "subject_id": subject, "weekday": "monday", "start_time": "09:00", "end_time": "10:00" })
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");

    // 不同星期互不影响
    let (status, _) = post!(
        app,
        &uri,
        json!({ "subject_id": subject, "weekday": "tuesday", "start_time": "08:30", "end_time": "09:30" })
    );
    assert_eq!(status, StatusCode::CREATED);

    // 更新自身时间不与自己冲突
    let (status, body) = put!(
        app,
        &format!("{uri}/{first}"),
        json!({ "start_time": "07:30" })
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["start_time"], "07:30");

    let (status, body) = get!(app, &format!("{uri}?weekday=monday"));
    assert_eq!(status, StatusCode::OK);
    let items = body["data"]["items"].as_array().cloned().unwrap_or_default();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["start_time"], "07:30");
}

#[actix_web::test]
async fn test_schedule_conflict_then_following_slot() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    let teacher = create_teacher!(app, "rui@escola.ao");
    let subject = create_subject!(app, "Biologia", "BIO");
    let uri = format!("/api/v1/teachers/{teacher}/schedules");

    let (status, _) = post!(
        app,
        &uri,
        json!({ "subject_id": subject, "weekday": "monday", "start_time": "08:00", "end_time": "09:30" })
    );
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post!(
        app,
        &uri,
        json!({ "subject_id": subject, "weekday": "monday", "start_time": "09:00", "end_time": "10:00" })
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(code_of(&body), ErrorCode::ScheduleConflict as i64);

    let (status, body) = post!(
        app,
        &uri,
        json!({ "subject_id": subject, "weekday": "monday", "start_time": "09:30", "end_time": "10:30" })
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
}

#[actix_web::test]
async fn test_schedule_may_end_at_midnight() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    let teacher = create_teacher!(app, "sara@escola.ao");
    let subject = create_subject!(app, "Filosofia", "FIL");
    let uri = format!("/api/v1/teachers/{teacher}/schedules");

    let (status, body) = post!(
        app,
        &uri,
        json!({ "subject_id": subject, "weekday": "thursday", "start_time": "23:00", "end_time": "24:00" })
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["end_time"], "24:00");
    assert_eq!(body["data"]["shift"], "evening");

    let (status, body) = post!(
        app,
        &uri,
        json!({ "subject_id": subject, "weekday": "thursday", "start_time": "23:30", "end_time": "24:00" })
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(code_of(&body), ErrorCode::ScheduleConflict as i64);

    // 24:00 不能作为开始时间
    let (status, body) = post!(
        app,
        &uri,
        json!({ "subject_id": subject, "weekday": "friday", "start_time": "24:00", "end_time": "24:00" })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), ErrorCode::ScheduleTimeInvalid as i64);
}

#[actix_web::test]
async fn test_schedule_time_range_checked_first() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    let teacher = create_teacher!(app, "ana@escola.ao");

    // 学科不存在，但时间区间非法应先被拒绝
    let (status, body) = post!(
        app,
        &format!("/api/v1/teachers/{teacher}/schedules"),
        json!({ "subject_id": 404, "weekday": "friday", "start_time": "10:00", "end_time": "10:00" })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), ErrorCode::ScheduleTimeInvalid as i64);

    let (status, body) = post!(
        app,
        &format!("/api/v1/teachers/{teacher}/schedules"),
        json!({ "subject_id": 404, "weekday": "friday", "start_time": "10:00", "end_time": "11:00" })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), ErrorCode::MissingReferences as i64);

    let (status, body) = get!(app, "/api/v1/teachers/9999/schedules");
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code_of(&body), ErrorCode::TeacherNotFound as i64);
}

#[actix_web::test]
async fn test_enrollment_capacity_and_withdraw() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    let students = create_students!(app, 2);

    let (_, body) = post!(
        app,
        "/api/v1/classes",
        json!({ "name": "12C", "academic_year": 2025, "shift": "evening", "capacity": 1 })
    );
    let class_id = id_of(&body);
    let uri = format!("/api/v1/classes/{class_id}/enrollments");

    let (status, body) = post!(app, &uri, json!({ "student_id": students[0] }));
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let enrollment = id_of(&body);

    let (status, body) = post!(app, &uri, json!({ "student_id": students[0] }));
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(code_of(&body), ErrorCode::EnrollmentAlreadyActive as i64);

    let (status, body) = post!(app, &uri, json!({ "student_id": students[1] }));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), ErrorCode::CapacityExceeded as i64);

    let (status, body) = delete!(app, &format!("{uri}/{enrollment}"));
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "inactive");

    let (status, body) = post!(app, &uri, json!({ "student_id": students[1] }));
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (_, body) = get!(app, &format!("{uri}?status=active"));
    assert_eq!(body["data"]["pagination"]["total"], 1);
    let (_, body) = get!(app, &uri);
    assert_eq!(body["data"]["pagination"]["total"], 2);
}

#[actix_web::test]
async fn test_enrollment_transfers_within_academic_year() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    let students = create_students!(app, 1);
    let student = students[0];

    let (_, body) = post!(
        app,
        "/api/v1/classes",
        json!({ "name": "9A", "academic_year": 2025, "shift": "morning", "capacity": 10, "student_ids": [student] })
    );
    let class_a = id_of(&body);
    let (_, body) = post!(
        app,
        "/api/v1/classes",
        json!({ "name": "9B", "academic_year": 2025, "shift": "morning", "capacity": 10 })
    );
    let class_b = id_of(&body);

    let (status, body) = post!(
        app,
        &format!("/api/v1/classes/{class_b}/enrollments"),
        json!({ "student_id": student })
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (_, body) = get!(app, &format!("/api/v1/classes/{class_a}"));
    assert_eq!(body["data"]["active_enrollments"], 0);
    assert_eq!(body["data"]["available_seats"], 10);

    let (_, body) = get!(app, &format!("/api/v1/students/{student}"));
    assert_eq!(body["data"]["class_id"], class_b);
}

#[actix_web::test]
async fn test_class_year_change_keeps_one_active_enrollment_per_year() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    let students = create_students!(app, 1);
    let student = students[0];

    let (_, body) = post!(
        app,
        "/api/v1/classes",
        json!({ "name": "9A", "academic_year": 2025, "shift": "morning", "capacity": 10, "student_ids": [student] })
    );
    let class_a = id_of(&body);
    let (_, body) = post!(
        app,
        "/api/v1/classes",
        json!({ "name": "9B", "academic_year": 2026, "shift": "morning", "capacity": 10 })
    );
    let class_b = id_of(&body);

    // 不同学年，9A 的注册保持有效
    let (status, body) = post!(
        app,
        &format!("/api/v1/classes/{class_b}/enrollments"),
        json!({ "student_id": student })
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let (_, body) = get!(app, &format!("/api/v1/classes/{class_a}"));
    assert_eq!(body["data"]["active_enrollments"], 1);

    let (status, body) = put!(
        app,
        &format!("/api/v1/classes/{class_b}"),
        json!({ "academic_year": 2025 })
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["active_enrollments"], 1);

    let (_, body) = get!(app, &format!("/api/v1/classes/{class_a}"));
    assert_eq!(body["data"]["active_enrollments"], 0);

    let (_, body) = get!(app, &format!("/api/v1/students/{student}"));
    assert_eq!(body["data"]["class_id"], class_b);

    let (_, body) = get!(
        app,
        &format!("/api/v1/classes/{class_a}/enrollments?status=active")
    );
    assert_eq!(body["data"]["pagination"]["total"], 0);
}

#[actix_web::test]
async fn test_enrollment_unknown_student_rejected() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let (_, body) = post!(
        app,
        "/api/v1/classes",
        json!({ "name": "8A", "academic_year": 2025, "shift": "morning", "capacity": 10 })
    );
    let class_id = id_of(&body);

    let (status, body) = post!(
        app,
        &format!("/api/v1/classes/{class_id}/enrollments"),
        json!({ "student_id": 4242 })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), ErrorCode::MissingReferences as i64);

    let (status, body) = post!(
        app,
        "/api/v1/classes/777/enrollments",
        json!({ "student_id": 1 })
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code_of(&body), ErrorCode::ClassNotFound as i64);
}

#[actix_web::test]
async fn test_subject_name_and_code_unique() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    create_subject!(app, "Física", "fis");

    let (status, body) = post!(
        app,
        "/api/v1/subjects",
        json!({ "name": "Física", "code": "FIS2", "category": "Ciências", "workload_hours": 3 })
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(code_of(&body), ErrorCode::DuplicateKey as i64);

    // 代码统一转为大写后比较
    let (status, body) = post!(
        app,
        "/api/v1/subjects",
        json!({ "name": "Física II", "code": " FIS ", "category": "Ciências", "workload_hours": 3 })
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(code_of(&body), ErrorCode::DuplicateKey as i64);

    let (status, body) = post!(
        app,
        "/api/v1/subjects",
        json!({ "name": "Química", "code": "QUI", "category": "Ciências", "workload_hours": 0 })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), ErrorCode::BadRequest as i64);
}

#[actix_web::test]
async fn test_teacher_email_unique_case_insensitive() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    let teacher = create_teacher!(app, "Pedro@Escola.ao");

    let (_, body) = get!(app, &format!("/api/v1/teachers/{teacher}"));
    assert_eq!(body["data"]["teacher"]["email"], "pedro@escola.ao");

    let (status, body) = post!(
        app,
        "/api/v1/teachers",
        json!({ "full_name": "Pedro Costa", "email": "PEDRO@escola.ao" })
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(code_of(&body), ErrorCode::DuplicateKey as i64);

    let (status, body) = post!(
        app,
        "/api/v1/teachers",
        json!({ "full_name": "Pedro Costa", "email": "pedro.costa@escola.ao", "subject_ids": [31] })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), ErrorCode::MissingReferences as i64);
}

#[actix_web::test]
async fn test_teacher_update_clears_optional_fields() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let (status, body) = post!(
        app,
        "/api/v1/teachers",
        json!({
            "full_name": "Carla Neto",
            "email": "carla@escola.ao",
            "phone": "+244 923 000 000",
            "specialization": "Física",
        })
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let teacher = id_of(&body);
    assert_eq!(body["data"]["phone"], "+244 923 000 000");

    // 未提交的字段保持不变
    let (status, body) = put!(
        app,
        &format!("/api/v1/teachers/{teacher}"),
        json!({ "full_name": "Carla M. Neto" })
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["specialization"], "Física");

    let (status, body) = put!(
        app,
        &format!("/api/v1/teachers/{teacher}"),
        json!({ "phone": "", "specialization": "  " })
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["data"]["phone"].is_null(), "{body}");
    assert!(body["data"]["specialization"].is_null(), "{body}");

    let (_, body) = get!(app, &format!("/api/v1/teachers/{teacher}"));
    assert!(body["data"]["teacher"]["phone"].is_null());

    let (status, _) = put!(
        app,
        &format!("/api/v1/teachers/{teacher}"),
        json!({ "phone": "abc" })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_student_number_unique() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    create_students!(app, 1);

    let (status, body) = post!(
        app,
        "/api/v1/students",
        json!({ "full_name": "Outro Aluno", "student_number": "2025-0000" })
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(code_of(&body), ErrorCode::DuplicateKey as i64);
}

#[actix_web::test]
async fn test_delete_class_releases_students() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    let students = create_students!(app, 2);

    let (_, body) = post!(
        app,
        "/api/v1/classes",
        json!({ "name": "7A", "academic_year": 2025, "shift": "morning", "capacity": 5, "student_ids": students })
    );
    let class_id = id_of(&body);

    let (status, _) = delete!(app, &format!("/api/v1/classes/{class_id}"));
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get!(app, &format!("/api/v1/classes/{class_id}"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code_of(&body), ErrorCode::ClassNotFound as i64);

    let (_, body) = get!(app, &format!("/api/v1/students/{}", students[0]));
    assert!(body["data"]["class_id"].is_null());
}

#[actix_web::test]
async fn test_shape_errors_and_not_found() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let (status, body) = post!(
        app,
        "/api/v1/classes",
        json!({ "name": "   ", "academic_year": 2025, "shift": "morning", "capacity": 30 })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code_of(&body), ErrorCode::BadRequest as i64);

    let (status, _) = post!(
        app,
        "/api/v1/classes",
        json!({ "name": "10A", "academic_year": 2025, "shift": "morning", "capacity": 0 })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post!(
        app,
        "/api/v1/classes",
        json!({ "name": "10A", "academic_year": 2025, "shift": "night", "capacity": 30 })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get!(app, "/api/v1/subjects/12345");
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code_of(&body), ErrorCode::SubjectNotFound as i64);

    let (status, _) = get!(app, "/api/v1/students/0");
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_health_reports_database() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let (status, body) = get!(app, "/api/v1/system/health");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["database_ok"], true);
    assert_eq!(body["data"]["system_name"], "Synexa-SIS");
}
