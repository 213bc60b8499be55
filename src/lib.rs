//! Synexa-SIS - 学校信息管理系统后端服务
//!
//! 基于 Actix Web 构建，负责班级、学生、教师、学科与课表的管理。
//! 所有写操作在落库前经过容量、唯一性、引用存在性与课表冲突校验。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 请求日志中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数
//! - `validators`: 业务规则校验器

pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
pub mod validators;
