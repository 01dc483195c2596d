//! QPSystem - 试卷提交与评审门户后端服务
//!
//! 基于 Actix Web 构建的院校试卷管理系统后端：教师上传试卷，
//! 系主任匿名评审并选定，考务中心基于锁定试卷排考，管理员维护
//! 账号与院系。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证授权中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层（试卷生命周期引擎在 services::papers::lifecycle）
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
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
