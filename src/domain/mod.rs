// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：行政区划实体
/// - 仓库接口（repositories）：页面来源与存储的抽象接口
/// - 服务（services）：列表页提取、三级递归抓取和结果导出
///
/// 领域层不依赖于具体的HTTP或文件系统实现。
pub mod models;
pub mod repositories;
pub mod services;
