// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 定义领域层依赖的外部协作者接口，具体实现由引擎层和基础设施层提供：
/// - 页面来源（page_source）：按路径获取已解码的列表页文本
/// - 存储仓库（storage_repository）：保存导出的区划数据
pub mod page_source;
pub mod storage_repository;
