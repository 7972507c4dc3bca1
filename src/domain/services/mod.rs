// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 爬取服务（crawl_service）：省、市、县三级深度优先抓取
/// - 提取服务（extraction_service）：按列表页样式从页面文本中提取区划记录
/// - 导出服务（export_service）：序列化区划树并交给存储仓库持久化
pub mod crawl_service;
pub mod export_service;
pub mod extraction_service;
