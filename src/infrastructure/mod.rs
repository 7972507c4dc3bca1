// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 提供领域层存储接口的具体实现：
/// - 存储（storage）：本地文件系统存储与内存存储
pub mod storage;
