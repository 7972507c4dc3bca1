// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::CrawlError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 行政区划实体
///
/// 从列表页提取时创建，`children` 为空；子级列表抓取完成后
/// 通过 [`Area::attach_children`] 挂载一次，此后不再修改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    /// 区划编码，其前缀决定子级列表页的路径
    pub code: String,
    /// 区划名称，原样保留页面中的文本
    pub name: String,
    /// 下级区划，保持页面中的顺序
    #[serde(default)]
    pub children: Vec<Area>,
}

impl Area {
    /// 创建没有下级区划的实体
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// 挂载下级区划
    pub fn attach_children(&mut self, children: Vec<Area>) {
        debug_assert!(
            self.children.is_empty(),
            "children of {} attached twice",
            self.code
        );
        self.children = children;
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// 取编码的前 `len` 个字符
    ///
    /// # 返回值
    ///
    /// * `Ok(&str)` - 编码前缀
    /// * `Err(CrawlError::MalformedCode)` - 编码不足 `len` 个字符
    pub fn code_prefix(&self, len: usize) -> Result<&str, CrawlError> {
        let end = self
            .code
            .char_indices()
            .map(|(idx, _)| idx)
            .chain(std::iter::once(self.code.len()))
            .nth(len)
            .ok_or_else(|| CrawlError::MalformedCode {
                code: self.code.clone(),
                required: len,
            })?;
        Ok(&self.code[..end])
    }
}

/// 区划层级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaLevel {
    Province,
    City,
    County,
}

impl fmt::Display for AreaLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaLevel::Province => write!(f, "province"),
            AreaLevel::City => write!(f, "city"),
            AreaLevel::County => write!(f, "county"),
        }
    }
}

/// 区划树统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeSummary {
    pub provinces: usize,
    pub cities: usize,
    pub counties: usize,
}

impl TreeSummary {
    /// 统计以省级为根的区划树
    pub fn of(provinces: &[Area]) -> Self {
        let cities = provinces.iter().flat_map(|p| p.children.iter());
        let (cities, counties) =
            cities.fold((0, 0), |(c, n), city| (c + 1, n + city.children.len()));
        Self {
            provinces: provinces.len(),
            cities,
            counties,
        }
    }

    pub fn total(&self) -> usize {
        self.provinces + self.cities + self.counties
    }
}
