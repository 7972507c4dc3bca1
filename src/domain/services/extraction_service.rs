// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::area::Area;
use once_cell::sync::Lazy;
use regex::Regex;

/// 省级列表页：`<td><a href='11.html'>北京市<br/></a></td>`
static PROVINCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<td><a href='(.*?).html'>(.*?)<br/></a></td>")
        .expect("Failed to compile province listing regex")
});

/// 市级与县级列表页：每行两个单元格，分别为编码和名称
static SUBDIVISION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"<tr class=['"].*?['"]><td><a href=.*?>(.*?)</a></td><td><a href=.*?>(.*?)</a></td></tr>"#,
    )
    .expect("Failed to compile subdivision listing regex")
});

/// 列表页样式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingShape {
    /// 省级索引页中的表格单元
    Province,
    /// 市级、县级页面中的表格行
    Subdivision,
}

impl ListingShape {
    /// 该样式对应的正则表达式，第一个捕获组为编码，第二个为名称
    pub fn pattern(&self) -> &'static Regex {
        match self {
            ListingShape::Province => &PROVINCE_PATTERN,
            ListingShape::Subdivision => &SUBDIVISION_PATTERN,
        }
    }
}

/// 提取服务
///
/// 负责从列表页文本中提取区划记录，不校验编码格式
pub struct ExtractionService;

impl ExtractionService {
    /// 提取所有不重叠的匹配，按文档顺序返回，没有匹配时返回空列表
    pub fn extract(text: &str, shape: ListingShape) -> Vec<Area> {
        shape
            .pattern()
            .captures_iter(text)
            .map(|caps| {
                let code = caps.get(1).map_or("", |m| m.as_str());
                let name = caps.get(2).map_or("", |m| m.as_str());
                Area::new(code, name)
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "extraction_service_test.rs"]
mod tests;
