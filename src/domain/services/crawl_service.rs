// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::area::{Area, AreaLevel};
use crate::domain::repositories::page_source::PageSource;
use crate::domain::services::extraction_service::{ExtractionService, ListingShape};
use crate::utils::errors::CrawlError;
use tracing::{debug, info};

/// 市级页面路径使用的编码前缀长度
pub const PROVINCE_PREFIX_LEN: usize = 2;
/// 县级页面路径使用的市级编码前缀长度
pub const CITY_PREFIX_LEN: usize = 4;

/// 爬取服务
///
/// 按省、市、县三级深度优先、严格串行地抓取区划列表页：
/// 一个省的市级列表和全部县级列表抓取完成后才开始下一个省。
pub struct AreaCrawler<S: PageSource> {
    /// 页面来源
    source: S,
    /// 抓取年份，原样拼入页面路径
    year: String,
}

impl<S: PageSource> AreaCrawler<S> {
    /// 创建新的爬取服务实例
    ///
    /// # 参数
    ///
    /// * `source` - 页面来源
    /// * `year` - 抓取年份，例如 `2019`
    pub fn new(source: S, year: impl Into<String>) -> Self {
        Self {
            source,
            year: year.into(),
        }
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// 抓取完整的区划树
    ///
    /// # 返回值
    ///
    /// * `Ok(Vec<Area>)` - 以省级为根的区划树
    /// * `Err(CrawlError)` - 任何一个页面抓取失败或编码格式错误时立即返回，不保留部分结果
    pub async fn crawl(&self) -> Result<Vec<Area>, CrawlError> {
        let mut provinces = self.get_province().await?;
        info!(year = %self.year, count = provinces.len(), "省级区划抓取完成");

        for province in provinces.iter_mut() {
            self.get_city(province).await?;
            info!(
                province = %province.name,
                count = province.children.len(),
                "市级区划抓取完成"
            );

            for city in province.children.iter_mut() {
                self.get_county(city).await?;
                for county in &city.children {
                    info!("{} {} {}", province.name, city.name, county.name);
                }
            }
        }

        Ok(provinces)
    }

    /// 获取省级区划
    pub async fn get_province(&self) -> Result<Vec<Area>, CrawlError> {
        let route = self.province_route();
        self.fetch_listing(AreaLevel::Province, &route, ListingShape::Province)
            .await
    }

    /// 获取省份下的市级区划并挂载到该省份
    pub async fn get_city<'a>(&self, province: &'a mut Area) -> Result<&'a [Area], CrawlError> {
        let route = self.city_route(province)?;
        let cities = self
            .fetch_listing(AreaLevel::City, &route, ListingShape::Subdivision)
            .await?;
        province.attach_children(cities);
        Ok(&province.children)
    }

    /// 获取城市下的县级区划并挂载到该城市
    pub async fn get_county<'a>(&self, city: &'a mut Area) -> Result<&'a [Area], CrawlError> {
        let route = self.county_route(city)?;
        let counties = self
            .fetch_listing(AreaLevel::County, &route, ListingShape::Subdivision)
            .await?;
        city.attach_children(counties);
        Ok(&city.children)
    }

    /// 省级列表页路径：`/{year}/index.html`
    pub fn province_route(&self) -> String {
        format!("/{}/index.html", self.year)
    }

    /// 市级列表页路径：`/{year}/{省编码前2位}.html`
    pub fn city_route(&self, province: &Area) -> Result<String, CrawlError> {
        let province_code = province.code_prefix(PROVINCE_PREFIX_LEN)?;
        Ok(format!("/{}/{}.html", self.year, province_code))
    }

    /// 县级列表页路径：`/{year}/{市编码前2位}/{市编码前4位}.html`
    pub fn county_route(&self, city: &Area) -> Result<String, CrawlError> {
        let province_code = city.code_prefix(PROVINCE_PREFIX_LEN)?;
        let city_code = city.code_prefix(CITY_PREFIX_LEN)?;
        Ok(format!("/{}/{}/{}.html", self.year, province_code, city_code))
    }

    async fn fetch_listing(
        &self,
        level: AreaLevel,
        route: &str,
        shape: ListingShape,
    ) -> Result<Vec<Area>, CrawlError> {
        debug!(%level, route, "抓取列表页");
        let text = self.source.fetch_page(route).await?;
        let areas = ExtractionService::extract(&text, shape);
        debug!(%level, route, count = areas.len(), "列表页提取完成");
        Ok(areas)
    }
}

#[cfg(test)]
#[path = "crawl_service_test.rs"]
mod tests;
