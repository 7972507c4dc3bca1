use encoding_rs::{Encoding, GBK};
use thiserror::Error;
use tracing::debug;

/// 文本编码处理错误类型
#[derive(Error, Debug, Clone)]
pub enum TextEncodingError {
    #[error("无效的编码格式: {0}")]
    InvalidEncoding(String),
}

/// 页面文本解码器
///
/// 按固定的源编码把响应体转换为UTF-8，非法字节序列替换为 U+FFFD，不会失败
#[derive(Debug, Clone, Copy)]
pub struct TextDecoder {
    encoding: &'static Encoding,
}

impl Default for TextDecoder {
    fn default() -> Self {
        Self::gbk()
    }
}

impl TextDecoder {
    /// 统计局页面使用的GBK解码器
    pub fn gbk() -> Self {
        Self { encoding: GBK }
    }

    /// 根据WHATWG编码标签创建解码器，例如 `gbk`、`gb18030`、`utf-8`
    pub fn for_label(label: &str) -> Result<Self, TextEncodingError> {
        Encoding::for_label(label.trim().as_bytes())
            .map(|encoding| Self { encoding })
            .ok_or_else(|| TextEncodingError::InvalidEncoding(label.to_string()))
    }

    /// 编码名称
    pub fn encoding_name(&self) -> &'static str {
        self.encoding.name()
    }

    /// 解码字节为UTF-8文本
    pub fn decode(&self, input: &[u8]) -> String {
        let (decoded, actual, had_errors) = self.encoding.decode(input);
        if had_errors {
            debug!(
                "{} 解码遇到非法字节序列，已替换为 U+FFFD，长度: {} 字节",
                actual.name(),
                input.len()
            );
        }
        decoded.into_owned()
    }
}
