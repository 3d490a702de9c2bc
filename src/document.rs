// ==========================================
// 水果贸易看板数据校验系统 - 文档模型
// ==========================================
// 职责: 把 HTML 页面扫描成结构化元素清单，
//       供文档类检查做标签级查询
// 红线: 不渲染、不执行脚本，只读源文本
// ==========================================
// 结构化查询替代裸子串匹配: 导航类元素的标签名、
// class、href 都按解析出的属性判断，避免偶然文本
// 命中造成的误报/漏报。文字性标记（标语、标题）仍按
// 源文本查找，因为它们本来就是文本。
// ==========================================

use regex::Regex;
use std::sync::OnceLock;

/// 开始标签（捕获标签名与属性串）
fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<([a-zA-Z][a-zA-Z0-9-]*)((?:\s+[^<>]*)?)/?>").unwrap())
}

/// 标签属性 name="value" / name='value'
fn attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
    })
}

// ==========================================
// Element - 结构化元素
// ==========================================

/// 一个开始标签解析出的元素: 标签名 + 属性表
#[derive(Debug, Clone)]
pub struct Element {
    pub tag: String,                    // 标签名（统一小写）
    pub attrs: Vec<(String, String)>,   // 属性表（保序）
}

impl Element {
    /// 取属性值
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// class 属性拆分出的类名清单
    pub fn classes(&self) -> Vec<&str> {
        self.attr("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// 是否带指定类名
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().iter().any(|c| *c == class)
    }

    /// 是否是 <a> 标签
    pub fn is_anchor(&self) -> bool {
        self.tag == "a"
    }
}

// ==========================================
// Document - 结构化文档
// ==========================================

/// 一个 HTML 页面的结构化表示
pub struct Document {
    source: String,
    elements: Vec<Element>,
}

impl Document {
    /// 扫描页面源文本，建立元素清单
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let elements = tag_re()
            .captures_iter(&source)
            .map(|cap| {
                let tag = cap[1].to_ascii_lowercase();
                let attrs = attr_re()
                    .captures_iter(cap.get(2).map_or("", |m| m.as_str()))
                    .map(|a| {
                        let value = a
                            .get(2)
                            .or_else(|| a.get(3))
                            .map_or("", |m| m.as_str())
                            .to_string();
                        (a[1].to_ascii_lowercase(), value)
                    })
                    .collect();
                Element { tag, attrs }
            })
            .collect();

        Self { source, elements }
    }

    /// 页面源文本
    pub fn source(&self) -> &str {
        &self.source
    }

    /// 页面源文本字节数
    pub fn len_bytes(&self) -> usize {
        self.source.len()
    }

    /// 全部元素
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// 是否出现过指定标签
    pub fn has_element(&self, tag: &str) -> bool {
        self.elements.iter().any(|e| e.tag == tag)
    }

    /// 是否出现过指定闭合标签
    pub fn has_closing_tag(&self, tag: &str) -> bool {
        self.source.contains(&format!("</{}>", tag))
    }

    /// 带指定类名的元素
    pub fn elements_with_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements.iter().filter(move |e| e.has_class(class))
    }

    /// 全部 <a> 标签里非空、非锚点('#'开头)的 href
    pub fn anchor_hrefs(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter(|e| e.is_anchor())
            .filter_map(|e| e.attr("href"))
            .filter(|h| !h.is_empty() && !h.starts_with('#'))
            .collect()
    }

    /// 全部 <script> 标签的 src
    pub fn script_srcs(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter(|e| e.tag == "script")
            .filter_map(|e| e.attr("src"))
            .collect()
    }

    /// <title> 内容
    pub fn title(&self) -> Option<&str> {
        let start = self.source.find("<title>")? + "<title>".len();
        let end = self.source[start..].find("</title>")? + start;
        Some(self.source[start..end].trim())
    }

    /// 文字性标记是否出现（文本级查询）
    pub fn contains_marker(&self, marker: &str) -> bool {
        self.source.contains(marker)
    }

    /// 文字性标记出现次数
    pub fn count_marker(&self, marker: &str) -> usize {
        self.source.match_indices(marker).count()
    }
}
