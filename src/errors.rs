use std::fmt;

#[derive(Debug, Clone)]
pub enum PlotmapError {
    FileOperation(String),
    CsvParse(String),
    Validation(String),
    Serialization(String),
    UpstreamLookup(String),
    UpstreamTransport(String),
}

impl PlotmapError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            PlotmapError::FileOperation(_) => "E001",
            PlotmapError::CsvParse(_) => "E002",
            PlotmapError::Validation(_) => "E003",
            PlotmapError::Serialization(_) => "E004",
            PlotmapError::UpstreamLookup(_) => "E005",
            PlotmapError::UpstreamTransport(_) => "E006",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            PlotmapError::FileOperation(_) => "File Operation Error",
            PlotmapError::CsvParse(_) => "CSV Parse Error",
            PlotmapError::Validation(_) => "Validation Error",
            PlotmapError::Serialization(_) => "Serialization Error",
            PlotmapError::UpstreamLookup(_) => "Upstream Lookup Failed",
            PlotmapError::UpstreamTransport(_) => "Upstream Transport Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            PlotmapError::FileOperation(msg) => msg,
            PlotmapError::CsvParse(msg) => msg,
            PlotmapError::Validation(msg) => msg,
            PlotmapError::Serialization(msg) => msg,
            PlotmapError::UpstreamLookup(msg) => msg,
            PlotmapError::UpstreamTransport(msg) => msg,
        }
    }

    /// 是否为上游返回的业务失败（非 OK 状态 / 空结果），对调用方表现为 400
    pub fn is_upstream_lookup(&self) -> bool {
        matches!(self, PlotmapError::UpstreamLookup(_))
    }

    /// 格式化为彩色输出（用于 Server 模式）
    #[cfg(feature = "server")]
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for PlotmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 默认使用简洁格式
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PlotmapError {}

// 便捷的构造函数
impl PlotmapError {
    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        PlotmapError::FileOperation(msg.into())
    }

    pub fn csv_parse<T: Into<String>>(msg: T) -> Self {
        PlotmapError::CsvParse(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        PlotmapError::Validation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        PlotmapError::Serialization(msg.into())
    }

    pub fn upstream_lookup<T: Into<String>>(msg: T) -> Self {
        PlotmapError::UpstreamLookup(msg.into())
    }

    pub fn upstream_transport<T: Into<String>>(msg: T) -> Self {
        PlotmapError::UpstreamTransport(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<std::io::Error> for PlotmapError {
    fn from(err: std::io::Error) -> Self {
        PlotmapError::FileOperation(err.to_string())
    }
}

impl From<csv::Error> for PlotmapError {
    fn from(err: csv::Error) -> Self {
        PlotmapError::CsvParse(err.to_string())
    }
}

impl From<serde_json::Error> for PlotmapError {
    fn from(err: serde_json::Error) -> Self {
        PlotmapError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for PlotmapError {
    fn from(err: toml::ser::Error) -> Self {
        PlotmapError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlotmapError>;
