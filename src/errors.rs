use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlatlinkerError {
    BadRequest(String),
    Forbidden(String),
    NotFound(String),
    StorageFault(String),
    ConfigFault(String),
    AlreadyExists(String),
    AllocationExhausted(String),
}

impl FlatlinkerError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            FlatlinkerError::BadRequest(_) => "E001",
            FlatlinkerError::Forbidden(_) => "E002",
            FlatlinkerError::NotFound(_) => "E003",
            FlatlinkerError::StorageFault(_) => "E004",
            FlatlinkerError::ConfigFault(_) => "E005",
            FlatlinkerError::AlreadyExists(_) => "E006",
            FlatlinkerError::AllocationExhausted(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            FlatlinkerError::BadRequest(_) => "Bad Request",
            FlatlinkerError::Forbidden(_) => "Forbidden",
            FlatlinkerError::NotFound(_) => "Resource Not Found",
            FlatlinkerError::StorageFault(_) => "Storage Fault",
            FlatlinkerError::ConfigFault(_) => "Configuration Fault",
            FlatlinkerError::AlreadyExists(_) => "Already Exists",
            FlatlinkerError::AllocationExhausted(_) => "Key Allocation Exhausted",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            FlatlinkerError::BadRequest(msg) => msg,
            FlatlinkerError::Forbidden(msg) => msg,
            FlatlinkerError::NotFound(msg) => msg,
            FlatlinkerError::StorageFault(msg) => msg,
            FlatlinkerError::ConfigFault(msg) => msg,
            FlatlinkerError::AlreadyExists(msg) => msg,
            FlatlinkerError::AllocationExhausted(msg) => msg,
        }
    }

    /// HTTP status used when the error reaches the request boundary
    pub fn http_status(&self) -> StatusCode {
        match self {
            FlatlinkerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            FlatlinkerError::Forbidden(_) => StatusCode::FORBIDDEN,
            FlatlinkerError::NotFound(_) => StatusCode::NOT_FOUND,
            FlatlinkerError::StorageFault(_) | FlatlinkerError::ConfigFault(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            FlatlinkerError::AlreadyExists(_) => StatusCode::CONFLICT,
            FlatlinkerError::AllocationExhausted(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
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

impl fmt::Display for FlatlinkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for FlatlinkerError {}

// 便捷的构造函数
impl FlatlinkerError {
    pub fn bad_request<T: Into<String>>(msg: T) -> Self {
        FlatlinkerError::BadRequest(msg.into())
    }

    pub fn forbidden<T: Into<String>>(msg: T) -> Self {
        FlatlinkerError::Forbidden(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        FlatlinkerError::NotFound(msg.into())
    }

    pub fn storage_fault<T: Into<String>>(msg: T) -> Self {
        FlatlinkerError::StorageFault(msg.into())
    }

    pub fn config_fault<T: Into<String>>(msg: T) -> Self {
        FlatlinkerError::ConfigFault(msg.into())
    }

    pub fn already_exists<T: Into<String>>(msg: T) -> Self {
        FlatlinkerError::AlreadyExists(msg.into())
    }

    pub fn allocation_exhausted<T: Into<String>>(msg: T) -> Self {
        FlatlinkerError::AllocationExhausted(msg.into())
    }
}

impl From<std::io::Error> for FlatlinkerError {
    fn from(err: std::io::Error) -> Self {
        FlatlinkerError::StorageFault(err.to_string())
    }
}

impl From<serde_json::Error> for FlatlinkerError {
    fn from(err: serde_json::Error) -> Self {
        FlatlinkerError::BadRequest(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FlatlinkerError>;
