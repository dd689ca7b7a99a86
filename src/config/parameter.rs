use dotenv;

pub fn init() {
    // .env 文件可选，直接使用进程环境变量也可以
    dotenv::dotenv().ok();
    // 给日志库设置环境变量
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "debug")
    }
}

/// 读取可选参数，空字符串视为未设置
pub fn get_opt(parameter: &str) -> Option<String> {
    std::env::var(parameter)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_LOG_DIR: &str = "log";
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";
pub const DEFAULT_SHEETS_API_URL: &str = "https://sheets.googleapis.com";

// 表格列 (从1开始)：A 姓名 / B 电话 / C 状态备注
pub const NAME_COLUMN: u32 = 1;
pub const PHONE_COLUMN: u32 = 2;
pub const REMARK_COLUMN: u32 = 3;

// 第1行是表头，数据下标0对应第2行
pub const HEADER_ROWS: u32 = 1;
pub const DEFAULT_ROW_OFFSET: u32 = 2;

pub const DEFAULT_PAGE_LIMIT: u32 = 10;

pub const DEFAULT_CALLED_REMARK: &str = "Called";
