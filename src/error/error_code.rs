// 用户错误
// 11xxx
pub const USER_NOT_FOUND: u32 = 11001;
pub const INVALID_CREDENTIALS: u32 = 11002;
pub const USER_BANNED: u32 = 11003;
pub const ACCOUNT_EXPIRED: u32 = 11004;

// 外部服务错误 (数据库REST接口 / 表格)
// 13xxx
pub const UPSTREAM_REQUEST_FAILED: u32 = 13001;
pub const UPSTREAM_UNEXPECTED_STATUS: u32 = 13002;
pub const UPSTREAM_DECODE_FAILED: u32 = 13003;
pub const UPSTREAM_WRITE_REJECTED: u32 = 13004;
pub const SHEET_TOKEN_ERROR: u32 = 13005;
pub const SHEET_NOT_CONFIGURED: u32 = 13006;
pub const INVALID_USER_RECORD: u32 = 13007;

// 拨号列表错误
// 14xxx
pub const ROW_OUT_OF_RANGE: u32 = 14001;

// request错误
// 20xxx
pub const VALIDATION_ERROR: u32 = 20001;
pub const JSON_REJECTION: u32 = 20002;
pub const QUERY_REJECTION: u32 = 20003;
