//! 启动时从环境变量构建的配置，构建完成后只读
//!
use crate::config::parameter;
use crate::db::google_auth::ServiceAccountKey;
use crate::utils::encrypt::PasswordScheme;
use axum::http::HeaderValue;
use reqwest::Url;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not defined in the environment.")]
    Missing(&'static str),
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
    #[error("SHEET_ID and GOOGLE_CREDENTIALS must be configured together")]
    IncompleteSheet,
}

#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub url: String,
    pub api_key: String,
}

#[derive(Clone, Debug)]
pub struct SheetConfig {
    pub spreadsheet_id: String,
    pub credentials: ServiceAccountKey,
    pub api_url: Url,
    /// 拨号列表所在的工作表
    pub call_list_tab: String,
    /// 查找用户id / 同步进度所在的工作表
    pub progress_tab: String,
    pub lookup_column: u32,
    pub mirror_column: u32,
}

/// 表格行号 = 数据下标 + 偏移
///
/// 旧版本中读取下一条和写备注使用的偏移不一致，这里两者都可以单独配置
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowOffsets {
    pub next: u32,
    pub remark: u32,
}

impl Default for RowOffsets {
    fn default() -> Self {
        Self {
            next: parameter::DEFAULT_ROW_OFFSET,
            remark: parameter::DEFAULT_ROW_OFFSET,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CorsOrigins {
    #[default]
    Any,
    List(Vec<HeaderValue>),
}

/// 业务相关的设置
#[derive(Clone, Debug, Default)]
pub struct AppSettings {
    pub password_scheme: PasswordScheme,
    pub row_offsets: RowOffsets,
    pub cors_origins: CorsOrigins,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub log_dir: String,
    pub store: StoreConfig,
    pub sheet: Option<SheetConfig>,
    pub settings: AppSettings,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(parameter::get_opt)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let store = StoreConfig {
            url: required("SUPABASE_URL")?.trim_end_matches('/').to_string(),
            api_key: required("SUPABASE_KEY")?,
        };

        let port = parse_number(&lookup, "PORT", parameter::DEFAULT_PORT)?;
        let log_dir = lookup("LOG_DIR").unwrap_or_else(|| parameter::DEFAULT_LOG_DIR.to_string());

        let password_scheme = match lookup("PASSWORD_SCHEME") {
            Some(value) => value
                .parse::<PasswordScheme>()
                .map_err(|reason| ConfigError::Invalid {
                    key: "PASSWORD_SCHEME",
                    reason,
                })?,
            None => PasswordScheme::Plain,
        };

        let row_offsets = RowOffsets {
            next: parse_number(&lookup, "NEXT_ROW_OFFSET", parameter::DEFAULT_ROW_OFFSET)?,
            remark: parse_number(&lookup, "REMARK_ROW_OFFSET", parameter::DEFAULT_ROW_OFFSET)?,
        };

        let cors_origins = parse_cors_origins(lookup("CORS_ALLOWED_ORIGINS"))?;

        Ok(Self {
            port,
            log_dir,
            store,
            sheet: load_sheet_config(&lookup)?,
            settings: AppSettings {
                password_scheme,
                row_offsets,
                cors_origins,
            },
        })
    }
}

fn load_sheet_config<F>(lookup: &F) -> Result<Option<SheetConfig>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw_credentials = match (lookup("GOOGLE_CREDENTIALS"), lookup("GOOGLE_CREDENTIALS_FILE")) {
        (Some(inline), _) => Some(inline),
        (None, Some(path)) => Some(std::fs::read_to_string(&path).map_err(|err| {
            ConfigError::Invalid {
                key: "GOOGLE_CREDENTIALS_FILE",
                reason: format!("{}: {}", path, err),
            }
        })?),
        (None, None) => None,
    };

    let (spreadsheet_id, raw_credentials) = match (lookup("SHEET_ID"), raw_credentials) {
        (Some(id), Some(raw)) => (id, raw),
        (None, None) => return Ok(None),
        _ => return Err(ConfigError::IncompleteSheet),
    };

    let credentials =
        ServiceAccountKey::parse(&raw_credentials).map_err(|reason| ConfigError::Invalid {
            key: "GOOGLE_CREDENTIALS",
            reason,
        })?;

    let api_url_raw =
        lookup("SHEETS_API_URL").unwrap_or_else(|| parameter::DEFAULT_SHEETS_API_URL.to_string());
    let api_url = Url::parse(&api_url_raw).map_err(|err| ConfigError::Invalid {
        key: "SHEETS_API_URL",
        reason: err.to_string(),
    })?;
    if api_url.cannot_be_a_base() {
        return Err(ConfigError::Invalid {
            key: "SHEETS_API_URL",
            reason: "must be an absolute http(s) url".to_string(),
        });
    }

    let call_list_tab =
        lookup("SHEET_NAME").unwrap_or_else(|| parameter::DEFAULT_SHEET_NAME.to_string());
    let progress_tab = lookup("PROGRESS_SHEET_NAME").unwrap_or_else(|| call_list_tab.clone());

    let lookup_column = parse_number(&lookup, "PROGRESS_LOOKUP_COLUMN", 1u32)?;
    let mirror_column = parse_number(&lookup, "PROGRESS_MIRROR_COLUMN", 2u32)?;
    for (key, column) in [
        ("PROGRESS_LOOKUP_COLUMN", lookup_column),
        ("PROGRESS_MIRROR_COLUMN", mirror_column),
    ] {
        if column == 0 {
            return Err(ConfigError::Invalid {
                key,
                reason: "columns start at 1".to_string(),
            });
        }
    }

    Ok(Some(SheetConfig {
        spreadsheet_id,
        credentials,
        api_url,
        call_list_tab,
        progress_tab,
        lookup_column,
        mirror_column,
    }))
}

fn parse_number<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(value) => value.trim().parse::<T>().map_err(|err| ConfigError::Invalid {
            key,
            reason: err.to_string(),
        }),
        None => Ok(default),
    }
}

fn parse_cors_origins(raw: Option<String>) -> Result<CorsOrigins, ConfigError> {
    let raw = match raw {
        Some(raw) if raw.trim() != "*" => raw,
        _ => return Ok(CorsOrigins::Any),
    };
    let mut origins = vec![];
    for origin in raw.split(',').map(str::trim).filter(|o| !o.is_empty()) {
        let value = HeaderValue::from_str(origin).map_err(|err| ConfigError::Invalid {
            key: "CORS_ALLOWED_ORIGINS",
            reason: format!("{}: {}", origin, err),
        })?;
        origins.push(value);
    }
    if origins.is_empty() {
        return Ok(CorsOrigins::Any);
    }
    Ok(CorsOrigins::List(origins))
}
