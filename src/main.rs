use crate::config::app_config::AppConfig;
use crate::config::parameter;
use crate::db::google_auth::ServiceAccountTokenProvider;
use crate::db::sheets::SheetsClient;
use crate::db::store::StoreClient;
use crate::repository::sheet_repository::{SheetRepository, SheetRepositoryTrait};
use crate::repository::user_repository::{UserRepository, UserRepositoryTrait};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use std::sync::Arc;

mod config;
mod db;
mod dto;
mod error;
mod handler;
mod model;
mod repository;
mod response;
mod routes;
mod service;
mod state;
mod utils;

// 内存分配器
#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[cfg(target_env = "msvc")]
use mimalloc::MiMalloc;

#[cfg(target_env = "msvc")]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() {
    // 参数初始化
    parameter::init();
    let app_config =
        AppConfig::from_env().unwrap_or_else(|e| panic!("Config error: {}", e.to_string()));

    // 日志
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("logger")
        .filename_suffix("log")
        .max_log_files(60)
        .build(&app_config.log_dir)
        .expect("file log init failed!");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let file_log_subscriber = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_timer(time::LocalTime::rfc_3339());

    let console_subscriber = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_timer(time::LocalTime::rfc_3339());
    tracing_subscriber::registry()
        .with(file_log_subscriber)
        .with(console_subscriber)
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // 外部服务客户端，启动时创建，所有请求共用
    let http = reqwest::Client::builder()
        .build()
        .unwrap_or_else(|e| panic!("http client init failed, error:{}", e.to_string()));

    let store = StoreClient::new(&http, &app_config.store);
    let user_repo: Arc<dyn UserRepositoryTrait> = Arc::new(UserRepository::new(&store));

    let sheet_repo: Option<Arc<dyn SheetRepositoryTrait>> = match &app_config.sheet {
        Some(sheet_config) => {
            let tokens = Arc::new(ServiceAccountTokenProvider::new(
                &http,
                &sheet_config.credentials,
            ));
            let client = SheetsClient::new(
                &http,
                &sheet_config.api_url,
                &sheet_config.spreadsheet_id,
                tokens,
            );
            tracing::info!(
                "spreadsheet enabled | call list tab: {} | progress tab: {}",
                sheet_config.call_list_tab,
                sheet_config.progress_tab
            );
            Some(Arc::new(SheetRepository::new(&client, sheet_config)) as Arc<dyn SheetRepositoryTrait>)
        }
        None => None,
    };

    let host = format!("0.0.0.0:{}", app_config.port);
    let listener = tokio::net::TcpListener::bind(host)
        .await
        .unwrap_or_else(|e| panic!("bind failed, error:{}", e.to_string()));

    tracing::info!(
        "listening on {} | password scheme: {:?} | row offsets: {:?}",
        listener
            .local_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_default(),
        app_config.settings.password_scheme,
        app_config.settings.row_offsets
    );

    axum::serve(
        listener,
        routes::root::routes(user_repo, sheet_repo, &app_config.settings),
    )
    .await
    .unwrap_or_else(|e| panic!("Server error: {}", e.to_string()));
}
