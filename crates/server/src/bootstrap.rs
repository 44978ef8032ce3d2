//! Process bootstrap shared by both service binaries.
//!
//! Loads `.env` and configuration, installs logging and a panic hook, builds the
//! Tokio runtime and runs the selected service until it exits or Ctrl+C arrives.

use std::process::ExitCode;

use configs::{AppConfig, DEFAULT_CUSTOMER_PORT, DEFAULT_RENTAL_PORT};
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

use crate::startup;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Customer,
    Rental,
}

impl ServiceKind {
    pub fn name(self) -> &'static str {
        match self {
            ServiceKind::Customer => "customer-service",
            ServiceKind::Rental => "rental-service",
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            ServiceKind::Customer => DEFAULT_CUSTOMER_PORT,
            ServiceKind::Rental => DEFAULT_RENTAL_PORT,
        }
    }

    async fn run(self, cfg: AppConfig) -> anyhow::Result<()> {
        match self {
            ServiceKind::Customer => startup::run_customer_service(cfg).await,
            ServiceKind::Rental => startup::run_rental_service(cfg).await,
        }
    }
}

fn init_logging(service: &'static str) {
    // 提前加载 .env，使得 RUST_LOG / LOG_FORMAT 等环境变量生效
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    info!(service, event = "logger_init", "tracing subscriber initialized");
}

pub fn run(kind: ServiceKind) -> ExitCode {
    let service = kind.name();
    init_logging(service);

    // 基础服务上下文（不含敏感信息）
    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    // Panic 钩子：捕获异常并输出错误日志，便于排查问题
    std::panic::set_hook(Box::new(move |info| {
        error!(
            service,
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let cfg = match AppConfig::load_and_validate(kind.default_port()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service, event = "config_invalid", error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service, event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service,
        event = "start",
        %service_id,
        pid,
        version,
        config = %startup::config_summary(&cfg),
        "service starting"
    );

    // 在独立任务中运行服务，并监听 Ctrl+C 停机（无排空/刷盘逻辑）
    rt.block_on(async move {
        let server_task = tokio::spawn(kind.run(cfg));

        tokio::select! {
            res = server_task => {
                match res {
                    Ok(Ok(())) => {
                        info!(service, event = "stop", %service_id, pid, "service stopped normally");
                        ExitCode::SUCCESS
                    }
                    Ok(Err(e)) => {
                        error!(service, event = "run_failed", error = %e, "service returned error");
                        ExitCode::FAILURE
                    }
                    Err(e) => {
                        error!(service, event = "task_join_error", error = %e, "service task join error");
                        ExitCode::FAILURE
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!(service, event = "shutdown_signal", %service_id, pid, "received Ctrl+C, shutting down");
                ExitCode::SUCCESS
            }
        }
    })
}
