mod cli;
mod commands;
mod config;
mod domain;
mod error_severity;
mod presentation;
mod storage;

use config::APP_CONFIG;
use config::error::ConfigError;
use domain::error::DomainError;
use presentation::output;
use std::env;
use storage::error::InfraError;
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let machine_output = cli::is_machine_output(&args);

    let result = cli::parse_args(&args)
        .and_then(|result| output::output_result(&result, machine_output));

    if let Err(e) = result {
        handle_error(e, machine_output);
    }
}

/// ログ出力を初期化する
///
/// RUST_LOG が未設定なら APP_CONFIG.logging.level を使う。
/// stdout は --machine の JSON 用なのでログは stderr に出す。
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(APP_CONFIG.logging.level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// エラーハンドリングとユーザーへの表示
///
/// anyhow::Error から元のエラー型を downcast して、
/// エラーの種類に応じた exit code とメッセージを決定する。
fn handle_error(error: anyhow::Error, machine_output: bool) {
    let exit_code = determine_exit_code(&error);
    let hint = get_error_hint(&error);

    tracing::debug!(exit_code, "command failed: {:#}", error);
    output::output_error(&error, exit_code, hint, machine_output);

    std::process::exit(exit_code);
}

/// エラーチェーンから適切な終了コードを決定
fn determine_exit_code(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(domain_err) = cause.downcast_ref::<DomainError>() {
            return domain_err.severity().exit_code();
        }

        if let Some(infra_err) = cause.downcast_ref::<InfraError>() {
            return infra_err.severity().exit_code();
        }

        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_err.severity().exit_code();
        }
    }

    // 引数エラーなど分類できないもの
    1
}

/// エラーに対するユーザー向けヒントを取得
fn get_error_hint(error: &anyhow::Error) -> Option<&str> {
    for cause in error.chain() {
        if let Some(domain_err) = cause.downcast_ref::<DomainError>() {
            return domain_err.hint();
        }

        if let Some(infra_err) = cause.downcast_ref::<InfraError>() {
            return infra_err.hint();
        }

        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_err.hint();
        }
    }

    None
}
