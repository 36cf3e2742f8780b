//! # Employee Service サーバー
//!
//! グループ社員と会社リンクを管理する REST API。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `EMPLOYEE_SERVICE_HOST` | No | バインドアドレス（デフォルト: `127.0.0.1`） |
//! | `EMPLOYEE_SERVICE_PORT` | No | ポート番号（デフォルト: `8080`） |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `DATABASE_MAX_CONNECTIONS` | No | 接続プールの最大接続数（デフォルト: `10`） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログレベル（デフォルト: `info,grouplink=debug`） |
//!
//! ## 起動方法
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo run -p grouplink-employee-service
//! ```

use std::sync::Arc;

use anyhow::Context as _;
use grouplink_employee_service::{
    app_builder::build_app,
    config::EmployeeServiceConfig,
    handler::{EmployeeState, ReadinessState},
    usecase::EmployeeUseCaseImpl,
};
use grouplink_infra::{
    db,
    repository::{
        EmployeeRepository,
        LinkRepository,
        PostgresEmployeeRepository,
        PostgresLinkRepository,
        PostgresUserProfileRepository,
        UserProfileRepository,
    },
};
use grouplink_shared::observability::TracingConfig;
use tokio::net::TcpListener;

/// Employee Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("employee-service");
    let _root_span = grouplink_shared::observability::init_tracing(&tracing_config);

    // 設定読み込み
    let config = EmployeeServiceConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Employee Service サーバーを起動します: {}",
        config.bind_address()
    );

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database_url, config.max_connections)
        .await
        .context("データベース接続に失敗しました")?;
    db::ping(&pool)
        .await
        .context("データベースへの疎通確認に失敗しました")?;
    tracing::info!("データベースに接続しました");

    // マイグレーション実行
    db::run_migrations(&pool)
        .await
        .context("マイグレーションの実行に失敗しました")?;
    tracing::info!("マイグレーションを適用しました");

    // Readiness Check 用 State
    let readiness_state = Arc::new(ReadinessState { pool: pool.clone() });

    // 依存コンポーネントを初期化
    let employee_repository: Arc<dyn EmployeeRepository> =
        Arc::new(PostgresEmployeeRepository::new(pool.clone()));
    let user_profile_repository: Arc<dyn UserProfileRepository> =
        Arc::new(PostgresUserProfileRepository::new(pool.clone()));
    let link_repository: Arc<dyn LinkRepository> =
        Arc::new(PostgresLinkRepository::new(pool.clone()));
    let employee_state = Arc::new(EmployeeState {
        usecase: EmployeeUseCaseImpl::new(
            employee_repository,
            user_profile_repository,
            link_repository,
        ),
    });

    // ルーター構築
    let app = build_app(employee_state, readiness_state);

    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("{} にバインドできませんでした", config.bind_address()))?;
    tracing::info!(
        "Employee Service サーバーが起動しました: {}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Employee Service サーバーを停止しました");
    db::close(&pool).await;

    Ok(())
}

/// Ctrl-C または SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl-C ハンドラを登録できませんでした");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM ハンドラを登録できませんでした");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("シャットダウンシグナルを受信しました");
}
