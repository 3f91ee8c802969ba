use ai_studio::check;
use ai_studio::cli::{Cli, Commands, ConfigArgs};
use ai_studio::config::{key_fingerprint, Config};
use ai_studio::error::{Result, StudioError};
use ai_studio::provider::Provider;
use ai_studio::proxy::routes::RouteTable;
use ai_studio::proxy::ProxyServer;
use ai_studio::status;
use clap::Parser;
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("✘ {}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "ai_studio=debug,info" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::config_path()?,
    };
    let mut config = Config::load_from(&config_path)?;

    match cli.command {
        Commands::Serve { bind } => {
            println!("🚀 ai-studio - 開発用プロキシ\n");
            let bind_addr = bind.unwrap_or_else(|| config.bind_addr.clone());
            let server = ProxyServer::bind(&config, &bind_addr).await?;
            let addr = server.local_addr()?;
            for route in config.effective_routes() {
                println!("  http://{}{} → {}{}", addr, route.prefix, route.origin, route.path);
            }
            println!("\n✔ http://{} で待ち受け中（Ctrl-Cで終了）", addr);
            server.run().await?;
            println!("✔ 停止しました");
        }

        Commands::Routes => {
            let table = RouteTable::new(config.effective_routes())?;
            for route in table.routes() {
                println!("{:<18} → {}{}", route.prefix, route.origin, route.path);
            }
        }

        Commands::Check { provider, timeout } => {
            println!("🔍 ai-studio - API疎通確認 ({})\n", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
            let providers = if provider.is_empty() {
                Provider::DEFAULT_CHECKS.to_vec()
            } else {
                provider
            };
            let timeout = timeout.map(Duration::from_secs).unwrap_or_else(|| config.timeout());
            let client = check::build_client(timeout)?;

            let spinner = indicatif::ProgressBar::new_spinner();
            spinner.set_message(format!("{}件のAPIを確認中...", providers.len()));
            spinner.enable_steady_tick(Duration::from_millis(80));
            let outcomes = check::run_checks(&client, &config, &providers).await;
            spinner.finish_and_clear();
            let outcomes = outcomes?;

            for outcome in &outcomes {
                println!("{}", outcome.line());
            }

            let failed = outcomes.iter().filter(|o| o.is_failure()).count();
            if failed > 0 {
                println!("\n✘ {}件のAPIで失敗", failed);
                return Ok(1);
            }
            println!("\n✅ 疎通確認完了");
        }

        Commands::Status { input, elapsed } => {
            status::show(&input, elapsed)?;
        }

        Commands::Config(args) => run_config(&mut config, &config_path, args)?,
    }

    Ok(0)
}

fn run_config(config: &mut Config, path: &Path, args: ConfigArgs) -> Result<()> {
    // 引数なしは --show と同じ
    if args.show || (args.set_key.is_none() && args.prompt.is_none()) {
        for line in config.describe(path) {
            println!("{}", line);
        }
        return Ok(());
    }

    if let Some(pair) = args.set_key {
        let (name, key) = match pair.as_slice() {
            [name, key] => (name, key),
            _ => return Err(StudioError::Config("--set-key には PROVIDER KEY を指定してください".into())),
        };
        let provider = Provider::from_name(name)
            .ok_or_else(|| StudioError::Config(format!("不明なプロバイダ: {}", name)))?;
        config.set_api_key(provider, key.clone());
        config.save_to(path)?;
        println!("✔ {}のAPIキーを保存しました ({})", provider, key_fingerprint(key));
        return Ok(());
    }

    if let Some(provider) = args.prompt {
        let key = dialoguer::Password::new()
            .with_prompt(format!("{}のAPIキー", provider))
            .interact()
            .map_err(|e| StudioError::Config(format!("入力を読み取れません: {}", e)))?;
        if key.trim().is_empty() {
            return Err(StudioError::Config("APIキーが空です".into()));
        }
        config.set_api_key(provider, key.trim().to_string());
        config.save_to(path)?;
        println!("✔ {}のAPIキーを保存しました ({})", provider, key_fingerprint(key.trim()));
    }

    Ok(())
}
