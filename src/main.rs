use pingcheck::cli::Cli;
use pingcheck::config::Config;
use pingcheck::core::probe::{default_client, BatchProber, Endpoint, ReachabilityStatus, StatusMap};
use pingcheck::ui::StatusRenderer;
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();

    if cli.init {
        let path = Config::init()?;
        println!("Config: {}", path.display());
        return Ok(());
    }

    let mut config = match &cli.config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(timeout_ms) = cli.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    config.use_locators(&cli.locators);

    if cli.print {
        config.print()?;
        return Ok(());
    }

    if cli.check {
        config.check()?;
        println!("✓ Configuration valid");
        return Ok(());
    }

    config.check()?;

    let client = default_client(&config.client_options())?;
    let prober = BatchProber::new(client, config.probe_options());
    let endpoints = config.endpoints.clone();
    let names: HashMap<String, &Endpoint> = endpoints.iter().map(|e| (e.key(), e)).collect();
    let renderer = StatusRenderer::new();

    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_token.cancel();
        }
    });

    let mut updates = prober.subscribe();
    let print_update = |locator: &str, status: &ReachabilityStatus| {
        if let Some(endpoint) = names.get(locator) {
            println!("{}", renderer.render_row(endpoint, status));
        }
    };

    let batch = async {
        if let [endpoint] = endpoints.as_slice() {
            let (key, status) = tokio::select! {
                result = prober.probe_one(endpoint) => result,
                _ = cancel.cancelled() => (endpoint.key(), prober.status(&endpoint.locator).unwrap_or_default()),
            };
            let mut statuses = StatusMap::new();
            statuses.insert(key, status);
            Ok::<StatusMap, pingcheck::core::probe::ProbeError>(statuses)
        } else {
            prober.probe_all_with_cancel(&endpoints, cancel.clone()).await
        }
    };
    tokio::pin!(batch);

    let statuses = loop {
        tokio::select! {
            result = &mut batch => break result?,
            Ok(update) = updates.recv(), if cli.watch => print_update(&update.locator, &update.status),
        }
    };
    if cli.watch {
        while let Ok(update) = updates.try_recv() {
            print_update(&update.locator, &update.status);
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
    } else if !cli.watch {
        for endpoint in &endpoints {
            let status = statuses.get(&endpoint.key()).copied().unwrap_or_default();
            println!("{}", renderer.render_row(endpoint, &status));
        }
    }

    let all_online = statuses.values().all(|s| *s == ReachabilityStatus::Online);
    if !all_online {
        std::process::exit(1);
    }

    Ok(())
}
