use reachprobe::cli::Cli;
use reachprobe::config::Config;
use reachprobe::core::probe::{default_client, probe_report};
use reachprobe::core::ReportRenderer;
use std::io::IsTerminal;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match main_impl().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

async fn main_impl() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();

    // Handle configuration commands
    if cli.init {
        let path = match &cli.config {
            Some(path) => {
                Config::init_at(path)?;
                path.clone()
            }
            None => Config::init()?,
        };
        println!("✓ Wrote default configuration to {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(&cli)?.with_overrides(cli.url.clone(), cli.timeout);

    if cli.print {
        config.print()?;
        return Ok(ExitCode::SUCCESS);
    }

    if cli.check {
        config.check()?;
        println!("✓ Configuration valid");
        return Ok(ExitCode::SUCCESS);
    }

    // Never probe with a config that could leave the timeout unbounded
    config.check()?;

    let options = config.to_probe_options();
    let client = default_client();
    let report = probe_report(client.as_ref(), &config.target_url, &options).await;

    let color = !cli.no_color && std::io::stdout().is_terminal();
    let renderer = ReportRenderer::new(color);
    if cli.json {
        println!("{}", renderer.render_json(&report)?);
    } else {
        println!("{}", renderer.render_text(&report));
    }

    Ok(if report.result.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn load_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => {
            let mut config = Config::load_from(path)?;
            config.apply_env_overrides();
            config
        }
        None => Config::load()?,
    };
    Ok(config)
}
