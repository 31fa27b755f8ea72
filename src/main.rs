use clap::Parser;

use buildhook::build::{BuildMessage, BuildTrigger};
use buildhook::cmdargs::{Args, SubCommand};
use buildhook::config::{Config, ConfigError};
use buildhook::http::start_server;
use buildhook::logging::TracingSetup;
use buildhook::service::ServiceHandler;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> color_eyre::Result<()> {
    dotenv::dotenv().ok();
    color_eyre::install().ok();

    let args = Args::parse();
    let config = build_configuration(&args)?;
    let services = ServiceHandler::new_defaults(&config)?;

    TracingSetup::with_setup(config, |config| async move {
        match args.command {
            SubCommand::Serve(_) => start_server(config, services).await?,
            SubCommand::Trigger(trigger_args) => {
                let message = BuildMessage::from_repository(
                    &trigger_args.repository,
                    &trigger_args.branch,
                    trigger_args.commit.as_deref(),
                );

                let message_id = BuildTrigger::from_config(&config)?
                    .dispatch(&services, &message)
                    .await?;
                println!("{message_id}");
            }
        }

        Ok(())
    })
    .await
}

fn build_configuration(args: &Args) -> Result<Config, ConfigError> {
    let mut config = Config::from_env();

    if let Some(t) = &args.telemetry_url {
        config.set_telemetry_url(t.clone());
    }

    if let Some(s) = &args.webhook_secret {
        config.set_webhook_secret(s);
    }

    if let Some(t) = &args.topic {
        config.set_pubsub_topic(t);
    }

    if let Some(b) = &args.active_branches {
        config.set_active_branches(b);
    }

    if let Some(p) = &args.project {
        config.set_project_id(p);
    }

    if let SubCommand::Serve(serve_args) = &args.command {
        if let Some(b) = &serve_args.bind_ip {
            config.set_bind_ip(b);
        }
    }

    config.validate_configuration().map(|_| config)
}
