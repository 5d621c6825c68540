use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use medicalbot::render::format_medical_report;
use medicalbot::{ChatPipeline, ConversationHistory, KnowledgeBase, MedicalBotConfig, MedicalBotError};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const APOLOGY: &str = "I apologize, but I'm having trouble processing your request. Please try rephrasing your question or describe your symptoms in more detail.";

const USAGE: &str = "usage: medicalbot [--config <path>] [--once <message>]";

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    once: Option<String>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args::default();
    let mut raw = std::env::args().skip(1);

    while let Some(flag) = raw.next() {
        match flag.as_str() {
            "--config" => args.config = Some(raw.next().context("--config needs a path")?.into()),
            "--once" => args.once = Some(raw.next().context("--once needs a message")?),
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("unknown argument '{other}'\n{USAGE}"),
        }
    }
    Ok(args)
}

async fn answer(pipeline: &ChatPipeline, line: &str, history: &mut ConversationHistory) -> anyhow::Result<()> {
    match pipeline.respond(line, history).await {
        Ok(reply) => println!("{}\n", reply.answer),
        Err(MedicalBotError::EmptyInput) => {}
        Err(MedicalBotError::Responder(e)) => {
            error!("Responder failed: {}", e);
            println!("{APOLOGY}\n");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("medicalbot=info".parse()?))
        .init();

    let args = parse_args()?;
    let config = MedicalBotConfig::load(args.config.as_deref()).context("loading configuration")?;

    let knowledge_base = Arc::new(KnowledgeBase::load_or_empty(&config.knowledge_base_path));
    info!(
        "Knowledge base ready: {} diseases from {}",
        knowledge_base.len(),
        config.knowledge_base_path.display()
    );

    let pipeline = ChatPipeline::from_config(&config, knowledge_base)?;
    let mut history = ConversationHistory::new(config.max_history);

    if let Some(message) = args.once {
        return answer(&pipeline, &message, &mut history).await;
    }

    info!(
        "Session {} started with responder {}; type /summary for a clinician report",
        history.session_id(),
        pipeline.responder_name()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" | "/exit" => break,
            "/summary" => println!(
                "{}\n",
                format_medical_report(&history.summarize(), history.session_id())
            ),
            _ => answer(&pipeline, &line, &mut history).await?,
        }
    }

    Ok(())
}
