use std::{
    io::{BufRead, Write as _},
    sync::Arc,
    time::Duration,
};

use anyhow::{Context, Result};
use uuid::Uuid;

use parley::{
    cli::args_from_env,
    config::{Config, JudgeConfig},
    logging::init_tracing,
    negotiation::{
        ExchangeEvaluator, NegotiationOrchestrator, ScoreProviderPort, SessionStorePort,
        TablePromptSource, TracingTelemetrySink, TurnOutcome,
        adapters::OpenAiCompatibleJudge, store::InMemorySessionStore,
    },
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = args_from_env()?;
    let config = if args.config_path.exists() {
        Config::load(&args.config_path)
            .with_context(|| format!("failed to load config from {}", args.config_path.display()))?
    } else {
        Config::default()
    };

    let logging_guard = init_tracing(&config.logging)?;
    tracing::info!(
        target: "parley",
        run_id = %logging_guard.run_id(),
        providers = config.judge.providers.len(),
        "starting negotiation demo"
    );

    let evaluator = ExchangeEvaluator::new(
        build_providers(&config.judge),
        Duration::from_millis(config.judge.request_timeout_ms),
        Arc::new(TracingTelemetrySink),
    );
    let orchestrator = NegotiationOrchestrator::new(
        evaluator,
        Box::new(TablePromptSource),
        config.interrogation.clone(),
        config.haggling.clone(),
    );
    let store = InMemorySessionStore::new();

    let session_id = args
        .session_id
        .unwrap_or_else(|| Uuid::now_v7().to_string());
    let mut session = orchestrator.open_session(session_id, args.kind);

    println!(
        "{} {} ({}) looks you over.",
        session.personality.title, session.personality.name, session.personality.trait_label
    );
    println!("{}", session.pending_prompt);

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read player input")?;
        match orchestrator.advance(&mut session, &line).await {
            Ok(TurnOutcome::Continue { npc_prompt }) => {
                store.save(&session)?;
                println!("{npc_prompt}");
            }
            Ok(TurnOutcome::Resolved(result)) => {
                store.save(&session)?;
                println!(
                    "Outcome: {:?} ({:?}), adjustment {:.2}",
                    result.decision, result.reason, result.adjustment
                );
                break;
            }
            Err(err) => {
                println!("({err})");
            }
        }
        std::io::stdout().flush().ok();
    }

    Ok(())
}

fn build_providers(judge: &JudgeConfig) -> Vec<Arc<dyn ScoreProviderPort>> {
    judge
        .providers
        .iter()
        .map(|provider| {
            let api_key = provider
                .api_key_env
                .as_deref()
                .and_then(|name| std::env::var(name).ok());
            Arc::new(OpenAiCompatibleJudge::new(
                provider.id.clone(),
                provider.endpoint.clone(),
                provider.model.clone(),
                api_key,
                provider.temperature,
            )) as Arc<dyn ScoreProviderPort>
        })
        .collect()
}
