use crate::config::Environment;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directives used when `RUST_LOG` is unset. The Gemini exchange stays at
/// debug everywhere so prompt sizes and retry attempts reach the logs.
fn default_filter(env: &Environment) -> &'static str {
    match env {
        Environment::Dev => {
            "civilplan_backend=debug,civilplan_backend::services=debug,tower_http=debug,info"
        }
        Environment::Staging => {
            "civilplan_backend=debug,civilplan_backend::services=debug,tower_http=info,info"
        }
        Environment::Prod => {
            "civilplan_backend=info,civilplan_backend::services=debug,tower_http=info,warn"
        }
    }
}

pub fn init_logging(env: &Environment) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(env)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(env.is_dev())
        .with_line_number(env.is_dev());

    // JSON lines for log shipping in production
    if env.is_prod() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.pretty())
            .init();
    }

    tracing::info!("Logging initialized for {:?} environment", env);
}
