//! GEDIE Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use std::time::Duration;
use anyhow::Context;
use teloxide::{prelude::*, types::Update};
use teloxide::dispatching::UpdateHandler;
use teloxide::utils::command::BotCommands;
use tracing::{error, info, warn};

use gedie::{
    config::Settings,
    database::{create_pool, run_migrations, DatabaseService, PoolConfig},
    dialogue::ExpenseDialogue,
    handlers::{handle_callback_query, handle_command, handle_message, Command},
    services::Ledger,
    state::{ConversationStateStore, StateStorageManager},
    utils::logging,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load settings")?;
    settings.validate().context("invalid settings")?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", gedie::info());

    // Initialize database connection
    info!("Connecting to database...");
    let pool = create_pool(&PoolConfig::from(&settings.database)).await?;
    run_migrations(&pool).await?;
    let ledger: Arc<dyn Ledger> = Arc::new(DatabaseService::new(pool));

    // Initialize conversation state
    let store = Arc::new(ConversationStateStore::from_config(&settings.conversation));
    let mut storage_manager = StateStorageManager::new(
        Arc::clone(&store),
        Duration::from_secs(settings.conversation.cleanup_interval_seconds),
    );
    if settings.conversation.idle_timeout_seconds.is_some() {
        storage_manager.start_cleanup();
    }

    let dialogue = Arc::new(ExpenseDialogue::new(Arc::clone(&store), ledger, settings.web.clone()));

    let bot = Bot::new(&settings.bot.token);
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    info!("Setting up bot handlers...");
    let mut dispatcher = Dispatcher::builder(bot, create_handler())
        .dependencies(dptree::deps![dialogue])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build();

    info!("GEDIE bot is ready, starting polling...");
    dispatcher.dispatch().await;

    storage_manager.stop_cleanup();
    let stats = store.stats();
    info!(active = stats.total, by_state = ?stats.by_state, "Conversation store at shutdown");
    let active = store.list_all_states();
    if !active.is_empty() {
        info!(count = active.len(), "Conversations still in progress at shutdown");
        for (user_id, summary) in &active {
            info!(user_id = user_id, conversation = %summary, "Abandoned conversation");
        }
    }

    info!("GEDIE bot has been shut down.");
    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(handle_commands),
                )
                .branch(dptree::endpoint(handle_messages)),
        )
        .branch(Update::filter_callback_query().endpoint(handle_callbacks))
}

async fn handle_commands(
    bot: Bot,
    msg: Message,
    cmd: Command,
    dialogue: Arc<ExpenseDialogue>,
) -> HandlerResult {
    if let Err(e) = handle_command(bot, msg, cmd, dialogue).await {
        error!(error = %e, "Error handling command");
        return Err(e.into());
    }
    Ok(())
}

async fn handle_messages(
    bot: Bot,
    msg: Message,
    dialogue: Arc<ExpenseDialogue>,
) -> HandlerResult {
    if let Err(e) = handle_message(bot, msg, dialogue).await {
        error!(error = %e, "Error handling message");
        return Err(e.into());
    }
    Ok(())
}

async fn handle_callbacks(
    bot: Bot,
    query: CallbackQuery,
    dialogue: Arc<ExpenseDialogue>,
) -> HandlerResult {
    let user_id = query.from.id.0 as i64;
    if let Err(e) = handle_callback_query(bot, query, dialogue).await {
        error!(user_id = user_id, error = %e, "Error handling callback query");
        return Err(e.into());
    }
    Ok(())
}
