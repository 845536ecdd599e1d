mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "chargelog={level},telegram_bot={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    match telegram_bot::Bot::builder()
        .token(&settings.telegram.token)
        .allowed_user(settings.telegram.allowed_user)
        .channel(settings.telegram.channel)
        .build()
    {
        Ok(bot) => bot.run().await,
        Err(err) => tracing::error!("failed to initialize telegram bot: {err}"),
    }

    Ok(())
}
