use albumdeck::{
    config::Config,
    ui::{app::App, state::Route},
    util::{hook::set_panic_hook, log::initialize_logging},
};

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> color_eyre::Result<()> {
    let config = setup()?;
    let route = std::env::args()
        .nth(1)
        .map(|path| Route::parse(&path))
        .unwrap_or_default();

    let mut app = App::new(config, route).await?;
    app.run().await
}

fn setup() -> color_eyre::Result<Config> {
    color_eyre::install()?;
    dotenv::dotenv().ok();
    set_panic_hook();
    let config = Config::load()?;
    initialize_logging(&config)?;
    Ok(config)
}
