use anyhow::Result;
use postgres::NoTls;
use retailload::{config::Config, error::EtlError, extract, load, normalize};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init config + logging ────────────────────────────────────
    dotenvy::dotenv().ok();
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    let config = Config::from_env()?;

    // ─── 2) extract ──────────────────────────────────────────────────
    info!(path = %config.file_path.display(), "reading workbook");
    let raw = extract::read_workbook(&config.file_path, &extract::SHEET_NAMES)?;
    info!(rows = raw.len(), "extracted raw rows");

    // ─── 3) normalize ────────────────────────────────────────────────
    let rows = normalize::normalize(&raw);
    info!(rows = rows.len(), "normalized rows");

    // ─── 4) load ─────────────────────────────────────────────────────
    let mut client = config
        .pg_config()
        .connect(NoTls)
        .map_err(EtlError::Connect)?;
    load::refresh_table(&mut client, &rows)?;

    info!("all done");
    Ok(())
}
