use anyhow::{bail, Context};
use contact_csv::{AppConfig, CsvReader, CsvReaderWriter, LoggingConfig, Mode};
use std::env;
use std::io::Write;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const USAGE: &str = "usage: contact-csv [--config <file>] <copy <input> <output> | dump <input> | count <input>>";

fn init_logging(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("contact_csv={}", logging.level).parse()?);
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    let config_path = match args.iter().position(|a| a == "--config") {
        Some(i) => {
            if i + 1 >= args.len() {
                bail!("--config needs a file argument\n{USAGE}");
            }
            let path = args.remove(i + 1);
            args.remove(i);
            Some(path)
        }
        None => None,
    };

    let config = match config_path.as_deref() {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load_or_default(Some("contact-csv.toml")),
    };
    init_logging(&config.logging)?;

    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["copy", input, output] => copy(&config, input, output).await,
        ["dump", input] => dump(&config, input).await,
        ["count", input] => count(&config, input).await,
        _ => bail!("{USAGE}"),
    }
}

async fn copy(config: &AppConfig, input: &str, output: &str) -> anyhow::Result<()> {
    let mut csv = CsvReaderWriter::with_config(&config.io);
    csv.open(input, Mode::READ)
        .await
        .with_context(|| format!("opening {input}"))?;
    csv.open(output, Mode::WRITE)
        .await
        .with_context(|| format!("creating {output}"))?;

    let mut copied = 0usize;
    while let Some(contact) = csv.read_contact().await? {
        csv.write(&[contact.name(), contact.address()]).await?;
        copied += 1;
    }
    csv.close().await?;

    let (reader, _) = csv.into_parts();
    tracing::info!(
        input,
        output,
        copied,
        skipped = reader.lines_skipped(),
        "Copied contacts"
    );
    Ok(())
}

async fn dump(config: &AppConfig, input: &str) -> anyhow::Result<()> {
    let mut reader = CsvReader::with_config(&config.io);
    reader
        .open(input)
        .await
        .with_context(|| format!("opening {input}"))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    while let Some(contact) = reader.read_contact().await? {
        serde_json::to_writer(&mut out, &contact)?;
        writeln!(out)?;
    }
    reader.close();
    Ok(())
}

async fn count(config: &AppConfig, input: &str) -> anyhow::Result<()> {
    let mut reader = CsvReader::with_config(&config.io);
    reader
        .open(input)
        .await
        .with_context(|| format!("opening {input}"))?;

    let contacts = reader.read_all().await?;
    reader.close();

    tracing::info!(
        input,
        contacts = contacts.len(),
        lines = reader.lines_read(),
        skipped = reader.lines_skipped(),
        "Counted contacts"
    );
    println!("{}", contacts.len());
    Ok(())
}
