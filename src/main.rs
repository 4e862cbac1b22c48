// ==========================================
// 排课系统 - 批量导入命令行入口
// ==========================================
// 用法:
//   timetable-import preview <file> --entity teacher [--rows 5]
//   timetable-import export <file> --entity class --out classes.jsonl
// ==========================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use timetable_import::api::{ApiError, ImportApi, JsonLinesCreator};
use timetable_import::i18n::{failure_lines, set_locale, summary_message, t_with_args};
use timetable_import::{logging, EntityKind};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.json_logs {
        logging::init_json();
    } else {
        logging::init();
    }
    set_locale(cli.lang.code());

    tracing::debug!(version = timetable_import::VERSION, "{}", timetable_import::APP_NAME);

    if let Err(error) = run(cli).await {
        let message = match error.downcast_ref::<ApiError>() {
            Some(api_error) => api_error.localized(),
            None => format!("{error:#}"),
        };
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let api = ImportApi::from_env();

    match cli.command {
        Command::Preview(args) => {
            let entity: EntityKind = args.entity.into();
            let file = path_str(&args.file)?;
            let preview = api.preview_file(file, entity, args.rows).await?;

            let shown = preview.records.len().to_string();
            let total = preview.total_accepted.to_string();
            println!(
                "{}",
                t_with_args(
                    "import.preview_title",
                    &[
                        ("shown", shown.as_str()),
                        ("total", total.as_str()),
                        ("entity", entity.as_str()),
                    ],
                )
            );
            println!(
                "{}",
                serde_json::to_string_pretty(&preview.records)
                    .context("failed to render preview")?
            );
        }
        Command::Export(args) => {
            let entity: EntityKind = args.entity.into();
            let file = path_str(&args.file)?;
            let sink = JsonLinesCreator::create(&args.out)
                .await
                .map_err(ApiError::from)?;

            let report = api.import_file(file, entity, &sink).await?;

            println!("{}", summary_message(&report));
            for line in failure_lines(&report) {
                println!("{line}");
            }
        }
        Command::Template(args) => {
            let entity: EntityKind = args.entity.into();
            print!("{}", api.template_csv(entity)?);
            if args.headers {
                for (field, headers) in api.template(entity).accepted_headers {
                    println!("{field}: {}", headers.join(" | "));
                }
            }
        }
    }

    Ok(())
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .with_context(|| format!("path is not valid UTF-8: {}", path.display()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Bulk import of teachers, subjects and classes from CSV or workbook files."
)]
struct Cli {
    /// Message language.
    #[arg(long, value_enum, default_value_t = Lang::Vi, global = true)]
    lang: Lang,

    /// Emit logs as JSON on stderr.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the first normalized records as JSON.
    Preview(PreviewArgs),
    /// Run the full import, writing each record's create body as one JSON line.
    Export(ExportArgs),
    /// Print the CSV column template for an entity.
    Template(TemplateArgs),
}

#[derive(clap::Args)]
struct PreviewArgs {
    /// Source file (.csv, .xlsx, .xlsm, .xlsb, .xls, .ods).
    file: PathBuf,

    #[arg(long, value_enum)]
    entity: EntityArg,

    /// Number of records to show (defaults to the configured preview size).
    #[arg(long)]
    rows: Option<usize>,
}

#[derive(clap::Args)]
struct ExportArgs {
    /// Source file (.csv, .xlsx, .xlsm, .xlsb, .xls, .ods).
    file: PathBuf,

    #[arg(long, value_enum)]
    entity: EntityArg,

    /// Destination JSON Lines file.
    #[arg(long)]
    out: PathBuf,
}

#[derive(clap::Args)]
struct TemplateArgs {
    #[arg(long, value_enum)]
    entity: EntityArg,

    /// Also list every header recognized for each field.
    #[arg(long)]
    headers: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum EntityArg {
    Teacher,
    Subject,
    Class,
}

impl From<EntityArg> for EntityKind {
    fn from(value: EntityArg) -> Self {
        match value {
            EntityArg::Teacher => EntityKind::Teacher,
            EntityArg::Subject => EntityKind::Subject,
            EntityArg::Class => EntityKind::Class,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Lang {
    Vi,
    En,
}

impl Lang {
    fn code(self) -> &'static str {
        match self {
            Lang::Vi => "vi",
            Lang::En => "en",
        }
    }
}
