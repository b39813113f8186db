use anyhow::Context;
use book_library::{cli, config, prompt, render, storage};
use book_library::Library;
use book_library_common::{BookDraft, Filters, Rating, SortKey};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use std::path::{Path, PathBuf};
use storage::FileStorage;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose, std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = Config::load().context("設定ファイルの読み込みに失敗")?;

    match cli.command {
        Commands::Config { set_data_dir, set_default_sort, show } => {
            run_config(config, cli.data_dir.as_deref(), set_data_dir, set_default_sort, show)
        }
        command => run_library(command, &config, cli.data_dir.as_deref()),
    }
}

/// ログの絞り込み（`-v` 指定時はDEBUG、それ以外は `RUST_LOG` か既定のWARN）
fn log_filter(verbose: bool, rust_log: Option<String>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn run_config(
    mut config: Config,
    data_dir_override: Option<&Path>,
    set_data_dir: Option<PathBuf>,
    set_default_sort: Option<SortKey>,
    show: bool,
) -> anyhow::Result<()> {
    if let Some(dir) = set_data_dir {
        config.set_data_dir(dir)?;
        println!("✔ 保存先を設定しました");
    }
    if let Some(sort) = set_default_sort {
        config.set_default_sort(sort)?;
        println!("✔ 既定の並べ替えを設定しました");
    }
    if show {
        let data_dir = config.resolve_data_dir(data_dir_override)?;
        println!("設定:");
        println!("  保存先: {}", data_dir.display());
        println!("  保存キー: {}", config.storage_key);
        println!("  既定の並べ替え: {}", config.default_sort);
    }
    Ok(())
}

fn run_library(command: Commands, config: &Config, data_dir_override: Option<&Path>) -> anyhow::Result<()> {
    let data_dir = config.resolve_data_dir(data_dir_override)?;
    debug!(data_dir = %data_dir.display(), "opening library");
    let storage = FileStorage::open(&data_dir)
        .with_context(|| format!("保存先を開けません: {}", data_dir.display()))?;
    let mut library = Library::open(storage, &config.storage_key)?;
    let today = chrono::Local::now().date_naive();

    match command {
        Commands::List { category, status, search, sort, json } => {
            let filters = Filters { category, status, search };
            let sort = sort.unwrap_or(config.default_sort);
            let entries = library.view(&filters, sort);

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                let summary = library.summary(&filters, entries.len());
                println!("{}", render::format_list(&entries, &summary));
            }
        }

        Commands::Add { title, author, category, rating, status, pages, isbn, notes, cover } => {
            let mut draft = BookDraft {
                title: title.clone().unwrap_or_default(),
                author: author.clone().unwrap_or_default(),
                category,
                rating: Rating::new(rating)?,
                status,
                cover_image: cover,
                date_read: None,
                pages,
                isbn,
                notes,
            };
            if title.is_none() || author.is_none() {
                println!("📚 新しい本を追加\n");
                draft = prompt::prompt_draft(&draft)?;
            }

            match library.add(draft, today)? {
                Some(index) => {
                    let book = library.get(index)?;
                    println!("✔ 追加しました: [{}] {} / {}", index, book.title, book.author);
                }
                None => println!("タイトルと著者は必須です。追加しませんでした"),
            }
        }

        Commands::Edit { index } => {
            let current = BookDraft::from(library.get(index)?);
            println!("✏️  [{}] {} を編集\n", index, current.title);
            let draft = prompt::prompt_draft(&current)?;
            if library.edit(index, draft)? {
                println!("✔ 保存しました");
            } else {
                println!("タイトルと著者は必須です。変更しませんでした");
            }
        }

        Commands::Remove { index } => {
            let removed = library.remove(index)?;
            println!("✔ 削除しました: {} / {}", removed.title, removed.author);
        }

        Commands::Favorite { index } => {
            let favorite = library.toggle_favorite(index)?;
            let title = &library.get(index)?.title;
            if favorite {
                println!("♥ お気に入りに追加: {}", title);
            } else {
                println!("お気に入りから外しました: {}", title);
            }
        }

        Commands::Status { index, status } => {
            library.set_status(index, status, today)?;
            println!("✔ {} → {}", library.get(index)?.title, status);
        }

        Commands::Stats => {
            println!("{}", render::format_stats(&library.stats()));
        }

        Commands::Reset { yes } => {
            if yes || prompt::confirm("蔵書をすべて削除してサンプルの3冊に戻しますか？")? {
                library.reset()?;
                println!("✔ サンプル蔵書に戻しました");
            }
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}
