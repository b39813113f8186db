use book_library_common::{Category, ReadingStatus, SortKey};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "booklib")]
#[command(about = "個人用読書記録ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 蔵書データの保存先ディレクトリ
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 蔵書一覧を表示（絞り込み・並べ替え）
    List {
        /// ジャンルで絞り込み（例: "Science Fiction"）
        #[arg(short, long, default_value = "")]
        category: String,

        /// 読書状況で絞り込み（Read / Reading / To Read）
        #[arg(short, long, default_value = "")]
        status: String,

        /// タイトル・著者の部分一致検索
        #[arg(short = 'q', long, default_value = "")]
        search: String,

        /// 並べ替えキー (title/author/category/status/rating)
        #[arg(long)]
        sort: Option<SortKey>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 本を追加（タイトル・著者を省略すると対話入力）
    Add {
        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        author: Option<String>,

        /// ジャンル
        #[arg(short, long, default_value = "Fiction")]
        category: Category,

        /// 評価 (1-5)
        #[arg(short, long, default_value = "3", value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,

        /// 読書状況
        #[arg(short, long, default_value = "To Read")]
        status: ReadingStatus,

        /// ページ数
        #[arg(long)]
        pages: Option<u32>,

        #[arg(long)]
        isbn: Option<String>,

        /// メモ・感想
        #[arg(long)]
        notes: Option<String>,

        /// 表紙画像の参照
        #[arg(long)]
        cover: Option<String>,
    },

    /// 本を対話的に編集
    Edit {
        /// 一覧の番号
        index: usize,
    },

    /// 本を削除
    Remove {
        /// 一覧の番号
        index: usize,
    },

    /// お気に入りを切り替え
    Favorite {
        /// 一覧の番号
        index: usize,
    },

    /// 読書状況を変更
    Status {
        /// 一覧の番号
        index: usize,

        /// 新しい読書状況
        status: ReadingStatus,
    },

    /// 読書状況ごとの冊数を表示
    Stats,

    /// 蔵書をサンプルの3冊に戻す
    Reset {
        /// 確認を省略
        #[arg(short, long)]
        yes: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 蔵書データの保存先を設定
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// 既定の並べ替えキーを設定
        #[arg(long)]
        set_default_sort: Option<SortKey>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_with_filters() {
        let cli = Cli::try_parse_from([
            "booklib", "list", "--category", "Fiction", "--sort", "rating", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::List { category, status, sort, json, .. } => {
                assert_eq!(category, "Fiction");
                assert_eq!(status, "");
                assert_eq!(sort, Some(SortKey::Rating));
                assert!(json);
            }
            _ => panic!("list を期待"),
        }
    }

    #[test]
    fn test_unknown_sort_key_falls_back_to_title() {
        let cli = Cli::try_parse_from(["booklib", "list", "--sort", "pages"]).unwrap();
        match cli.command {
            Commands::List { sort, .. } => assert_eq!(sort, Some(SortKey::Title)),
            _ => panic!("list を期待"),
        }
    }

    #[test]
    fn test_add_defaults() {
        let cli = Cli::try_parse_from(["booklib", "add", "-t", "Emma", "-a", "Jane Austen"]).unwrap();
        match cli.command {
            Commands::Add { category, rating, status, .. } => {
                assert_eq!(category, Category::Fiction);
                assert_eq!(rating, 3);
                assert_eq!(status, ReadingStatus::ToRead);
            }
            _ => panic!("add を期待"),
        }
    }

    #[test]
    fn test_add_rejects_rating_out_of_range() {
        assert!(Cli::try_parse_from(["booklib", "add", "-t", "X", "-a", "Y", "-r", "6"]).is_err());
    }

    #[test]
    fn test_global_data_dir() {
        let cli = Cli::try_parse_from(["booklib", "stats", "--data-dir", "/tmp/lib"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/lib")));
    }
}
