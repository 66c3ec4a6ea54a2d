use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "statcard", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one card and write it to the output directory.
    Render(RenderArgs),
    /// List the layout identifiers this build knows.
    Layouts,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Option tree JSON.
    #[arg(long)]
    options: PathBuf,

    /// Data tree JSON.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Output directory.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Base file name of the card.
    #[arg(long)]
    name: String,

    /// Layout identifier.
    #[arg(long, default_value = statcard::DEFAULT_LAYOUT)]
    layout: String,

    /// Output format (`png`, `jpg`).
    #[arg(long, default_value = "png")]
    format: String,

    /// Reuse an existing card younger than this many seconds.
    #[arg(long, default_value_t = 0)]
    cache_lifetime: u64,

    /// Append the layout id to the file name.
    #[arg(long)]
    suffix: bool,

    /// Root directory for relative image references (defaults to the options file's directory).
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Directory holding the font files named by the options.
    #[arg(long, default_value = "fonts")]
    fonts: PathBuf,

    /// Print the card as base64 instead of its path.
    #[arg(long)]
    base64: bool,

    /// Draw text as solid blocks instead of loading fonts.
    #[arg(long)]
    block_text: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Layouts => {
            for id in statcard::LayoutRegistry::builtin().ids() {
                println!("{id}");
            }
            Ok(())
        }
    }
}

fn read_tree_json(path: &Path, what: &str) -> anyhow::Result<serde_json::Value> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let r = BufReader::new(f);
    let value: serde_json::Value =
        serde_json::from_reader(r).with_context(|| format!("parse {what} JSON"))?;
    Ok(value)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let options = read_tree_json(&args.options, "options")?;
    let data = match &args.data {
        Some(path) => read_tree_json(path, "data")?,
        None => serde_json::Value::Null,
    };

    let assets_root = match &args.assets {
        Some(dir) => dir.clone(),
        None => args
            .options
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    };
    let typesetter: Box<dyn statcard::Typesetter> = if args.block_text {
        Box::new(statcard::BlockTypesetter::new())
    } else {
        Box::new(statcard::ParleyTypesetter::new(&args.fonts))
    };

    let mut card = statcard::Card::new()
        .output_directory(&args.out_dir)
        .filename(args.name, args.suffix)
        .format(args.format)
        .cache_lifetime(args.cache_lifetime)
        .layout_id(args.layout)
        .options(options)
        .data(data)
        .asset_loader(Box::new(statcard::FsAssetLoader::new(assets_root)))
        .typesetter(typesetter);

    if args.base64 {
        println!("{}", card.to_base64()?);
    } else {
        card.render()?;
        eprintln!("wrote {}", card.output_path()?.display());
    }
    Ok(())
}
