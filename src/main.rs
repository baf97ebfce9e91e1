//! Worldstriders character sheet entry point
//!
//! On the web this only installs logging; the page drives `WebSheet`.
//! Natively it is a small CLI over a data directory:
//! - `show` - print the sheet as YAML
//! - `export [-o <file>]` - write the sheet as YAML
//! - `import <file>` - replace the sheet with a YAML document
//! - `reset` - back to a blank sheet
//! - `set-attr <name> <value>` / `rename <name>` / `lang <en|ru>`
//! - `check` - list stored fields that loading would correct

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Worldstriders sheet starting...");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use anyhow::{Context, Result, anyhow, bail};
    use clap::{Parser, Subcommand};
    use log::info;

    use worldstriders_sheet::edit::Edit;
    use worldstriders_sheet::i18n::t;
    use worldstriders_sheet::persistence::FileStore;
    use worldstriders_sheet::schema::{Attribute, Lang};
    use worldstriders_sheet::{SaveStatus, Sheet};

    #[derive(Parser)]
    #[command(name = "worldstriders-sheet")]
    #[command(about = "Character sheet editor for the Worldstriders RPG")]
    #[command(version)]
    struct Cli {
        #[command(subcommand)]
        command: Commands,

        /// Directory holding the saved sheet
        #[arg(short, long, default_value = "data", global = true)]
        data_dir: PathBuf,

        /// Verbose logging (-v, -vv for more)
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,
    }

    #[derive(Subcommand)]
    enum Commands {
        /// Print the sheet as YAML
        Show,
        /// Export the sheet as YAML
        Export {
            /// Output file (stdout when omitted)
            #[arg(short, long)]
            output: Option<PathBuf>,
        },
        /// Replace the sheet with a YAML document
        Import {
            file: PathBuf,
        },
        /// Discard the sheet and start over
        Reset,
        /// Set an attribute (clamped to 1-5)
        SetAttr {
            /// Attribute name, e.g. `luck` or `quickWits`
            name: String,
            #[arg(allow_negative_numbers = true)]
            value: i64,
        },
        /// Rename the character
        Rename {
            name: String,
        },
        /// Switch the sheet language
        Lang {
            /// `en` or `ru`
            lang: String,
        },
        /// List stored fields that loading would correct
        Check,
    }

    fn init_logging(verbosity: u8) {
        let mut builder = env_logger::Builder::from_default_env();
        match verbosity {
            0 => builder.filter_level(log::LevelFilter::Warn),
            1 => builder.filter_level(log::LevelFilter::Info),
            _ => builder.filter_level(log::LevelFilter::Debug),
        };
        builder.init();
    }

    fn report(sheet: &Sheet<FileStore>, status: Option<SaveStatus>) {
        if let Some(status) = status {
            println!("{}", t(sheet.settings().language, status.label_key()));
        }
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();
        init_logging(cli.verbose);
        info!("Worldstriders sheet v{}", env!("CARGO_PKG_VERSION"));

        let store = FileStore::open(&cli.data_dir)
            .with_context(|| format!("opening data dir {}", cli.data_dir.display()))?;
        let mut sheet = Sheet::open(store);

        match cli.command {
            Commands::Show => print!("{}", sheet.export_yaml()?),
            Commands::Export { output } => {
                let yaml = sheet.export_yaml()?;
                match output {
                    Some(path) => {
                        std::fs::write(&path, yaml)
                            .with_context(|| format!("writing {}", path.display()))?;
                        info!("Exported to {}", path.display());
                    }
                    None => print!("{}", yaml),
                }
            }
            Commands::Import { file } => {
                let text = std::fs::read_to_string(&file)
                    .with_context(|| format!("reading {}", file.display()))?;
                let status = sheet.import_yaml(&text).with_context(|| {
                    format!(
                        "{} ({})",
                        t(sheet.settings().language, "importFailed"),
                        file.display()
                    )
                })?;
                report(&sheet, status);
            }
            Commands::Reset => sheet.reset(),
            Commands::SetAttr { name, value } => {
                let attr = Attribute::from_wire(&name)
                    .ok_or_else(|| anyhow!("unknown attribute {:?}", name))?;
                let status = sheet.apply(&Edit::SetAttribute(attr, value));
                report(&sheet, status);
            }
            Commands::Rename { name } => {
                let status = sheet.apply(&Edit::RenameCharacter(name));
                report(&sheet, status);
            }
            Commands::Lang { lang } => {
                let lang = Lang::from_wire(&lang)
                    .ok_or_else(|| anyhow!("unknown language {:?} (en, ru)", lang))?;
                let status = sheet.set_language(lang);
                report(&sheet, status);
            }
            Commands::Check => {
                let audit = sheet
                    .persistence()
                    .audit()
                    .with_context(|| format!("checking {}", cli.data_dir.display()))?;
                match audit {
                    None => println!("no saved sheet in {}", cli.data_dir.display()),
                    Some(found) if found.is_empty() => println!("ok"),
                    Some(found) => {
                        for deviation in &found {
                            eprintln!("{}", deviation);
                        }
                        bail!("{} field(s) would be corrected on load", found.len());
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    cli::run()
}
