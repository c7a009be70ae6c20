// Penmark preferences CLI - inspect and mutate the preference file headless

use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use penmark_prefs::{FileStorage, HostPlatform, PrefStore};

#[derive(Parser)]
#[command(name = "penmark")]
#[command(about = "Inspect and edit Penmark editor preferences")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full preference set as JSON
    Show,

    /// Flip one preference and print its new value
    Toggle {
        /// Which preference to flip
        flag: Flag,
    },

    /// Reset fonts to the OS defaults
    ResetFonts {
        /// Reset only the editor font
        #[arg(long)]
        editor: bool,

        /// Reset only the preview and code fonts
        #[arg(long)]
        preview: bool,
    },

    /// Print the preferences file path
    Path,
}

#[derive(Clone, Copy, ValueEnum)]
enum Flag {
    Minimap,
    WordWrap,
    LineNumbers,
    VimMode,
    StatusBar,
    WordCount,
    LineHighlight,
    Tabs,
    ZenMode,
    OccurrencesHighlight,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if let Commands::Path = cli.command {
        println!("{}", FileStorage::default_path().display());
        return ExitCode::SUCCESS;
    }

    let mut store = PrefStore::load(FileStorage::open_default());
    store.resolve_platform(&HostPlatform);

    match cli.command {
        Commands::Show => match serde_json::to_string_pretty(store.prefs()) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing preferences: {}", e);
                return ExitCode::FAILURE;
            }
        },
        Commands::Toggle { flag } => {
            let (key, value) = toggle(&mut store, flag);
            println!("{} = {}", key, value);
        }
        Commands::ResetFonts { editor, preview } => {
            // No flag means both.
            let both = !editor && !preview;
            if editor || both {
                store.reset_editor_font();
            }
            if preview || both {
                store.reset_preview_font();
            }
            let p = store.prefs();
            println!("editor.font = {} @ {}", p.editor_font, p.editor_font_size);
            println!("preview.font = {} @ {}", p.preview_font, p.preview_font_size);
            println!("preview.codeFont = {} @ {}", p.code_font, p.code_font_size);
        }
        Commands::Path => unreachable!(),
    }

    ExitCode::SUCCESS
}

/// Flip `flag` and report the storage key with its new value.
fn toggle(store: &mut PrefStore<FileStorage>, flag: Flag) -> (&'static str, String) {
    match flag {
        Flag::Minimap => store.toggle_minimap(),
        Flag::WordWrap => store.toggle_word_wrap(),
        Flag::LineNumbers => store.toggle_line_numbers(),
        Flag::VimMode => store.toggle_vim_mode(),
        Flag::StatusBar => store.toggle_status_bar(),
        Flag::WordCount => store.toggle_word_count(),
        Flag::LineHighlight => store.toggle_line_highlight(),
        Flag::Tabs => store.toggle_tabs(),
        Flag::ZenMode => store.toggle_zen_mode(),
        Flag::OccurrencesHighlight => store.toggle_occurrences_highlight(),
    }

    let p = store.prefs();
    match flag {
        Flag::Minimap => ("editor.minimap", p.minimap.to_string()),
        Flag::WordWrap => ("editor.wordWrap", p.word_wrap.as_str().to_string()),
        Flag::LineNumbers => ("editor.lineNumbers", p.line_numbers.as_str().to_string()),
        Flag::VimMode => ("editor.vimMode", p.vim_mode.to_string()),
        Flag::StatusBar => ("editor.statusBar", p.status_bar.to_string()),
        Flag::WordCount => ("editor.wordCount", p.word_count.to_string()),
        Flag::LineHighlight => (
            "editor.renderLineHighlight",
            p.line_highlight.as_str().to_string(),
        ),
        Flag::Tabs => ("editor.showTabs", p.show_tabs.to_string()),
        Flag::ZenMode => ("editor.zenMode", p.zen_mode.to_string()),
        Flag::OccurrencesHighlight => (
            "editor.occurrencesHighlight",
            p.occurrences_highlight.to_string(),
        ),
    }
}
