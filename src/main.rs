use chordsheet::playback::voice_chord;
use chordsheet::{Config, SheetError};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "chordsheet", version, about = "Convert plain-text chord sheets to inline chord annotations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a chord sheet (file or stdin) to annotated text
    Convert(ConvertArgs),
    /// Print the sample voicing of chord symbols as JSON
    Voice {
        #[arg(required = true)]
        chords: Vec<String>,
    },
}

#[derive(Args)]
struct ConvertArgs {
    /// Input file; reads stdin when omitted
    input: Option<PathBuf>,
    /// Output file; writes stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// YAML options file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Put standalone chord lines in a single bracket
    #[arg(long)]
    group: bool,
    /// Spell transposed chords with flats
    #[arg(long)]
    flats: bool,
    /// Transpose by N semitones (-11 to 11)
    #[arg(short, long, allow_hyphen_values = true)]
    transpose: Option<i32>,
    /// Emit highlighted HTML instead of plain annotations
    #[arg(long)]
    html: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Convert(args) => run_convert(args),
        Command::Voice { chords } => run_voice(&chords),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_convert(args: ConvertArgs) -> Result<(), SheetError> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.group_chords |= args.group;
    config.use_flats |= args.flats;
    if let Some(steps) = args.transpose {
        chordsheet::config::check_transpose_range(steps)?;
        config.transpose_steps = steps;
    }

    let source = match &args.input {
        Some(path) => fs::read_to_string(path).map_err(|e| SheetError::io(e, path.clone()))?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let rendered = if args.html {
        chordsheet::render_html(&source, &config)
    } else {
        chordsheet::convert(&source, &config)
    };

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{}\n", rendered)).map_err(|e| SheetError::io(e, path.clone()))?;
            info!("wrote {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn run_voice(chords: &[String]) -> Result<(), SheetError> {
    for chord in chords {
        let voicing = voice_chord(chord).ok_or_else(|| SheetError::Playback(chord.clone()))?;
        let json = serde_json::to_string(&voicing).map_err(|e| SheetError::Playback(e.to_string()))?;
        println!("{}", json);
    }
    Ok(())
}
