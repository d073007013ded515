// main.rs
use fret_harmonics::InstrumentConfig;

use std::env;
use std::error::Error;
use tracing_subscriber::EnvFilter;

fn run_fret_harmonics() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let show_text = args.iter().any(|arg| arg == "--text");

    // 参数为预设名或者配置文件路径，默认古典吉他
    let config = match args.iter().find(|arg| !arg.starts_with("--")) {
        Some(arg) => match InstrumentConfig::by_name(arg) {
            Some(preset) => preset,
            None => InstrumentConfig::from_file(arg)?,
        },
        None => InstrumentConfig::classical_guitar(),
    };

    let fretboard = config.build()?;

    if show_text {
        println!("{}", config.name);
        for (index, string) in fretboard.strings().iter().enumerate() {
            println!("string {} ({})", index, string.tuning());
            for point in string.touch_points() {
                println!("  {}", point);
            }
        }
    } else {
        println!("{}", fretboard.to_json()?);
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run_fret_harmonics() {
        Ok(_) => {}
        Err(e) => {
            eprintln!("程序执行失败: {}", e);
            std::process::exit(1);
        }
    }
}
