//! # texthud CLI
//!
//! Usage:
//!   texthud document.json -o hud.json
//!   echo '{ ... }' | texthud
//!   texthud document.json --settings Settings.txt --playing --spectating
//!   texthud document.json --font Roboto=./fonts/Roboto-Regular.ttf
//!   texthud --example > document.json

use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use texthud::model::Document;
use texthud::settings::{self, HudTargets};
use texthud::{ConvertOptions, FontContext, HudError};

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    output: Option<String>,
    config: Option<String>,
    fonts: Vec<(String, String)>,
    settings: Option<String>,
    targets: HudTargets,
    example: bool,
}

fn parse_args(raw: &[String]) -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = raw.iter().skip(1);

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("Missing value for {}", flag))
        };
        match arg.as_str() {
            "--example" => args.example = true,
            "-o" => args.output = Some(value("-o")?),
            "--config" => args.config = Some(value("--config")?),
            "--settings" => args.settings = Some(value("--settings")?),
            "--playing" => args.targets.playing = true,
            "--spectating" => args.targets.spectating = true,
            "--font" => {
                let pair = value("--font")?;
                let (family, path) = pair
                    .split_once('=')
                    .ok_or_else(|| format!("Expected --font Family=path, got '{}'", pair))?;
                args.fonts.push((family.to_string(), path.to_string()));
            }
            other if other.starts_with('-') => return Err(format!("Unknown option '{}'", other)),
            other => args.input = Some(other.to_string()),
        }
    }

    if args.settings.is_some() && args.targets.is_empty() {
        args.targets.playing = true;
    }
    Ok(args)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let raw: Vec<String> = env::args().collect();
    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("✗ {}", msg);
            process::exit(2);
        }
    };

    if args.example {
        print!("{}", example_document_json());
        return;
    }

    if let Err(e) = run(&args) {
        eprintln!("✗ Failure! No elements converted.\n  {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), HudError> {
    let input = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let options = match &args.config {
        Some(path) => ConvertOptions::from_json(&fs::read_to_string(path)?)?,
        None => ConvertOptions::new(),
    };

    let document: Document = serde_json::from_str(&input)?;

    let mut fonts = FontContext::new();
    fonts.register_entries(&document.fonts)?;
    for (family, path) in &args.fonts {
        fonts.registry_mut().register(family, &fs::read(path)?)?;
    }
    log::debug!(
        "Registered fonts: {:?}",
        fonts.registry().families().collect::<Vec<_>>()
    );

    let hud = texthud::hud_definition(&document, &fonts, &options)?;
    let json = hud.to_json();

    match &args.settings {
        Some(settings_path) => {
            let backup_dir = args
                .input
                .as_deref()
                .and_then(|p| Path::new(p).parent())
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            let backup =
                settings::write_settings(Path::new(settings_path), &backup_dir, &json, args.targets)?;
            eprintln!(
                "✓ Success! {} elements imported into settings file.\n  Backup written to {}",
                hud.elements.len(),
                backup.display()
            );
        }
        None => match &args.output {
            Some(path) => {
                fs::write(path, &json)?;
                eprintln!("✓ Written {} elements to {}", hud.elements.len(), path);
            }
            None => println!("{}", json),
        },
    }
    Ok(())
}

fn example_document_json() -> &'static str {
    r##"{
  "width": 1920,
  "height": 1080,
  "fonts": [
    { "family": "Noto Sans JP Medium", "src": "./fonts/NotoSansJP-Medium.otf" },
    { "family": "Roboto", "src": "./fonts/Roboto-Regular.ttf" },
    { "family": "Furore", "src": "./fonts/furore.otf" }
  ],
  "layers": [
    {
      "name": "title",
      "offsets": { "x": 192, "y": 216 },
      "kind": {
        "type": "Text",
        "font": "Noto Sans JP Medium",
        "fontSize": 54,
        "color": { "r": 1, "g": 0, "b": 0 },
        "text": "Score:",
        "crop": { "x": 192, "y": 216 }
      }
    },
    {
      "name": "M_health",
      "opacity": 80,
      "kind": {
        "type": "Group",
        "children": [
          {
            "name": "label",
            "offsets": { "x": 96, "y": 972 },
            "kind": {
              "type": "Text",
              "font": "Noto Sans JP Medium",
              "fontSize": 32,
              "color": { "r": 1, "g": 1, "b": 1 },
              "text": "HP",
              "crop": { "x": 98, "y": 980 }
            }
          },
          {
            "name": "value",
            "offsets": { "x": 180, "y": 972 },
            "kind": {
              "type": "Text",
              "font": "Noto Sans JP Medium",
              "fontSize": 32,
              "color": { "r": 0.4, "g": 1, "b": 0.4 },
              "text": "100",
              "crop": { "x": 181, "y": 980 }
            }
          }
        ]
      }
    },
    {
      "name": "notes",
      "visible": false,
      "kind": {
        "type": "Text",
        "font": "Roboto",
        "fontSize": 12,
        "text": "ignored"
      }
    }
  ]
}
"##
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("texthud")
            .chain(args.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_parse_full_command_line() {
        let args = parse_args(&argv(&[
            "doc.json",
            "--font",
            "Roboto=./Roboto.ttf",
            "--settings",
            "Settings.txt",
            "--spectating",
        ]))
        .unwrap();
        assert_eq!(args.input.as_deref(), Some("doc.json"));
        assert_eq!(
            args.fonts,
            vec![("Roboto".to_string(), "./Roboto.ttf".to_string())]
        );
        assert_eq!(args.settings.as_deref(), Some("Settings.txt"));
        assert!(args.targets.spectating);
        assert!(!args.targets.playing);
    }

    #[test]
    fn test_settings_default_to_playing() {
        let args = parse_args(&argv(&["--settings", "Settings.txt"])).unwrap();
        assert!(args.targets.playing);
    }

    #[test]
    fn test_bad_options() {
        assert!(parse_args(&argv(&["-o"])).is_err());
        assert!(parse_args(&argv(&["--font", "Roboto"])).is_err());
        assert!(parse_args(&argv(&["--verbose"])).is_err());
    }

    #[test]
    fn test_example_parses() {
        let doc: Document = serde_json::from_str(example_document_json()).unwrap();
        assert_eq!(doc.layers.len(), 3);
        assert_eq!(doc.fonts.len(), 3);
    }
}
