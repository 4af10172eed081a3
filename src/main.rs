//! keyedit-replay：把一段按键 / 编辑脚本回放到一个文本框上
//!
//! 用法：keyedit-replay <script.json> [--settings <file>]

use keyedit::config::{apply_keybinding_rules, load_settings, parse_chord, Settings};
use keyedit::core::{EventClock, InputEvent, KeyInput};
use keyedit::editor::{
    field_bindings, install_history_shortcuts, install_menu_shortcuts, KeyOutcome, TextField,
};
use keyedit::keymap::{BindingResolver, HandlerRegistry, WidgetKind, WidgetTree};
use serde::Deserialize;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod logging;

#[derive(Debug, Deserialize)]
struct Script {
    #[serde(default)]
    text: String,
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Step {
    /// 逐字符产生文本输入事件
    Type(String),
    /// 按下一个和弦，如 "ctrl+z"
    Press(String),
    /// 程序化替换选区
    Replace(String),
    Select(usize, usize),
    Undo,
    Redo,
}

struct Args {
    script: PathBuf,
    settings: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut script = None;
    let mut settings = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--settings" => {
                let path = args.next().ok_or("--settings needs a file")?;
                settings = Some(PathBuf::from(path));
            }
            _ if script.is_none() => script = Some(PathBuf::from(arg)),
            _ => return Err(format!("unexpected argument: {}", arg)),
        }
    }
    let script = script.ok_or("usage: keyedit-replay <script.json> [--settings <file>]")?;
    Ok(Args { script, settings })
}

fn main() -> ExitCode {
    let logging = logging::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "replay failed");
            eprintln!("keyedit-replay: {}", err);
            if let Some(logging) = &logging {
                eprintln!("logs: {}", logging.log_dir().display());
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = parse_args()?;
    let settings = match &args.settings {
        Some(path) => load_settings(path)?,
        None => Settings::default(),
    };
    let script = load_script(&args.script)?;

    let mut tree = WidgetTree::new();
    let mut handlers = HandlerRegistry::new();
    let window = tree.insert_root(WidgetKind::Window);
    let field_id = tree.insert_child(window, WidgetKind::Component)?;

    let mut bindings = field_bindings(&mut handlers);
    let shortcuts = settings.shortcuts();
    install_history_shortcuts(&mut bindings, &mut handlers, &shortcuts);
    install_menu_shortcuts(&mut bindings, &mut handlers, &shortcuts);
    apply_keybinding_rules(&mut bindings, &mut handlers, &settings.keybindings)?;
    if let Some(slot) = tree.bindings_mut(field_id) {
        *slot = bindings;
    }

    let mut field = TextField::with_text(field_id, &script.text);
    field.set_undo_limit(settings.undo_limit);

    let resolver = BindingResolver::new(&tree, &handlers);
    let mut clock = EventClock::new();

    for step in &script.steps {
        tracing::debug!(?step, "step");
        match step {
            Step::Type(text) => {
                for ch in text.chars() {
                    let event = clock.stamp(InputEvent::Key(KeyInput::typed(field_id, ch)));
                    report(field.handle_key(&resolver, &event));
                }
            }
            Step::Press(value) => {
                let chord = parse_chord(value)?;
                let input = KeyInput::pressed(field_id, chord.code, chord.modifiers);
                let event = clock.stamp(InputEvent::Key(input));
                report(field.handle_key(&resolver, &event));
            }
            Step::Replace(text) => field.replace_selection(text, None)?,
            Step::Select(start, end) => field.select(*start..*end),
            Step::Undo => {
                if let Err(err) = field.undo() {
                    println!("undo: {}", err);
                }
            }
            Step::Redo => {
                if let Err(err) = field.redo() {
                    println!("redo: {}", err);
                }
            }
        }
    }

    println!("{:?}", field.text());
    println!("can_undo={} can_redo={}", field.can_undo(), field.can_redo());
    Ok(())
}

fn load_script(path: &Path) -> Result<Script, Box<dyn Error>> {
    let data = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {}", path.display(), err))?;
    Ok(serde_json::from_str(&data)?)
}

fn report(outcome: KeyOutcome) {
    match outcome {
        KeyOutcome::Unbound => tracing::debug!("key unbound"),
        KeyOutcome::Handled(command) => tracing::trace!(command = command.name(), "handled"),
        KeyOutcome::Failed { command, error } => println!("{}: {}", command.name(), error),
    }
}
