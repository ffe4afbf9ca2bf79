use std::{
    convert::Infallible,
    io::{self, BufRead},
};

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use harness::{LoggingDelegate, StdoutBrowser};
use log::{debug, info, warn};
use settings::Cli;
use webview_bridge::{BrowserControl, ParamList, ParameterStore, WebViewEditor};

mod harness;
mod settings;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level)).init();

    let params = match &cli.params {
        Some(path) => ParamList::from_file(path)
            .with_context(|| format!("failed to load parameters from {}", path.display()))?,
        None => ParamList::builtin().context("failed to load built-in parameters")?,
    };
    let mut editor = WebViewEditor::new(params);
    info!("{} parameters available", editor.params().param_count());
    for (idx, param) in editor.params().iter().enumerate() {
        debug!("param {}: {} [{}..{}] {}", idx, param.name, param.min, param.max, param.label);
    }
    editor.set_max_js_string_length(cli.max_js_length);
    editor.set_editor_init(|browser: &mut StdoutBrowser<io::Stdout>| browser.load_url("about:blank"));
    editor.set_ui_open(|| info!("UI open; reading messages from stdin, Ctrl+D to quit"));

    // The stdout browser is created synchronously, so complete straight away.
    let request = editor.open()?;
    editor.complete_open(request, Ok::<_, Infallible>(StdoutBrowser::new(io::stdout())));
    editor.on_web_content_loaded()?;

    let mut delegate = LoggingDelegate::default();
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        editor.on_message_from_web_view(&line, &mut delegate);

        for echo in delegate.drain_echoes() {
            if cli.no_echo {
                continue;
            }
            if let Err(e) = editor.send(echo) {
                warn!("Echo not sent: {}", e);
            }
        }
    }

    editor.close();
    info!("Input ended; exit now...");

    if cli.monitor {
        eprint!("{}", editor.monitor().render());
    }
    Ok(())
}
