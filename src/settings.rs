use std::path::PathBuf;

use clap::Parser;
use webview_bridge::bridge::codec::DEFAULT_MAX_JS_STRING_LENGTH;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[arg(long = "loglevel",default_value_t=String::from("info"))]
    pub log_level: String,

    /// Longest JavaScript call (in bytes) the bridge will evaluate
    #[arg(long = "max-js-length", default_value_t = DEFAULT_MAX_JS_STRING_LENGTH)]
    pub max_js_length: usize,

    /// JSON file describing the plugin parameters; a built-in demo list
    /// is used if omitted
    #[arg(long = "params")]
    pub params: Option<PathBuf>,

    /// Print the message monitor to stderr on exit
    #[arg(long = "monitor")]
    pub monitor: bool,

    /// Do not echo parameter and MIDI messages back to the UI
    #[arg(long = "no-echo")]
    pub no_echo: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["webview-bridge"]);
        assert_eq!(cli.log_level, "info");
        assert_eq!(cli.max_js_length, DEFAULT_MAX_JS_STRING_LENGTH);
        assert!(cli.params.is_none());
        assert!(!cli.monitor && !cli.no_echo);
    }

    #[test]
    fn overrides() {
        let cli = Cli::parse_from([
            "webview-bridge",
            "--loglevel",
            "debug",
            "--max-js-length",
            "512",
            "--params",
            "p.json",
            "--no-echo",
        ]);
        assert_eq!(cli.log_level, "debug");
        assert_eq!(cli.max_js_length, 512);
        assert_eq!(cli.params.unwrap(), PathBuf::from("p.json"));
        assert!(cli.no_echo);
    }
}
