use clap::Parser;
use colored::*;
use std::io::Write;
use std::process;

use zaphook_core::{
    dispatch, read_lines, ConsoleSink, HookConfig, LifecycleEvent, LifecycleHooks, OptionCall,
    RecordedEngine,
};

#[derive(Parser, Debug)]
#[command(
    name = "ZAPHOOK",
    version,
    about = "Scan lifecycle hook replay tool",
    override_usage = "zaphook <script> [options]",
    after_help = "\x1b[1;36mEXAMPLES:\x1b[0m
  Replay a recorded scan:         zaphook scan.events
  With alert fixtures:            zaphook scan.events --alerts alerts.json
  Spider results too:             zaphook scan.events --alerts alerts.json --spider urls.txt
  Custom option values:           zaphook scan.events --config options.json
  Parse only:                     zaphook scan.events --dry-run"
)]
pub struct Args {
    #[arg(help = "Event script file, one lifecycle event per line")]
    pub script: String,

    #[arg(long, help = "JSON file with the alerts the engine reports")]
    pub alerts: Option<String>,

    #[arg(long, help = "File with spider-discovered URLs (one per line)")]
    pub spider: Option<String>,

    #[arg(short = 'c', long, help = "JSON file overriding the default engine option values")]
    pub config: Option<String>,

    #[arg(short = 'v', long, default_value_t = false, help = "Show recorded engine option calls after replay")]
    pub verbose: bool,

    #[arg(long, help = "Parse and list the events without running the hooks")]
    pub dry_run: bool,
}

fn main() {
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();
    env_logger::init();

    print_banner();

    let args = Args::parse();

    let lines = match read_lines(&args.script) {
        Ok(lines) => lines,
        Err(e) => {
            eprint!("{}\r\n", format!("[!] Failed to read '{}': {}", args.script, e).red());
            process::exit(1);
        }
    };

    let mut events: Vec<LifecycleEvent> = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        match line.parse::<LifecycleEvent>() {
            Ok(event) => events.push(event),
            Err(e) => {
                eprint!("{}\r\n", format!("[!] {}, line {}: {}", args.script, i + 1, e).red());
                process::exit(1);
            }
        }
    }

    if events.is_empty() {
        eprint!("{}\r\n", format!("[!] No events in '{}'.", args.script).red());
        process::exit(1);
    }

    if args.dry_run {
        print!("{}\r\n", format!("[DRY RUN] Would replay {} event(s):", events.len()).yellow());
        for event in &events {
            print!("  {}\r\n", event);
        }
        std::io::stdout().flush().ok();
        return;
    }

    let config = match args.config.as_deref() {
        Some(path) => match HookConfig::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprint!("{}\r\n", format!("[!] Failed to load config '{}': {}", path, e).red());
                process::exit(1);
            }
        },
        None => HookConfig::default(),
    };

    print_replay_config(&args, &config, events.len());

    let mut engine = match RecordedEngine::from_files(args.alerts.as_deref(), args.spider.as_deref())
    {
        Ok(engine) => engine,
        Err(e) => {
            eprint!("{}\r\n", format!("[!] {}", e).red());
            process::exit(1);
        }
    };

    let hooks = LifecycleHooks::new(config, ConsoleSink::new_ref());

    for event in &events {
        if let Err(e) = dispatch(&hooks, &mut engine, event) {
            eprint!("{}\r\n", format!("[!] Hook failed on '{}': {}", event, e).red());
            process::exit(1);
        }
    }

    print!(
        "\r\n{}\r\n",
        format!("[+] Replay complete. {} event(s) processed.", events.len())
            .green()
            .bold()
    );
    std::io::stdout().flush().ok();

    if args.verbose {
        print_option_calls(engine.recorded_calls());
    }
}

/// Prints the ZAPHOOK ASCII banner.
fn print_banner() {
    let banner = r#"
  ________  ____  _   _  ___   ___  _  __
 |__  /   \|  _ \| | | |/ _ \ / _ \| |/ /
   / /| () | |_) | |_| | | | | | | | ' /
  / /_|  _ \|  __/|  _  | |_| | |_| | . \
 /____|_| \_\_|   |_| |_|\___/ \___/|_|\_\
    "#;
    print!("{}\r\n", banner.bright_cyan().bold());
    print!("{}\r\n", "──────────────────────────────────────────────────".dimmed());
    std::io::stdout().flush().ok();
}

/// Prints the replay configuration summary.
fn print_replay_config(args: &Args, config: &HookConfig, event_count: usize) {
    print!("{}\r\n", format!("[+] Script:     {} ({} events)", args.script, event_count).green().bold());
    print!("{}\r\n", format!("[+] Timeout:    {}s", config.timeout_secs).blue());
    print!("{}\r\n", format!("[+] Max scan:   {}m", config.max_scan_duration_mins).blue());
    print!("{}\r\n", format!("[+] Threads:    {}/host", config.threads_per_host).blue());
    print!("{}\r\n", format!("[+] Delay:      {}ms", config.delay_ms).blue());
    if let Some(ref alerts) = args.alerts {
        print!("{}\r\n", format!("[+] Alerts:     {}", alerts).yellow());
    }
    if let Some(ref spider) = args.spider {
        print!("{}\r\n", format!("[+] Spider:     {}", spider).yellow());
    }
    print!("{}\r\n", "──────────────────────────────────────────────────".dimmed());
    std::io::stdout().flush().ok();
}

/// Prints every engine option call recorded during the replay.
fn print_option_calls(calls: &[OptionCall]) {
    print!("{}\r\n", format!("[*] {} engine option call(s):", calls.len()).bright_cyan());
    for call in calls {
        let line = match call {
            OptionCall::TimeoutInSecs(s) => format!("set_timeout_in_secs({})", s),
            OptionCall::SingleCookieRequestHeader(b) => {
                format!("set_single_cookie_request_header({})", b)
            }
            OptionCall::MaxScanDurationInMins(m) => format!("set_max_scan_duration_in_mins({})", m),
            OptionCall::ThreadsPerHost(t) => format!("set_threads_per_host({})", t),
            OptionCall::DelayInMs(d) => format!("set_delay_in_ms({})", d),
        };
        print!("    {}\r\n", line.dimmed());
    }
    std::io::stdout().flush().ok();
}
